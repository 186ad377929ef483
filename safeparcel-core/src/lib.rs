// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! # SafeParcel Core
//!
//! Core implementation of the SafeParcel record codec: a tagged, field-id
//! addressed binary format whose peers may run different versions of the same
//! schema.
//!
//! ## Architecture
//!
//! - **`tag`**: packs a (field id, byte length) pair into one or two words
//! - **`buffer`**: the positionable host buffer traits and the in-memory `Writer`/`Reader`
//! - **`meta`**: field descriptors and the per-type descriptor table
//! - **`resolver`**: the process-wide descriptor registry, call contexts and buffer pool
//! - **`serializer`**: field encodings, the record encoder and decoder
//! - **`safeparcel`**: the `SafeParcel` marshaller and its entry points
//! - **`error`**: the error type
//!
//! ## Wire format
//!
//! A record is an object header (field id 20293, body length) followed by its
//! fields. Each field is a tag word holding the id in the low 16 bits and the
//! payload length in the high 16 bits; payloads of `0xFFFF` bytes or more put
//! `0xFFFF` there and the length in a second word. Integers are little-endian
//! and every host value is padded to four bytes.
//!
//! ## Compatibility
//!
//! A decoder skips field ids it does not know and leaves fields it knows but
//! does not find at their default. Old and new versions of a record type can
//! therefore read each other's bytes without coordination.
//!
//! This crate is normally used through the `safeparcel` crate, which also
//! re-exports the `SafeParcelable` derive macro.

pub mod buffer;
pub mod config;
pub mod error;
pub mod meta;
pub mod resolver;
pub mod safeparcel;
pub mod serializer;
pub mod tag;
pub mod types;
pub mod util;

pub use crate::buffer::{ParcelRead, ParcelWrite, Reader, Writer};
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::meta::{FieldDescriptor, FieldDescriptorTable};
pub use crate::resolver::context::{ReadContext, WriteContext};
pub use crate::resolver::registry::DescriptorRegistry;
pub use crate::safeparcel::{decode, encode, SafeParcel};
pub use crate::serializer::{
    Bundle, Nullable, ParcelDefault, ParcelElement, ParcelField, ParcelValue, SafeParcelable,
    VersionCode,
};
pub use crate::tag::{Tag, SAFE_PARCEL_OBJECT_MAGIC};
pub use crate::types::{FieldKind, ListPolicy, PrimitiveKind, ValueTag};
