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

//! # SafeParcel
//!
//! SafeParcel is a tagged binary record format. Every field is written as a
//! (field id, byte length) tag followed by its payload, so a reader can skip
//! fields it does not know and keep defaults for fields it does not find. Two
//! versions of the same record type can exchange bytes in both directions
//! without coordinating their schemas.
//!
//! ## Quick Start
//!
//! ```rust
//! use safeparcel::{SafeParcel, SafeParcelable, Error};
//!
//! #[derive(SafeParcelable, Debug, PartialEq)]
//! #[safeparcel(crate = "safeparcel")]
//! struct Bar {
//!     #[safeparcel(id = 1)]
//!     another: i64,
//! }
//!
//! #[derive(SafeParcelable, Debug, PartialEq)]
//! #[safeparcel(crate = "safeparcel")]
//! struct Foo {
//!     #[safeparcel(id = 1)]
//!     name: String,
//!     #[safeparcel(id = 2)]
//!     count: i32,
//!     #[safeparcel(id = 5)]
//!     bars: Vec<Bar>,
//!     #[safeparcel(id = 7, nullable)]
//!     note: Option<String>,
//! }
//!
//! # fn main() -> Result<(), Error> {
//! let foo = Foo {
//!     name: "foo".to_string(),
//!     count: 3,
//!     bars: vec![Bar { another: 12 }],
//!     note: None,
//! };
//!
//! let parcel = SafeParcel::default();
//! let bytes = parcel.encode(&foo)?;
//! let decoded: Foo = parcel.decode(&bytes)?;
//! assert_eq!(foo, decoded);
//! # Ok(())
//! # }
//! ```
//!
//! ## Schema Evolution
//!
//! Field ids are explicit and may be sparse. Adding a field with a new id, or
//! removing one, keeps old and new peers compatible:
//!
//! ```rust
//! use safeparcel::SafeParcelable;
//!
//! #[derive(SafeParcelable, Debug, PartialEq)]
//! #[safeparcel(crate = "safeparcel")]
//! struct V1 {
//!     #[safeparcel(id = 1)]
//!     a: i32,
//! }
//!
//! #[derive(SafeParcelable, Debug, PartialEq)]
//! #[safeparcel(crate = "safeparcel")]
//! struct V2 {
//!     #[safeparcel(id = 1)]
//!     a: i32,
//!     #[safeparcel(id = 4)]
//!     b: String,
//! }
//!
//! let bytes = safeparcel::encode(&V2 { a: 1, b: "new".to_string() }).unwrap();
//! let old: V1 = safeparcel::decode(&bytes).unwrap();
//! assert_eq!(old, V1 { a: 1 });
//!
//! let bytes = safeparcel::encode(&V1 { a: 2 }).unwrap();
//! let new: V2 = safeparcel::decode(&bytes).unwrap();
//! assert_eq!(new, V2 { a: 2, b: String::new() });
//! ```
//!
//! ## Supported Field Types
//!
//! - `bool`, `i8`, `i16`, `i32`, `i64`, `f32`, `f64`
//! - `String` and `Vec<u8>`
//! - Other `SafeParcelable` records
//! - `Vec<T>` of any of the above, `Vec<Option<T>>` of records
//! - `HashMap<K, V>` and `BTreeMap<K, V>` as host generic maps
//! - `Option<T>` and [`Nullable<T>`] for absent and null values
//!
//! ## Embedding
//!
//! [`SafeParcel::encode_into`] and [`SafeParcel::decode_from`] work on any
//! [`ParcelWrite`] / [`ParcelRead`] implementation, so a record can sit in the
//! middle of a larger host buffer.
//!
//! ## Logging
//!
//! The codec logs through the `log` facade: skipped unknown fields, discarded
//! version-gated fields and lenient-mode recoveries. Install any logger to see
//! them.

pub use safeparcel_core::*;
pub use safeparcel_derive::SafeParcelable;
