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

//! # SafeParcel Derive Macro
//!
//! This crate provides `#[derive(SafeParcelable)]`, which turns a struct with
//! named fields into a SafeParcel record type. The macro generates the field
//! descriptor table and the per-field accessors the codec needs, so no runtime
//! reflection is involved.
//!
//! ## Attributes
//!
//! Every serialized field carries a wire id:
//!
//! ```rust, ignore
//! use safeparcel::SafeParcelable;
//! use std::collections::HashMap;
//!
//! #[derive(SafeParcelable, Debug, PartialEq)]
//! #[safeparcel(name = "LocationRequest")]
//! struct Request {
//!     #[safeparcel(id = 1, version_code = 2)]
//!     version_code: i32,
//!     #[safeparcel(id = 2)]
//!     interval: i64,
//!     #[safeparcel(id = 3, nullable)]
//!     tag: Option<String>,
//!     #[safeparcel(id = 4, since = 2, direct_list)]
//!     priorities: Vec<i32>,
//!     #[safeparcel(id = 6)]
//!     extras: HashMap<String, String>,
//!     #[safeparcel(skip)]
//!     cached: Option<u64>,
//! }
//! ```
//!
//! - `id = N`: field id, `0..=65535` except `20293`, unique within the struct
//! - `nullable`: write a zero-length marker for `None`
//! - `since = G`: drop the field when the record's versionCode is below `G`
//! - `version_code = V`: the record's versionCode field; `V` is the local version
//! - `direct_list` / `value_list`: choose the array or the host list encoding
//! - `skip`: not serialized; the field holds its `Default` value
//!
//! On the struct, `name = "..."` sets the type name used in diagnostics and
//! host values, and `crate = "..."` points generated code at the core crate
//! when it is not a direct dependency named `safeparcel_core`; code that only
//! depends on the facade uses `crate = "safeparcel"`.
//!
//! ## Generated Code
//!
//! - `ParcelDefault`: every field at its default
//! - `SafeParcelable`: the descriptor list and the id-dispatched field accessors
//! - `ParcelField`, `ParcelElement`, `ParcelValue`: so the record can be nested
//!   in other records, arrays, lists and maps

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;
mod util;

/// Derive macro for SafeParcel record types.
///
/// # Example
///
/// ```rust, ignore
/// use safeparcel::SafeParcelable;
///
/// #[derive(SafeParcelable, Debug, PartialEq)]
/// struct Bar {
///     #[safeparcel(id = 1)]
///     another: i64,
/// }
/// ```
#[proc_macro_derive(SafeParcelable, attributes(safeparcel))]
pub fn proc_macro_derive_safeparcelable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_safeparcelable(&input)
}
