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

use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::tag::Tag;
use crate::types::{FieldKind, ListPolicy, ValueTag};

/// Value a field holds before decoding and after a version gate discards it.
pub trait ParcelDefault: Sized {
    fn parcel_default() -> Self;
}

// No blanket impl for T: Default. It would conflict with the record impls the
// derive macro generates for types that also implement Default.

/// A type that can be stored in a record field.
pub trait ParcelField: ParcelDefault {
    fn field_kind(policy: ListPolicy) -> FieldKind;

    /// Writes the field tag and payload, or nothing when the value is absent.
    fn write_field(&self, context: &mut WriteContext, field: &FieldDescriptor)
        -> Result<(), Error>;

    /// Reads the payload announced by `tag`. The cursor sits right after the tag.
    ///
    /// The decoder moves the cursor to the end of the payload afterwards, so
    /// implementations may leave trailing bytes unread.
    fn read_field(
        context: &mut ReadContext,
        field: &FieldDescriptor,
        tag: Tag,
    ) -> Result<Self, Error>;
}

/// A type that can be an element of an array field.
pub trait ParcelElement: Sized {
    /// Primitive elements go through the host generic list unless the field
    /// asks for `direct_list`.
    const PRIMITIVE: bool = false;

    fn element_kind() -> FieldKind;

    fn write_element(&self, context: &mut WriteContext) -> Result<(), Error>;

    fn read_element(context: &mut ReadContext) -> Result<Self, Error>;
}

/// A type the host parcel can carry as a tagged generic value.
pub trait ParcelValue: Sized {
    fn value_kind() -> FieldKind;

    /// Writes the value tag followed by the value.
    fn write_value(&self, context: &mut WriteContext) -> Result<(), Error>;

    fn read_value(context: &mut ReadContext) -> Result<Self, Error> {
        let tag = ValueTag::from_wire(context.reader.read_i32()?)?;
        Self::read_value_data(context, tag)
    }

    /// Reads the value that follows an already consumed `tag`.
    fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error>;
}

/// A record type: a set of fields addressed by id.
///
/// Implemented by `#[derive(SafeParcelable)]`; hand-written implementations
/// must keep [`describe_fields`](SafeParcelable::describe_fields) pure.
pub trait SafeParcelable: ParcelDefault + 'static {
    /// Name used in diagnostics and in host generic values.
    fn type_name() -> &'static str;

    fn describe_fields() -> Vec<FieldDescriptor>;

    /// Writes the field described by `field`.
    fn encode_field(&self, context: &mut WriteContext, field: &FieldDescriptor)
        -> Result<(), Error>;

    /// Decodes the payload of `field` into `self`.
    fn decode_field(
        &mut self,
        context: &mut ReadContext,
        field: &FieldDescriptor,
        tag: Tag,
    ) -> Result<(), Error>;

    /// Puts field `id` back to its default value.
    fn reset_field(&mut self, id: u16);

    /// Value of the record's versionCode field, if it has one.
    fn version_code(&self) -> Option<i64> {
        None
    }
}

/// Integer types usable as a record's versionCode.
pub trait VersionCode {
    fn as_version_code(&self) -> Option<i64>;
}

macro_rules! impl_version_code {
    ($($ty:ty),*) => {
        $(
            impl VersionCode for $ty {
                #[inline(always)]
                fn as_version_code(&self) -> Option<i64> {
                    Some(*self as i64)
                }
            }
        )*
    };
}

impl_version_code!(i8, i16, i32, i64);

impl<T: VersionCode> VersionCode for Option<T> {
    fn as_version_code(&self) -> Option<i64> {
        self.as_ref().and_then(VersionCode::as_version_code)
    }
}

/// Error for a host value whose tag does not fit the expected Rust type.
#[cold]
pub(crate) fn value_mismatch(expected: &str, found: ValueTag) -> Error {
    Error::unsupported_kind(format!(
        "expected {expected} host value, found {found:?}"
    ))
}
