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

//! Optional fields.
//!
//! A zero-length payload is the wire form of null. `Option<T>` writes it only
//! for `nullable` fields and otherwise omits `None`; `Nullable<T>` keeps
//! "never set" and "set to null" apart on both sides of the wire.

use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::record::{read_record_element, write_record_element};
use crate::serializer::{ParcelDefault, ParcelElement, ParcelField, ParcelValue, SafeParcelable};
use crate::tag::Tag;
use crate::types::{FieldKind, ListPolicy, ValueTag};

impl<T> ParcelDefault for Option<T> {
    #[inline(always)]
    fn parcel_default() -> Self {
        None
    }
}

impl<T: ParcelField> ParcelField for Option<T> {
    fn field_kind(policy: ListPolicy) -> FieldKind {
        T::field_kind(policy)
    }

    fn write_field(&self, context: &mut WriteContext, field: &FieldDescriptor) -> Result<(), Error> {
        match self {
            Some(value) => value.write_field(context, field),
            None => {
                if field.nullable {
                    context.write_header(field.id, 0);
                }
                Ok(())
            }
        }
    }

    fn read_field(
        context: &mut ReadContext,
        field: &FieldDescriptor,
        tag: Tag,
    ) -> Result<Self, Error> {
        if tag.length == 0 {
            return Ok(None);
        }
        T::read_field(context, field, tag).map(Some)
    }
}

/// `None` elements of a record array are written as a zero byte count.
impl<T: SafeParcelable> ParcelElement for Option<T> {
    fn element_kind() -> FieldKind {
        FieldKind::Record(T::type_name())
    }

    fn write_element(&self, context: &mut WriteContext) -> Result<(), Error> {
        match self {
            Some(record) => write_record_element(record, context),
            None => {
                context.writer.write_i32(0);
                Ok(())
            }
        }
    }

    fn read_element(context: &mut ReadContext) -> Result<Self, Error> {
        read_record_element(context)
    }
}

impl<T: ParcelValue> ParcelValue for Option<T> {
    fn value_kind() -> FieldKind {
        T::value_kind()
    }

    fn write_value(&self, context: &mut WriteContext) -> Result<(), Error> {
        match self {
            Some(value) => value.write_value(context),
            None => {
                context.writer.write_i32(ValueTag::Null.into());
                Ok(())
            }
        }
    }

    fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error> {
        if tag == ValueTag::Null {
            return Ok(None);
        }
        T::read_value_data(context, tag).map(Some)
    }
}

/// A field value that distinguishes "never set" from "set to null".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// Not written; reads back when the field is absent.
    #[default]
    Unset,
    /// Written as a zero-length marker.
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Nullable::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Nullable::Unset => Nullable::Unset,
            Nullable::Null => Nullable::Null,
            Nullable::Value(v) => Nullable::Value(v),
        }
    }

    /// The value, folding both `Unset` and `Null` into `None`.
    pub fn value(self) -> Option<T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Nullable::Value(v),
            None => Nullable::Null,
        }
    }
}

impl<T> ParcelDefault for Nullable<T> {
    #[inline(always)]
    fn parcel_default() -> Self {
        Nullable::Unset
    }
}

impl<T: ParcelField> ParcelField for Nullable<T> {
    fn field_kind(policy: ListPolicy) -> FieldKind {
        T::field_kind(policy)
    }

    fn write_field(&self, context: &mut WriteContext, field: &FieldDescriptor) -> Result<(), Error> {
        match self {
            Nullable::Unset => Ok(()),
            Nullable::Null => {
                context.write_header(field.id, 0);
                Ok(())
            }
            Nullable::Value(value) => value.write_field(context, field),
        }
    }

    fn read_field(
        context: &mut ReadContext,
        field: &FieldDescriptor,
        tag: Tag,
    ) -> Result<Self, Error> {
        if tag.length == 0 {
            return Ok(Nullable::Null);
        }
        T::read_field(context, field, tag).map(Nullable::Value)
    }
}
