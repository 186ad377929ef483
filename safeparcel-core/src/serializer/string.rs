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

//! Strings and byte arrays, carried in the host parcel's own length-prefixed
//! encodings. A host null reads back as the empty value; use `Option` to keep
//! the distinction.

use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::core::value_mismatch;
use crate::serializer::{ParcelDefault, ParcelElement, ParcelField, ParcelValue};
use crate::tag::Tag;
use crate::types::{FieldKind, ListPolicy, ValueTag};

impl ParcelDefault for String {
    #[inline(always)]
    fn parcel_default() -> Self {
        String::new()
    }
}

impl ParcelField for String {
    fn field_kind(_: ListPolicy) -> FieldKind {
        FieldKind::String
    }

    fn write_field(&self, context: &mut WriteContext, field: &FieldDescriptor) -> Result<(), Error> {
        let mark = context.begin_header(field.id);
        context.writer.write_string(Some(self));
        context.finish_header(mark);
        Ok(())
    }

    fn read_field(context: &mut ReadContext, _: &FieldDescriptor, tag: Tag) -> Result<Self, Error> {
        if tag.length == 0 {
            return Ok(String::new());
        }
        Ok(context.reader.read_string()?.unwrap_or_default())
    }
}

impl ParcelElement for String {
    fn element_kind() -> FieldKind {
        FieldKind::String
    }

    #[inline(always)]
    fn write_element(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_string(Some(self));
        Ok(())
    }

    #[inline(always)]
    fn read_element(context: &mut ReadContext) -> Result<Self, Error> {
        Ok(context.reader.read_string()?.unwrap_or_default())
    }
}

impl ParcelValue for String {
    fn value_kind() -> FieldKind {
        FieldKind::String
    }

    fn write_value(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_i32(ValueTag::String.into());
        context.writer.write_string(Some(self));
        Ok(())
    }

    fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error> {
        if tag != ValueTag::String {
            return Err(value_mismatch("String", tag));
        }
        Ok(context.reader.read_string()?.unwrap_or_default())
    }
}

impl ParcelField for Vec<u8> {
    fn field_kind(_: ListPolicy) -> FieldKind {
        FieldKind::Bytes
    }

    fn write_field(&self, context: &mut WriteContext, field: &FieldDescriptor) -> Result<(), Error> {
        let mark = context.begin_header(field.id);
        context.writer.write_byte_array(Some(self));
        context.finish_header(mark);
        Ok(())
    }

    fn read_field(context: &mut ReadContext, _: &FieldDescriptor, tag: Tag) -> Result<Self, Error> {
        if tag.length == 0 {
            return Ok(Vec::new());
        }
        Ok(context.reader.read_byte_array()?.unwrap_or_default())
    }
}

impl ParcelElement for Vec<u8> {
    fn element_kind() -> FieldKind {
        FieldKind::Bytes
    }

    #[inline(always)]
    fn write_element(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_byte_array(Some(self));
        Ok(())
    }

    #[inline(always)]
    fn read_element(context: &mut ReadContext) -> Result<Self, Error> {
        Ok(context.reader.read_byte_array()?.unwrap_or_default())
    }
}

impl ParcelValue for Vec<u8> {
    fn value_kind() -> FieldKind {
        FieldKind::Bytes
    }

    fn write_value(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_i32(ValueTag::ByteArray.into());
        context.writer.write_byte_array(Some(self));
        Ok(())
    }

    fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error> {
        if tag != ValueTag::ByteArray {
            return Err(value_mismatch("byte array", tag));
        }
        Ok(context.reader.read_byte_array()?.unwrap_or_default())
    }
}
