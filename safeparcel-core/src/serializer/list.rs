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

//! `Vec<T>` fields.
//!
//! Two layouts share the same payload shape, an `i32` count followed by the
//! elements. Arrays write elements untagged (records framed with a byte
//! count); host generic lists write every element as a tagged value.

use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::core::value_mismatch;
use crate::serializer::{ParcelDefault, ParcelElement, ParcelField, ParcelValue};
use crate::tag::Tag;
use crate::types::{FieldKind, ListPolicy, ValueTag};

#[inline(always)]
fn uses_value_list<T: ParcelElement>(policy: ListPolicy) -> bool {
    match policy {
        ListPolicy::Value => true,
        ListPolicy::Direct => false,
        ListPolicy::Default => T::PRIMITIVE,
    }
}

pub fn write_array<T: ParcelElement>(items: &[T], context: &mut WriteContext) -> Result<(), Error> {
    context.writer.write_i32(items.len() as i32);
    for item in items {
        item.write_element(context)?;
    }
    Ok(())
}

pub fn read_array<T: ParcelElement>(context: &mut ReadContext) -> Result<Vec<T>, Error> {
    let len = context.read_count()?;
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(T::read_element(context)?);
    }
    Ok(items)
}

pub fn write_value_list<T: ParcelValue>(
    items: &[T],
    context: &mut WriteContext,
) -> Result<(), Error> {
    context.writer.write_i32(items.len() as i32);
    for item in items {
        item.write_value(context)?;
    }
    Ok(())
}

pub fn read_value_list<T: ParcelValue>(context: &mut ReadContext) -> Result<Vec<T>, Error> {
    let len = context.read_count()?;
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(T::read_value(context)?);
    }
    Ok(items)
}

impl<T> ParcelDefault for Vec<T> {
    #[inline(always)]
    fn parcel_default() -> Self {
        Vec::new()
    }
}

impl<T: ParcelElement + ParcelValue> ParcelField for Vec<T> {
    fn field_kind(policy: ListPolicy) -> FieldKind {
        let element = Box::new(T::element_kind());
        if uses_value_list::<T>(policy) {
            FieldKind::ListOf(element)
        } else {
            FieldKind::ArrayOf(element)
        }
    }

    fn write_field(&self, context: &mut WriteContext, field: &FieldDescriptor) -> Result<(), Error> {
        let mark = context.begin_header(field.id);
        if uses_value_list::<T>(field.list_policy()) {
            write_value_list(self, context)?;
        } else {
            write_array(self, context)?;
        }
        context.finish_header(mark);
        Ok(())
    }

    fn read_field(
        context: &mut ReadContext,
        field: &FieldDescriptor,
        tag: Tag,
    ) -> Result<Self, Error> {
        if tag.length == 0 {
            return Ok(Vec::new());
        }
        if uses_value_list::<T>(field.list_policy()) {
            read_value_list(context)
        } else {
            read_array(context)
        }
    }
}

impl<T: ParcelValue> ParcelValue for Vec<T> {
    fn value_kind() -> FieldKind {
        FieldKind::ListOf(Box::new(T::value_kind()))
    }

    fn write_value(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_i32(ValueTag::List.into());
        write_value_list(self, context)
    }

    fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error> {
        match tag {
            ValueTag::List => read_value_list(context),
            // untagged host strings
            ValueTag::StringArray => {
                let len = context.read_count()?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(T::read_value_data(context, ValueTag::String)?);
                }
                Ok(items)
            }
            other => Err(value_mismatch("list", other)),
        }
    }
}
