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

//! Records nested in other records: as a field, as an array element and as a
//! host generic value. The derive macro routes the field, element and value
//! traits of every record type through these functions.

use crate::ensure;
use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::core::value_mismatch;
use crate::serializer::decoder::read_record;
use crate::serializer::encoder::write_record;
use crate::serializer::SafeParcelable;
use crate::tag::Tag;
use crate::types::{FieldKind, ValueTag};

#[inline(always)]
pub fn record_kind<T: SafeParcelable>() -> FieldKind {
    FieldKind::Record(T::type_name())
}

pub fn write_record_field<T: SafeParcelable>(
    record: &T,
    context: &mut WriteContext,
    field: &FieldDescriptor,
) -> Result<(), Error> {
    let mark = context.begin_header(field.id);
    write_record(record, context)?;
    context.finish_header(mark);
    Ok(())
}

pub fn read_record_field<T: SafeParcelable>(
    context: &mut ReadContext,
    _: &FieldDescriptor,
    tag: Tag,
) -> Result<T, Error> {
    if tag.length == 0 {
        return Ok(T::parcel_default());
    }
    read_record(context)
}

/// Writes a byte count followed by the record, backpatching the count.
/// Readers only test the count against zero.
pub fn write_record_element<T: SafeParcelable>(
    record: &T,
    context: &mut WriteContext,
) -> Result<(), Error> {
    let size_pos = context.writer.data_position();
    context.writer.write_i32(1);
    let start = context.writer.data_position();
    write_record(record, context)?;
    let end = context.writer.data_position();
    context.writer.set_data_position(size_pos);
    context.writer.write_i32((end - start) as i32);
    context.writer.set_data_position(end);
    Ok(())
}

/// Reads one array element; a zero count is a null element.
///
/// Any positive count marks a present element. Writers that follow the
/// typed-list convention put `1` there instead of the byte count, so the
/// element ends where its own object header says.
pub fn read_record_element<T: SafeParcelable>(
    context: &mut ReadContext,
) -> Result<Option<T>, Error> {
    let size = context.reader.read_i32()?;
    if size == 0 {
        return Ok(None);
    }
    ensure!(
        size > 0,
        Error::invalid_data(format!(
            "negative element size {size} in array of {}",
            T::type_name()
        ))
    );
    read_record(context).map(Some)
}

/// Array element of a non-optional record array; null elements are rejected.
pub fn read_required_record_element<T: SafeParcelable>(
    context: &mut ReadContext,
) -> Result<T, Error> {
    read_record_element(context)?.ok_or_else(|| {
        Error::invalid_data(format!(
            "null element in array of {}; declare the elements as Option",
            T::type_name()
        ))
    })
}

/// Host generic value: `VAL_PARCELABLE`, the type name, then the record.
pub fn write_record_value<T: SafeParcelable>(
    record: &T,
    context: &mut WriteContext,
) -> Result<(), Error> {
    context.writer.write_i32(ValueTag::Parcelable.into());
    context.writer.write_string(Some(T::type_name()));
    write_record(record, context)
}

pub fn read_record_value_data<T: SafeParcelable>(
    context: &mut ReadContext,
    tag: ValueTag,
) -> Result<T, Error> {
    if tag != ValueTag::Parcelable {
        return Err(value_mismatch(T::type_name(), tag));
    }
    // the peer's class name; the target type is fixed statically
    let _name = context.reader.read_string()?;
    read_record(context)
}
