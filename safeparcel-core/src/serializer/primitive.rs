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

use crate::buffer::{ParcelRead, ParcelWrite};
use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::core::value_mismatch;
use crate::serializer::{ParcelDefault, ParcelElement, ParcelField, ParcelValue};
use crate::tag::Tag;
use crate::types::{FieldKind, ListPolicy, PrimitiveKind, ValueTag};

macro_rules! impl_primitive {
    ($ty:ty, $kind:ident, $value_tag:ident, $writer:expr, $reader:expr) => {
        impl ParcelDefault for $ty {
            #[inline(always)]
            fn parcel_default() -> Self {
                <$ty>::default()
            }
        }

        impl ParcelField for $ty {
            #[inline(always)]
            fn field_kind(_: ListPolicy) -> FieldKind {
                FieldKind::Primitive(PrimitiveKind::$kind)
            }

            #[inline(always)]
            fn write_field(
                &self,
                context: &mut WriteContext,
                field: &FieldDescriptor,
            ) -> Result<(), Error> {
                context.write_header(field.id, PrimitiveKind::$kind.width());
                $writer(&mut *context.writer, *self);
                Ok(())
            }

            #[inline(always)]
            fn read_field(
                context: &mut ReadContext,
                _: &FieldDescriptor,
                tag: Tag,
            ) -> Result<Self, Error> {
                tag.expect_length(PrimitiveKind::$kind.width())?;
                $reader(&mut *context.reader)
            }
        }

        impl ParcelElement for $ty {
            const PRIMITIVE: bool = true;

            #[inline(always)]
            fn element_kind() -> FieldKind {
                FieldKind::Primitive(PrimitiveKind::$kind)
            }

            #[inline(always)]
            fn write_element(&self, context: &mut WriteContext) -> Result<(), Error> {
                $writer(&mut *context.writer, *self);
                Ok(())
            }

            #[inline(always)]
            fn read_element(context: &mut ReadContext) -> Result<Self, Error> {
                $reader(&mut *context.reader)
            }
        }

        impl ParcelValue for $ty {
            fn value_kind() -> FieldKind {
                FieldKind::Primitive(PrimitiveKind::$kind)
            }

            fn write_value(&self, context: &mut WriteContext) -> Result<(), Error> {
                context.writer.write_i32(ValueTag::$value_tag.into());
                $writer(&mut *context.writer, *self);
                Ok(())
            }

            fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error> {
                if tag != ValueTag::$value_tag {
                    return Err(value_mismatch(stringify!($ty), tag));
                }
                $reader(&mut *context.reader)
            }
        }
    };
}

impl_primitive!(
    i32,
    Int,
    Integer,
    |w: &mut dyn ParcelWrite, v: i32| w.write_i32(v),
    |r: &mut dyn ParcelRead| r.read_i32()
);
impl_primitive!(
    i64,
    Long,
    Long,
    |w: &mut dyn ParcelWrite, v: i64| w.write_i64(v),
    |r: &mut dyn ParcelRead| r.read_i64()
);
impl_primitive!(
    f32,
    Float,
    Float,
    |w: &mut dyn ParcelWrite, v: f32| w.write_f32(v),
    |r: &mut dyn ParcelRead| r.read_f32()
);
impl_primitive!(
    f64,
    Double,
    Double,
    |w: &mut dyn ParcelWrite, v: f64| w.write_f64(v),
    |r: &mut dyn ParcelRead| r.read_f64()
);
// narrow types take a full word on the wire
impl_primitive!(
    i16,
    Short,
    Short,
    |w: &mut dyn ParcelWrite, v: i16| w.write_i32(v as i32),
    |r: &mut dyn ParcelRead| -> Result<i16, Error> { Ok(r.read_i32()? as i16) }
);
impl_primitive!(
    i8,
    Byte,
    Byte,
    |w: &mut dyn ParcelWrite, v: i8| w.write_i32(v as i32),
    |r: &mut dyn ParcelRead| -> Result<i8, Error> { Ok(r.read_i32()? as i8) }
);
impl_primitive!(
    bool,
    Bool,
    Boolean,
    |w: &mut dyn ParcelWrite, v: bool| w.write_i32(v as i32),
    |r: &mut dyn ParcelRead| -> Result<bool, Error> { Ok(r.read_i32()? != 0) }
);
