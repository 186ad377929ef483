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

//! Map fields, carried as the host's generic map: an `i32` entry count, then
//! each key and value as a tagged host value.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::core::value_mismatch;
use crate::serializer::{ParcelDefault, ParcelField, ParcelValue};
use crate::tag::Tag;
use crate::types::{FieldKind, ListPolicy, ValueTag};

pub fn write_map<'a, K, V, I>(len: usize, entries: I, context: &mut WriteContext) -> Result<(), Error>
where
    K: ParcelValue + 'a,
    V: ParcelValue + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    context.writer.write_i32(len as i32);
    for (key, value) in entries {
        key.write_value(context)?;
        value.write_value(context)?;
    }
    Ok(())
}

/// Reads `count` entries and hands each to `insert`.
pub fn read_map<K, V>(
    context: &mut ReadContext,
    mut insert: impl FnMut(K, V),
) -> Result<(), Error>
where
    K: ParcelValue,
    V: ParcelValue,
{
    let len = context.read_count()?;
    for _ in 0..len {
        let key = K::read_value(context)?;
        let value = V::read_value(context)?;
        insert(key, value);
    }
    Ok(())
}

macro_rules! impl_map {
    ($map:ident, $($key_bound:path),+) => {
        impl<K, V> ParcelDefault for $map<K, V> {
            fn parcel_default() -> Self {
                $map::new()
            }
        }

        impl<K, V> ParcelField for $map<K, V>
        where
            K: ParcelValue $(+ $key_bound)+,
            V: ParcelValue,
        {
            fn field_kind(_: ListPolicy) -> FieldKind {
                <Self as ParcelValue>::value_kind()
            }

            fn write_field(
                &self,
                context: &mut WriteContext,
                field: &FieldDescriptor,
            ) -> Result<(), Error> {
                let mark = context.begin_header(field.id);
                write_map(self.len(), self.iter(), context)?;
                context.finish_header(mark);
                Ok(())
            }

            fn read_field(
                context: &mut ReadContext,
                _: &FieldDescriptor,
                tag: Tag,
            ) -> Result<Self, Error> {
                let mut map = $map::new();
                if tag.length > 0 {
                    read_map(context, |k, v| {
                        map.insert(k, v);
                    })?;
                }
                Ok(map)
            }
        }

        impl<K, V> ParcelValue for $map<K, V>
        where
            K: ParcelValue $(+ $key_bound)+,
            V: ParcelValue,
        {
            fn value_kind() -> FieldKind {
                FieldKind::MapOf(Box::new(K::value_kind()), Box::new(V::value_kind()))
            }

            fn write_value(&self, context: &mut WriteContext) -> Result<(), Error> {
                context.writer.write_i32(ValueTag::Map.into());
                write_map(self.len(), self.iter(), context)
            }

            fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error> {
                if tag != ValueTag::Map {
                    return Err(value_mismatch("map", tag));
                }
                let mut map = $map::new();
                read_map(context, |k, v| {
                    map.insert(k, v);
                })?;
                Ok(map)
            }
        }
    };
}

impl_map!(HashMap, Eq, Hash);
impl_map!(BTreeMap, Ord);
