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

//! String-keyed bundles in the host layout: a byte length (`-1` for null),
//! the `BNDL` magic, then an entry count and each entry as a plain host string
//! key followed by a tagged value. The length counts the bytes after the magic.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use crate::ensure;
use crate::error::Error;
use crate::meta::FieldDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::core::value_mismatch;
use crate::serializer::{ParcelDefault, ParcelField, ParcelValue};
use crate::tag::Tag;
use crate::types::{FieldKind, ListPolicy, ValueTag};

/// `'B' 'N' 'D' 'L'` read as a little-endian int.
pub const BUNDLE_MAGIC: i32 = 0x4C44_4E42;

/// A bundle whose values all share one value type.
///
/// Entries are kept sorted by key, so equal bundles encode to equal bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct Bundle<V>(BTreeMap<String, V>);

impl<V> Bundle<V> {
    pub fn new() -> Self {
        Bundle(BTreeMap::new())
    }
}

impl<V> Default for Bundle<V> {
    fn default() -> Self {
        Bundle::new()
    }
}

impl<V> Deref for Bundle<V> {
    type Target = BTreeMap<String, V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V> DerefMut for Bundle<V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<V> From<BTreeMap<String, V>> for Bundle<V> {
    fn from(entries: BTreeMap<String, V>) -> Self {
        Bundle(entries)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Bundle<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Bundle(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn write_bundle<V: ParcelValue>(bundle: &Bundle<V>, context: &mut WriteContext) -> Result<(), Error> {
    if bundle.is_empty() {
        context.writer.write_i32(0);
        return Ok(());
    }
    let length_pos = context.writer.data_position();
    context.writer.write_i32(-1);
    context.writer.write_i32(BUNDLE_MAGIC);
    let start = context.writer.data_position();
    context.writer.write_i32(bundle.len() as i32);
    for (key, value) in bundle.iter() {
        context.writer.write_string(Some(key));
        value.write_value(context)?;
    }
    let end = context.writer.data_position();
    context.writer.set_data_position(length_pos);
    context.writer.write_i32((end - start) as i32);
    context.writer.set_data_position(end);
    Ok(())
}

fn read_bundle<V: ParcelValue>(context: &mut ReadContext) -> Result<Bundle<V>, Error> {
    let length = context.reader.read_i32()?;
    if length <= 0 {
        return Ok(Bundle::new());
    }
    let magic = context.reader.read_i32()?;
    ensure!(
        magic == BUNDLE_MAGIC,
        Error::invalid_data(format!("bad bundle magic {magic:#x}"))
    );
    let start = context.reader.data_position();
    let end = start + length as usize;
    ensure!(
        end <= context.reader.data_size(),
        Error::truncated_buffer(format!(
            "bundle of {length} bytes at {start}, buffer holds {}",
            context.reader.data_size()
        ))
    );
    let mut bundle = Bundle::new();
    let len = context.read_count()?;
    for _ in 0..len {
        let key = context
            .reader
            .read_string()?
            .ok_or_else(|| Error::invalid_data("null bundle key"))?;
        let value = V::read_value(context)?;
        bundle.insert(key, value);
    }
    context.reader.set_data_position(end)?;
    Ok(bundle)
}

impl<V> ParcelDefault for Bundle<V> {
    fn parcel_default() -> Self {
        Bundle::new()
    }
}

impl<V: ParcelValue> ParcelField for Bundle<V> {
    fn field_kind(_: ListPolicy) -> FieldKind {
        <Self as ParcelValue>::value_kind()
    }

    fn write_field(&self, context: &mut WriteContext, field: &FieldDescriptor) -> Result<(), Error> {
        let mark = context.begin_header(field.id);
        write_bundle(self, context)?;
        context.finish_header(mark);
        Ok(())
    }

    fn read_field(context: &mut ReadContext, _: &FieldDescriptor, tag: Tag) -> Result<Self, Error> {
        if tag.length == 0 {
            return Ok(Bundle::new());
        }
        read_bundle(context)
    }
}

impl<V: ParcelValue> ParcelValue for Bundle<V> {
    fn value_kind() -> FieldKind {
        FieldKind::Bundle(Box::new(V::value_kind()))
    }

    fn write_value(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_i32(ValueTag::Bundle.into());
        write_bundle(self, context)
    }

    fn read_value_data(context: &mut ReadContext, tag: ValueTag) -> Result<Self, Error> {
        if tag != ValueTag::Bundle {
            return Err(value_mismatch("bundle", tag));
        }
        read_bundle(context)
    }
}
