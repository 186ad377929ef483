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

//! Record decoding.
//!
//! The field loop is bounded by the record end taken from the object header,
//! not by the end of the buffer, so a record can sit inside a larger parcel.
//! Ids missing from the descriptor table are skipped by their declared length;
//! fields the table has but the buffer lacks keep their default.

use log::{debug, warn};

use crate::ensure;
use crate::error::Error;
use crate::meta::FieldDescriptorTable;
use crate::resolver::context::ReadContext;
use crate::resolver::registry::DescriptorRegistry;
use crate::serializer::SafeParcelable;
use crate::tag::SAFE_PARCEL_OBJECT_MAGIC;

pub fn read_record<T: SafeParcelable>(context: &mut ReadContext) -> Result<T, Error> {
    let table = DescriptorRegistry::global().table::<T>()?;
    context.inc_depth(T::type_name())?;

    let header = context.read_header()?;
    ensure!(
        header.id == SAFE_PARCEL_OBJECT_MAGIC,
        Error::malformed_header(format!(
            "expected object header for {}, got field id {:#x}",
            T::type_name(),
            header.id
        ))
    );
    let start = context.reader.data_position();
    let end = start + header.length as usize;
    ensure!(
        end <= context.reader.data_size(),
        Error::truncated_buffer(format!(
            "{} declares {} bytes at {start}, buffer holds {}",
            T::type_name(),
            header.length,
            context.reader.data_size()
        ))
    );

    let mut record = T::parcel_default();
    let mut gated_seen: Vec<u16> = Vec::new();
    while context.reader.data_position() < end {
        let tag = context.read_header()?;
        let field_start = context.reader.data_position();
        ensure!(
            field_start <= end,
            Error::malformed_header(format!(
                "overread allowed size end={end} while reading a tag of {}",
                T::type_name()
            ))
        );
        let field_end = field_start + tag.length as usize;
        ensure!(
            field_end <= end,
            Error::truncated_buffer(format!(
                "field {} of {} ends at {field_end}, past record end {end}",
                tag.id,
                T::type_name()
            ))
        );
        match table.get(tag.id) {
            Some(field) => {
                if let Err(err) = record.decode_field(context, field, tag) {
                    if context.config().is_lenient() && !err.is_structural() {
                        warn!(
                            "{}: skipping field {} (id {}): {err}",
                            T::type_name(),
                            field.name,
                            field.id
                        );
                    } else {
                        return Err(err.in_record(T::type_name()));
                    }
                }
                if field.version_gate.is_some() {
                    gated_seen.push(field.id);
                }
            }
            None => debug!(
                "{}: skipping unknown field id {} ({} bytes)",
                T::type_name(),
                tag.id,
                tag.length
            ),
        }
        context.reader.set_data_position(field_end)?;
    }
    ensure!(
        context.reader.data_position() == end,
        Error::malformed_header(format!("overread allowed size end={end}"))
    );

    apply_version_code(&table, &mut record, &gated_seen);
    context.dec_depth();
    Ok(record)
}

/// Compares the decoded versionCode with the local schema generation and
/// discards gated fields the producing version did not know about.
fn apply_version_code<T: SafeParcelable>(
    table: &FieldDescriptorTable,
    record: &mut T,
    gated_seen: &[u16],
) {
    let Some(version_field) = table.version_field() else {
        return;
    };
    let Some(version_code) = record.version_code() else {
        return;
    };
    if let Some(local) = version_field.version_code {
        if version_code > local {
            debug!(
                "{}: peer versionCode {version_code} is newer than local {local}",
                T::type_name()
            );
        }
    }
    for id in gated_seen {
        if let Some(field) = table.get(*id) {
            if field.is_gated_out(version_code) {
                debug!(
                    "{}: discarding field {} below its version gate (versionCode {version_code})",
                    T::type_name(),
                    field.name
                );
                record.reset_field(*id);
            }
        }
    }
}
