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
use crate::resolver::context::WriteContext;
use crate::resolver::registry::DescriptorRegistry;
use crate::serializer::SafeParcelable;
use crate::tag::SAFE_PARCEL_OBJECT_MAGIC;

/// Writes a whole record: the object header, then every field in ascending id
/// order, then the backpatched body length.
pub fn write_record<T: SafeParcelable>(record: &T, context: &mut WriteContext) -> Result<(), Error> {
    let table = DescriptorRegistry::global().table::<T>()?;
    context.inc_depth(T::type_name())?;
    let mark = context.begin_header(SAFE_PARCEL_OBJECT_MAGIC);

    let version_code = if table.has_gates() {
        record.version_code()
    } else {
        None
    };
    for field in table.fields() {
        if let Some(version_code) = version_code {
            if field.is_gated_out(version_code) {
                continue;
            }
        }
        record
            .encode_field(context, field)
            .map_err(|e| e.in_record(T::type_name()))?;
    }

    context.finish_header(mark);
    context.dec_depth();
    Ok(())
}
