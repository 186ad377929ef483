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
use crate::tag::SAFE_PARCEL_OBJECT_MAGIC;
use crate::types::{FieldKind, ListPolicy};

/// Encoding metadata of one record field.
///
/// Built with the `FieldDescriptor::new(..).nullable(..)` chain, normally by
/// `#[derive(SafeParcelable)]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: u16,
    pub name: &'static str,
    pub kind: FieldKind,
    /// Minimum versionCode for the field's value to be meaningful.
    pub version_gate: Option<u32>,
    /// Write a zero-length marker for null instead of omitting the field.
    pub nullable: bool,
    pub direct_list: bool,
    pub value_list: bool,
    /// Set on the record's versionCode field: the local schema generation.
    pub version_code: Option<i64>,
}

impl FieldDescriptor {
    pub fn new(id: u16, name: &'static str, kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor {
            id,
            name,
            kind,
            version_gate: None,
            nullable: false,
            direct_list: false,
            value_list: false,
            version_code: None,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn since(mut self, gate: u32) -> Self {
        self.version_gate = Some(gate);
        self
    }

    pub fn direct_list(mut self, direct_list: bool) -> Self {
        self.direct_list = direct_list;
        self
    }

    pub fn value_list(mut self, value_list: bool) -> Self {
        self.value_list = value_list;
        self
    }

    pub fn version_code(mut self, local_version: i64) -> Self {
        self.version_code = Some(local_version);
        self
    }

    #[inline(always)]
    pub fn list_policy(&self) -> ListPolicy {
        if self.value_list {
            ListPolicy::Value
        } else if self.direct_list {
            ListPolicy::Direct
        } else {
            ListPolicy::Default
        }
    }

    /// Whether the field is meaningless in a record of `version_code`.
    #[inline(always)]
    pub fn is_gated_out(&self, version_code: i64) -> bool {
        matches!(self.version_gate, Some(gate) if version_code < gate as i64)
    }
}

/// The per-type table of field descriptors, ordered by id.
#[derive(Debug)]
pub struct FieldDescriptorTable {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
    version_field: Option<usize>,
    has_gates: bool,
}

impl FieldDescriptorTable {
    /// Sorts `fields` by id and validates them.
    pub fn build(
        type_name: &'static str,
        mut fields: Vec<FieldDescriptor>,
    ) -> Result<FieldDescriptorTable, Error> {
        fields.sort_by_key(|f| f.id);
        for pair in fields.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(Error::duplicate_field_id(format!(
                    "{type_name}: fields `{}` and `{}` share id {}",
                    pair[0].name, pair[1].name, pair[0].id
                )));
            }
        }
        let mut version_field = None;
        for (idx, field) in fields.iter().enumerate() {
            Self::validate(type_name, field)?;
            if field.version_code.is_some() {
                if let Some(prev) = version_field {
                    let prev: &FieldDescriptor = &fields[prev];
                    return Err(Error::invalid_data(format!(
                        "{type_name}: both `{}` and `{}` are marked version_code",
                        prev.name, field.name
                    )));
                }
                version_field = Some(idx);
            }
        }
        let has_gates = fields.iter().any(|f| f.version_gate.is_some());
        log::debug!(
            "built field descriptor table for {type_name}: {} fields",
            fields.len()
        );
        Ok(FieldDescriptorTable {
            type_name,
            fields,
            version_field,
            has_gates,
        })
    }

    fn validate(type_name: &str, field: &FieldDescriptor) -> Result<(), Error> {
        if field.id == SAFE_PARCEL_OBJECT_MAGIC {
            return Err(Error::invalid_data(format!(
                "{type_name}.{}: field id {} is reserved",
                field.name, field.id
            )));
        }
        if field.direct_list && field.value_list {
            return Err(Error::unsupported_kind(format!(
                "{type_name}.{}: direct_list and value_list are exclusive",
                field.name
            )));
        }
        if field.direct_list
            && !matches!(&field.kind, FieldKind::ArrayOf(e) if e.is_primitive())
        {
            return Err(Error::unsupported_kind(format!(
                "{type_name}.{}: direct_list needs a list of primitives, got {}",
                field.name, field.kind
            )));
        }
        if field.value_list && !matches!(field.kind, FieldKind::ListOf(_)) {
            return Err(Error::unsupported_kind(format!(
                "{type_name}.{}: value_list needs a list, got {}",
                field.name, field.kind
            )));
        }
        if field.version_code.is_some() && !field.kind.is_integer() {
            return Err(Error::unsupported_kind(format!(
                "{type_name}.{}: version_code needs an integer field, got {}",
                field.name, field.kind
            )));
        }
        Ok(())
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline(always)]
    pub fn get(&self, id: u16) -> Option<&FieldDescriptor> {
        self.fields
            .binary_search_by_key(&id, |f| f.id)
            .ok()
            .map(|idx| &self.fields[idx])
    }

    /// Fields in ascending id order.
    #[inline(always)]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn version_field(&self) -> Option<&FieldDescriptor> {
        self.version_field.map(|idx| &self.fields[idx])
    }

    /// Whether version gates apply: some field is gated and the record has a versionCode.
    #[inline(always)]
    pub fn has_gates(&self) -> bool {
        self.has_gates && self.version_field.is_some()
    }
}
