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

//! Process-wide cache of field descriptor tables.
//!
//! Tables are keyed by [`TypeId`] and built on first use. The build runs while
//! the map shard for that key is write-locked, so concurrent first callers see
//! exactly one table. Once inserted a table is never replaced or removed;
//! lookups clone an [`Arc`] and hold no lock while the caller uses it.
//!
//! A failed build inserts nothing, so the next call simply retries (and fails
//! the same way, since descriptions are pure).

use std::any::TypeId;
use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::Error;
use crate::meta::FieldDescriptorTable;
use crate::serializer::SafeParcelable;

#[derive(Default)]
pub struct DescriptorRegistry {
    tables: DashMap<TypeId, Arc<FieldDescriptorTable>>,
}

impl DescriptorRegistry {
    pub fn global() -> &'static DescriptorRegistry {
        static REGISTRY: OnceLock<DescriptorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(DescriptorRegistry::default)
    }

    /// Returns the table of `T`, building it on first access.
    #[inline(always)]
    pub fn table<T: SafeParcelable>(&self) -> Result<Arc<FieldDescriptorTable>, Error> {
        let key = TypeId::of::<T>();
        if let Some(table) = self.tables.get(&key) {
            return Ok(table.value().clone());
        }
        self.build_table::<T>(key)
    }

    #[inline(never)]
    fn build_table<T: SafeParcelable>(
        &self,
        key: TypeId,
    ) -> Result<Arc<FieldDescriptorTable>, Error> {
        // describe_fields never consults the registry, so building under the
        // shard lock cannot deadlock
        match self.tables.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let table = Arc::new(FieldDescriptorTable::build(
                    T::type_name(),
                    T::describe_fields(),
                )?);
                entry.insert(table.clone());
                Ok(table)
            }
        }
    }

    pub fn contains<T: SafeParcelable>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
