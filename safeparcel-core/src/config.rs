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

/// Configuration for SafeParcel encoding and decoding.
///
/// Held by the [`SafeParcel`](crate::SafeParcel) instance and shared with the
/// `WriteContext`/`ReadContext` of every call it makes.
#[derive(Clone, Debug)]
pub struct Config {
    /// Collapse headers of bodies shorter than `0xFFFF` bytes into one word.
    /// When disabled every variable-length header keeps the two-word form the
    /// legacy writer produces.
    pub compact_headers: bool,
    /// Maximum nesting depth of records.
    pub max_depth: u32,
    /// Log and skip known fields whose payload fails to decode.
    pub lenient: bool,
    /// Reject bytes left over after the top-level record.
    pub check_trailing: bool,
    /// Initial capacity of pooled output buffers.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            compact_headers: true,
            max_depth: 32,
            lenient: false,
            check_trailing: true,
            initial_capacity: 64,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_compact_headers(&self) -> bool {
        self.compact_headers
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline(always)]
    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    #[inline(always)]
    pub fn is_check_trailing(&self) -> bool {
        self.check_trailing
    }

    #[inline(always)]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}
