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

use std::sync::OnceLock;

use crate::buffer::{ParcelRead, ParcelWrite, Reader, Writer};
use crate::config::Config;
use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::pool::Pool;
use crate::serializer::decoder::read_record;
use crate::serializer::encoder::write_record;
use crate::serializer::SafeParcelable;

/// The record marshaller.
///
/// `SafeParcel` turns records into SafeParcel bytes and back. It holds only
/// configuration and a pool of output buffers, so one instance can be shared
/// by any number of threads; field descriptor tables live in the process-wide
/// [`DescriptorRegistry`](crate::resolver::registry::DescriptorRegistry).
///
/// # Examples
///
/// ```rust, ignore
/// use safeparcel::{SafeParcel, SafeParcelable};
///
/// #[derive(SafeParcelable, Debug, PartialEq)]
/// struct Bar {
///     #[safeparcel(id = 1)]
///     another: i64,
/// }
///
/// let parcel = SafeParcel::default();
/// let bytes = parcel.encode(&Bar { another: 12 })?;
/// let bar: Bar = parcel.decode(&bytes)?;
/// assert_eq!(bar, Bar { another: 12 });
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use safeparcel_core::SafeParcel;
///
/// let parcel = SafeParcel::default()
///     .compact_headers(false)
///     .lenient(true)
///     .max_depth(8);
/// ```
pub struct SafeParcel {
    config: Config,
    writer_pool: Pool<Writer>,
}

impl Default for SafeParcel {
    fn default() -> Self {
        SafeParcel::with_config(Config::default())
    }
}

impl SafeParcel {
    pub fn with_config(config: Config) -> SafeParcel {
        let capacity = config.initial_capacity();
        SafeParcel {
            config,
            writer_pool: Pool::new(move || Writer::with_capacity(capacity)),
        }
    }

    /// Collapse short headers into the one-word form. Defaults to `true`.
    ///
    /// With `false` the output matches the legacy writer byte for byte: every
    /// variable-length field and record header keeps the two-word form.
    /// Decoders accept both forms either way.
    pub fn compact_headers(mut self, compact_headers: bool) -> Self {
        self.config.compact_headers = compact_headers;
        self
    }

    /// Maximum record nesting depth. Defaults to 32.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Log and skip known fields whose payload cannot be decoded instead of
    /// failing the record. Header and bounds errors still fail. Defaults to `false`.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.config.lenient = lenient;
        self
    }

    /// Reject bytes after the top-level record in [`decode`](Self::decode).
    /// Defaults to `true`.
    pub fn check_trailing(mut self, check_trailing: bool) -> Self {
        self.config.check_trailing = check_trailing;
        self
    }

    /// Initial capacity of pooled output buffers. Defaults to 64 bytes.
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self.writer_pool = Pool::new(move || Writer::with_capacity(initial_capacity));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes `record` into a new byte vector.
    pub fn encode<T: SafeParcelable>(&self, record: &T) -> Result<Vec<u8>, Error> {
        self.writer_pool.borrow_mut(|writer| {
            writer.reset();
            let result = self.encode_into(record, writer).map(|_| writer.dump());
            writer.reset();
            result
        })
    }

    /// Encodes `record` at the current position of a host buffer.
    pub fn encode_into<T: SafeParcelable>(
        &self,
        record: &T,
        writer: &mut dyn ParcelWrite,
    ) -> Result<(), Error> {
        let mut context = WriteContext::new(writer, &self.config);
        write_record(record, &mut context)
    }

    /// Decodes a record of type `T` from `bf`.
    pub fn decode<T: SafeParcelable>(&self, bf: &[u8]) -> Result<T, Error> {
        let mut reader = Reader::new(bf);
        let record = self.decode_from(&mut reader)?;
        if self.config.is_check_trailing() {
            ensure!(
                reader.remaining() == 0,
                Error::invalid_data(format!(
                    "{} trailing bytes after {}",
                    reader.remaining(),
                    T::type_name()
                ))
            );
        }
        Ok(record)
    }

    /// Decodes a record of type `T` at the current position of a host buffer,
    /// leaving the cursor at the end of the record.
    pub fn decode_from<T: SafeParcelable>(&self, reader: &mut dyn ParcelRead) -> Result<T, Error> {
        let mut context = ReadContext::new(reader, &self.config);
        read_record(&mut context)
    }
}

fn default_instance() -> &'static SafeParcel {
    static INSTANCE: OnceLock<SafeParcel> = OnceLock::new();
    INSTANCE.get_or_init(SafeParcel::default)
}

/// Encodes `record` with the default configuration.
pub fn encode<T: SafeParcelable>(record: &T) -> Result<Vec<u8>, Error> {
    default_instance().encode(record)
}

/// Decodes a record of type `T` with the default configuration.
pub fn decode<T: SafeParcelable>(bf: &[u8]) -> Result<T, Error> {
    default_instance().decode(bf)
}
