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

//! Field tags.
//!
//! A tag is one 32-bit word: the field id in the low half and the payload
//! length in the high half. Lengths of `0xFFFF` or more do not fit, so the high
//! half is set to `0xFFFF` and the real length follows in a second word.

use crate::buffer::{ParcelRead, ParcelWrite};
use crate::error::Error;

/// Id of the tag that opens a whole record.
pub const SAFE_PARCEL_OBJECT_MAGIC: u16 = 20293;

const LONG_LENGTH: u32 = 0xFFFF;
const LONG_LENGTH_MASK: u32 = 0xFFFF_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag {
    pub id: u16,
    pub length: u32,
}

impl Tag {
    pub const fn new(id: u16, length: u32) -> Tag {
        Tag { id, length }
    }

    /// Whether this tag needs the two-word form.
    #[inline(always)]
    pub const fn is_long(&self) -> bool {
        self.length >= LONG_LENGTH
    }

    /// Encoded size of the tag itself.
    #[inline(always)]
    pub const fn encoded_size(&self) -> usize {
        if self.is_long() {
            8
        } else {
            4
        }
    }

    #[inline(always)]
    pub fn write(&self, writer: &mut dyn ParcelWrite) {
        if self.is_long() {
            writer.write_i32((LONG_LENGTH_MASK | self.id as u32) as i32);
            writer.write_i32(self.length as i32);
        } else {
            writer.write_i32(((self.length << 16) | self.id as u32) as i32);
        }
    }

    #[inline(always)]
    pub fn read(reader: &mut dyn ParcelRead) -> Result<Tag, Error> {
        let word = reader.read_i32()? as u32;
        let id = (word & 0xFFFF) as u16;
        let length = if word & LONG_LENGTH_MASK == LONG_LENGTH_MASK {
            reader.read_i32()? as u32
        } else {
            word >> 16
        };
        Ok(Tag { id, length })
    }

    /// Fails with [`Error::LengthMismatch`] unless the payload is exactly `expected` bytes.
    #[inline(always)]
    pub fn expect_length(&self, expected: u32) -> Result<(), Error> {
        if self.length != expected {
            return Err(Error::length_mismatch(self.id, expected, self.length));
        }
        Ok(())
    }
}

/// Position of a header whose length is not known yet.
#[derive(Clone, Copy, Debug)]
pub struct HeaderMark {
    id: u16,
    body_start: usize,
}

impl HeaderMark {
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn body_start(&self) -> usize {
        self.body_start
    }
}

/// Reserves a two-word header for `id` and returns where its body starts.
pub fn begin_header(writer: &mut dyn ParcelWrite, id: u16) -> HeaderMark {
    writer.write_i32((LONG_LENGTH_MASK | id as u32) as i32);
    writer.write_i32(0);
    HeaderMark {
        id,
        body_start: writer.data_position(),
    }
}

/// Backpatches the header reserved by [`begin_header`] with the body length.
///
/// With `compact` set and a body shorter than `0xFFFF` bytes, the header is
/// rewritten in the one-word form and the body is moved down by four bytes.
/// Returns the final body length.
pub fn finish_header(writer: &mut dyn ParcelWrite, mark: HeaderMark, compact: bool) -> u32 {
    let end = writer.data_position();
    let length = (end - mark.body_start) as u32;
    if compact && length < LONG_LENGTH {
        writer.set_data_position(mark.body_start - 8);
        writer.write_i32(((length << 16) | mark.id as u32) as i32);
        writer.remove_range(mark.body_start - 4, 4);
        writer.set_data_position(end - 4);
    } else {
        writer.set_data_position(mark.body_start - 4);
        writer.write_i32(length as i32);
        writer.set_data_position(end);
    }
    length
}
