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

//! Positionable parcel buffers.
//!
//! [`ParcelWrite`] and [`ParcelRead`] are the only things the codec needs from
//! the host: a cursor that can be moved, fixed-width primitives, and the host's
//! own length-prefixed strings and byte arrays. [`Writer`] and [`Reader`] are
//! the in-memory implementation, laid out the way the Android parcel lays out
//! its data: little-endian, every value padded to a 4-byte boundary.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::Error;

/// Rounds `len` up to the parcel's 4-byte alignment.
#[inline(always)]
pub const fn pad_size(len: usize) -> usize {
    (len + 3) & !3
}

/// Write side of a host parcel.
///
/// Writing at a position before the end overwrites; writing at the end appends.
pub trait ParcelWrite {
    fn data_position(&self) -> usize;

    /// Moves the cursor. Moving past the end grows the buffer with zeros.
    fn set_data_position(&mut self, pos: usize);

    fn data_size(&self) -> usize;

    fn write_i32(&mut self, value: i32);

    fn write_i64(&mut self, value: i64);

    fn write_f32(&mut self, value: f32);

    fn write_f64(&mut self, value: f64);

    /// Host string: UTF-16 unit count (`-1` for null), units, terminator, padding.
    fn write_string(&mut self, value: Option<&str>);

    /// Host byte array: length (`-1` for null), bytes, padding.
    fn write_byte_array(&mut self, value: Option<&[u8]>);

    /// Removes `len` bytes at `at`, shifting everything after it down.
    fn remove_range(&mut self, at: usize, len: usize);
}

/// Read side of a host parcel.
pub trait ParcelRead {
    fn data_position(&self) -> usize;

    fn set_data_position(&mut self, pos: usize) -> Result<(), Error>;

    fn data_size(&self) -> usize;

    fn read_i32(&mut self) -> Result<i32, Error>;

    fn read_i64(&mut self) -> Result<i64, Error>;

    fn read_f32(&mut self) -> Result<f32, Error>;

    fn read_f64(&mut self) -> Result<f64, Error>;

    fn read_string(&mut self) -> Result<Option<String>, Error>;

    fn read_byte_array(&mut self) -> Result<Option<Vec<u8>>, Error>;

    #[inline(always)]
    fn remaining(&self) -> usize {
        self.data_size().saturating_sub(self.data_position())
    }
}

#[derive(Default)]
pub struct Writer {
    pub(crate) bf: Vec<u8>,
    cursor: usize,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Writer {
        Writer {
            bf: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    pub fn reset(&mut self) {
        // keep capacity and reset len to 0
        self.bf.clear();
        self.cursor = 0;
    }

    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bf
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    #[inline(always)]
    fn put(&mut self, data: &[u8]) {
        let end = self.cursor + data.len();
        if self.cursor == self.bf.len() {
            self.bf.extend_from_slice(data);
        } else {
            if end > self.bf.len() {
                self.bf.resize(end, 0);
            }
            self.bf[self.cursor..end].copy_from_slice(data);
        }
        self.cursor = end;
    }

    #[inline(always)]
    fn put_padding(&mut self, written: usize) {
        const ZEROS: [u8; 4] = [0; 4];
        let padding = pad_size(written) - written;
        if padding > 0 {
            self.put(&ZEROS[..padding]);
        }
    }
}

impl ParcelWrite for Writer {
    #[inline(always)]
    fn data_position(&self) -> usize {
        self.cursor
    }

    fn set_data_position(&mut self, pos: usize) {
        if pos > self.bf.len() {
            self.bf.resize(pos, 0);
        }
        self.cursor = pos;
    }

    #[inline(always)]
    fn data_size(&self) -> usize {
        self.bf.len()
    }

    fn write_i32(&mut self, value: i32) {
        let mut b = [0u8; 4];
        LittleEndian::write_i32(&mut b, value);
        self.put(&b);
    }

    fn write_i64(&mut self, value: i64) {
        let mut b = [0u8; 8];
        LittleEndian::write_i64(&mut b, value);
        self.put(&b);
    }

    fn write_f32(&mut self, value: f32) {
        let mut b = [0u8; 4];
        LittleEndian::write_f32(&mut b, value);
        self.put(&b);
    }

    fn write_f64(&mut self, value: f64) {
        let mut b = [0u8; 8];
        LittleEndian::write_f64(&mut b, value);
        self.put(&b);
    }

    fn write_string(&mut self, value: Option<&str>) {
        let Some(s) = value else {
            self.write_i32(-1);
            return;
        };
        let units: Vec<u16> = s.encode_utf16().collect();
        self.write_i32(units.len() as i32);
        let mut raw = vec![0u8; (units.len() + 1) * 2];
        LittleEndian::write_u16_into(&units, &mut raw[..units.len() * 2]);
        self.put(&raw);
        self.put_padding(raw.len());
    }

    fn write_byte_array(&mut self, value: Option<&[u8]>) {
        let Some(bytes) = value else {
            self.write_i32(-1);
            return;
        };
        self.write_i32(bytes.len() as i32);
        self.put(bytes);
        self.put_padding(bytes.len());
    }

    fn remove_range(&mut self, at: usize, len: usize) {
        let end = (at + len).min(self.bf.len());
        if at >= end {
            return;
        }
        self.bf.drain(at..end);
        if self.cursor >= end {
            self.cursor -= end - at;
        } else if self.cursor > at {
            self.cursor = at;
        }
    }
}

pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    #[inline(always)]
    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = match self.cursor.checked_add(len) {
            Some(end) if end <= self.bf.len() => end,
            _ => return Err(Error::buffer_out_of_bound(self.cursor, len, self.bf.len())),
        };
        let s = &self.bf[self.cursor..end];
        self.cursor = end;
        Ok(s)
    }
}

impl ParcelRead for Reader<'_> {
    #[inline(always)]
    fn data_position(&self) -> usize {
        self.cursor
    }

    fn set_data_position(&mut self, pos: usize) -> Result<(), Error> {
        if pos > self.bf.len() {
            return Err(Error::buffer_out_of_bound(pos, 0, self.bf.len()));
        }
        self.cursor = pos;
        Ok(())
    }

    #[inline(always)]
    fn data_size(&self) -> usize {
        self.bf.len()
    }

    fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    fn read_string(&mut self) -> Result<Option<String>, Error> {
        let len = self.read_i32()?;
        if len < 0 {
            return Ok(None);
        }
        let units = len as usize;
        let raw = self.take(pad_size((units + 1) * 2))?;
        let mut decoded = vec![0u16; units];
        LittleEndian::read_u16_into(&raw[..units * 2], &mut decoded);
        String::from_utf16(&decoded)
            .map(Some)
            .map_err(|e| Error::invalid_data(format!("invalid UTF-16 string: {e}")))
    }

    fn read_byte_array(&mut self) -> Result<Option<Vec<u8>>, Error> {
        let len = self.read_i32()?;
        if len < 0 {
            return Ok(None);
        }
        let len = len as usize;
        let raw = self.take(pad_size(len))?;
        Ok(Some(raw[..len].to_vec()))
    }
}
