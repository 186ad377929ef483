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

use crate::buffer::{ParcelRead, ParcelWrite};
use crate::config::Config;
use crate::error::Error;
use crate::tag::{self, HeaderMark, Tag};

/// State of one encode call: the exclusive output buffer and the nesting depth.
pub struct WriteContext<'se> {
    pub writer: &'se mut dyn ParcelWrite,
    config: &'se Config,
    current_depth: u32,
}

impl<'se> WriteContext<'se> {
    pub fn new(writer: &'se mut dyn ParcelWrite, config: &'se Config) -> WriteContext<'se> {
        WriteContext {
            writer,
            config,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        self.config
    }

    /// Writes a header whose length is already known.
    #[inline(always)]
    pub fn write_header(&mut self, id: u16, length: u32) {
        Tag::new(id, length).write(self.writer);
    }

    #[inline(always)]
    pub fn begin_header(&mut self, id: u16) -> HeaderMark {
        tag::begin_header(self.writer, id)
    }

    #[inline(always)]
    pub fn finish_header(&mut self, mark: HeaderMark) {
        tag::finish_header(self.writer, mark, self.config.is_compact_headers());
    }

    pub fn inc_depth(&mut self, type_name: &str) -> Result<(), Error> {
        self.current_depth += 1;
        if self.current_depth > self.config.max_depth() {
            return Err(Error::depth_exceed(format!(
                "maximum record nesting depth ({}) exceeded while writing {type_name}",
                self.config.max_depth()
            )));
        }
        Ok(())
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

/// State of one decode call: the exclusive input cursor and the nesting depth.
pub struct ReadContext<'de> {
    pub reader: &'de mut dyn ParcelRead,
    config: &'de Config,
    current_depth: u32,
}

impl<'de> ReadContext<'de> {
    pub fn new(reader: &'de mut dyn ParcelRead, config: &'de Config) -> ReadContext<'de> {
        ReadContext {
            reader,
            config,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline(always)]
    pub fn read_header(&mut self) -> Result<Tag, Error> {
        Tag::read(self.reader)
    }

    /// Reads an element count, rejecting counts the remaining bytes cannot hold.
    ///
    /// Every host encoding takes at least one word per element. A negative
    /// count is the host's null collection and reads as empty.
    pub fn read_count(&mut self) -> Result<usize, Error> {
        let count = self.reader.read_i32()?;
        if count < 0 {
            return Ok(0);
        }
        let count = count as usize;
        if count > self.reader.remaining() / 4 {
            return Err(Error::truncated_buffer(format!(
                "{count} elements cannot fit in {} remaining bytes",
                self.reader.remaining()
            )));
        }
        Ok(count)
    }

    pub fn inc_depth(&mut self, type_name: &str) -> Result<(), Error> {
        self.current_depth += 1;
        if self.current_depth > self.config.max_depth() {
            return Err(Error::depth_exceed(format!(
                "maximum record nesting depth ({}) exceeded while reading {type_name}",
                self.config.max_depth()
            )));
        }
        Ok(())
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}
