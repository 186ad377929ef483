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

//! Error type shared by every encode and decode path.
//!
//! Error constructors sit on the failure branch of every buffer read, so they
//! are marked `#[cold]` to keep the hot path compact. Always build errors
//! through the constructor functions, never through the enum variants.

use std::borrow::Cow;

use thiserror::Error;

/// Set `SAFEPARCEL_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("SAFEPARCEL_PANIC_ON_ERROR").is_some();

/// Check if SAFEPARCEL_PANIC_ON_ERROR environment variable is set.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for SafeParcel encoding and decoding.
///
/// Every error aborts the single encode/decode call in progress. None of them
/// touch the descriptor table cache, so a failed call never affects other
/// calls running on other buffers or threads.
///
/// ## Examples
///
/// ```rust
/// use safeparcel_core::error::Error;
///
/// let err = Error::malformed_header("expected object header");
/// let err = Error::length_mismatch(3, 4, 8);
/// let err = Error::truncated_buffer(format!("end {} past size {}", 120, 64));
/// ```
///
/// ## Debug Mode: SAFEPARCEL_PANIC_ON_ERROR
///
/// ```bash
/// RUST_BACKTRACE=1 SAFEPARCEL_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The record header id is not the magic sentinel, or the field loop
    /// overran the record end.
    ///
    /// Do not construct this variant directly; use [`Error::malformed_header`] instead.
    #[error("Malformed header: {0}")]
    MalformedHeader(Cow<'static, str>),

    /// A declared length points past the end of the available bytes.
    ///
    /// Do not construct this variant directly; use [`Error::truncated_buffer`] instead.
    #[error("Truncated buffer: {0}")]
    TruncatedBuffer(Cow<'static, str>),

    /// A fixed-size field carries a length different from its primitive width.
    ///
    /// Do not construct this variant directly; use [`Error::length_mismatch`] instead.
    #[error("Length mismatch for field {id}: expected {expected} bytes, got {actual}")]
    LengthMismatch { id: u16, expected: u32, actual: u32 },

    /// A descriptor references a container or element kind that cannot be built.
    ///
    /// Do not construct this variant directly; use [`Error::unsupported_kind`] instead.
    #[error("Unsupported kind: {0}")]
    UnsupportedKind(Cow<'static, str>),

    /// A primitive read or write went past the buffer bounds.
    ///
    /// Do not construct this variant directly; use [`Error::buffer_out_of_bound`] instead.
    #[error("Buffer out of bound: {0} + {1} > {2}")]
    BufferOutOfBound(usize, usize, usize),

    /// Payload bytes that cannot represent a value (negative counts, bad UTF-16, ...).
    ///
    /// Do not construct this variant directly; use [`Error::invalid_data`] instead.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// Two fields of one record type share an id.
    ///
    /// Do not construct this variant directly; use [`Error::duplicate_field_id`] instead.
    #[error("{0}")]
    DuplicateFieldId(Cow<'static, str>),

    /// Record nesting deeper than the configured maximum.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::MalformedHeader`].
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn malformed_header<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::MalformedHeader(s.into());
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TruncatedBuffer`].
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn truncated_buffer<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::TruncatedBuffer(s.into());
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::LengthMismatch`] for field `id`.
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use safeparcel_core::error::Error;
    ///
    /// let err = Error::length_mismatch(2, 4, 8);
    /// assert_eq!(err.to_string(), "Length mismatch for field 2: expected 4 bytes, got 8");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn length_mismatch(id: u16, expected: u32, actual: u32) -> Self {
        let err = Error::LengthMismatch {
            id,
            expected,
            actual,
        };
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnsupportedKind`].
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported_kind<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnsupportedKind(s.into());
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::BufferOutOfBound`] with the given bounds.
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        let err = Error::BufferOutOfBound(offset, length, capacity);
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`].
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DuplicateFieldId`].
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn duplicate_field_id<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DuplicateFieldId(s.into());
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DepthExceed`].
    ///
    /// If `SAFEPARCEL_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn depth_exceed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DepthExceed(s.into());
        if PANIC_ON_ERROR {
            panic!("SAFEPARCEL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Whether the error describes the shape of the buffer rather than the
    /// contents of a single field. Lenient decoding never swallows these.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MalformedHeader(_)
                | Error::TruncatedBuffer(_)
                | Error::BufferOutOfBound(..)
                | Error::DepthExceed(_)
        )
    }

    /// Appends the record type name to the message of a field-level error.
    #[inline(never)]
    pub fn in_record(self, type_name: &str) -> Error {
        match self {
            Error::InvalidData(s) => Error::InvalidData(format!("{s} (in {type_name})").into()),
            Error::UnsupportedKind(s) => {
                Error::UnsupportedKind(format!("{s} (in {type_name})").into())
            }
            other => other,
        }
    }
}

/// Ensures a condition is true; otherwise returns the given [`enum@Error`].
///
/// # Examples
/// ```
/// use safeparcel_core::ensure;
/// use safeparcel_core::error::Error;
///
/// fn check_count(n: i32) -> Result<(), Error> {
///     ensure!(n >= 0, Error::invalid_data(format!("negative count {}", n)));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with an [`Error::InvalidData`].
///
/// # Examples
/// ```
/// use safeparcel_core::bail;
/// use safeparcel_core::error::Error;
///
/// fn fail_fast(tag: i32) -> Result<(), Error> {
///     bail!("unknown value tag {}", tag);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::invalid_data($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::invalid_data(format!($fmt, $($arg)*)))
    };
}
