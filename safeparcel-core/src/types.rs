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

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Payload width in bytes. Everything narrower than an int takes a full word.
    pub const fn width(self) -> u32 {
        match self {
            PrimitiveKind::Long | PrimitiveKind::Double => 8,
            _ => 4,
        }
    }
}

/// Semantic kind of a field, as recorded in its descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    String,
    Bytes,
    /// Nested record, named by its type name.
    Record(&'static str),
    /// Host generic list of tagged values.
    ListOf(Box<FieldKind>),
    /// Count followed by untagged elements, records framed with a byte count.
    ArrayOf(Box<FieldKind>),
    /// Host generic map of tagged keys and values.
    MapOf(Box<FieldKind>, Box<FieldKind>),
    /// Host bundle: plain string keys, tagged values.
    Bundle(Box<FieldKind>),
}

impl FieldKind {
    pub fn is_primitive(&self) -> bool {
        matches!(self, FieldKind::Primitive(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            FieldKind::Primitive(
                PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Int | PrimitiveKind::Long
            )
        )
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            FieldKind::ListOf(_) | FieldKind::ArrayOf(_) | FieldKind::MapOf(..) | FieldKind::Bundle(_)
        )
    }

    /// Element kind of a list or array.
    pub fn element(&self) -> Option<&FieldKind> {
        match self {
            FieldKind::ListOf(e) | FieldKind::ArrayOf(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(p) => write!(f, "{p:?}"),
            FieldKind::String => f.write_str("String"),
            FieldKind::Bytes => f.write_str("Bytes"),
            FieldKind::Record(name) => write!(f, "Record({name})"),
            FieldKind::ListOf(e) => write!(f, "ListOf({e})"),
            FieldKind::ArrayOf(e) => write!(f, "ArrayOf({e})"),
            FieldKind::MapOf(k, v) => write!(f, "MapOf({k}, {v})"),
            FieldKind::Bundle(v) => write!(f, "Bundle({v})"),
        }
    }
}

/// How a `Vec` field is laid out, chosen by the `direct_list` and `value_list` attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListPolicy {
    /// Primitives go through the host generic list, everything else is an array.
    #[default]
    Default,
    /// Count followed by raw primitive elements.
    Direct,
    /// Host generic list regardless of element type.
    Value,
}

/// Tags the host parcel writes in front of every generic value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum ValueTag {
    Null = -1,
    String = 0,
    Integer = 1,
    Map = 2,
    Bundle = 3,
    Parcelable = 4,
    Short = 5,
    Long = 6,
    Float = 7,
    Double = 8,
    Boolean = 9,
    List = 11,
    ByteArray = 13,
    StringArray = 14,
    Byte = 20,
}

impl ValueTag {
    pub fn from_wire(tag: i32) -> Result<ValueTag, Error> {
        ValueTag::try_from(tag)
            .map_err(|_| Error::unsupported_kind(format!("unknown host value tag {tag}")))
    }
}
