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

use safeparcel_core::{
    Error, FieldDescriptor, ListPolicy, ParcelDefault, ParcelField, ReadContext, SafeParcel,
    Tag, WriteContext, SAFE_PARCEL_OBJECT_MAGIC,
};
use safeparcel_derive::SafeParcelable;

#[derive(SafeParcelable, Debug, PartialEq)]
struct Sample {
    #[safeparcel(id = 1)]
    count: i32,
    #[safeparcel(id = 2)]
    label: String,
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Wide {
    #[safeparcel(id = 1)]
    count: i64,
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Counts {
    #[safeparcel(id = 1, direct_list)]
    counts: Vec<i32>,
}

fn words(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn tag_word(id: u16, length: u32) -> u32 {
    (length << 16) | id as u32
}

fn sample_bytes() -> Vec<u8> {
    SafeParcel::default()
        .encode(&Sample {
            count: 3,
            label: "label".to_string(),
        })
        .unwrap()
}

#[test]
fn test_truncated_buffer() {
    let bytes = sample_bytes();
    let err = SafeParcel::default()
        .decode::<Sample>(&bytes[..bytes.len() - 4])
        .unwrap_err();
    assert!(matches!(err, Error::TruncatedBuffer(_)), "{err}");
}

#[test]
fn test_empty_input() {
    let err = SafeParcel::default().decode::<Sample>(&[]).unwrap_err();
    assert!(matches!(err, Error::BufferOutOfBound(..)), "{err}");
}

#[test]
fn test_wrong_magic() {
    let mut bytes = sample_bytes();
    bytes[0] ^= 0x01;
    let err = SafeParcel::default().decode::<Sample>(&bytes).unwrap_err();
    assert!(matches!(err, Error::MalformedHeader(_)), "{err}");
}

#[test]
fn test_length_mismatch() {
    let parcel = SafeParcel::default();
    let bytes = parcel.encode(&Wide { count: 1 }).unwrap();
    let err = parcel.decode::<Sample>(&bytes).unwrap_err();
    match err {
        Error::LengthMismatch {
            id,
            expected,
            actual,
        } => {
            assert_eq!(id, 1);
            assert_eq!(expected, 4);
            assert_eq!(actual, 8);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_field_past_record_end() {
    let bytes = words(&[
        tag_word(SAFE_PARCEL_OBJECT_MAGIC, 8),
        tag_word(1, 100),
        7,
    ]);
    let err = SafeParcel::default().decode::<Sample>(&bytes).unwrap_err();
    assert!(matches!(err, Error::TruncatedBuffer(_)), "{err}");
}

#[test]
fn test_tag_overreads_record_end() {
    // the record claims 2 bytes but a tag word is 4
    let bytes = words(&[tag_word(SAFE_PARCEL_OBJECT_MAGIC, 2), tag_word(9, 0)]);
    let err = SafeParcel::default()
        .check_trailing(false)
        .decode::<Sample>(&bytes)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedHeader(_)), "{err}");
}

#[test]
fn test_huge_element_count() {
    let bytes = words(&[
        tag_word(SAFE_PARCEL_OBJECT_MAGIC, 8),
        tag_word(1, 4),
        1_000_000_000,
    ]);
    let err = SafeParcel::default().decode::<Counts>(&bytes).unwrap_err();
    assert!(matches!(err, Error::TruncatedBuffer(_)), "{err}");
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = sample_bytes();
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    let err = SafeParcel::default().decode::<Sample>(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)), "{err}");

    let sample: Sample = SafeParcel::default()
        .check_trailing(false)
        .decode(&bytes)
        .unwrap();
    assert_eq!(sample.count, 3);
}

#[test]
fn test_fixed_width_field_with_extra_bytes() {
    let bytes = words(&[
        tag_word(SAFE_PARCEL_OBJECT_MAGIC, 12),
        tag_word(1, 8),
        5,
        0xDEAD_BEEF,
    ]);
    let err = SafeParcel::default().decode::<Sample>(&bytes).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { .. }), "{err}");
}

#[test]
fn test_hand_written_record() {
    // an empty host string is a zero count and a padded terminator
    let bytes = words(&[
        tag_word(SAFE_PARCEL_OBJECT_MAGIC, 20),
        tag_word(1, 4),
        5,
        tag_word(2, 8),
        0,
        0,
    ]);
    let sample: Sample = SafeParcel::default().decode(&bytes).unwrap();
    assert_eq!(
        sample,
        Sample {
            count: 5,
            label: String::new()
        }
    );
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Node {
    #[safeparcel(id = 1)]
    value: i32,
    #[safeparcel(id = 2)]
    children: Vec<Node>,
}

fn chain(depth: i32) -> Node {
    let mut node = Node {
        value: depth,
        children: vec![],
    };
    for value in (0..depth).rev() {
        node = Node {
            value,
            children: vec![node],
        };
    }
    node
}

#[test]
fn test_depth_limit() {
    let deep = chain(40);
    let err = SafeParcel::default().encode(&deep).unwrap_err();
    assert!(matches!(err, Error::DepthExceed(_)), "{err}");

    let permissive = SafeParcel::default().max_depth(64);
    let bytes = permissive.encode(&deep).unwrap();
    let err = SafeParcel::default().decode::<Node>(&bytes).unwrap_err();
    assert!(matches!(err, Error::DepthExceed(_)), "{err}");
    assert_eq!(permissive.decode::<Node>(&bytes).unwrap(), deep);

    let shallow = chain(5);
    let bytes = SafeParcel::default().encode(&shallow).unwrap();
    assert_eq!(SafeParcel::default().decode::<Node>(&bytes).unwrap(), shallow);
}

struct Clash {
    a: i32,
}

impl ParcelDefault for Clash {
    fn parcel_default() -> Self {
        Clash { a: 0 }
    }
}

impl safeparcel_core::SafeParcelable for Clash {
    fn type_name() -> &'static str {
        "Clash"
    }

    fn describe_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new(1, "a", i32::field_kind(ListPolicy::Default)),
            FieldDescriptor::new(1, "b", i32::field_kind(ListPolicy::Default)),
        ]
    }

    fn encode_field(
        &self,
        context: &mut WriteContext,
        field: &FieldDescriptor,
    ) -> Result<(), Error> {
        self.a.write_field(context, field)
    }

    fn decode_field(
        &mut self,
        context: &mut ReadContext,
        field: &FieldDescriptor,
        tag: Tag,
    ) -> Result<(), Error> {
        self.a = i32::read_field(context, field, tag)?;
        Ok(())
    }

    fn reset_field(&mut self, _: u16) {
        self.a = 0;
    }
}

#[test]
fn test_duplicate_field_id() {
    let parcel = SafeParcel::default();
    let err = parcel.encode(&Clash { a: 1 }).unwrap_err();
    assert!(matches!(err, Error::DuplicateFieldId(_)), "{err}");
    // a failed build is not cached
    let err = parcel.encode(&Clash { a: 1 }).unwrap_err();
    assert!(matches!(err, Error::DuplicateFieldId(_)), "{err}");
    assert!(!safeparcel_core::DescriptorRegistry::global().contains::<Clash>());
}

#[test]
fn test_errors_do_not_poison_later_calls() {
    let parcel = SafeParcel::default();
    assert!(parcel.decode::<Sample>(&[1, 2, 3]).is_err());
    let bytes = sample_bytes();
    assert_eq!(parcel.decode::<Sample>(&bytes).unwrap().label, "label");
}
