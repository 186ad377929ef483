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

use std::collections::{BTreeMap, HashMap};

use safeparcel_core::buffer::ParcelWrite;
use safeparcel_core::{
    Bundle, Error, SafeParcel, Tag, ValueTag, Writer, SAFE_PARCEL_OBJECT_MAGIC,
};
use safeparcel_derive::SafeParcelable;

#[derive(SafeParcelable, Debug, PartialEq, Clone)]
struct Point {
    #[safeparcel(id = 1)]
    x: i32,
    #[safeparcel(id = 2)]
    y: i32,
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Lists {
    #[safeparcel(id = 1)]
    ints: Vec<i32>,
    #[safeparcel(id = 2, value_list)]
    names: Vec<String>,
    #[safeparcel(id = 3, value_list)]
    points: Vec<Point>,
    #[safeparcel(id = 4)]
    flags: Vec<bool>,
    #[safeparcel(id = 5, direct_list)]
    raw_doubles: Vec<f64>,
    #[safeparcel(id = 6, value_list)]
    blobs: Vec<Vec<u8>>,
    #[safeparcel(id = 7)]
    shorts: Vec<i16>,
    #[safeparcel(id = 8)]
    bytes: Vec<i8>,
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Maps {
    #[safeparcel(id = 1)]
    counters: HashMap<String, i64>,
    #[safeparcel(id = 2)]
    nested: BTreeMap<i32, BTreeMap<String, f32>>,
    #[safeparcel(id = 3)]
    points: BTreeMap<String, Point>,
    #[safeparcel(id = 4)]
    groups: HashMap<String, Vec<String>>,
    #[safeparcel(id = 5)]
    optional: BTreeMap<String, Option<String>>,
}

#[test]
fn test_lists_roundtrip() {
    let parcel = SafeParcel::default();
    let lists = Lists {
        ints: vec![1, -1, i32::MAX],
        names: vec!["alpha".to_string(), "beta".to_string()],
        points: vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }],
        flags: vec![true, false, true],
        raw_doubles: vec![0.5, -1.25],
        blobs: vec![vec![1, 2, 3], vec![]],
        shorts: vec![-5, 300],
        bytes: vec![-128, 127],
    };
    let bytes = parcel.encode(&lists).unwrap();
    assert_eq!(parcel.decode::<Lists>(&bytes).unwrap(), lists);
}

#[test]
fn test_value_list_layout() {
    #[derive(SafeParcelable, Debug, PartialEq)]
    struct Names {
        #[safeparcel(id = 2, value_list)]
        names: Vec<String>,
    }

    let bytes = SafeParcel::default()
        .encode(&Names {
            names: vec!["a".to_string()],
        })
        .unwrap();
    // count, VAL_STRING, then the host string "a"
    let payload: Vec<u8> = [1i32, 0, 1, 0x61]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    assert_eq!(&bytes[4..8], &[2, 0, 16, 0]);
    assert_eq!(&bytes[8..], &payload[..]);
}

#[test]
fn test_record_in_value_list_carries_type_name() {
    #[derive(SafeParcelable, Debug, PartialEq)]
    struct Shapes {
        #[safeparcel(id = 1, value_list)]
        points: Vec<Point>,
    }

    let bytes = SafeParcel::default()
        .encode(&Shapes {
            points: vec![Point { x: 7, y: 8 }],
        })
        .unwrap();
    // header, tag, count, VAL_PARCELABLE, then the name as a host string
    assert_eq!(&bytes[12..16], &4i32.to_le_bytes());
    assert_eq!(&bytes[16..20], &5i32.to_le_bytes());
    let name: Vec<u8> = "Point".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
    assert_eq!(&bytes[20..30], &name[..]);
}

#[test]
fn test_maps_roundtrip() {
    let parcel = SafeParcel::default();
    let maps = Maps {
        counters: HashMap::from([("a".to_string(), 1), ("b".to_string(), i64::MIN)]),
        nested: BTreeMap::from([
            (1, BTreeMap::from([("x".to_string(), 1.5)])),
            (2, BTreeMap::new()),
        ]),
        points: BTreeMap::from([("origin".to_string(), Point { x: 0, y: 0 })]),
        groups: HashMap::from([(
            "g".to_string(),
            vec!["m1".to_string(), "m2".to_string()],
        )]),
        optional: BTreeMap::from([
            ("set".to_string(), Some("v".to_string())),
            ("unset".to_string(), None),
        ]),
    };
    let bytes = parcel.encode(&maps).unwrap();
    assert_eq!(parcel.decode::<Maps>(&bytes).unwrap(), maps);
}

#[test]
fn test_mismatched_value_tag() {
    #[derive(SafeParcelable, Debug)]
    struct Strings {
        #[safeparcel(id = 1, value_list)]
        values: Vec<String>,
    }

    #[derive(SafeParcelable, Debug)]
    struct Ints {
        #[safeparcel(id = 1)]
        values: Vec<i32>,
    }

    let parcel = SafeParcel::default();
    let bytes = parcel
        .encode(&Strings {
            values: vec!["1".to_string()],
        })
        .unwrap();
    let err = parcel.decode::<Ints>(&bytes).unwrap_err();
    assert!(matches!(err, Error::UnsupportedKind(_)), "{err}");
}

#[test]
fn test_unknown_value_tag() {
    #[derive(SafeParcelable, Debug)]
    struct Ints {
        #[safeparcel(id = 1)]
        values: Vec<i32>,
    }

    let mut body = Writer::default();
    body.write_i32(1);
    // VAL_SPARSEARRAY has no Rust counterpart
    body.write_i32(12);
    body.write_i32(0);
    let bytes = framed(1, body.dump());
    let err = SafeParcel::default().decode::<Ints>(&bytes).unwrap_err();
    assert!(matches!(err, Error::UnsupportedKind(_)), "{err}");
}

#[test]
fn test_string_array_value() {
    #[derive(SafeParcelable, Debug)]
    struct Groups {
        #[safeparcel(id = 1)]
        groups: HashMap<String, Vec<String>>,
    }

    let mut body = Writer::default();
    body.write_i32(1);
    body.write_i32(ValueTag::String.into());
    body.write_string(Some("k"));
    body.write_i32(ValueTag::StringArray.into());
    body.write_i32(2);
    body.write_string(Some("a"));
    body.write_string(None);
    let bytes = framed(1, body.dump());

    let groups: Groups = SafeParcel::default().decode(&bytes).unwrap();
    assert_eq!(
        groups.groups.get("k"),
        Some(&vec!["a".to_string(), String::new()])
    );
}

#[test]
fn test_bundle_fields() {
    #[derive(SafeParcelable, Debug, PartialEq)]
    struct Intent {
        #[safeparcel(id = 1)]
        action: String,
        #[safeparcel(id = 2)]
        extras: Bundle<String>,
        #[safeparcel(id = 3, nullable)]
        limits: Option<Bundle<i64>>,
        #[safeparcel(id = 4)]
        points: Bundle<Point>,
    }

    let parcel = SafeParcel::default();
    let intent = Intent {
        action: "VIEW".to_string(),
        extras: [("account", "a@b".to_string()), ("scope", "profile".to_string())]
            .into_iter()
            .collect(),
        limits: Some([("max", i64::MAX)].into_iter().collect()),
        points: [("origin", Point { x: 0, y: 0 })].into_iter().collect(),
    };
    let bytes = parcel.encode(&intent).unwrap();
    assert_eq!(parcel.decode::<Intent>(&bytes).unwrap(), intent);

    let bare = Intent {
        action: String::new(),
        extras: Bundle::new(),
        limits: None,
        points: Bundle::new(),
    };
    let bytes = parcel.encode(&bare).unwrap();
    assert_eq!(parcel.decode::<Intent>(&bytes).unwrap(), bare);
}

#[test]
fn test_bundle_from_peer() {
    #[derive(SafeParcelable, Debug)]
    struct Options {
        #[safeparcel(id = 1)]
        options: Bundle<bool>,
    }

    let mut body = Writer::default();
    body.write_i32(-1);
    body.write_i32(0x4C44_4E42);
    let start = body.data_position();
    body.write_i32(1);
    body.write_string(Some("silent"));
    body.write_i32(ValueTag::Boolean.into());
    body.write_i32(1);
    let length = body.data_position() - start;
    body.set_data_position(0);
    body.write_i32(length as i32);
    let bytes = framed(1, body.dump());

    let options: Options = SafeParcel::default().decode(&bytes).unwrap();
    assert_eq!(options.options.get("silent"), Some(&true));

    // a zero length is an empty bundle
    let mut body = Writer::default();
    body.write_i32(0);
    let bytes = framed(1, body.dump());
    assert!(SafeParcel::default().decode::<Options>(&bytes).unwrap().options.is_empty());
}

fn framed(id: u16, payload: Vec<u8>) -> Vec<u8> {
    let mut writer = Writer::default();
    Tag::new(SAFE_PARCEL_OBJECT_MAGIC, payload.len() as u32 + 4).write(&mut writer);
    Tag::new(id, payload.len() as u32).write(&mut writer);
    let mut bytes = writer.dump();
    bytes.extend_from_slice(&payload);
    bytes
}
