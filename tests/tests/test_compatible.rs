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

use std::collections::HashMap;

use safeparcel_core::buffer::ParcelWrite;
use safeparcel_core::{SafeParcel, Tag, Writer, SAFE_PARCEL_OBJECT_MAGIC};
use safeparcel_derive::SafeParcelable;

#[derive(SafeParcelable, Debug, PartialEq)]
#[safeparcel(name = "Animal")]
struct AnimalV1 {
    #[safeparcel(id = 1)]
    name: String,
    #[safeparcel(id = 2)]
    legs: i32,
}

#[derive(SafeParcelable, Debug, PartialEq)]
#[safeparcel(name = "Animal")]
struct AnimalV2 {
    #[safeparcel(id = 1)]
    name: String,
    #[safeparcel(id = 2)]
    legs: i32,
    #[safeparcel(id = 3)]
    tags: Vec<String>,
    #[safeparcel(id = 4)]
    owner: Owner,
    #[safeparcel(id = 5)]
    weights: Vec<f64>,
    #[safeparcel(id = 9)]
    extras: HashMap<String, String>,
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Owner {
    #[safeparcel(id = 1)]
    name: String,
    #[safeparcel(id = 2)]
    age: i32,
}

#[test]
fn test_new_writer_old_reader() {
    let parcel = SafeParcel::default();
    let v2 = AnimalV2 {
        name: "cat".to_string(),
        legs: 4,
        tags: vec!["small".to_string(), "furry".to_string()],
        owner: Owner {
            name: "ann".to_string(),
            age: 31,
        },
        weights: vec![3.5, 4.0],
        extras: HashMap::from([("color".to_string(), "black".to_string())]),
    };
    let bytes = parcel.encode(&v2).unwrap();
    let v1: AnimalV1 = parcel.decode(&bytes).unwrap();
    assert_eq!(
        v1,
        AnimalV1 {
            name: "cat".to_string(),
            legs: 4,
        }
    );
}

#[test]
fn test_old_writer_new_reader() {
    let parcel = SafeParcel::default();
    let v1 = AnimalV1 {
        name: "dog".to_string(),
        legs: 3,
    };
    let bytes = parcel.encode(&v1).unwrap();
    let v2: AnimalV2 = parcel.decode(&bytes).unwrap();
    assert_eq!(v2.name, "dog");
    assert_eq!(v2.legs, 3);
    assert!(v2.tags.is_empty());
    assert_eq!(
        v2.owner,
        Owner {
            name: String::new(),
            age: 0,
        }
    );
    assert!(v2.weights.is_empty());
    assert!(v2.extras.is_empty());
}

#[test]
fn test_sparse_and_reordered_ids() {
    #[derive(SafeParcelable, Debug, PartialEq)]
    struct Writer {
        #[safeparcel(id = 1000)]
        high: i64,
        #[safeparcel(id = 3)]
        low: String,
        #[safeparcel(id = 65535)]
        max: bool,
    }

    #[derive(SafeParcelable, Debug, PartialEq)]
    struct Reader {
        #[safeparcel(id = 65535)]
        max: bool,
        #[safeparcel(id = 1000)]
        high: i64,
    }

    let parcel = SafeParcel::default();
    let bytes = parcel
        .encode(&Writer {
            high: 77,
            low: "dropped".to_string(),
            max: true,
        })
        .unwrap();
    let reader: Reader = parcel.decode(&bytes).unwrap();
    assert_eq!(
        reader,
        Reader {
            max: true,
            high: 77
        }
    );
}

#[test]
fn test_unknown_nested_record_skipped() {
    #[derive(SafeParcelable, Debug, PartialEq)]
    struct Payload {
        #[safeparcel(id = 1)]
        data: Vec<u8>,
        #[safeparcel(id = 2)]
        children: Vec<Owner>,
    }

    #[derive(SafeParcelable, Debug, PartialEq)]
    struct Envelope {
        #[safeparcel(id = 1)]
        kind: i32,
        #[safeparcel(id = 2)]
        payload: Payload,
        #[safeparcel(id = 3)]
        trailer: String,
    }

    #[derive(SafeParcelable, Debug, PartialEq)]
    struct EnvelopeHeaderOnly {
        #[safeparcel(id = 1)]
        kind: i32,
        #[safeparcel(id = 3)]
        trailer: String,
    }

    let parcel = SafeParcel::default();
    let bytes = parcel
        .encode(&Envelope {
            kind: 7,
            payload: Payload {
                data: vec![1; 33],
                children: vec![Owner {
                    name: "x".to_string(),
                    age: 1,
                }],
            },
            trailer: "end".to_string(),
        })
        .unwrap();
    let header: EnvelopeHeaderOnly = parcel.decode(&bytes).unwrap();
    assert_eq!(
        header,
        EnvelopeHeaderOnly {
            kind: 7,
            trailer: "end".to_string()
        }
    );
}

#[test]
fn test_changed_list_element_type_is_an_error_not_a_panic() {
    #[derive(SafeParcelable, Debug)]
    struct Ints {
        #[safeparcel(id = 1)]
        values: Vec<i32>,
    }

    #[derive(SafeParcelable, Debug)]
    struct Longs {
        #[safeparcel(id = 1)]
        values: Vec<i64>,
    }

    let parcel = SafeParcel::default();
    let bytes = parcel.encode(&Ints { values: vec![1, 2] }).unwrap();
    assert!(parcel.decode::<Longs>(&bytes).is_err());
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Reading {
    #[safeparcel(id = 1)]
    value: i64,
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Readings {
    #[safeparcel(id = 1)]
    readings: Vec<Reading>,
    #[safeparcel(id = 2)]
    sensor: i32,
}

#[derive(SafeParcelable, Debug, PartialEq)]
#[safeparcel(name = "Readings")]
struct SparseReadings {
    #[safeparcel(id = 1)]
    readings: Vec<Option<Reading>>,
    #[safeparcel(id = 2)]
    sensor: i32,
}

/// Object array in the typed-list layout: each present element is marked
/// with `1` rather than its byte count, `0` marks a null element.
fn typed_list_readings(values: &[Option<i64>], sensor: i32) -> Vec<u8> {
    let present = values.iter().filter(|v| v.is_some()).count() as u32;
    let array_len = 4 + values.len() as u32 * 4 + present * 16;
    let mut writer = Writer::default();
    Tag::new(SAFE_PARCEL_OBJECT_MAGIC, 4 + array_len + 8).write(&mut writer);
    Tag::new(1, array_len).write(&mut writer);
    writer.write_i32(values.len() as i32);
    for value in values {
        match value {
            Some(value) => {
                writer.write_i32(1);
                Tag::new(SAFE_PARCEL_OBJECT_MAGIC, 12).write(&mut writer);
                Tag::new(1, 8).write(&mut writer);
                writer.write_i64(*value);
            }
            None => writer.write_i32(0),
        }
    }
    Tag::new(2, 4).write(&mut writer);
    writer.write_i32(sensor);
    writer.dump()
}

#[test]
fn test_typed_list_element_marker() {
    let parcel = SafeParcel::default();
    let bytes = typed_list_readings(&[Some(7), Some(-3)], 42);
    let decoded: Readings = parcel.decode(&bytes).unwrap();
    assert_eq!(
        decoded,
        Readings {
            readings: vec![Reading { value: 7 }, Reading { value: -3 }],
            sensor: 42,
        }
    );

    let bytes = typed_list_readings(&[Some(1), None, Some(2)], 5);
    let decoded: SparseReadings = parcel.decode(&bytes).unwrap();
    assert_eq!(
        decoded.readings,
        vec![Some(Reading { value: 1 }), None, Some(Reading { value: 2 })]
    );
    assert_eq!(decoded.sensor, 5);
}

#[test]
fn test_written_element_sizes_still_decode() {
    let parcel = SafeParcel::default();
    let readings = Readings {
        readings: vec![Reading { value: i64::MAX }, Reading { value: 0 }],
        sensor: 1,
    };
    let bytes = parcel.encode(&readings).unwrap();
    // count word of the first element holds the byte count of its record
    assert_eq!(&bytes[12..16], &16i32.to_le_bytes());
    assert_eq!(parcel.decode::<Readings>(&bytes).unwrap(), readings);
}
