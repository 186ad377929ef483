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

use safeparcel_core::buffer::{ParcelRead, ParcelWrite};
use safeparcel_core::{Reader, SafeParcel, Writer};
use safeparcel_derive::SafeParcelable;

#[derive(SafeParcelable, Debug, PartialEq)]
struct Location {
    #[safeparcel(id = 1)]
    provider: String,
    #[safeparcel(id = 2)]
    latitude: f64,
    #[safeparcel(id = 3)]
    longitude: f64,
}

#[derive(SafeParcelable, Debug, PartialEq)]
struct Status {
    #[safeparcel(id = 1)]
    code: i32,
}

#[test]
fn test_record_inside_host_parcel() {
    for parcel in [
        SafeParcel::default(),
        SafeParcel::default().compact_headers(false),
    ] {
        let location = Location {
            provider: "fused".to_string(),
            latitude: 52.52,
            longitude: 13.405,
        };
        let status = Status { code: -1 };

        let mut host = Writer::default();
        host.write_i32(0x1234);
        host.write_string(Some("interface.token"));
        parcel.encode_into(&location, &mut host).unwrap();
        parcel.encode_into(&status, &mut host).unwrap();
        host.write_i64(99);
        let bytes = host.dump();

        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_i32().unwrap(), 0x1234);
        assert_eq!(
            reader.read_string().unwrap().as_deref(),
            Some("interface.token")
        );
        assert_eq!(parcel.decode_from::<Location>(&mut reader).unwrap(), location);
        assert_eq!(parcel.decode_from::<Status>(&mut reader).unwrap(), status);
        assert_eq!(reader.read_i64().unwrap(), 99);
        assert_eq!(reader.remaining(), 0);
    }
}

#[test]
fn test_encode_matches_encode_into() {
    let parcel = SafeParcel::default();
    let status = Status { code: 42 };
    let mut host = Writer::with_capacity(8);
    parcel.encode_into(&status, &mut host).unwrap();
    assert_eq!(host.dump(), parcel.encode(&status).unwrap());
}
