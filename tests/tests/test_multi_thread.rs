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

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use safeparcel_core::{DescriptorRegistry, SafeParcel};
use safeparcel_derive::SafeParcelable;

#[derive(SafeParcelable, Debug, PartialEq, Eq, Hash, Clone)]
struct Item {
    #[safeparcel(id = 1)]
    id: i32,
    #[safeparcel(id = 2)]
    name: String,
}

#[derive(SafeParcelable, Debug, PartialEq, Clone)]
struct Batch {
    #[safeparcel(id = 1)]
    items: Vec<Item>,
    #[safeparcel(id = 3)]
    seq: i64,
}

#[test]
fn test_shared_parcel_across_threads() {
    let parcel = Arc::new(SafeParcel::default());
    let src: HashSet<Item> = (0..16)
        .map(|id| Item {
            id,
            name: format!("item-{id}"),
        })
        .collect();

    let mut handles = vec![];
    for item in &src {
        let parcel = Arc::clone(&parcel);
        let item = item.clone();
        handles.push(thread::spawn(move || parcel.encode(&item).unwrap()));
    }
    let encoded: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let mut handles = vec![];
    for bytes in encoded {
        let parcel = Arc::clone(&parcel);
        handles.push(thread::spawn(move || parcel.decode::<Item>(&bytes).unwrap()));
    }
    let dest: HashSet<Item> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(dest, src);
}

#[test]
fn test_concurrent_first_use_builds_one_table() {
    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let table = DescriptorRegistry::global().table::<Batch>().unwrap();
                let batch = Batch {
                    items: vec![Item {
                        id: i as i32,
                        name: "x".to_string(),
                    }],
                    seq: i as i64,
                };
                let bytes = safeparcel::encode(&batch).unwrap();
                assert_eq!(safeparcel::decode::<Batch>(&bytes).unwrap(), batch);
                table
            })
        })
        .collect();

    let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for table in &tables[1..] {
        assert!(Arc::ptr_eq(&tables[0], table));
    }
    assert_eq!(tables[0].len(), 2);
    assert_eq!(tables[0].type_name(), "Batch");
    assert!(DescriptorRegistry::global().contains::<Item>());
}

#[test]
fn test_pooled_writers_under_contention() {
    let parcel = Arc::new(SafeParcel::default().initial_capacity(16));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let parcel = Arc::clone(&parcel);
            thread::spawn(move || {
                for n in 0..200 {
                    let batch = Batch {
                        items: (0..(n % 5))
                            .map(|id| Item {
                                id,
                                name: "y".repeat(id as usize),
                            })
                            .collect(),
                        seq: t * 1000 + n as i64,
                    };
                    let bytes = parcel.encode(&batch).unwrap();
                    assert_eq!(parcel.decode::<Batch>(&bytes).unwrap(), batch);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
