// Copyright (C) 2024 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::sync::Arc;

use super::*;

// @tc.name: ut_id_generator_starts_at_seed
// @tc.desc: Test the first identifier equals the start value
// @tc.precon: NA
// @tc.step: 1. Create IdGenerator with start 7
//           2. Call next_id twice
// @tc.expect: Returns 7 then 8
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 0
#[test]
fn ut_id_generator_starts_at_seed() {
    let generator = IdGenerator::new(7);
    assert_eq!(generator.next_id(), 7);
    assert_eq!(generator.next_id(), 8);
}

// @tc.name: ut_id_generator_unique_across_threads
// @tc.desc: Test identifiers stay unique under concurrent use
// @tc.precon: NA
// @tc.step: 1. Share one IdGenerator between 4 threads
//           2. Draw 100 identifiers on each thread
//           3. Collect all identifiers into a set
// @tc.expect: The set holds 400 distinct identifiers
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 1
#[test]
fn ut_id_generator_unique_across_threads() {
    let generator = Arc::new(IdGenerator::new(0));
    let handles = (0..4)
        .map(|_| {
            let generator = generator.clone();
            std::thread::spawn(move || (0..100).map(|_| generator.next_id()).collect::<Vec<_>>())
        })
        .collect::<Vec<_>>();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id));
        }
    }
    assert_eq!(ids.len(), 400);
}
