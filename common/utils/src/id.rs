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

//! Monotonic identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out strictly increasing `u64` identifiers.
///
/// The generator is lock-free and may be shared between threads, so it can
/// back both process-wide counters (in a `static`) and per-owner counters.
///
/// # Examples
///
/// ```rust
/// use call_utils::id::IdGenerator;
///
/// static RECORD_ID: IdGenerator = IdGenerator::new(1);
///
/// let first = RECORD_ID.next_id();
/// let second = RECORD_ID.next_id();
/// assert!(second > first);
/// ```
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator whose first identifier is `start`.
    pub const fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Returns the next identifier.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
