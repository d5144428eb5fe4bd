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

use std::fmt::Debug;
use std::sync::Arc;

/// Opaque handle to an established remote connection.
///
/// Clones share the same underlying object; [`RemoteHandle::same_object`]
/// compares object identity, not the descriptor.
#[derive(Clone)]
pub struct RemoteHandle {
    inner: Arc<RemoteObject>,
}

struct RemoteObject {
    descriptor: String,
}

impl RemoteHandle {
    /// Wraps a new remote object identified by `descriptor`.
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RemoteObject {
                descriptor: descriptor.into(),
            }),
        }
    }

    /// Interface descriptor of the remote object.
    pub fn descriptor(&self) -> &str {
        &self.inner.descriptor
    }

    /// Returns `true` if both handles point at the same remote object.
    pub fn same_object(&self, other: &RemoteHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for RemoteHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl Eq for RemoteHandle {}

impl Debug for RemoteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("descriptor", &self.inner.descriptor)
            .finish()
    }
}
