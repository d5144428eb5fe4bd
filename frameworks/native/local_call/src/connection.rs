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

//! Boundary to the platform connection service.

use std::sync::Arc;

use crate::caller::CallerToken;
use crate::error::ErrCode;
use crate::key::TargetKey;
use crate::remote::RemoteHandle;

/// Asynchronous connect primitive provided by the platform.
///
/// Both methods only report whether the request was accepted. The outcome of
/// a connect arrives later through the [`ConnectionEventSink`] passed along
/// with it.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectionService: Send + Sync {
    /// Requests a connection to `key` on behalf of `token`.
    fn async_connect(
        &self,
        key: &TargetKey,
        token: CallerToken,
        sink: Arc<dyn ConnectionEventSink>,
    ) -> ErrCode;

    /// Tears down the connection to `key`.
    fn async_disconnect(&self, key: &TargetKey) -> ErrCode;
}

/// Receiver of connection outcomes reported by the platform.
pub trait ConnectionEventSink: Send + Sync {
    /// The connection to `key` is established and bound to `remote`.
    fn on_connection_established(&self, key: TargetKey, remote: RemoteHandle);

    /// The connect request for `key` failed.
    fn on_connection_failed(&self, key: TargetKey);

    /// The remote process behind `key` died.
    fn on_remote_died(&self, key: TargetKey);

    /// The remote object `remote` died; used when only the object is known.
    fn on_remote_object_died(&self, remote: RemoteHandle);
}
