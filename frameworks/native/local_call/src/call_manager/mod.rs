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

mod manager;

pub use manager::{CallManager, CallManagerEntry};
use ylong_runtime::sync::oneshot::Sender;

use crate::caller::{CallerToken, ConnectedCallback, ReleaseCallback};
use crate::error::CallError;
use crate::key::TargetKey;
use crate::remote::RemoteHandle;

pub(crate) enum CallEvent {
    /// Register a caller on a target.
    StartCall(
        TargetKey,
        ConnectedCallback,
        Option<ReleaseCallback>,
        Sender<Result<CallerToken, CallError>>,
    ),
    /// Release a caller on a known target.
    ReleaseCall(TargetKey, CallerToken, Sender<Result<(), CallError>>),
    /// Release a caller on whichever target holds it.
    ReleaseCaller(CallerToken, Sender<Result<(), CallError>>),
    /// Describe the current records.
    Dump(Sender<Vec<String>>),
    /// Platform: connection established.
    Connected(TargetKey, RemoteHandle),
    /// Platform: connect failed.
    ConnectFailed(TargetKey),
    /// Platform: remote process died.
    RemoteDied(TargetKey),
    /// Platform: remote object died.
    RemoteObjectDied(RemoteHandle),
    /// Tear down all records and stop the loop.
    Shutdown(Sender<()>),
}
