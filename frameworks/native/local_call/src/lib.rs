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

//! Local call connection management for abilities.
//!
//! Callers ask to call a remote ability identified by a [`TargetKey`]. All
//! callers of the same target share one platform connection: the first caller
//! triggers the connect, later callers queue on it or are served immediately
//! once it is up, and the connection is released with its last caller. Death
//! of the remote process is fanned out to every caller of that target.
//!
//! [`LocalCallContainer`] is the synchronous core. [`CallManager`] runs a
//! container on a single task and serialises requests and platform
//! completions onto it.

#![deny(unused_must_use)]

#[macro_use]
extern crate log;

mod call_manager;
mod caller;
mod config;
mod connection;
mod container;
mod error;
mod key;
mod record;
mod remote;

pub use call_manager::{CallManager, CallManagerEntry};
pub use caller::{CallerRegistration, CallerToken, ConnectedCallback, ReleaseCallback};
pub use config::CallConfig;
pub use connection::{ConnectionEventSink, ConnectionService};
pub use container::{LocalCallContainer, DUMP_HEADER};
pub use error::{CallError, ErrCode, ERR_INVALID_VALUE, ERR_OK};
pub use key::TargetKey;
pub use record::{AddOutcome, CallState, LocalCallRecord, RELEASE_REASON_DIED};
pub use remote::RemoteHandle;
