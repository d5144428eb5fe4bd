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

//! Per-caller registrations.
//!
//! A [`CallerRegistration`] is one logical caller's interest in a target. It
//! holds the callback fired when the connection becomes available and an
//! optional callback fired when the connection is torn down underneath it.

use std::fmt::Display;

use crate::remote::RemoteHandle;

/// Callback receiving the remote proxy once the target is connected.
pub type ConnectedCallback = Box<dyn FnMut(&RemoteHandle) + Send>;

/// Callback receiving the reason a connection was torn down, e.g. `"died"`.
pub type ReleaseCallback = Box<dyn FnMut(&str) + Send>;

/// Opaque identity of a registration, handed back by `start_call`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CallerToken(u64);

impl CallerToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw token value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for CallerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logical caller's subscription to a target.
pub struct CallerRegistration {
    token: CallerToken,
    on_connected: Option<ConnectedCallback>,
    on_released: Option<ReleaseCallback>,
    invoked: bool,
}

impl CallerRegistration {
    /// Creates a registration with no callbacks set.
    pub fn new(token: CallerToken) -> Self {
        Self {
            token,
            on_connected: None,
            on_released: None,
            invoked: false,
        }
    }

    /// Sets the callback fired when the connection becomes available.
    pub fn set_on_connected(&mut self, callback: ConnectedCallback) {
        self.on_connected = Some(callback);
    }

    /// Sets the callback fired when the connection is torn down.
    pub fn set_on_released(&mut self, callback: ReleaseCallback) {
        self.on_released = Some(callback);
    }

    /// Identity of this registration.
    pub fn token(&self) -> CallerToken {
        self.token
    }

    /// Marks the connected callback as delivered.
    pub fn mark_invoked(&mut self) {
        self.invoked = true;
    }

    /// Returns `true` once the connected callback has fired.
    pub fn is_invoked(&self) -> bool {
        self.invoked
    }

    /// Delivers `remote` to the connected callback.
    ///
    /// Without a connected callback nothing is delivered and the registration
    /// stays uninvoked.
    pub fn notify_connected(&mut self, remote: &RemoteHandle) {
        let Some(callback) = self.on_connected.as_mut() else {
            error!("caller {} has no connected callback", self.token);
            return;
        };
        callback(remote);
        self.mark_invoked();
    }

    /// Delivers the release `reason` if a release callback is set.
    pub fn notify_released(&mut self, reason: &str) {
        match self.on_released.as_mut() {
            Some(callback) => callback(reason),
            None => debug!("caller {} has no release callback", self.token),
        }
    }
}
