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

//! Per-target connection bookkeeping.
//!
//! A [`LocalCallRecord`] tracks the registrations waiting on one target and
//! the state of the single underlying connection they share:
//!
//! ```text
//! Disconnected --add_caller--> Connecting --connect succeeded--> Connected
//!      ^                           |                                 |
//!      +------ connect failed -----+------ remote died --------------+
//! ```
//!
//! The record never talks to the platform. It tells the container when a
//! connect has to be issued and the container decides the record's lifetime.

use std::fmt::Display;

use call_utils::id::IdGenerator;

use crate::caller::{CallerRegistration, CallerToken};
use crate::key::TargetKey;
use crate::remote::RemoteHandle;

static RECORD_ID: IdGenerator = IdGenerator::new(1);

/// Reason handed to release callbacks when the remote process dies.
pub const RELEASE_REASON_DIED: &str = "died";

/// Connection state of a record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CallState {
    /// No connection and no connect in flight.
    Disconnected,
    /// A connect request is in flight.
    Connecting,
    /// The remote proxy is bound.
    Connected,
}

impl CallState {
    /// Upper-case name used in dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallState::Disconnected => "DISCONNECTED",
            CallState::Connecting => "CONNECTING",
            CallState::Connected => "CONNECTED",
        }
    }
}

impl Display for CallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the container has to do after [`LocalCallRecord::add_caller`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AddOutcome {
    /// The record just moved to `Connecting`; a platform connect is required.
    NeedConnect,
    /// A connect is already in flight; the caller waits for it.
    Queued,
    /// The record was connected; the caller has already been notified.
    Notified,
}

/// State kept for one target referenced by at least one registration.
pub struct LocalCallRecord {
    id: u64,
    key: TargetKey,
    callers: Vec<CallerRegistration>,
    state: CallState,
    remote: Option<RemoteHandle>,
}

impl LocalCallRecord {
    /// Creates an empty, disconnected record for `key`.
    pub fn new(key: TargetKey) -> Self {
        Self {
            id: RECORD_ID.next_id(),
            key,
            callers: Vec::new(),
            state: CallState::Disconnected,
            remote: None,
        }
    }

    /// Process-unique record id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn key(&self) -> &TargetKey {
        &self.key
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    /// Bound proxy, present only while connected.
    pub fn remote(&self) -> Option<&RemoteHandle> {
        self.remote.as_ref()
    }

    /// Registrations in insertion order.
    pub fn callers(&self) -> &[CallerRegistration] {
        &self.callers
    }

    /// Returns `true` while at least one registration is held.
    pub fn is_exist_callback(&self) -> bool {
        !self.callers.is_empty()
    }

    /// Appends `caller` and reports what the container must do next.
    ///
    /// A connected record notifies the new caller immediately. A disconnected
    /// record moves to `Connecting` and asks for a connect; a record already
    /// connecting only queues the caller, so at most one connect is in flight
    /// per target.
    pub fn add_caller(&mut self, mut caller: CallerRegistration) -> AddOutcome {
        let outcome = match (self.state, self.remote.as_ref()) {
            (CallState::Connected, Some(remote)) => {
                caller.notify_connected(remote);
                AddOutcome::Notified
            }
            (CallState::Connecting, _) => AddOutcome::Queued,
            _ => {
                self.state = CallState::Connecting;
                AddOutcome::NeedConnect
            }
        };
        debug!(
            "record {} add caller {}, outcome {:?}",
            self.id,
            caller.token(),
            outcome
        );
        self.callers.push(caller);
        outcome
    }

    /// Removes the registration with `token`, returning whether the record is
    /// now empty.
    pub fn remove_caller(&mut self, token: CallerToken) -> bool {
        self.callers.retain(|caller| caller.token() != token);
        self.callers.is_empty()
    }

    /// Returns the first registration matching `predicate`.
    pub fn find_caller<P>(&self, mut predicate: P) -> Option<&CallerRegistration>
    where
        P: FnMut(&CallerRegistration) -> bool,
    {
        self.callers.iter().find(|caller| predicate(caller))
    }

    /// Binds `remote` and notifies every caller not yet notified, in
    /// insertion order.
    ///
    /// Returns `false` and changes nothing unless the record is connecting.
    pub fn on_connect_succeeded(&mut self, remote: RemoteHandle) -> bool {
        if self.state != CallState::Connecting {
            return false;
        }
        for caller in self.callers.iter_mut().filter(|caller| !caller.is_invoked()) {
            caller.notify_connected(&remote);
        }
        self.remote = Some(remote);
        self.state = CallState::Connected;
        true
    }

    /// Drops back to `Disconnected` after a failed connect.
    ///
    /// Queued callers stay registered and are not notified. Returns `false`
    /// and changes nothing unless the record is connecting.
    pub fn on_connect_failed(&mut self) -> bool {
        if self.state != CallState::Connecting {
            return false;
        }
        self.state = CallState::Disconnected;
        self.remote = None;
        true
    }

    /// Tells every caller the remote died and forgets them all.
    ///
    /// Returns `false` and changes nothing unless the record is connected.
    pub fn on_remote_died(&mut self) -> bool {
        if self.state != CallState::Connected {
            return false;
        }
        for mut caller in self.callers.drain(..) {
            caller.notify_released(RELEASE_REASON_DIED);
        }
        self.state = CallState::Disconnected;
        self.remote = None;
        true
    }
}
