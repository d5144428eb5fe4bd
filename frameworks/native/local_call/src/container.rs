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

//! Registry of call records keyed by target.
//!
//! The container multiplexes every caller of a target onto one platform
//! connection. It creates records on demand, issues at most one connect per
//! target and removes a record as soon as nothing references it. All methods
//! take `&mut self`; the owner is expected to drive the container from a
//! single thread, platform completions included.

use std::collections::HashMap;
use std::sync::Arc;

use call_utils::id::IdGenerator;

use crate::caller::{CallerRegistration, CallerToken, ConnectedCallback, ReleaseCallback};
use crate::config::CallConfig;
use crate::connection::{ConnectionEventSink, ConnectionService};
use crate::error::{CallError, ERR_OK};
use crate::key::TargetKey;
use crate::record::{AddOutcome, LocalCallRecord};
use crate::remote::RemoteHandle;

/// First line of every dump.
pub const DUMP_HEADER: &str = "caller connections:";

/// Owner of all call records of one context.
pub struct LocalCallContainer {
    records: HashMap<TargetKey, LocalCallRecord>,
    service: Arc<dyn ConnectionService>,
    sink: Arc<dyn ConnectionEventSink>,
    config: CallConfig,
    tokens: IdGenerator,
}

impl LocalCallContainer {
    /// Creates an empty container.
    ///
    /// `sink` is handed to the platform with every connect request and must
    /// route the outcome back to this container's owner.
    pub fn new(
        service: Arc<dyn ConnectionService>,
        sink: Arc<dyn ConnectionEventSink>,
        config: CallConfig,
    ) -> Self {
        Self {
            records: HashMap::new(),
            service,
            sink,
            config,
            tokens: IdGenerator::new(1),
        }
    }

    /// Registers a caller on `key`, connecting to it if nobody has yet.
    ///
    /// If the target is already connected `on_connected` runs before this
    /// returns. Otherwise it runs once the platform reports the connection.
    ///
    /// # Errors
    ///
    /// * `InvalidTarget` if the key is malformed.
    /// * `ConnectRejected` if the platform refused the connect request; the
    ///   caller is not registered in that case.
    pub fn start_call(
        &mut self,
        key: TargetKey,
        on_connected: ConnectedCallback,
        on_released: Option<ReleaseCallback>,
    ) -> Result<CallerToken, CallError> {
        if !key.is_valid() {
            error!("start call failed, invalid target {}", key);
            return Err(CallError::InvalidTarget);
        }
        if key.device_id().is_empty() {
            if self.config.is_device_id_required() {
                error!("start call failed, device id of {} is empty", key);
                return Err(CallError::InvalidTarget);
            }
            debug!("start call, device id of {} is empty", key);
        }

        let token = CallerToken::new(self.tokens.next_id());
        let mut caller = CallerRegistration::new(token);
        caller.set_on_connected(on_connected);
        if let Some(on_released) = on_released {
            caller.set_on_released(on_released);
        }

        let record = self
            .records
            .entry(key.clone())
            .or_insert_with(|| LocalCallRecord::new(key.clone()));
        info!("start call {} by caller {}", key, token);

        if record.add_caller(caller) != AddOutcome::NeedConnect {
            return Ok(token);
        }

        let ret = self.service.async_connect(&key, token, self.sink.clone());
        if ret != ERR_OK {
            error!("connect {} rejected, ret {}", key, ret);
            record.on_connect_failed();
            if record.remove_caller(token) {
                self.records.remove(&key);
            }
            return Err(CallError::ConnectRejected(ret));
        }
        debug!("connect {} issued", key);
        Ok(token)
    }

    /// Releases the registration `token` on `key`.
    ///
    /// Releasing the last registration of a target disconnects it and removes
    /// its record.
    pub fn release_call(&mut self, key: &TargetKey, token: CallerToken) -> Result<(), CallError> {
        let Some(record) = self.records.get_mut(key) else {
            error!("release call failed, no record for {}", key);
            return Err(CallError::NoSuchCaller);
        };
        if record.find_caller(|caller| caller.token() == token).is_none() {
            error!("release call failed, no caller {} on {}", token, key);
            return Err(CallError::NoSuchCaller);
        }

        if record.remove_caller(token) {
            self.remove_and_disconnect(key);
        } else {
            debug!("release caller {} on {}, record kept", token, key);
        }
        Ok(())
    }

    /// Releases the registration `token` on whichever target holds it.
    pub fn release_caller(&mut self, token: CallerToken) -> Result<(), CallError> {
        let key = self
            .records
            .values()
            .find(|record| record.find_caller(|caller| caller.token() == token).is_some())
            .map(|record| record.key().clone());
        match key {
            Some(key) => self.release_call(&key, token),
            None => {
                error!("release caller {} failed, not found", token);
                Err(CallError::NoSuchCaller)
            }
        }
    }

    /// Binds `remote` to `key` and notifies its waiting callers.
    pub fn on_connection_established(&mut self, key: &TargetKey, remote: RemoteHandle) {
        let Some(record) = self.records.get_mut(key) else {
            warn!("connection to {} established without record, dropped", key);
            return;
        };
        if record.on_connect_succeeded(remote) {
            info!("connection to {} established", key);
        } else {
            warn!(
                "connection to {} established in state {}, ignored",
                key,
                record.state()
            );
        }
    }

    /// Reverts `key` to disconnected after a failed connect.
    pub fn on_connection_failed(&mut self, key: &TargetKey) {
        let Some(record) = self.records.get_mut(key) else {
            warn!("connection to {} failed without record", key);
            return;
        };
        if !record.on_connect_failed() {
            warn!("connection to {} failed in state {}, ignored", key, record.state());
            return;
        }
        error!("connection to {} failed", key);
        if !record.is_exist_callback() {
            self.records.remove(key);
        }
    }

    /// Tells every caller of `key` the remote died and drops the record.
    pub fn on_remote_died(&mut self, key: &TargetKey) {
        let Some(record) = self.records.get_mut(key) else {
            warn!("remote of {} died without record", key);
            return;
        };
        if !record.on_remote_died() {
            warn!("remote of {} died in state {}, ignored", key, record.state());
            return;
        }
        info!("remote of {} died", key);
        self.records.remove(key);
    }

    /// Same as [`on_remote_died`](Self::on_remote_died), locating the target
    /// by its bound remote object.
    pub fn on_remote_object_died(&mut self, remote: &RemoteHandle) {
        let key = self
            .records
            .values()
            .find(|record| record.remote().is_some_and(|bound| bound.same_object(remote)))
            .map(|record| record.key().clone());
        match key {
            Some(key) => self.on_remote_died(&key),
            None => error!("died object {:?} not found in records", remote),
        }
    }

    /// Describes every record, ordered by record id.
    pub fn dump_state(&self) -> Vec<String> {
        let mut records = self.records.values().collect::<Vec<_>>();
        records.sort_by_key(|record| record.id());

        let mut info = Vec::with_capacity(records.len() + 1);
        info.push(DUMP_HEADER.to_string());
        for record in records {
            info.push(format!(
                "LocalCallRecord ID #{} callee uri[{}] callers #{} state #{}",
                record.id(),
                record.key(),
                record.callers().len(),
                record.state()
            ));
        }
        info
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &TargetKey) -> bool {
        self.records.contains_key(key)
    }

    /// Record currently held for `key`.
    pub fn record(&self, key: &TargetKey) -> Option<&LocalCallRecord> {
        self.records.get(key)
    }

    /// Drops every record, disconnecting them unless configured otherwise.
    pub fn teardown(&mut self) {
        if self.records.is_empty() {
            return;
        }
        info!("teardown {} call records", self.records.len());
        let disconnect = self.config.is_disconnect_on_drop();
        for (key, _) in self.records.drain() {
            if disconnect {
                let ret = self.service.async_disconnect(&key);
                if ret != ERR_OK {
                    error!("disconnect {} failed, ret {}", key, ret);
                }
            }
        }
    }

    fn remove_and_disconnect(&mut self, key: &TargetKey) {
        if self.records.remove(key).is_none() {
            return;
        }
        let ret = self.service.async_disconnect(key);
        if ret != ERR_OK {
            error!("disconnect {} failed, ret {}", key, ret);
        } else {
            info!("disconnect {} issued", key);
        }
    }
}

impl Drop for LocalCallContainer {
    fn drop(&mut self) {
        self.teardown();
    }
}
