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

use std::future::Future;
use std::sync::Arc;

use ylong_runtime::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use ylong_runtime::sync::oneshot;

use super::CallEvent;
use crate::caller::{CallerToken, ConnectedCallback, ReleaseCallback};
use crate::config::CallConfig;
use crate::connection::{ConnectionEventSink, ConnectionService};
use crate::container::{LocalCallContainer, DUMP_HEADER};
use crate::error::CallError;
use crate::key::TargetKey;
use crate::remote::RemoteHandle;

/// Handle to a running [`CallManager`].
///
/// Request methods block until the manager has processed them. Platform
/// completions are queued without waiting. Callbacks run on the manager's
/// task, so they must not call the blocking methods of this entry.
#[derive(Clone)]
pub struct CallManagerEntry {
    /// Channel for sending events to the manager.
    tx: UnboundedSender<CallEvent>,
}

impl CallManagerEntry {
    pub(crate) fn new(tx: UnboundedSender<CallEvent>) -> Self {
        Self { tx }
    }

    /// Sends an event to the call manager.
    ///
    /// # Returns
    ///
    /// `true` if the event was sent, `false` if the manager has stopped.
    pub(crate) fn send_event(&self, event: CallEvent) -> bool {
        if self.tx.send(event).is_err() {
            info!("CallManager is stopped");
            return false;
        }
        true
    }

    /// Registers a caller on `key`. See [`LocalCallContainer::start_call`].
    pub fn start_call(
        &self,
        key: TargetKey,
        on_connected: ConnectedCallback,
        on_released: Option<ReleaseCallback>,
    ) -> Result<CallerToken, CallError> {
        let (tx, rx) = oneshot::channel();
        let event = CallEvent::StartCall(key, on_connected, on_released, tx);
        if !self.send_event(event) {
            return Err(CallError::Unavailable);
        }
        match ylong_runtime::block_on(rx) {
            Ok(ret) => ret,
            Err(error) => {
                error!("In `start_call`, block on failed, err {}", error);
                Err(CallError::Unavailable)
            }
        }
    }

    /// Releases `token` on `key`. See [`LocalCallContainer::release_call`].
    pub fn release_call(&self, key: TargetKey, token: CallerToken) -> Result<(), CallError> {
        let (tx, rx) = oneshot::channel();
        if !self.send_event(CallEvent::ReleaseCall(key, token, tx)) {
            return Err(CallError::Unavailable);
        }
        match ylong_runtime::block_on(rx) {
            Ok(ret) => ret,
            Err(error) => {
                error!("In `release_call`, block on failed, err {}", error);
                Err(CallError::Unavailable)
            }
        }
    }

    /// Releases `token` wherever it is registered.
    pub fn release_caller(&self, token: CallerToken) -> Result<(), CallError> {
        let (tx, rx) = oneshot::channel();
        if !self.send_event(CallEvent::ReleaseCaller(token, tx)) {
            return Err(CallError::Unavailable);
        }
        match ylong_runtime::block_on(rx) {
            Ok(ret) => ret,
            Err(error) => {
                error!("In `release_caller`, block on failed, err {}", error);
                Err(CallError::Unavailable)
            }
        }
    }

    /// Describes the current records; empty once the manager has stopped.
    pub fn dump(&self) -> Vec<String> {
        let (tx, rx) = oneshot::channel();
        if !self.send_event(CallEvent::Dump(tx)) {
            return Vec::new();
        }
        match ylong_runtime::block_on(rx) {
            Ok(info) => info,
            Err(error) => {
                error!("In `dump`, block on failed, err {}", error);
                Vec::new()
            }
        }
    }

    /// Disconnects every target and stops the manager.
    pub fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        if !self.send_event(CallEvent::Shutdown(tx)) {
            return;
        }
        if let Err(error) = ylong_runtime::block_on(rx) {
            error!("In `shutdown`, block on failed, err {}", error);
        }
    }
}

impl ConnectionEventSink for CallManagerEntry {
    fn on_connection_established(&self, key: TargetKey, remote: RemoteHandle) {
        self.send_event(CallEvent::Connected(key, remote));
    }

    fn on_connection_failed(&self, key: TargetKey) {
        self.send_event(CallEvent::ConnectFailed(key));
    }

    fn on_remote_died(&self, key: TargetKey) {
        self.send_event(CallEvent::RemoteDied(key));
    }

    fn on_remote_object_died(&self, remote: RemoteHandle) {
        self.send_event(CallEvent::RemoteObjectDied(remote));
    }
}

/// Single-task owner of a [`LocalCallContainer`].
///
/// Every request and every platform completion is an event on one channel,
/// so the container is only ever touched by this task. The manager holds an
/// entry to itself as the platform sink, so it only stops on
/// [`CallManagerEntry::shutdown`].
pub struct CallManager {
    /// Created on the first `StartCall`.
    container: Option<LocalCallContainer>,
    service: Arc<dyn ConnectionService>,
    config: CallConfig,
    /// Sink handed to the platform with each connect.
    sink: CallManagerEntry,
    /// Channel for receiving events from entries.
    rx: UnboundedReceiver<CallEvent>,
}

impl CallManager {
    /// Starts a call manager and returns an entry to it.
    pub fn init(service: Arc<dyn ConnectionService>, config: CallConfig) -> CallManagerEntry {
        debug!("CallManager init");
        let (tx, rx) = unbounded_channel();
        let entry = CallManagerEntry::new(tx);
        let call_manager = CallManager {
            container: None,
            service,
            config,
            sink: entry.clone(),
            rx,
        };
        runtime_spawn(call_manager.run());
        entry
    }

    async fn run(mut self) {
        loop {
            let recv = match self.rx.recv().await {
                Ok(message) => message,
                Err(e) => {
                    error!("CallManager recv error {:?}", e);
                    break;
                }
            };

            match recv {
                CallEvent::StartCall(key, on_connected, on_released, tx) => {
                    let ret = self.container().start_call(key, on_connected, on_released);
                    let _ = tx.send(ret);
                }
                CallEvent::ReleaseCall(key, token, tx) => {
                    let ret = match self.container.as_mut() {
                        Some(container) => container.release_call(&key, token),
                        None => Err(CallError::NoSuchCaller),
                    };
                    let _ = tx.send(ret);
                }
                CallEvent::ReleaseCaller(token, tx) => {
                    let ret = match self.container.as_mut() {
                        Some(container) => container.release_caller(token),
                        None => Err(CallError::NoSuchCaller),
                    };
                    let _ = tx.send(ret);
                }
                CallEvent::Dump(tx) => {
                    let info = match self.container.as_ref() {
                        Some(container) => container.dump_state(),
                        None => vec![DUMP_HEADER.to_string()],
                    };
                    let _ = tx.send(info);
                }
                CallEvent::Connected(key, remote) => match self.container.as_mut() {
                    Some(container) => container.on_connection_established(&key, remote),
                    None => warn!("connection to {} established before any call", key),
                },
                CallEvent::ConnectFailed(key) => match self.container.as_mut() {
                    Some(container) => container.on_connection_failed(&key),
                    None => warn!("connection to {} failed before any call", key),
                },
                CallEvent::RemoteDied(key) => match self.container.as_mut() {
                    Some(container) => container.on_remote_died(&key),
                    None => warn!("remote of {} died before any call", key),
                },
                CallEvent::RemoteObjectDied(remote) => match self.container.as_mut() {
                    Some(container) => container.on_remote_object_died(&remote),
                    None => warn!("died object {:?} reported before any call", remote),
                },
                CallEvent::Shutdown(tx) => {
                    if let Some(mut container) = self.container.take() {
                        container.teardown();
                    }
                    self.close_channel();
                    let _ = tx.send(());
                    break;
                }
            }

            debug!("CallManager handle message done");
        }
        info!("CallManager stopped");
    }

    /// Refuses further events and drops the queued ones, so their senders
    /// see `Unavailable` instead of waiting on a stopped manager.
    fn close_channel(&mut self) {
        self.rx.close();
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            info!("CallManager dropped {} events on shutdown", dropped);
        }
    }

    fn container(&mut self) -> &mut LocalCallContainer {
        let service = &self.service;
        let sink = &self.sink;
        let config = &self.config;
        self.container.get_or_insert_with(|| {
            debug!("CallManager create container");
            LocalCallContainer::new(service.clone(), Arc::new(sink.clone()), config.clone())
        })
    }
}

fn runtime_spawn<F: Future<Output = ()> + Send + 'static>(fut: F) {
    // The manager is stopped through `Shutdown`, never joined.
    let _ = ylong_runtime::spawn(fut);
}
