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

use std::sync::{Arc, Mutex};

use super::*;

// @tc.name: ut_caller_notify_connected
// @tc.desc: Test connected callback delivery marks the registration invoked
// @tc.precon: NA
// @tc.step: 1. Create registration with a connected callback
//           2. Call notify_connected with a remote handle
// @tc.expect: Callback receives the handle, is_invoked() turns true
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 0
#[test]
fn ut_caller_notify_connected() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let mut caller = CallerRegistration::new(CallerToken::new(1));
    caller.set_on_connected(Box::new(move |remote: &RemoteHandle| {
        sink.lock().unwrap().push(remote.descriptor().to_string())
    }));
    assert!(!caller.is_invoked());

    caller.notify_connected(&RemoteHandle::new("proxy"));
    assert!(caller.is_invoked());
    assert_eq!(*received.lock().unwrap(), vec!["proxy".to_string()]);
}

// @tc.name: ut_caller_notify_connected_without_callback
// @tc.desc: Test notify_connected is a no-op without a connected callback
// @tc.precon: NA
// @tc.step: 1. Create registration without callbacks
//           2. Call notify_connected
// @tc.expect: No panic and is_invoked() stays false
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 1
#[test]
fn ut_caller_notify_connected_without_callback() {
    let mut caller = CallerRegistration::new(CallerToken::new(2));
    caller.notify_connected(&RemoteHandle::new("proxy"));
    assert!(!caller.is_invoked());
}

// @tc.name: ut_caller_mark_invoked_idempotent
// @tc.desc: Test mark_invoked can be called repeatedly
// @tc.precon: NA
// @tc.step: 1. Call mark_invoked twice
// @tc.expect: is_invoked() is true
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 2
#[test]
fn ut_caller_mark_invoked_idempotent() {
    let mut caller = CallerRegistration::new(CallerToken::new(3));
    caller.mark_invoked();
    caller.mark_invoked();
    assert!(caller.is_invoked());
    assert_eq!(caller.token().value(), 3);
}

// @tc.name: ut_caller_notify_released
// @tc.desc: Test release callback receives the reason
// @tc.precon: NA
// @tc.step: 1. Create registration with a release callback
//           2. Call notify_released("died")
//           3. Call notify_released on a registration without release callback
// @tc.expect: Reason is delivered once; missing callback is ignored
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 1
#[test]
fn ut_caller_notify_released() {
    let reasons = Arc::new(Mutex::new(Vec::new()));
    let sink = reasons.clone();
    let mut caller = CallerRegistration::new(CallerToken::new(4));
    caller.set_on_released(Box::new(move |reason: &str| {
        sink.lock().unwrap().push(reason.to_string())
    }));
    caller.notify_released("died");
    assert_eq!(*reasons.lock().unwrap(), vec!["died".to_string()]);

    let mut silent = CallerRegistration::new(CallerToken::new(5));
    silent.notify_released("died");
    assert!(!silent.is_invoked());
}
