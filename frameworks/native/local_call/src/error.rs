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

use core::fmt;

/// Return code of the platform connection service.
pub type ErrCode = i32;

/// The platform accepted the request.
pub const ERR_OK: ErrCode = 0;

/// Generic invalid-argument code reported back to the framework.
pub const ERR_INVALID_VALUE: ErrCode = 22;

/// Errors returned by call operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CallError {
    /// The target has an empty bundle or ability name.
    InvalidTarget,
    /// The platform refused the connect request with the given code.
    ConnectRejected(ErrCode),
    /// No registration matches the target or caller token.
    NoSuchCaller,
    /// The call manager has stopped and no longer accepts requests.
    Unavailable,
}

impl CallError {
    /// Maps the error to the numeric code reported to the framework.
    pub fn code(&self) -> ErrCode {
        match self {
            CallError::ConnectRejected(code) => *code,
            CallError::InvalidTarget | CallError::NoSuchCaller | CallError::Unavailable => {
                ERR_INVALID_VALUE
            }
        }
    }
}

impl std::error::Error for CallError {}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CallError::InvalidTarget => write!(f, "invalid call target"),
            CallError::ConnectRejected(code) => write!(f, "connect rejected, code {}", code),
            CallError::NoSuchCaller => write!(f, "no such caller"),
            CallError::Unavailable => write!(f, "call manager unavailable"),
        }
    }
}
