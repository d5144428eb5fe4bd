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

//! Container configuration.

/// Behaviour switches applied when a call container is created.
///
/// # Examples
///
/// ```rust
/// use local_call::CallConfig;
///
/// let config = CallConfig::default()
///     .require_device_id(true)
///     .disconnect_on_drop(false);
/// assert!(config.is_device_id_required());
/// assert!(!config.is_disconnect_on_drop());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallConfig {
    /// Rejects targets with an empty device id.
    require_device_id: bool,
    /// Disconnects every outstanding target when the container goes away.
    disconnect_on_drop: bool,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            require_device_id: false,
            disconnect_on_drop: true,
        }
    }
}

impl CallConfig {
    /// Sets whether an empty device id is rejected as an invalid target.
    pub fn require_device_id(mut self, require: bool) -> Self {
        self.require_device_id = require;
        self
    }

    /// Sets whether teardown disconnects outstanding targets.
    pub fn disconnect_on_drop(mut self, disconnect: bool) -> Self {
        self.disconnect_on_drop = disconnect;
        self
    }

    /// Whether an empty device id is rejected.
    pub fn is_device_id_required(&self) -> bool {
        self.require_device_id
    }

    /// Whether teardown disconnects outstanding targets.
    pub fn is_disconnect_on_drop(&self) -> bool {
        self.disconnect_on_drop
    }
}
