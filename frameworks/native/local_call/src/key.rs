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

//! Identification of remote ability endpoints.

use std::fmt::Display;

/// Identifies a remote ability endpoint: device, bundle and ability name.
///
/// Two keys are equal when all three fields are equal. An empty device id
/// addresses the local device.
///
/// # Examples
///
/// ```rust
/// use local_call::TargetKey;
///
/// let key = TargetKey::new("device", "com.example.demo", "MainAbility");
/// assert_eq!(key.uri(), "device/com.example.demo/MainAbility");
/// assert!(key.is_valid());
/// ```
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct TargetKey {
    device_id: String,
    bundle_name: String,
    ability_name: String,
}

impl TargetKey {
    /// Creates a new key from its three components.
    pub fn new(
        device_id: impl Into<String>,
        bundle_name: impl Into<String>,
        ability_name: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            bundle_name: bundle_name.into(),
            ability_name: ability_name.into(),
        }
    }

    /// Device hosting the ability, empty for the local device.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Bundle the ability belongs to.
    pub fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    /// Name of the ability inside its bundle.
    pub fn ability_name(&self) -> &str {
        &self.ability_name
    }

    /// Returns `true` when both bundle and ability name are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.bundle_name.is_empty() && !self.ability_name.is_empty()
    }

    /// Canonical `device/bundle/ability` form of the key.
    pub fn uri(&self) -> String {
        self.to_string()
    }
}

impl Display for TargetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.device_id, self.bundle_name, self.ability_name
        )
    }
}
