// Copyright 2026 the Gyre Authors
//
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

//! Configuration surface: device options, surface descriptors and the
//! rotation settings recognized by the switching core.

use crate::renderer::api::common::{BackendKind, DepthFormat, HostPlatform};
use crate::renderer::api::rotation::default_exclusions;
use crate::renderer::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Options applied to every device created by a backend driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceOptions {
    /// Enables the backend's validation/debug layers.
    pub debug_validation: bool,
    /// Synchronize presentation to the vertical blank.
    pub vertical_sync: bool,
    /// The swapchain depth attachment format, if any.
    pub depth_format: Option<DepthFormat>,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            debug_validation: false,
            vertical_sync: true,
            depth_format: Some(DepthFormat::Depth16Unorm),
        }
    }
}

/// The presentation surface parameters a device is created against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceDescriptor {
    /// The physical width of the surface, in pixels.
    pub width: u32,
    /// The physical height of the surface, in pixels.
    pub height: u32,
    /// The window title.
    pub title: String,
}

impl Default for SurfaceDescriptor {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Gyre".to_string(),
        }
    }
}

/// The recognized configuration options of the backend rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Backend kinds excluded from the rotation. Defaults to the kinds that
    /// are inadvisable on the current host.
    pub excluded_backends: Vec<BackendKind>,
    /// Number of ticks between switch requests. Must be > 0.
    pub rotation_period_ticks: u32,
    /// Enables backend validation layers on every created device.
    pub debug_validation: bool,
    /// Synchronize presentation to the vertical blank.
    pub vertical_sync: bool,
    /// The swapchain depth attachment format, if any.
    pub depth_format: Option<DepthFormat>,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            excluded_backends: default_exclusions(HostPlatform::current()).to_vec(),
            rotation_period_ticks: 120,
            debug_validation: false,
            vertical_sync: true,
            depth_format: Some(DepthFormat::Depth16Unorm),
        }
    }
}

impl RotationSettings {
    /// Checks the settings for values that cannot be made to work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotation_period_ticks == 0 {
            return Err(ConfigError::InvalidRotationPeriod {
                ticks: self.rotation_period_ticks,
            });
        }
        Ok(())
    }

    /// The per-device options these settings imply.
    pub fn device_options(&self) -> DeviceOptions {
        DeviceOptions {
            debug_validation: self.debug_validation,
            vertical_sync: self.vertical_sync,
            depth_format: self.depth_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_validate() {
        let settings = RotationSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.rotation_period_ticks, 120);
    }

    #[test]
    fn zero_period_is_rejected() {
        let settings = RotationSettings {
            rotation_period_ticks: 0,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvalidRotationPeriod { ticks: 0 })
        );
    }

    #[test]
    fn device_options_mirror_settings() {
        let settings = RotationSettings {
            debug_validation: true,
            vertical_sync: false,
            depth_format: None,
            ..Default::default()
        };
        let options = settings.device_options();
        assert!(options.debug_validation);
        assert!(!options.vertical_sync);
        assert_eq!(options.depth_format, None);
    }
}
