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

use crate::platform::window::SurfaceTarget;
use crate::renderer::api::{BackendKind, DeviceOptions};
use crate::renderer::error::DeviceCreationError;
use crate::renderer::tracker::TrackedResource;
use crate::renderer::traits::GraphicsDevice;
use std::fmt::Debug;

/// The result of a successful device creation.
pub struct CreatedDevice {
    /// The live device, bound to the requested backend.
    pub device: Box<dyn GraphicsDevice>,
    /// The baseline resources the device needs to render at all (a default
    /// submission context and the presentation-surface binding). The
    /// coordinator registers these under the new generation so they are
    /// torn down with it.
    pub baseline_resources: Vec<Box<dyn TrackedResource>>,
}

impl Debug for CreatedDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedDevice")
            .field("backend", &self.device.backend_kind())
            .field("baseline_resources", &self.baseline_resources.len())
            .finish()
    }
}

/// A factory for backend devices.
///
/// A concrete implementation lives in `gyre-infra` and wraps a library like
/// `wgpu`; the in-process [`NoopBackendDriver`] serves headless tests.
/// Device creation can be a slow, blocking operation (adapter enumeration,
/// driver initialization); implementations that wrap async APIs drive them
/// to completion internally.
///
/// [`NoopBackendDriver`]: crate::renderer::noop::NoopBackendDriver
pub trait BackendDriver: Debug {
    /// Whether this driver can, in principle, create devices for `kind` on
    /// the current host.
    fn supports(&self, kind: BackendKind) -> bool;

    /// Constructs a native device bound to `kind` against the given surface.
    ///
    /// ## Errors
    /// * `DeviceCreationError` - When the native backend rejects
    ///   initialization (missing driver, incompatible surface, validation
    ///   rejection). This is an expected, recoverable outcome on some
    ///   host/driver combinations.
    fn create_device(
        &mut self,
        kind: BackendKind,
        surface: &SurfaceTarget,
        options: &DeviceOptions,
    ) -> Result<CreatedDevice, DeviceCreationError>;
}
