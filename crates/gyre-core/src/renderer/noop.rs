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

//! An in-process reference driver with no native API behind it.
//!
//! Implements the full capability contract: devices record submitted work,
//! count drains, and dispose idempotently; creation failures can be
//! scripted per backend kind to simulate a host/driver combination
//! rejecting a transition. Serves headless tests and diagnostics.

use crate::platform::window::SurfaceTarget;
use crate::renderer::api::{
    AdapterInfo, BackendKind, DeviceOptions, DeviceType, FrameCommands,
};
use crate::renderer::error::{DeviceCreationError, DeviceError};
use crate::renderer::tracker::{ResourceKind, TrackedResource};
use crate::renderer::traits::{BackendDriver, CreatedDevice, GraphicsDevice};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared counters observing everything a [`NoopBackendDriver`] and its
/// devices do. Tests hold a clone of the `Arc` and assert on it.
#[derive(Debug, Default)]
pub struct NoopProbe {
    /// Devices successfully created.
    pub devices_created: AtomicU64,
    /// Frame command sequences submitted across all devices.
    pub frames_submitted: AtomicU64,
    /// Frames presented across all devices.
    pub frames_presented: AtomicU64,
    /// Completed `wait_idle` calls across all devices.
    pub drains: AtomicU64,
    /// Devices disposed (counted once per device).
    pub devices_disposed: AtomicU64,
    /// Tracked resources destroyed (counted once per resource).
    pub resources_destroyed: AtomicU64,
}

/// A tracked resource that only flips a flag when destroyed.
#[derive(Debug)]
pub struct NoopTrackedResource {
    label: String,
    kind: ResourceKind,
    destroyed: bool,
    probe: Option<Arc<NoopProbe>>,
}

impl NoopTrackedResource {
    /// A resource of the given kind and label.
    pub fn new(label: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            label: label.into(),
            kind,
            destroyed: false,
            probe: None,
        }
    }

    /// A command-list resource.
    pub fn command_list(label: impl Into<String>) -> Self {
        Self::new(label, ResourceKind::CommandList)
    }

    /// A framebuffer/swapchain-binding resource.
    pub fn framebuffer(label: impl Into<String>) -> Self {
        Self::new(label, ResourceKind::Framebuffer)
    }

    fn with_probe(mut self, probe: Arc<NoopProbe>) -> Self {
        self.probe = Some(probe);
        self
    }
}

impl TrackedResource for NoopTrackedResource {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Some(probe) = &self.probe {
            probe.resources_destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// A device that records work instead of executing it.
#[derive(Debug)]
pub struct NoopGraphicsDevice {
    kind: BackendKind,
    probe: Arc<NoopProbe>,
    disposed: bool,
}

impl NoopGraphicsDevice {
    /// Creates a recording device bound to `kind`, reporting into `probe`.
    pub fn new(kind: BackendKind, probe: Arc<NoopProbe>) -> Self {
        Self {
            kind,
            probe,
            disposed: false,
        }
    }
}

impl GraphicsDevice for NoopGraphicsDevice {
    fn backend_kind(&self) -> BackendKind {
        self.kind
    }

    fn adapter_info(&self) -> AdapterInfo {
        AdapterInfo {
            name: "Gyre No-op Adapter".to_string(),
            backend: self.kind,
            device_type: DeviceType::Cpu,
        }
    }

    fn submit(&mut self, _commands: &FrameCommands) -> Result<(), DeviceError> {
        if self.disposed {
            return Err(DeviceError::Disposed);
        }
        self.probe.frames_submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn present(&mut self) -> Result<(), DeviceError> {
        if self.disposed {
            return Err(DeviceError::Disposed);
        }
        self.probe.frames_presented.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), DeviceError> {
        if self.disposed {
            return Err(DeviceError::Disposed);
        }
        self.probe.drains.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.probe.devices_disposed.fetch_add(1, Ordering::SeqCst);
    }
}

/// The factory for [`NoopGraphicsDevice`]s, with scripted failures.
#[derive(Debug, Default)]
pub struct NoopBackendDriver {
    failures: HashMap<BackendKind, String>,
    probe: Arc<NoopProbe>,
}

impl NoopBackendDriver {
    /// A driver that succeeds for every backend kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts every creation attempt for `kind` to be rejected with the
    /// given driver detail.
    pub fn fail_on(mut self, kind: BackendKind, details: impl Into<String>) -> Self {
        self.failures.insert(kind, details.into());
        self
    }

    /// Removes a scripted failure, as if the host driver had been fixed.
    pub fn clear_failure(&mut self, kind: BackendKind) {
        self.failures.remove(&kind);
    }

    /// The shared counters this driver and its devices report into.
    pub fn probe(&self) -> Arc<NoopProbe> {
        self.probe.clone()
    }
}

impl BackendDriver for NoopBackendDriver {
    fn supports(&self, _kind: BackendKind) -> bool {
        true
    }

    fn create_device(
        &mut self,
        kind: BackendKind,
        _surface: &SurfaceTarget,
        _options: &DeviceOptions,
    ) -> Result<CreatedDevice, DeviceCreationError> {
        if let Some(details) = self.failures.get(&kind) {
            return Err(DeviceCreationError::DriverRejected {
                kind,
                details: details.clone(),
            });
        }

        self.probe.devices_created.fetch_add(1, Ordering::SeqCst);
        let device = NoopGraphicsDevice::new(kind, self.probe.clone());
        let baseline_resources: Vec<Box<dyn TrackedResource>> = vec![
            Box::new(
                NoopTrackedResource::framebuffer("swapchain framebuffer")
                    .with_probe(self.probe.clone()),
            ),
            Box::new(
                NoopTrackedResource::command_list("primary command list")
                    .with_probe(self.probe.clone()),
            ),
        ];
        Ok(CreatedDevice {
            device: Box::new(device),
            baseline_resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::api::SurfaceDescriptor;

    fn headless() -> SurfaceTarget {
        SurfaceTarget::headless(SurfaceDescriptor::default())
    }

    #[test]
    fn creates_devices_with_baseline_resources() {
        let mut driver = NoopBackendDriver::new();
        let created = driver
            .create_device(BackendKind::Vulkan, &headless(), &DeviceOptions::default())
            .unwrap();
        assert_eq!(created.device.backend_kind(), BackendKind::Vulkan);
        assert_eq!(created.baseline_resources.len(), 2);
        assert_eq!(driver.probe().devices_created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn scripted_failures_reject_creation() {
        let mut driver =
            NoopBackendDriver::new().fail_on(BackendKind::OpenGl, "context creation failed");
        let err = driver
            .create_device(BackendKind::OpenGl, &headless(), &DeviceOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            DeviceCreationError::DriverRejected {
                kind: BackendKind::OpenGl,
                details: "context creation failed".to_string(),
            }
        );

        driver.clear_failure(BackendKind::OpenGl);
        assert!(driver
            .create_device(BackendKind::OpenGl, &headless(), &DeviceOptions::default())
            .is_ok());
    }

    #[test]
    fn device_records_work_until_disposed() {
        let probe = Arc::new(NoopProbe::default());
        let mut device = NoopGraphicsDevice::new(BackendKind::Dx12, probe.clone());

        device.submit(&FrameCommands::new()).unwrap();
        device.present().unwrap();
        device.wait_idle().unwrap();
        assert_eq!(probe.frames_submitted.load(Ordering::SeqCst), 1);
        assert_eq!(probe.frames_presented.load(Ordering::SeqCst), 1);
        assert_eq!(probe.drains.load(Ordering::SeqCst), 1);

        device.dispose();
        device.dispose();
        assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 1);
        assert_eq!(device.submit(&FrameCommands::new()), Err(DeviceError::Disposed));
    }

    #[test]
    fn resource_destroy_is_idempotent() {
        let probe = Arc::new(NoopProbe::default());
        let mut resource =
            NoopTrackedResource::framebuffer("swapchain").with_probe(probe.clone());
        resource.destroy();
        resource.destroy();
        assert_eq!(probe.resources_destroyed.load(Ordering::SeqCst), 1);
    }
}
