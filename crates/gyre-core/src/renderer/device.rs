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

//! The generation-tagged handle around a live backend device.

use crate::renderer::api::{AdapterInfo, BackendKind, DeviceGeneration, FrameCommands};
use crate::renderer::error::DeviceError;
use crate::renderer::traits::GraphicsDevice;

/// Owns exactly one live backend device, tagged with the generation that
/// created it.
///
/// At most one handle is live at any time, including mid-switch: the
/// coordinator fully tears the old handle down before constructing the new
/// one. `dispose` is idempotent, and every operation on a disposed handle
/// surfaces [`DeviceError::Disposed`] instead of reaching the native layer.
#[derive(Debug)]
pub struct DeviceHandle {
    inner: Box<dyn GraphicsDevice>,
    generation: DeviceGeneration,
    disposed: bool,
}

impl DeviceHandle {
    /// Wraps a freshly created device under the given generation.
    pub fn new(inner: Box<dyn GraphicsDevice>, generation: DeviceGeneration) -> Self {
        Self {
            inner,
            generation,
            disposed: false,
        }
    }

    /// The generation this handle (and all its resources) belongs to.
    pub fn generation(&self) -> DeviceGeneration {
        self.generation
    }

    /// The backend this handle is bound to.
    pub fn backend_kind(&self) -> BackendKind {
        self.inner.backend_kind()
    }

    /// Information about the adapter backing this handle.
    pub fn adapter_info(&self) -> AdapterInfo {
        self.inner.adapter_info()
    }

    /// Whether `dispose` has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Queues the recorded frame commands. Fire-and-forget.
    pub fn submit(&mut self, commands: &FrameCommands) -> Result<(), DeviceError> {
        if self.disposed {
            return Err(DeviceError::Disposed);
        }
        self.inner.submit(commands)
    }

    /// Presents the most recently rendered frame.
    pub fn present(&mut self) -> Result<(), DeviceError> {
        if self.disposed {
            return Err(DeviceError::Disposed);
        }
        self.inner.present()
    }

    /// Blocks until all submitted work has completed. The sole
    /// synchronization point, required before any teardown.
    pub fn wait_idle(&mut self) -> Result<(), DeviceError> {
        if self.disposed {
            return Err(DeviceError::Disposed);
        }
        self.inner.wait_idle()
    }

    /// Releases the native device. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!(
            "Disposing {} device of {}",
            self.inner.backend_kind(),
            self.generation
        );
        self.inner.dispose();
        self.disposed = true;
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::noop::{NoopGraphicsDevice, NoopProbe};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn handle_with_probe() -> (DeviceHandle, Arc<NoopProbe>) {
        let probe = Arc::new(NoopProbe::default());
        let device = NoopGraphicsDevice::new(BackendKind::Vulkan, probe.clone());
        (
            DeviceHandle::new(Box::new(device), DeviceGeneration::first()),
            probe,
        )
    }

    #[test]
    fn dispose_is_idempotent() {
        let (mut handle, probe) = handle_with_probe();
        handle.dispose();
        handle.dispose();
        assert!(handle.is_disposed());
        assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn operations_on_a_disposed_handle_surface_an_error() {
        let (mut handle, _probe) = handle_with_probe();
        handle.dispose();
        assert_eq!(
            handle.submit(&FrameCommands::new()),
            Err(DeviceError::Disposed)
        );
        assert_eq!(handle.present(), Err(DeviceError::Disposed));
        assert_eq!(handle.wait_idle(), Err(DeviceError::Disposed));
    }

    #[test]
    fn drop_disposes_exactly_once() {
        let (mut handle, probe) = handle_with_probe();
        handle.dispose();
        drop(handle);
        assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 1);

        let (handle, probe) = handle_with_probe();
        drop(handle);
        assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 1);
    }
}
