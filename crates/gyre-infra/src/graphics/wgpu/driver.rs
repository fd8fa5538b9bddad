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

use crate::graphics::wgpu::context::WgpuGraphicsContext;
use crate::graphics::wgpu::device::{
    TrackedDepthTexture, TrackedSubmissionContext, TrackedSurfaceBinding, WgpuGraphicsDevice,
};
use gyre_core::platform::window::SurfaceTarget;
use gyre_core::renderer::{
    BackendDriver, BackendKind, CreatedDevice, DeviceCreationError, DeviceOptions, TrackedResource,
};

/// A [`BackendDriver`] that creates one `wgpu` device per rotation target.
///
/// Adapter and device acquisition are async in `wgpu`; this driver blocks
/// on them internally, so the switching core stays synchronous.
#[derive(Debug, Default)]
pub struct WgpuBackendDriver;

impl WgpuBackendDriver {
    /// Creates the driver.
    pub fn new() -> Self {
        Self
    }
}

impl BackendDriver for WgpuBackendDriver {
    fn supports(&self, kind: BackendKind) -> bool {
        kind.is_supported()
    }

    fn create_device(
        &mut self,
        kind: BackendKind,
        surface: &SurfaceTarget,
        options: &DeviceOptions,
    ) -> Result<CreatedDevice, DeviceCreationError> {
        if !self.supports(kind) {
            return Err(DeviceCreationError::Unsupported { kind });
        }
        let Some(window_handle) = surface.window_handle() else {
            return Err(DeviceCreationError::SurfaceIncompatible {
                kind,
                details: "The wgpu driver requires a windowed surface target".to_string(),
            });
        };

        let context = pollster::block_on(WgpuGraphicsContext::new(
            kind,
            window_handle.clone(),
            surface.descriptor(),
            options,
        ))?;

        // Baseline resources of the new generation, registered so they are
        // released (in reverse order) before the device itself goes away.
        let mut baseline_resources: Vec<Box<dyn TrackedResource>> = vec![
            Box::new(TrackedSurfaceBinding::new(context.surface.clone())),
            Box::new(TrackedSubmissionContext::new(context.queue.clone())),
        ];
        if let Some(depth_texture) = context.depth_texture.clone() {
            baseline_resources.push(Box::new(TrackedDepthTexture::new(depth_texture)));
        }

        Ok(CreatedDevice {
            device: Box::new(WgpuGraphicsDevice::new(kind, context)),
            baseline_resources,
        })
    }
}
