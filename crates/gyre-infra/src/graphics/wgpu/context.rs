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

use crate::graphics::wgpu::conversions::{
    backends_bit, depth_format_to_wgpu, device_type_from_wgpu, present_mode_for,
};
use gyre_core::platform::window::GyreWindowHandle;
use gyre_core::renderer::{
    AdapterInfo, BackendKind, DeviceCreationError, DeviceError, DeviceOptions, SurfaceDescriptor,
};
use std::sync::Arc;
use wgpu::SurfaceTargetUnsafe;

/// Holds the `wgpu` state objects for one device bound to one backend.
///
/// Unlike an engine-wide context, this one is deliberately short-lived: a
/// backend switch tears the whole structure down and builds a fresh one,
/// instance included, so nothing of the outgoing native API survives into
/// the next generation.
#[derive(Debug)]
pub(crate) struct WgpuGraphicsContext {
    pub(crate) surface: Arc<wgpu::Surface<'static>>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) surface_config: wgpu::SurfaceConfiguration,
    pub(crate) depth_texture: Option<Arc<wgpu::Texture>>,
    pub(crate) depth_view: Option<wgpu::TextureView>,
    pub(crate) adapter_info: AdapterInfo,
}

impl WgpuGraphicsContext {
    /// Asynchronously initializes the context for `kind` against the given
    /// window surface.
    ///
    /// Every native-layer rejection is converted to a
    /// [`DeviceCreationError`] here; this is the boundary where backend
    /// faults become reportable outcomes.
    pub(crate) async fn new(
        kind: BackendKind,
        window_handle: GyreWindowHandle,
        descriptor: &SurfaceDescriptor,
        options: &DeviceOptions,
    ) -> Result<Self, DeviceCreationError> {
        log::info!("Initializing wgpu context for backend {kind}...");

        let flags = if options.debug_validation {
            wgpu::InstanceFlags::debugging()
        } else {
            wgpu::InstanceFlags::default()
        };
        // Restrict the instance to the one backend the rotation targets.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: backends_bit(kind),
            flags,
            ..Default::default()
        });

        // --- 1. Create Surface ---
        let surface_target = unsafe {
            SurfaceTargetUnsafe::from_window(&window_handle).map_err(|e| {
                DeviceCreationError::SurfaceIncompatible {
                    kind,
                    details: format!("Failed to create surface target: {e}"),
                }
            })?
        };
        let surface = unsafe {
            instance.create_surface_unsafe(surface_target).map_err(|e| {
                DeviceCreationError::SurfaceIncompatible {
                    kind,
                    details: e.to_string(),
                }
            })?
        };
        log::debug!("wgpu surface created for the window.");

        // --- 2. Select an adapter compatible with the surface ---
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| DeviceCreationError::AdapterUnavailable {
                kind,
                details: e.to_string(),
            })?;

        let info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (backend: {:?})",
            info.name,
            info.backend
        );

        // --- 3. Create the logical device and command queue ---
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Gyre Logical Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| DeviceCreationError::DriverRejected {
                kind,
                details: e.to_string(),
            })?;
        log::debug!("Logical device and command queue created.");

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("wgpu uncaptured error: {e:?}");
        }));

        // --- 4. Configure the surface ---
        let surface_caps = surface.get_capabilities(&adapter);
        if surface_caps.formats.is_empty() {
            return Err(DeviceCreationError::SurfaceIncompatible {
                kind,
                details: "Surface reports no supported formats for this adapter".to_string(),
            });
        }
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: descriptor.width.max(1),
            height: descriptor.height.max(1),
            present_mode: present_mode_for(options.vertical_sync, &surface_caps),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        // --- 5. Optional depth attachment ---
        let (depth_texture, depth_view) = match options.depth_format {
            Some(format) => {
                let texture = device.create_texture(&wgpu::TextureDescriptor {
                    label: Some("Gyre Depth Texture"),
                    size: wgpu::Extent3d {
                        width: surface_config.width,
                        height: surface_config.height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: depth_format_to_wgpu(format),
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                });
                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                (Some(Arc::new(texture)), Some(view))
            }
            None => (None, None),
        };

        Ok(Self {
            surface: Arc::new(surface),
            device,
            queue,
            surface_config,
            depth_texture,
            depth_view,
            adapter_info: AdapterInfo {
                name: info.name,
                backend: kind,
                device_type: device_type_from_wgpu(info.device_type),
            },
        })
    }

    /// Acquires the next swapchain frame, reconfiguring the surface once if
    /// it reports lost or outdated.
    pub(crate) fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, DeviceError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(e @ wgpu::SurfaceError::Lost) | Err(e @ wgpu::SurfaceError::Outdated) => {
                log::warn!("Swapchain surface lost or outdated ({e:?}); reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| DeviceError::SurfaceLost(format!("{e:?}")))
            }
            Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                Err(DeviceError::SurfaceLost(format!("{e:?}")))
            }
            Err(e) => Err(DeviceError::SubmitFailed(format!(
                "Failed to acquire frame: {e:?}"
            ))),
        }
    }
}
