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
use crate::graphics::wgpu::conversions::color_to_wgpu;
use gyre_core::renderer::{
    AdapterInfo, BackendKind, Color, DeviceError, FrameCommands, GraphicsDevice, RenderOp,
    ResourceKind, TrackedResource,
};
use std::sync::Arc;

/// A [`GraphicsDevice`] backed by one `wgpu` device on one native backend.
///
/// Each frame: `submit` acquires the swapchain frame and encodes the clear
/// pass against it, `present` hands the frame to the compositor, and
/// `wait_idle` blocks until the queue has drained. `dispose` drops the
/// whole `wgpu` context and is idempotent.
#[derive(Debug)]
pub struct WgpuGraphicsDevice {
    kind: BackendKind,
    context: Option<WgpuGraphicsContext>,
    pending_frame: Option<wgpu::SurfaceTexture>,
    adapter_info: AdapterInfo,
}

impl WgpuGraphicsDevice {
    pub(crate) fn new(kind: BackendKind, context: WgpuGraphicsContext) -> Self {
        let adapter_info = context.adapter_info.clone();
        Self {
            kind,
            context: Some(context),
            pending_frame: None,
            adapter_info,
        }
    }

    fn latest_clears(commands: &FrameCommands) -> (Option<Color>, Option<f32>) {
        let mut clear_color = None;
        let mut clear_depth = None;
        for op in commands.ops() {
            match op {
                RenderOp::ClearColor(color) => clear_color = Some(*color),
                RenderOp::ClearDepth(depth) => clear_depth = Some(*depth),
            }
        }
        (clear_color, clear_depth)
    }
}

impl GraphicsDevice for WgpuGraphicsDevice {
    fn backend_kind(&self) -> BackendKind {
        self.kind
    }

    fn adapter_info(&self) -> AdapterInfo {
        self.adapter_info.clone()
    }

    fn submit(&mut self, commands: &FrameCommands) -> Result<(), DeviceError> {
        let context = self.context.as_mut().ok_or(DeviceError::Disposed)?;

        // Each submit targets a freshly acquired swapchain frame; a frame
        // submitted but never presented is simply discarded.
        let frame = context.acquire_frame()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (clear_color, clear_depth) = Self::latest_clears(commands);

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Gyre Frame Encoder"),
            });

        {
            let color_attachment = wgpu::RenderPassColorAttachment {
                view: &frame_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: match clear_color {
                        Some(color) => wgpu::LoadOp::Clear(color_to_wgpu(color)),
                        None => wgpu::LoadOp::Load,
                    },
                    store: wgpu::StoreOp::Store,
                },
            };

            let depth_stencil_attachment = context.depth_view.as_ref().map(|depth_view| {
                let format_has_stencil = context
                    .depth_texture
                    .as_ref()
                    .is_some_and(|t| t.format().has_stencil_aspect());
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: match clear_depth {
                            Some(depth) => wgpu::LoadOp::Clear(depth),
                            None => wgpu::LoadOp::Load,
                        },
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: format_has_stencil.then_some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }
            });

            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Gyre Clear Pass"),
                color_attachments: &[Some(color_attachment)],
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        self.pending_frame = Some(frame);
        Ok(())
    }

    fn present(&mut self) -> Result<(), DeviceError> {
        if self.context.is_none() {
            return Err(DeviceError::Disposed);
        }
        match self.pending_frame.take() {
            Some(frame) => {
                frame.present();
                Ok(())
            }
            None => Err(DeviceError::PresentFailed(
                "No frame was submitted this tick".to_string(),
            )),
        }
    }

    fn wait_idle(&mut self) -> Result<(), DeviceError> {
        let context = self.context.as_ref().ok_or(DeviceError::Disposed)?;
        // PollType::Wait blocks until the queue is empty and all submitted
        // work has completed.
        context
            .device
            .poll(wgpu::PollType::Wait)
            .map(|_| ())
            .map_err(|e| DeviceError::WaitFailed(format!("{e:?}")))
    }

    fn dispose(&mut self) {
        if self.context.is_none() {
            return;
        }
        log::info!(
            "Disposing wgpu device for backend {} (\"{}\")",
            self.kind,
            self.adapter_info.name
        );
        // Never present a frame belonging to a device being torn down.
        self.pending_frame = None;
        self.context = None;
    }
}

/// A claim on the presentation-surface binding, released with its
/// generation before the device itself is disposed.
#[derive(Debug)]
pub(crate) struct TrackedSurfaceBinding {
    surface: Option<Arc<wgpu::Surface<'static>>>,
}

impl TrackedSurfaceBinding {
    pub(crate) fn new(surface: Arc<wgpu::Surface<'static>>) -> Self {
        Self {
            surface: Some(surface),
        }
    }
}

impl TrackedResource for TrackedSurfaceBinding {
    fn label(&self) -> &str {
        "swapchain surface binding"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Framebuffer
    }

    fn destroy(&mut self) {
        self.surface = None;
    }
}

/// A claim on the default command-submission context (the device queue).
#[derive(Debug)]
pub(crate) struct TrackedSubmissionContext {
    queue: Option<wgpu::Queue>,
}

impl TrackedSubmissionContext {
    pub(crate) fn new(queue: wgpu::Queue) -> Self {
        Self { queue: Some(queue) }
    }
}

impl TrackedResource for TrackedSubmissionContext {
    fn label(&self) -> &str {
        "primary submission context"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::CommandList
    }

    fn destroy(&mut self) {
        self.queue = None;
    }
}

/// The swapchain depth attachment; destroyed eagerly with its generation.
#[derive(Debug)]
pub(crate) struct TrackedDepthTexture {
    texture: Option<Arc<wgpu::Texture>>,
}

impl TrackedDepthTexture {
    pub(crate) fn new(texture: Arc<wgpu::Texture>) -> Self {
        Self {
            texture: Some(texture),
        }
    }
}

impl TrackedResource for TrackedDepthTexture {
    fn label(&self) -> &str {
        "swapchain depth texture"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Texture
    }

    fn destroy(&mut self) {
        if let Some(texture) = self.texture.take() {
            texture.destroy();
        }
    }
}
