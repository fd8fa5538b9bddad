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

//! Conversions between the core's backend-agnostic types and `wgpu`'s.

use gyre_core::renderer::{BackendKind, Color, DepthFormat, DeviceType};

/// The single `wgpu::Backends` bit a backend kind maps to.
pub(crate) fn backends_bit(kind: BackendKind) -> wgpu::Backends {
    match kind {
        BackendKind::Vulkan => wgpu::Backends::VULKAN,
        BackendKind::Dx12 => wgpu::Backends::DX12,
        BackendKind::Metal => wgpu::Backends::METAL,
        BackendKind::OpenGl => wgpu::Backends::GL,
        BackendKind::WebGpu => wgpu::Backends::BROWSER_WEBGPU,
    }
}

/// Converts a `wgpu` device type to the core's.
pub(crate) fn device_type_from_wgpu(device_type: wgpu::DeviceType) -> DeviceType {
    match device_type {
        wgpu::DeviceType::IntegratedGpu => DeviceType::IntegratedGpu,
        wgpu::DeviceType::DiscreteGpu => DeviceType::DiscreteGpu,
        wgpu::DeviceType::VirtualGpu => DeviceType::VirtualGpu,
        wgpu::DeviceType::Cpu => DeviceType::Cpu,
        _ => DeviceType::Unknown,
    }
}

/// Converts a core depth format to the `wgpu` texture format.
pub(crate) fn depth_format_to_wgpu(format: DepthFormat) -> wgpu::TextureFormat {
    match format {
        DepthFormat::Depth16Unorm => wgpu::TextureFormat::Depth16Unorm,
        DepthFormat::Depth24Plus => wgpu::TextureFormat::Depth24Plus,
        DepthFormat::Depth24PlusStencil8 => wgpu::TextureFormat::Depth24PlusStencil8,
        DepthFormat::Depth32Float => wgpu::TextureFormat::Depth32Float,
    }
}

/// Converts a core color to a `wgpu` clear color.
pub(crate) fn color_to_wgpu(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

/// Picks a present mode honoring the vsync option, constrained to what the
/// surface supports. `Fifo` is always available.
pub(crate) fn present_mode_for(
    vertical_sync: bool,
    capabilities: &wgpu::SurfaceCapabilities,
) -> wgpu::PresentMode {
    if vertical_sync {
        wgpu::PresentMode::Fifo
    } else {
        [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
            .into_iter()
            .find(|mode| capabilities.present_modes.contains(mode))
            .unwrap_or(wgpu::PresentMode::Fifo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_backend_kind_maps_to_one_bit() {
        for kind in BackendKind::ALL {
            assert_eq!(backends_bit(kind).iter().count(), 1);
        }
    }

    #[test]
    fn depth_formats_map_to_depth_texture_formats() {
        assert_eq!(
            depth_format_to_wgpu(DepthFormat::Depth16Unorm),
            wgpu::TextureFormat::Depth16Unorm
        );
        assert!(depth_format_to_wgpu(DepthFormat::Depth24PlusStencil8).is_depth_stencil_format());
    }
}
