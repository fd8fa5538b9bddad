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

//! Common, backend-agnostic enums and data structures for the switching core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A backend-agnostic representation of a native graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// Vulkan API.
    Vulkan,
    /// Microsoft's DirectX 12 API.
    Dx12,
    /// Apple's Metal API.
    Metal,
    /// OpenGL (and GLES-class) API.
    OpenGl,
    /// WebGPU API (for web builds).
    WebGpu,
}

impl BackendKind {
    /// All backend kinds, in the fixed rotation order.
    pub const ALL: [BackendKind; 5] = [
        BackendKind::Vulkan,
        BackendKind::Dx12,
        BackendKind::Metal,
        BackendKind::OpenGl,
        BackendKind::WebGpu,
    ];

    /// Whether this backend can, in principle, be driven on the given host.
    ///
    /// This is a coarse, pure predicate over the platform; an individual
    /// device creation may still fail recoverably (missing driver, surface
    /// rejection), which is exactly what
    /// [`DeviceCreationError`](crate::renderer::error::DeviceCreationError)
    /// reports.
    pub fn is_supported_on(self, host: HostPlatform) -> bool {
        match self {
            BackendKind::Vulkan => {
                matches!(host, HostPlatform::Windows | HostPlatform::Linux)
            }
            BackendKind::Dx12 => matches!(host, HostPlatform::Windows),
            BackendKind::Metal => matches!(host, HostPlatform::MacOs),
            BackendKind::OpenGl => matches!(
                host,
                HostPlatform::Windows | HostPlatform::Linux | HostPlatform::MacOs
            ),
            BackendKind::WebGpu => matches!(host, HostPlatform::Web),
        }
    }

    /// Whether this backend can be driven on the current host.
    pub fn is_supported(self) -> bool {
        self.is_supported_on(HostPlatform::current())
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Vulkan => "Vulkan",
            BackendKind::Dx12 => "Dx12",
            BackendKind::Metal => "Metal",
            BackendKind::OpenGl => "OpenGl",
            BackendKind::WebGpu => "WebGpu",
        };
        write!(f, "{name}")
    }
}

/// The host platform family, as far as backend support is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostPlatform {
    /// Windows desktop.
    Windows,
    /// macOS desktop.
    MacOs,
    /// Linux desktop.
    Linux,
    /// A browser (wasm) host.
    Web,
    /// An unrecognized host; no backend is assumed supported.
    Other,
}

impl HostPlatform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            HostPlatform::Web
        } else if cfg!(target_os = "windows") {
            HostPlatform::Windows
        } else if cfg!(target_os = "macos") {
            HostPlatform::MacOs
        } else if cfg!(target_os = "linux") {
            HostPlatform::Linux
        } else {
            HostPlatform::Other
        }
    }
}

/// The physical type of a graphics device (GPU).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceType {
    /// A GPU integrated into the CPU.
    IntegratedGpu,
    /// A discrete, dedicated GPU.
    DiscreteGpu,
    /// A virtualized or software-based GPU.
    VirtualGpu,
    /// A software renderer running on the CPU.
    Cpu,
    /// An unknown or unsupported device type.
    #[default]
    Unknown,
}

/// Standardized, backend-agnostic information about a graphics adapter.
#[derive(Debug, Clone)]
pub struct AdapterInfo {
    /// The name of the adapter (e.g., "NVIDIA GeForce RTX 4090").
    pub name: String,
    /// The graphics API backend this adapter is associated with.
    pub backend: BackendKind,
    /// The physical type of the adapter.
    pub device_type: DeviceType,
}

/// The memory format of the optional swapchain depth attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthFormat {
    /// A 16-bit unsigned normalized depth format.
    Depth16Unorm,
    /// A 24-bit unsigned normalized depth format.
    Depth24Plus,
    /// A 24-bit unsigned normalized depth format with an 8-bit stencil component.
    Depth24PlusStencil8,
    /// A 32-bit float depth format.
    Depth32Float,
}

impl DepthFormat {
    /// Whether the format carries a stencil component.
    pub fn has_stencil(self) -> bool {
        matches!(self, DepthFormat::Depth24PlusStencil8)
    }
}

/// An RGBA color with linear, unormalized f32 components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component, in `[0.0, 1.0]`.
    pub r: f32,
    /// Green component, in `[0.0, 1.0]`.
    pub g: f32,
    /// Blue component, in `[0.0, 1.0]`.
    pub b: f32,
    /// Alpha component, in `[0.0, 1.0]`.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// The classic diagnostic clear color.
    pub const CORNFLOWER_BLUE: Color = Color::new(0.392_156_87, 0.584_313_75, 0.929_411_77, 1.0);

    /// Creates a color from its components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Identifies one device instantiation.
///
/// Every resource allocated through a device handle is tagged with the
/// generation of that handle; a generation is retired as a whole when its
/// device is torn down, so "did the old device fully release before the new
/// one touched the surface" is a checkable property rather than a timing
/// accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceGeneration(u64);

impl DeviceGeneration {
    /// The first generation ever allocated.
    pub fn first() -> Self {
        DeviceGeneration(1)
    }

    /// The generation following this one.
    pub fn next(self) -> Self {
        DeviceGeneration(self.0 + 1)
    }

    /// The raw ordinal of this generation.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation #{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_support_matrix() {
        assert!(BackendKind::Vulkan.is_supported_on(HostPlatform::Windows));
        assert!(BackendKind::Vulkan.is_supported_on(HostPlatform::Linux));
        assert!(!BackendKind::Vulkan.is_supported_on(HostPlatform::MacOs));

        assert!(BackendKind::Dx12.is_supported_on(HostPlatform::Windows));
        assert!(!BackendKind::Dx12.is_supported_on(HostPlatform::Linux));

        assert!(BackendKind::Metal.is_supported_on(HostPlatform::MacOs));
        assert!(!BackendKind::Metal.is_supported_on(HostPlatform::Windows));

        assert!(BackendKind::WebGpu.is_supported_on(HostPlatform::Web));
        assert!(!BackendKind::WebGpu.is_supported_on(HostPlatform::Linux));

        for kind in BackendKind::ALL {
            assert!(!kind.is_supported_on(HostPlatform::Other));
        }
    }

    #[test]
    fn backend_kind_display() {
        assert_eq!(format!("{}", BackendKind::Vulkan), "Vulkan");
        assert_eq!(format!("{}", BackendKind::OpenGl), "OpenGl");
    }

    #[test]
    fn generations_are_monotonic() {
        let first = DeviceGeneration::first();
        let second = first.next();
        assert!(second > first);
        assert_eq!(first.index(), 1);
        assert_eq!(second.index(), 2);
        assert_eq!(format!("{second}"), "generation #2");
    }
}
