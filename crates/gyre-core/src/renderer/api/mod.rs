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

//! Backend-agnostic data structures of the switching core: backend kinds,
//! configuration options, the rotation model and frame commands.

pub mod commands;
pub mod common;
pub mod options;
pub mod rotation;

pub use commands::{FrameCommands, RenderOp};
pub use common::{
    AdapterInfo, BackendKind, Color, DepthFormat, DeviceGeneration, DeviceType, HostPlatform,
};
pub use options::{DeviceOptions, RotationSettings, SurfaceDescriptor};
pub use rotation::{available_backends, default_exclusions, BackendRotation, RotationClock};
