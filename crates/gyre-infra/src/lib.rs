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

//! # Gyre Infra
//!
//! Concrete implementations of the `gyre-core` contracts: a `wgpu`-based
//! backend driver that can target each native graphics API in turn, and a
//! `winit`-based presentation window.

#![warn(missing_docs)]

pub mod graphics;
pub mod platform;

pub use graphics::wgpu::{WgpuBackendDriver, WgpuGraphicsDevice};
pub use platform::window::{WinitWindow, WinitWindowBuilder};
