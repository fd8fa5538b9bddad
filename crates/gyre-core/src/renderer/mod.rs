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

//! The backend-agnostic switching contracts and their orchestration.
//!
//! This module defines the "common language" of the crate: the abstract
//! traits (like [`GraphicsDevice`] and [`BackendDriver`]), the data
//! structures (backend kinds, rotation, options) and the error types, plus
//! the switching core itself: the generation-keyed [`ResourceTracker`],
//! the [`SwitchCoordinator`] state machine and the [`FrameDriver`].
//!
//! Concrete backends (a `wgpu`-based driver lives in `gyre-infra`)
//! implement the traits; the core never sees a native API type.

pub mod api;
pub mod coordinator;
pub mod device;
pub mod error;
pub mod frame;
pub mod noop;
pub mod tracker;
pub mod traits;

// Re-export the most important types for easier use.
pub use self::api::*;
pub use self::coordinator::{SwitchCoordinator, SwitchState};
pub use self::device::DeviceHandle;
pub use self::error::{
    ConfigError, DeviceCreationError, DeviceError, StaleGenerationError, SwitchError,
};
pub use self::frame::{FrameDriver, TickOutcome};
pub use self::noop::{NoopBackendDriver, NoopGraphicsDevice, NoopProbe, NoopTrackedResource};
pub use self::tracker::{ResourceKind, ResourceTracker, TrackedResource};
pub use self::traits::{BackendDriver, CreatedDevice, GraphicsDevice};
