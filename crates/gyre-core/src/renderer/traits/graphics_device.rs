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

use crate::renderer::api::{AdapterInfo, BackendKind, FrameCommands};
use crate::renderer::error::DeviceError;
use std::fmt::Debug;

/// The capability contract every backend device implements.
///
/// One implementation exists per [`BackendKind`] variant; the switching core
/// only ever talks to this trait. A device owns its native context, its
/// command-submission queue and its presentation surface, all bound to a
/// single backend kind for its whole lifetime.
///
/// Backend-native faults must be caught behind this boundary and converted
/// to [`DeviceError`]; they never propagate as uncontrolled native faults.
pub trait GraphicsDevice: Debug + Send {
    /// The backend this device is bound to.
    fn backend_kind(&self) -> BackendKind;

    /// Information about the adapter backing this device.
    fn adapter_info(&self) -> AdapterInfo;

    /// Queues the recorded frame commands for execution.
    ///
    /// Fire-and-forget: the call returns once the work is queued, not once
    /// it has executed.
    ///
    /// ## Errors
    /// * `DeviceError` - If the device rejects the submission.
    fn submit(&mut self, commands: &FrameCommands) -> Result<(), DeviceError>;

    /// Presents the most recently rendered frame to the surface.
    ///
    /// ## Errors
    /// * `DeviceError` - If the swapchain rejects or loses the frame.
    fn present(&mut self) -> Result<(), DeviceError>;

    /// Blocks the calling thread until all submitted work has completed.
    ///
    /// This is the sole synchronization point of the device contract, and
    /// the required barrier before any teardown.
    ///
    /// ## Errors
    /// * `DeviceError` - If the device cannot be drained.
    fn wait_idle(&mut self) -> Result<(), DeviceError>;

    /// Releases the native device and everything it exclusively owns.
    ///
    /// Must be idempotent: calling it on an already-disposed device is a
    /// no-op.
    fn dispose(&mut self);
}
