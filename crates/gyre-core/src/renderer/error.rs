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

//! Defines the hierarchy of error types for the backend-switching core.

use crate::renderer::api::{BackendKind, DeviceGeneration};
use std::fmt;

/// A startup configuration error. Not recoverable without a config change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Filtering the backend set by host support and the exclusion policy
    /// left zero rotation candidates.
    NoBackendsAvailable {
        /// The exclusion set that was applied.
        excluded: Vec<BackendKind>,
    },
    /// The rotation period must be at least one tick.
    InvalidRotationPeriod {
        /// The rejected period value.
        ticks: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoBackendsAvailable { excluded } => {
                write!(
                    f,
                    "No graphics backends available after filtering (excluded: {excluded:?})"
                )
            }
            ConfigError::InvalidRotationPeriod { ticks } => {
                write!(f, "Rotation period must be > 0 ticks, got {ticks}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The target backend rejected initialization on this host.
///
/// This is a recoverable, reportable outcome: some backend-to-backend
/// transitions are simply not supported by a given host/driver combination,
/// and must surface as an error rather than corrupt state or fault natively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCreationError {
    /// The backend kind is not supported on this host at all.
    Unsupported {
        /// The rejected backend.
        kind: BackendKind,
    },
    /// No adapter could be acquired for the backend.
    AdapterUnavailable {
        /// The target backend.
        kind: BackendKind,
        /// Detail reported by the native layer.
        details: String,
    },
    /// The driver rejected device initialization.
    DriverRejected {
        /// The target backend.
        kind: BackendKind,
        /// Detail reported by the native layer.
        details: String,
    },
    /// The presentation surface is incompatible with the backend.
    SurfaceIncompatible {
        /// The target backend.
        kind: BackendKind,
        /// Detail reported by the native layer.
        details: String,
    },
    /// A validation layer rejected device initialization.
    ValidationFailed {
        /// The target backend.
        kind: BackendKind,
        /// The validation message.
        details: String,
    },
}

impl DeviceCreationError {
    /// The backend kind the failed creation attempt targeted.
    pub fn kind(&self) -> BackendKind {
        match self {
            DeviceCreationError::Unsupported { kind }
            | DeviceCreationError::AdapterUnavailable { kind, .. }
            | DeviceCreationError::DriverRejected { kind, .. }
            | DeviceCreationError::SurfaceIncompatible { kind, .. }
            | DeviceCreationError::ValidationFailed { kind, .. } => *kind,
        }
    }
}

impl fmt::Display for DeviceCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceCreationError::Unsupported { kind } => {
                write!(f, "Backend {kind} is not supported on this host")
            }
            DeviceCreationError::AdapterUnavailable { kind, details } => {
                write!(f, "No adapter available for backend {kind}: {details}")
            }
            DeviceCreationError::DriverRejected { kind, details } => {
                write!(f, "Driver rejected device creation for {kind}: {details}")
            }
            DeviceCreationError::SurfaceIncompatible { kind, details } => {
                write!(f, "Surface incompatible with backend {kind}: {details}")
            }
            DeviceCreationError::ValidationFailed { kind, details } => {
                write!(f, "Validation rejected device creation for {kind}: {details}")
            }
        }
    }
}

impl std::error::Error for DeviceCreationError {}

/// A frame-path failure on a live device.
///
/// These are reported and logged; they never terminate the render loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// An operation was attempted on a handle that has been disposed.
    Disposed,
    /// Submitting recorded commands to the device queue failed.
    SubmitFailed(String),
    /// Presenting the rendered frame to the surface failed.
    PresentFailed(String),
    /// The presentation surface was lost and could not be restored.
    SurfaceLost(String),
    /// Blocking until the device went idle failed.
    WaitFailed(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Disposed => {
                write!(f, "Operation attempted on a disposed device handle")
            }
            DeviceError::SubmitFailed(msg) => write!(f, "Command submission failed: {msg}"),
            DeviceError::PresentFailed(msg) => write!(f, "Frame presentation failed: {msg}"),
            DeviceError::SurfaceLost(msg) => write!(f, "Presentation surface lost: {msg}"),
            DeviceError::WaitFailed(msg) => write!(f, "Waiting for device idle failed: {msg}"),
        }
    }
}

impl std::error::Error for DeviceError {}

/// An attempt to register a resource against a generation that is not live.
///
/// This signals a lifecycle bug in the caller (holding on to a generation
/// across a backend switch) and is surfaced immediately rather than
/// swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleGenerationError {
    /// The generation the registration targeted.
    pub generation: DeviceGeneration,
}

impl fmt::Display for StaleGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot register resource against {}: generation is not live",
            self.generation
        )
    }
}

impl std::error::Error for StaleGenerationError {}

/// The failure record of a backend switch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    /// Creating the device for the target backend failed.
    Creation(DeviceCreationError),
    /// Draining the outgoing device failed; teardown still ran.
    Drain(DeviceError),
    /// A switch operation was requested in a state that does not accept it.
    InvalidState {
        /// A short name of the coordinator state at the time of the request.
        state: &'static str,
    },
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchError::Creation(err) => write!(f, "Backend switch failed: {err}"),
            SwitchError::Drain(err) => {
                write!(f, "Backend switch failed while draining: {err}")
            }
            SwitchError::InvalidState { state } => {
                write!(f, "Switch request not valid in state {state}")
            }
        }
    }
}

impl std::error::Error for SwitchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwitchError::Creation(err) => Some(err),
            SwitchError::Drain(err) => Some(err),
            SwitchError::InvalidState { .. } => None,
        }
    }
}

impl From<DeviceCreationError> for SwitchError {
    fn from(err: DeviceCreationError) -> Self {
        SwitchError::Creation(err)
    }
}
