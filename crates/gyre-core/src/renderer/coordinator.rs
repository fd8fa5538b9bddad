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

//! The backend switch coordinator.
//!
//! Orchestrates the transition from one active backend to another as an
//! explicit state machine: quiesce, drain, dispose, recreate, validate.
//! Modeling the transition this way makes the drain-before-teardown
//! ordering, the idempotent-disposal requirement and the explicit failure
//! state first-class, testable contracts instead of a timing accident.

use crate::platform::window::SurfaceTarget;
use crate::renderer::api::{BackendKind, DeviceGeneration, DeviceOptions};
use crate::renderer::device::DeviceHandle;
use crate::renderer::error::{DeviceError, StaleGenerationError, SwitchError};
use crate::renderer::tracker::{ResourceTracker, TrackedResource};
use crate::renderer::traits::BackendDriver;
use std::fmt;

/// The phase the coordinator is in.
///
/// A switch request drives the machine from `Idle` through the transition
/// phases back to `Idle`, or into `Failed`. `Failed` is terminal for that
/// attempt: the caller decides whether to retry, pick another target via
/// [`SwitchCoordinator::recover_to`], or halt. The coordinator never
/// auto-retries a backend the driver has rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// No transition in progress; a device may or may not be active.
    Idle,
    /// Waiting for in-flight GPU work on the outgoing device.
    Draining,
    /// Releasing the outgoing generation's resources and the device itself.
    TearingDown,
    /// Constructing the device for the target backend.
    Recreating,
    /// Re-registering baseline resources under the new generation.
    Validating,
    /// The last switch attempt failed; no device is active.
    Failed,
}

impl SwitchState {
    fn name(self) -> &'static str {
        match self {
            SwitchState::Idle => "Idle",
            SwitchState::Draining => "Draining",
            SwitchState::TearingDown => "TearingDown",
            SwitchState::Recreating => "Recreating",
            SwitchState::Validating => "Validating",
            SwitchState::Failed => "Failed",
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Owns the active device, its resource tracker and the switch state
/// machine.
///
/// Single-threaded by design: a switch request runs to completion (`Idle`
/// or `Failed`) within the call, so no render or switch request can ever
/// observe a half-torn-down device. Callers on multiple threads must
/// serialize access through one mutual-exclusion gate.
#[derive(Debug)]
pub struct SwitchCoordinator {
    driver: Box<dyn BackendDriver>,
    surface: SurfaceTarget,
    options: DeviceOptions,
    tracker: ResourceTracker,
    device: Option<DeviceHandle>,
    next_generation: DeviceGeneration,
    state: SwitchState,
    last_error: Option<SwitchError>,
}

impl SwitchCoordinator {
    /// Creates an idle coordinator with no active device.
    pub fn new(driver: Box<dyn BackendDriver>, surface: SurfaceTarget, options: DeviceOptions) -> Self {
        Self {
            driver,
            surface,
            options,
            tracker: ResourceTracker::new(),
            device: None,
            next_generation: DeviceGeneration::first(),
            state: SwitchState::Idle,
            last_error: None,
        }
    }

    /// The current phase of the state machine.
    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// The backend of the active device, if one is live.
    pub fn active_backend(&self) -> Option<BackendKind> {
        self.device.as_ref().map(DeviceHandle::backend_kind)
    }

    /// The generation of the active device, if one is live.
    pub fn current_generation(&self) -> Option<DeviceGeneration> {
        self.device.as_ref().map(DeviceHandle::generation)
    }

    /// The active device handle, if one is live.
    pub fn device(&self) -> Option<&DeviceHandle> {
        self.device.as_ref()
    }

    /// Mutable access to the active device handle, if one is live.
    pub fn device_mut(&mut self) -> Option<&mut DeviceHandle> {
        self.device.as_mut()
    }

    /// The failure record of the last switch attempt, if it failed.
    pub fn last_error(&self) -> Option<&SwitchError> {
        self.last_error.as_ref()
    }

    /// The resource tracker, for inspection.
    pub fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }

    /// Registers a resource under the active device's generation.
    ///
    /// ## Errors
    /// * `StaleGenerationError` - If no device is live (the resource would
    ///   belong to nothing).
    pub fn register_resource(
        &mut self,
        resource: Box<dyn TrackedResource>,
    ) -> Result<(), StaleGenerationError> {
        match self.current_generation() {
            Some(generation) => self.tracker.register(generation, resource),
            None => Err(StaleGenerationError {
                generation: self.next_generation,
            }),
        }
    }

    /// Transitions to the target backend.
    ///
    /// Drains and fully tears down the current device (if any) before the
    /// new one is constructed, so at most one device is ever live. On
    /// failure the coordinator enters [`SwitchState::Failed`] with no
    /// active device and preserves the error.
    ///
    /// ## Errors
    /// * `SwitchError::InvalidState` - If called while not `Idle`.
    /// * `SwitchError::Creation` / `SwitchError::Drain` - The preserved
    ///   failure of the attempt.
    pub fn switch_to(&mut self, target: BackendKind) -> Result<(), SwitchError> {
        if self.state != SwitchState::Idle {
            return Err(SwitchError::InvalidState {
                state: self.state.name(),
            });
        }
        self.perform_switch(target)
    }

    /// Retries from `Failed` with a (usually different) target backend.
    ///
    /// ## Errors
    /// * `SwitchError::InvalidState` - If the coordinator is not `Failed`.
    /// * `SwitchError::Creation` - If the recovery target also fails.
    pub fn recover_to(&mut self, target: BackendKind) -> Result<(), SwitchError> {
        if self.state != SwitchState::Failed {
            return Err(SwitchError::InvalidState {
                state: self.state.name(),
            });
        }
        self.state = SwitchState::Idle;
        self.perform_switch(target)
    }

    /// Drains and tears down the active device, returning to an idle,
    /// deviceless coordinator. Used on shutdown.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.device.as_mut() {
            if let Err(e) = handle.wait_idle() {
                log::warn!("Drain during shutdown failed: {e}");
            }
        }
        if let Some(mut handle) = self.device.take() {
            let released = self.tracker.release_all(handle.generation());
            log::debug!(
                "Shutdown released {released} resources of {}",
                handle.generation()
            );
            handle.dispose();
        }
        self.state = SwitchState::Idle;
    }

    fn perform_switch(&mut self, target: BackendKind) -> Result<(), SwitchError> {
        let from = self.active_backend();

        // Drain. The outgoing device is torn down even if the drain fails:
        // leaving it live after a failed wait would let its resources be
        // freed under in-flight work later.
        let mut drain_failure: Option<DeviceError> = None;
        if let Some(handle) = self.device.as_mut() {
            self.state = SwitchState::Draining;
            log::debug!("Switch {from:?} -> {target}: draining in-flight work");
            if let Err(e) = handle.wait_idle() {
                log::warn!("Drain of outgoing {} device failed: {e}", handle.backend_kind());
                drain_failure = Some(e);
            }
        }

        // Tear down: resources of the outgoing generation first, then the
        // device itself.
        self.state = SwitchState::TearingDown;
        if let Some(mut handle) = self.device.take() {
            let generation = handle.generation();
            let released = self.tracker.release_all(generation);
            log::debug!("Released {released} resources of {generation}");
            handle.dispose();
        }

        if let Some(e) = drain_failure {
            let error = SwitchError::Drain(e);
            self.fail_attempt(from, target, error.clone());
            return Err(error);
        }

        // Recreate under a fresh generation.
        self.state = SwitchState::Recreating;
        let generation = self.next_generation;
        self.next_generation = generation.next();
        let created = match self.driver.create_device(target, &self.surface, &self.options) {
            Ok(created) => created,
            Err(e) => {
                let error = SwitchError::Creation(e);
                self.fail_attempt(from, target, error.clone());
                return Err(error);
            }
        };

        // Validate: baseline resources (submission context, surface
        // binding) re-registered under the new generation.
        self.state = SwitchState::Validating;
        self.tracker.adopt(generation, created.baseline_resources);
        let handle = DeviceHandle::new(created.device, generation);
        log::debug!(
            "New {} device live as {generation} ({})",
            handle.backend_kind(),
            handle.adapter_info().name
        );
        self.device = Some(handle);
        self.state = SwitchState::Idle;
        self.last_error = None;

        log::info!(
            "backend switch: from={} to={target} result=success",
            from_label(from)
        );
        Ok(())
    }

    fn fail_attempt(&mut self, from: Option<BackendKind>, target: BackendKind, error: SwitchError) {
        log::warn!(
            "backend switch: from={} to={target} result=failure error={error}",
            from_label(from)
        );
        self.state = SwitchState::Failed;
        self.last_error = Some(error);
    }
}

fn from_label(from: Option<BackendKind>) -> String {
    from.map_or_else(|| "none".to_string(), |kind| kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::window::SurfaceTarget;
    use crate::renderer::api::SurfaceDescriptor;
    use crate::renderer::error::DeviceCreationError;
    use crate::renderer::noop::{NoopBackendDriver, NoopProbe};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn coordinator_with(driver: NoopBackendDriver) -> (SwitchCoordinator, Arc<NoopProbe>) {
        let probe = driver.probe();
        let coordinator = SwitchCoordinator::new(
            Box::new(driver),
            SurfaceTarget::headless(SurfaceDescriptor::default()),
            DeviceOptions::default(),
        );
        (coordinator, probe)
    }

    #[test]
    fn first_switch_brings_up_a_device() {
        let (mut coordinator, probe) = coordinator_with(NoopBackendDriver::new());
        coordinator.switch_to(BackendKind::Vulkan).unwrap();

        assert_eq!(coordinator.state(), SwitchState::Idle);
        assert_eq!(coordinator.active_backend(), Some(BackendKind::Vulkan));
        let generation = coordinator.current_generation().unwrap();
        // Baseline resources: submission context + surface binding.
        assert_eq!(coordinator.tracker().tracked_count(generation), 2);
        assert_eq!(probe.devices_created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn successful_switch_retires_the_previous_generation() {
        let (mut coordinator, probe) = coordinator_with(NoopBackendDriver::new());
        coordinator.switch_to(BackendKind::Vulkan).unwrap();
        let old_generation = coordinator.current_generation().unwrap();

        coordinator.switch_to(BackendKind::OpenGl).unwrap();
        let new_generation = coordinator.current_generation().unwrap();

        assert_ne!(old_generation, new_generation);
        assert!(!coordinator.tracker().is_live(old_generation));
        assert_eq!(coordinator.tracker().tracked_count(old_generation), 0);
        assert_eq!(coordinator.tracker().live_generations(), 1);
        assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 1);
        assert_eq!(probe.drains.load(Ordering::SeqCst), 1);
        // Two baseline resources of the old generation destroyed.
        assert_eq!(probe.resources_destroyed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_creation_leaves_failed_state_and_no_device() {
        let driver = NoopBackendDriver::new()
            .fail_on(BackendKind::Metal, "internal drawable creation failed");
        let (mut coordinator, _probe) = coordinator_with(driver);
        coordinator.switch_to(BackendKind::Vulkan).unwrap();

        let err = coordinator.switch_to(BackendKind::Metal).unwrap_err();
        assert!(matches!(
            err,
            SwitchError::Creation(DeviceCreationError::DriverRejected { .. })
        ));
        assert_eq!(coordinator.state(), SwitchState::Failed);
        assert!(coordinator.device().is_none());
        assert_eq!(coordinator.last_error(), Some(&err));
        // No generation is live: the failed target registered nothing.
        assert_eq!(coordinator.tracker().live_generations(), 0);
    }

    #[test]
    fn switch_requests_are_rejected_while_failed() {
        let driver = NoopBackendDriver::new().fail_on(BackendKind::Metal, "no driver");
        let (mut coordinator, _probe) = coordinator_with(driver);
        coordinator.switch_to(BackendKind::Vulkan).unwrap();
        let _ = coordinator.switch_to(BackendKind::Metal);

        let err = coordinator.switch_to(BackendKind::OpenGl).unwrap_err();
        assert_eq!(err, SwitchError::InvalidState { state: "Failed" });
    }

    #[test]
    fn recover_to_leaves_failed_state() {
        let driver = NoopBackendDriver::new().fail_on(BackendKind::Metal, "no driver");
        let (mut coordinator, _probe) = coordinator_with(driver);
        coordinator.switch_to(BackendKind::Vulkan).unwrap();
        let _ = coordinator.switch_to(BackendKind::Metal);
        assert_eq!(coordinator.state(), SwitchState::Failed);

        coordinator.recover_to(BackendKind::OpenGl).unwrap();
        assert_eq!(coordinator.state(), SwitchState::Idle);
        assert_eq!(coordinator.active_backend(), Some(BackendKind::OpenGl));
        assert!(coordinator.last_error().is_none());
    }

    #[test]
    fn recover_to_requires_failed_state() {
        let (mut coordinator, _probe) = coordinator_with(NoopBackendDriver::new());
        let err = coordinator.recover_to(BackendKind::Vulkan).unwrap_err();
        assert_eq!(err, SwitchError::InvalidState { state: "Idle" });
    }

    #[test]
    fn registering_without_a_device_is_stale() {
        let (mut coordinator, _probe) = coordinator_with(NoopBackendDriver::new());
        let resource = crate::renderer::noop::NoopTrackedResource::command_list("orphan");
        assert!(coordinator.register_resource(Box::new(resource)).is_err());
    }

    #[test]
    fn shutdown_releases_everything() {
        let (mut coordinator, probe) = coordinator_with(NoopBackendDriver::new());
        coordinator.switch_to(BackendKind::Vulkan).unwrap();
        coordinator.shutdown();

        assert!(coordinator.device().is_none());
        assert_eq!(coordinator.state(), SwitchState::Idle);
        assert_eq!(coordinator.tracker().live_generations(), 0);
        assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 1);
        assert_eq!(probe.resources_destroyed.load(Ordering::SeqCst), 2);
    }
}
