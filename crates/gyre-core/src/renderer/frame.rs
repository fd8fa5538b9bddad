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

//! The frame driver: advances render state once per tick and requests a
//! backend switch when the rotation clock fires.

use crate::renderer::api::{BackendKind, BackendRotation, Color, FrameCommands, RotationClock};
use crate::renderer::coordinator::{SwitchCoordinator, SwitchState};
use crate::renderer::error::{ConfigError, SwitchError};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The 1-based ordinal of this tick.
    pub tick: u64,
    /// The backend the frame was rendered on, if any.
    pub backend: Option<BackendKind>,
    /// Whether a frame was submitted and presented this tick.
    pub rendered: bool,
    /// The backend a rotation-boundary switch landed on, if one succeeded.
    pub switched_to: Option<BackendKind>,
    /// Whether a rotation-boundary switch was attempted and failed.
    pub switch_failed: bool,
}

/// Drives the render loop: one frame per tick through the current device,
/// one switch request per rotation boundary.
///
/// While the coordinator is [`SwitchState::Failed`] the driver skips
/// rendering entirely (nothing is ever submitted through a disposed
/// handle) and stops requesting switches; recovery is an explicit caller
/// decision via [`FrameDriver::recover_to`].
#[derive(Debug)]
pub struct FrameDriver {
    coordinator: SwitchCoordinator,
    rotation: BackendRotation,
    clock: RotationClock,
    commands: FrameCommands,
    ticks: u64,
}

impl FrameDriver {
    /// Creates a frame driver over a coordinator and a validated rotation.
    ///
    /// ## Errors
    /// * `ConfigError` - If `period_ticks` is zero.
    pub fn new(
        coordinator: SwitchCoordinator,
        rotation: BackendRotation,
        period_ticks: u32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            coordinator,
            rotation,
            clock: RotationClock::new(period_ticks)?,
            commands: FrameCommands::new().with_clear_color(Color::CORNFLOWER_BLUE),
            ticks: 0,
        })
    }

    /// Replaces the per-tick frame commands.
    pub fn set_frame_commands(&mut self, commands: FrameCommands) {
        self.commands = commands;
    }

    /// Brings up the first device, on the rotation's current backend.
    ///
    /// ## Errors
    /// * `SwitchError` - If the initial device creation fails; the
    ///   coordinator is left `Failed` and ticks will skip rendering.
    pub fn start(&mut self) -> Result<(), SwitchError> {
        self.coordinator.switch_to(self.rotation.current())
    }

    /// Advances one tick: renders through the current device, then, on a
    /// rotation boundary, requests the switch to the next candidate.
    ///
    /// The boundary tick renders on the outgoing backend first; the
    /// rotation index advances only when the switch succeeds. Render-path
    /// errors are logged and reported in the outcome, never escalated.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        let mut outcome = TickOutcome {
            tick: self.ticks,
            backend: None,
            rendered: false,
            switched_to: None,
            switch_failed: false,
        };

        if self.coordinator.state() == SwitchState::Failed {
            log::debug!("Tick {}: no active device, skipping render", self.ticks);
        } else if let Some(device) = self.coordinator.device_mut() {
            outcome.backend = Some(device.backend_kind());
            match device
                .submit(&self.commands)
                .and_then(|()| device.present())
            {
                Ok(()) => outcome.rendered = true,
                Err(e) => log::error!("Render failed on {}: {e}", device.backend_kind()),
            }
        }

        if self.clock.tick() && self.coordinator.state() == SwitchState::Idle {
            let target = self.rotation.peek_next();
            match self.coordinator.switch_to(target) {
                Ok(()) => {
                    self.rotation.advance();
                    outcome.switched_to = Some(target);
                }
                Err(_) => {
                    // Recorded and logged by the coordinator; the caller
                    // decides whether to retry, skip or halt.
                    outcome.switch_failed = true;
                }
            }
        }

        outcome
    }

    /// Recovers from a failed switch by selecting an explicit target, and
    /// realigns the rotation position to it.
    ///
    /// ## Errors
    /// * `SwitchError` - If the coordinator is not `Failed` or the
    ///   recovery target also fails.
    pub fn recover_to(&mut self, target: BackendKind) -> Result<(), SwitchError> {
        self.coordinator.recover_to(target)?;
        self.rotation.align_to(target);
        Ok(())
    }

    /// Ticks driven so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The rotation, for inspection.
    pub fn rotation(&self) -> &BackendRotation {
        &self.rotation
    }

    /// The coordinator, for inspection.
    pub fn coordinator(&self) -> &SwitchCoordinator {
        &self.coordinator
    }

    /// Mutable access to the coordinator (shutdown, resource registration).
    pub fn coordinator_mut(&mut self) -> &mut SwitchCoordinator {
        &mut self.coordinator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::window::SurfaceTarget;
    use crate::renderer::api::{DeviceOptions, SurfaceDescriptor};
    use crate::renderer::noop::NoopBackendDriver;

    fn driver_with(rotation: Vec<BackendKind>, period: u32, noop: NoopBackendDriver) -> FrameDriver {
        let coordinator = SwitchCoordinator::new(
            Box::new(noop),
            SurfaceTarget::headless(SurfaceDescriptor::default()),
            DeviceOptions::default(),
        );
        let rotation = BackendRotation::new(rotation).unwrap();
        FrameDriver::new(coordinator, rotation, period).unwrap()
    }

    #[test]
    fn renders_every_tick_and_switches_on_the_boundary() {
        let mut frame_driver = driver_with(
            vec![BackendKind::Vulkan, BackendKind::OpenGl],
            2,
            NoopBackendDriver::new(),
        );
        frame_driver.start().unwrap();

        let outcome = frame_driver.tick();
        assert!(outcome.rendered);
        assert_eq!(outcome.backend, Some(BackendKind::Vulkan));
        assert_eq!(outcome.switched_to, None);

        // Boundary tick renders on the outgoing backend, then switches.
        let outcome = frame_driver.tick();
        assert_eq!(outcome.backend, Some(BackendKind::Vulkan));
        assert_eq!(outcome.switched_to, Some(BackendKind::OpenGl));

        let outcome = frame_driver.tick();
        assert_eq!(outcome.backend, Some(BackendKind::OpenGl));
    }

    #[test]
    fn rotation_index_returns_to_zero_after_full_cycle() {
        // 3 backends, period 2: after 3 * 2 ticks the index is back at 0.
        let mut frame_driver = driver_with(
            vec![BackendKind::Vulkan, BackendKind::Dx12, BackendKind::OpenGl],
            2,
            NoopBackendDriver::new(),
        );
        frame_driver.start().unwrap();

        for _ in 0..6 {
            frame_driver.tick();
        }
        assert_eq!(frame_driver.rotation().index(), 0);
        assert_eq!(
            frame_driver.coordinator().active_backend(),
            Some(BackendKind::Vulkan)
        );
    }

    #[test]
    fn failed_switch_stops_rendering_until_recovery() {
        let noop = NoopBackendDriver::new().fail_on(BackendKind::Dx12, "no adapter");
        let mut frame_driver = driver_with(
            vec![BackendKind::Vulkan, BackendKind::Dx12],
            2,
            noop,
        );
        frame_driver.start().unwrap();

        frame_driver.tick();
        let outcome = frame_driver.tick();
        assert!(outcome.switch_failed);
        assert_eq!(frame_driver.coordinator().state(), SwitchState::Failed);

        // No device: ticks render nothing and attempt no further switches.
        for _ in 0..3 {
            let outcome = frame_driver.tick();
            assert!(!outcome.rendered);
            assert_eq!(outcome.backend, None);
            assert!(!outcome.switch_failed);
        }

        frame_driver.recover_to(BackendKind::Vulkan).unwrap();
        assert_eq!(frame_driver.rotation().current(), BackendKind::Vulkan);
        let outcome = frame_driver.tick();
        assert!(outcome.rendered);
        assert_eq!(outcome.backend, Some(BackendKind::Vulkan));
    }
}
