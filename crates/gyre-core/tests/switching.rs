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

//! End-to-end rotation scenarios over the no-op driver.

use gyre_core::platform::window::SurfaceTarget;
use gyre_core::renderer::{
    BackendKind, BackendRotation, DeviceOptions, FrameDriver, NoopBackendDriver,
    SurfaceDescriptor, SwitchCoordinator, SwitchState,
};
use std::sync::atomic::Ordering;

fn frame_driver(noop: NoopBackendDriver, kinds: Vec<BackendKind>, period: u32) -> FrameDriver {
    let coordinator = SwitchCoordinator::new(
        Box::new(noop),
        SurfaceTarget::headless(SurfaceDescriptor::default()),
        DeviceOptions::default(),
    );
    let rotation = BackendRotation::new(kinds).unwrap();
    FrameDriver::new(coordinator, rotation, period).unwrap()
}

#[test]
fn full_rotation_cycle_returns_to_the_first_backend() {
    let noop = NoopBackendDriver::new();
    let probe = noop.probe();
    let mut driver = frame_driver(
        noop,
        vec![BackendKind::Vulkan, BackendKind::Dx12, BackendKind::OpenGl],
        2,
    );
    driver.start().unwrap();

    for _ in 0..6 {
        let outcome = driver.tick();
        assert!(outcome.rendered);
    }

    assert_eq!(driver.rotation().index(), 0);
    assert_eq!(driver.coordinator().active_backend(), Some(BackendKind::Vulkan));
    // Initial device plus one per boundary switch (ticks 2, 4 and 6).
    assert_eq!(probe.devices_created.load(Ordering::SeqCst), 4);
    assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 3);
    // Each disposed device was drained first and took its two baseline
    // resources with it.
    assert_eq!(probe.drains.load(Ordering::SeqCst), 3);
    assert_eq!(probe.resources_destroyed.load(Ordering::SeqCst), 6);
    // Exactly one generation is live at rest.
    assert_eq!(driver.coordinator().tracker().live_generations(), 1);
}

#[test]
fn rejected_transition_halts_rendering_until_explicit_recovery() {
    // Three backends [A, B, C] with period 2, where the B -> C transition
    // is rejected by the simulated driver.
    let noop = NoopBackendDriver::new()
        .fail_on(BackendKind::OpenGl, "internal drawable creation failed");
    let probe = noop.probe();
    let mut driver = frame_driver(
        noop,
        vec![BackendKind::Vulkan, BackendKind::Dx12, BackendKind::OpenGl],
        2,
    );
    driver.start().unwrap();

    // Ticks 1-2 render on A; tick 2 switches A -> B.
    assert_eq!(driver.tick().backend, Some(BackendKind::Vulkan));
    let outcome = driver.tick();
    assert_eq!(outcome.backend, Some(BackendKind::Vulkan));
    assert_eq!(outcome.switched_to, Some(BackendKind::Dx12));

    // Ticks 3-4 render on B; tick 4 attempts B -> C and fails.
    assert_eq!(driver.tick().backend, Some(BackendKind::Dx12));
    let outcome = driver.tick();
    assert_eq!(outcome.backend, Some(BackendKind::Dx12));
    assert!(outcome.switch_failed);
    assert_eq!(driver.coordinator().state(), SwitchState::Failed);

    // The outgoing device was torn down before the failed creation, and
    // nothing was registered under the failed target's generation.
    assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 2);
    assert_eq!(driver.coordinator().tracker().live_generations(), 0);
    assert!(driver.coordinator().device().is_none());

    // Ticks 5+ render nothing.
    for _ in 0..4 {
        let outcome = driver.tick();
        assert!(!outcome.rendered);
        assert_eq!(outcome.backend, None);
    }

    // The rotation index stayed on B: the failed switch never advanced it.
    assert_eq!(driver.rotation().current(), BackendKind::Dx12);

    // An explicit recovery to a different target resumes rendering.
    driver.recover_to(BackendKind::Vulkan).unwrap();
    assert_eq!(driver.coordinator().state(), SwitchState::Idle);
    let outcome = driver.tick();
    assert!(outcome.rendered);
    assert_eq!(outcome.backend, Some(BackendKind::Vulkan));
    assert_eq!(driver.rotation().current(), BackendKind::Vulkan);
}

#[test]
fn single_backend_rotation_recreates_the_device_in_place() {
    let noop = NoopBackendDriver::new();
    let probe = noop.probe();
    let mut driver = frame_driver(noop, vec![BackendKind::Vulkan], 3);
    driver.start().unwrap();

    for _ in 0..3 {
        driver.tick();
    }

    // The boundary switch targeted the only candidate: a full
    // dispose/recreate cycle on the same backend.
    assert_eq!(driver.coordinator().active_backend(), Some(BackendKind::Vulkan));
    assert_eq!(probe.devices_created.load(Ordering::SeqCst), 2);
    assert_eq!(probe.devices_disposed.load(Ordering::SeqCst), 1);
}
