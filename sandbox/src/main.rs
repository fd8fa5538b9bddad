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

// Gyre Sandbox
// Cycles a window through every host-supported graphics backend at a fixed
// tick interval, reproducing the classic backend-switching diagnostic: some
// transitions are rejected by the host driver and must surface as reported,
// recoverable failures instead of native faults.

use anyhow::{Context, Result};
use gyre_core::platform::window::{GyreWindow, SurfaceTarget};
use gyre_core::renderer::{
    BackendRotation, FrameDriver, HostPlatform, RotationSettings, SurfaceDescriptor,
    SwitchCoordinator,
};
use gyre_infra::{WgpuBackendDriver, WinitWindow, WinitWindowBuilder};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

const WINDOW_WIDTH: u32 = 960;
const WINDOW_HEIGHT: u32 = 540;
const WINDOW_TITLE: &str = "Gyre Backend Switching Diagnostic";

/// The demo state, driven by the winit event loop.
struct DemoApp {
    settings: RotationSettings,
    window: Option<WinitWindow>,
    frame_driver: Option<FrameDriver>,
}

impl DemoApp {
    fn new(settings: RotationSettings) -> Self {
        Self {
            settings,
            window: None,
            frame_driver: None,
        }
    }
}

/// Controlled shutdown when the event loop exits: drain, release the live
/// generation, dispose the device.
impl Drop for DemoApp {
    fn drop(&mut self) {
        if let Some(mut frame_driver) = self.frame_driver.take() {
            log::info!("Shutting down after {} ticks.", frame_driver.ticks());
            frame_driver.coordinator_mut().shutdown();
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Avoid re-initializing if the app is resumed multiple times.
        }

        log::info!("Application resumed. Initializing window and switching core...");

        let rotation =
            match BackendRotation::from_settings(&self.settings, HostPlatform::current()) {
                Ok(rotation) => rotation,
                Err(e) => {
                    log::error!("Cannot build a backend rotation: {e}");
                    event_loop.exit();
                    return;
                }
            };
        log::info!("Backends selected to iterate between:");
        for kind in rotation.kinds() {
            log::info!("  {kind}");
        }

        let window = WinitWindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_dimensions(WINDOW_WIDTH, WINDOW_HEIGHT)
            .build(event_loop)
            .unwrap();

        let surface = SurfaceTarget::windowed(
            SurfaceDescriptor {
                width: WINDOW_WIDTH,
                height: WINDOW_HEIGHT,
                title: WINDOW_TITLE.to_string(),
            },
            window.clone_handle_arc(),
        );
        let coordinator = SwitchCoordinator::new(
            Box::new(WgpuBackendDriver::new()),
            surface,
            self.settings.device_options(),
        );
        let mut frame_driver =
            FrameDriver::new(coordinator, rotation, self.settings.rotation_period_ticks).unwrap();

        if let Err(e) = frame_driver.start() {
            // The loop keeps running with rendering skipped; closing the
            // window still shuts down cleanly.
            log::error!("Initial device creation failed: {e}");
        }

        self.window = Some(window);
        self.frame_driver = Some(frame_driver);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        {
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};

            let mut hasher = DefaultHasher::new();
            id.hash(&mut hasher);
            if window.id() != hasher.finish() {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Some(frame_driver) = self.frame_driver.as_mut() {
                    let outcome = frame_driver.tick();
                    if outcome.switch_failed {
                        // Rotation halts here. The retry / skip / halt
                        // decision belongs to the embedder, and this
                        // diagnostic wants the failure to stay visible.
                        log::warn!(
                            "Rotation halted on tick {}: {}",
                            outcome.tick,
                            frame_driver
                                .coordinator()
                                .last_error()
                                .map_or_else(|| "unknown error".to_string(), |e| e.to_string())
                        );
                    }
                }
            }
            _ => {}
        }
    }

    /// Continuous rendering: request the next frame as soon as the loop
    /// goes idle.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Loads rotation settings from the JSON file given as the first CLI
/// argument, or falls back to the diagnostic defaults (validation layers
/// on, so driver rejections surface as readable errors instead of faults).
fn load_settings() -> Result<RotationSettings> {
    match std::env::args().nth(1) {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file '{path}'"))?;
            let settings: RotationSettings = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings file '{path}'"))?;
            settings.validate()?;
            Ok(settings)
        }
        None => Ok(RotationSettings {
            debug_validation: true,
            ..Default::default()
        }),
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let settings = load_settings()?;
    log::info!(
        "Rotation period: {} ticks, debug validation: {}, vsync: {}",
        settings.rotation_period_ticks,
        settings.debug_validation,
        settings.vertical_sync
    );

    let event_loop = EventLoop::new()?;
    let mut app = DemoApp::new(settings);
    event_loop.run_app(&mut app)?;

    Ok(())
}
