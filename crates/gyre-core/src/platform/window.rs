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

use crate::renderer::api::SurfaceDescriptor;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

/// A trait that combines the windowing handle traits required by graphics
/// backends. This is used to satisfy Rust's "trait object" rules.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

// Blanket implementation: any type providing both handle traits qualifies.
impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A cloneable, thread-safe handle to a platform window, suitable for
/// creating presentation surfaces from.
pub type GyreWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// A trait that abstracts the behavior of a presentation window.
///
/// Any windowing backend (winit, SDL2, GLFW, etc.) can implement this trait
/// to serve as the surface collaborator for a backend driver. Event pumping
/// stays with the windowing layer; the switching core only ever reads
/// dimensions and clones surface handles.
pub trait GyreWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Returns the physical dimensions (width, height) of the window's inner area.
    fn inner_size(&self) -> (u32, u32);

    /// Requests that the window be redrawn.
    fn request_redraw(&self);

    /// Clones an `Arc`'d, thread-safe handle to the window.
    /// This is what a backend driver uses to create a surface.
    fn clone_handle_arc(&self) -> GyreWindowHandle;

    /// Returns the unique identifier for the window.
    fn id(&self) -> u64;
}

/// The presentation target a device is created against.
///
/// Wraps the surface dimensions/title and, for windowed targets, the raw
/// handle a driver turns into a native surface. Headless targets carry no
/// handle; drivers that require a window reject them with a surface error,
/// while the no-op driver and tests accept them.
#[derive(Clone)]
pub struct SurfaceTarget {
    descriptor: SurfaceDescriptor,
    handle: Option<GyreWindowHandle>,
}

impl SurfaceTarget {
    /// Creates a windowed surface target from a descriptor and a window handle.
    pub fn windowed(descriptor: SurfaceDescriptor, handle: GyreWindowHandle) -> Self {
        Self {
            descriptor,
            handle: Some(handle),
        }
    }

    /// Creates a headless surface target carrying only the descriptor.
    pub fn headless(descriptor: SurfaceDescriptor) -> Self {
        Self {
            descriptor,
            handle: None,
        }
    }

    /// The surface dimensions and title.
    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    /// The window handle, if this target is windowed.
    pub fn window_handle(&self) -> Option<&GyreWindowHandle> {
        self.handle.as_ref()
    }
}

impl std::fmt::Debug for SurfaceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceTarget")
            .field("descriptor", &self.descriptor)
            .field("windowed", &self.handle.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_target_has_no_handle() {
        let target = SurfaceTarget::headless(SurfaceDescriptor::default());
        assert!(target.window_handle().is_none());
        assert_eq!(target.descriptor().width, SurfaceDescriptor::default().width);
    }
}
