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

//! The generation-keyed resource tracker.
//!
//! Every GPU-side allocation made through a device handle is registered here
//! under the handle's [`DeviceGeneration`]. Before a backend switch tears a
//! device down, the coordinator releases the whole generation in one sweep,
//! so no resource can outlive the device that created it.

use crate::renderer::api::DeviceGeneration;
use crate::renderer::error::StaleGenerationError;
use std::collections::HashMap;
use std::fmt::Debug;

/// The category of a tracked GPU allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A GPU buffer.
    Buffer,
    /// A GPU texture.
    Texture,
    /// A compiled pipeline state object.
    Pipeline,
    /// A command list / submission context.
    CommandList,
    /// A framebuffer or swapchain binding.
    Framebuffer,
}

/// A GPU-side allocation owned by one device generation.
///
/// `destroy` releases the underlying allocation and must tolerate being
/// called more than once.
pub trait TrackedResource: Debug + Send {
    /// A human-readable label for logs.
    fn label(&self) -> &str;

    /// The category of the allocation.
    fn kind(&self) -> ResourceKind;

    /// Releases the underlying allocation.
    fn destroy(&mut self);
}

/// Maps device generations to the resources created under them.
#[derive(Debug, Default)]
pub struct ResourceTracker {
    generations: HashMap<DeviceGeneration, Vec<Box<dyn TrackedResource>>>,
}

impl ResourceTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a new generation with no resources.
    pub fn open(&mut self, generation: DeviceGeneration) {
        let previous = self.generations.insert(generation, Vec::new());
        debug_assert!(previous.is_none(), "{generation} opened twice");
    }

    /// Opens a generation and registers its baseline resources in one step.
    pub fn adopt(
        &mut self,
        generation: DeviceGeneration,
        resources: Vec<Box<dyn TrackedResource>>,
    ) {
        debug_assert!(!self.generations.contains_key(&generation));
        for resource in &resources {
            log::debug!(
                "Tracking {:?} '{}' under {generation}",
                resource.kind(),
                resource.label()
            );
        }
        self.generations.insert(generation, resources);
    }

    /// Registers a resource under a live generation.
    ///
    /// ## Errors
    /// * `StaleGenerationError` - If the generation has already been
    ///   released (or was never opened). This is a lifecycle bug in the
    ///   caller, surfaced immediately.
    pub fn register(
        &mut self,
        generation: DeviceGeneration,
        resource: Box<dyn TrackedResource>,
    ) -> Result<(), StaleGenerationError> {
        match self.generations.get_mut(&generation) {
            Some(resources) => {
                log::debug!(
                    "Tracking {:?} '{}' under {generation}",
                    resource.kind(),
                    resource.label()
                );
                resources.push(resource);
                Ok(())
            }
            None => Err(StaleGenerationError { generation }),
        }
    }

    /// Destroys every resource tracked under `generation` and retires the
    /// generation. Returns the number of resources released.
    ///
    /// Resources are destroyed in reverse registration order, so dependents
    /// (registered later) go before the resources they reference.
    pub fn release_all(&mut self, generation: DeviceGeneration) -> usize {
        let Some(mut resources) = self.generations.remove(&generation) else {
            return 0;
        };
        let count = resources.len();
        while let Some(mut resource) = resources.pop() {
            log::debug!(
                "Releasing {:?} '{}' of {generation}",
                resource.kind(),
                resource.label()
            );
            resource.destroy();
        }
        count
    }

    /// Whether `generation` is live (opened and not yet released).
    pub fn is_live(&self, generation: DeviceGeneration) -> bool {
        self.generations.contains_key(&generation)
    }

    /// The number of resources currently tracked under `generation`.
    /// Zero for a generation that is not live.
    pub fn tracked_count(&self, generation: DeviceGeneration) -> usize {
        self.generations
            .get(&generation)
            .map_or(0, |resources| resources.len())
    }

    /// The number of live generations. The switching invariant keeps this
    /// at most 1 outside of the tracker's own tests.
    pub fn live_generations(&self) -> usize {
        self.generations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct ProbeResource {
        label: String,
        kind: ResourceKind,
        destroyed: Arc<AtomicUsize>,
        order: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl TrackedResource for ProbeResource {
        fn label(&self) -> &str {
            &self.label
        }
        fn kind(&self) -> ResourceKind {
            self.kind
        }
        fn destroy(&mut self) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
            self.order.lock().unwrap().push(self.label.clone());
        }
    }

    fn probe(
        label: &str,
        kind: ResourceKind,
        destroyed: &Arc<AtomicUsize>,
        order: &Arc<std::sync::Mutex<Vec<String>>>,
    ) -> Box<dyn TrackedResource> {
        Box::new(ProbeResource {
            label: label.to_string(),
            kind,
            destroyed: destroyed.clone(),
            order: order.clone(),
        })
    }

    #[test]
    fn release_all_destroys_in_reverse_registration_order() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let generation = DeviceGeneration::first();

        let mut tracker = ResourceTracker::new();
        tracker.open(generation);
        tracker
            .register(
                generation,
                probe("framebuffer", ResourceKind::Framebuffer, &destroyed, &order),
            )
            .unwrap();
        tracker
            .register(
                generation,
                probe("command list", ResourceKind::CommandList, &destroyed, &order),
            )
            .unwrap();
        assert_eq!(tracker.tracked_count(generation), 2);

        let released = tracker.release_all(generation);
        assert_eq!(released, 2);
        assert_eq!(destroyed.load(Ordering::SeqCst), 2);
        // The command list references the framebuffer, so it must go first.
        assert_eq!(
            *order.lock().unwrap(),
            vec!["command list".to_string(), "framebuffer".to_string()]
        );
        assert!(!tracker.is_live(generation));
        assert_eq!(tracker.tracked_count(generation), 0);
    }

    #[test]
    fn registering_against_a_released_generation_fails() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let generation = DeviceGeneration::first();

        let mut tracker = ResourceTracker::new();
        tracker.open(generation);
        tracker.release_all(generation);

        let err = tracker
            .register(
                generation,
                probe("buffer", ResourceKind::Buffer, &destroyed, &order),
            )
            .unwrap_err();
        assert_eq!(err, StaleGenerationError { generation });
    }

    #[test]
    fn registering_against_an_unopened_generation_fails() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut tracker = ResourceTracker::new();
        let err = tracker
            .register(
                DeviceGeneration::first(),
                probe("texture", ResourceKind::Texture, &destroyed, &order),
            )
            .unwrap_err();
        assert_eq!(
            err,
            StaleGenerationError {
                generation: DeviceGeneration::first()
            }
        );
    }

    #[test]
    fn release_all_on_unknown_generation_is_a_noop() {
        let mut tracker = ResourceTracker::new();
        assert_eq!(tracker.release_all(DeviceGeneration::first()), 0);
    }

    #[test]
    fn adopt_opens_and_registers_in_one_step() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let generation = DeviceGeneration::first();

        let mut tracker = ResourceTracker::new();
        tracker.adopt(
            generation,
            vec![probe("swapchain", ResourceKind::Framebuffer, &destroyed, &order)],
        );
        assert!(tracker.is_live(generation));
        assert_eq!(tracker.tracked_count(generation), 1);
        assert_eq!(tracker.live_generations(), 1);
    }
}
