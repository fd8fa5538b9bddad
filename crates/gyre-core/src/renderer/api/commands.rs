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

//! The minimal command sequence the frame driver submits each tick.

use crate::renderer::api::common::Color;

/// A single recorded render operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderOp {
    /// Clear the color target to the given color.
    ClearColor(Color),
    /// Clear the depth attachment to the given value.
    ClearDepth(f32),
}

/// An ordered sequence of render operations for one frame.
///
/// Submission is fire-and-forget: the device queues the work and returns;
/// [`wait_idle`](crate::renderer::traits::GraphicsDevice::wait_idle) is the
/// only synchronization point.
#[derive(Debug, Clone, Default)]
pub struct FrameCommands {
    ops: Vec<RenderOp>,
}

impl FrameCommands {
    /// An empty command sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a color clear.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.ops.push(RenderOp::ClearColor(color));
        self
    }

    /// Appends a depth clear.
    pub fn with_clear_depth(mut self, depth: f32) -> Self {
        self.ops.push(RenderOp::ClearDepth(depth));
        self
    }

    /// The recorded operations, in submission order.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Whether no operations are recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The number of recorded operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_record_in_order() {
        let commands = FrameCommands::new()
            .with_clear_color(Color::CORNFLOWER_BLUE)
            .with_clear_depth(1.0);
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands.ops()[0],
            RenderOp::ClearColor(Color::CORNFLOWER_BLUE)
        );
        assert_eq!(commands.ops()[1], RenderOp::ClearDepth(1.0));
    }
}
