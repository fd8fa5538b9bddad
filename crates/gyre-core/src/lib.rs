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

//! # Gyre Core
//!
//! Foundational crate containing the backend-agnostic contracts and the
//! runtime backend-switching core: capability descriptors, the rotation
//! model, the generation-keyed resource tracker, the switch coordinator
//! state machine and the frame driver.
//!
//! Concrete graphics backends live in `gyre-infra` and implement the traits
//! defined here.

#![warn(missing_docs)]

pub mod platform;
pub mod renderer;
