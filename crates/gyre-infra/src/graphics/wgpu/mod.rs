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

//! The `wgpu`-based backend driver.
//!
//! One `wgpu::Instance` is created per device-creation attempt, restricted
//! to the single backend bit the rotation targets, so each device is bound
//! to exactly one native API for its whole lifetime.

mod context;
mod conversions;
mod device;
mod driver;

pub use device::WgpuGraphicsDevice;
pub use driver::WgpuBackendDriver;
