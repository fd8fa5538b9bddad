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

//! The backend capability descriptor and the rotation model: which backends
//! a host can cycle through, in what order, and when the next switch fires.

use crate::renderer::api::common::{BackendKind, HostPlatform};
use crate::renderer::api::options::RotationSettings;
use crate::renderer::error::ConfigError;

/// The backend kinds excluded by default configuration on the given host.
///
/// These are kinds the host can technically drive but that are inadvisable
/// to rotate through by default (OpenGL on macOS is deprecated by the
/// platform vendor).
pub fn default_exclusions(host: HostPlatform) -> &'static [BackendKind] {
    match host {
        HostPlatform::MacOs => &[BackendKind::OpenGl],
        _ => &[],
    }
}

/// Filters the full backend set by host support and the exclusion policy.
///
/// Pure query, order-preserving over [`BackendKind::ALL`]. Fails when the
/// result is empty: a rotation with zero candidates cannot make progress.
pub fn available_backends(
    excluded: &[BackendKind],
    host: HostPlatform,
) -> Result<Vec<BackendKind>, ConfigError> {
    let kinds: Vec<BackendKind> = BackendKind::ALL
        .into_iter()
        .filter(|kind| kind.is_supported_on(host) && !excluded.contains(kind))
        .collect();

    if kinds.is_empty() {
        return Err(ConfigError::NoBackendsAvailable {
            excluded: excluded.to_vec(),
        });
    }
    Ok(kinds)
}

/// An ordered, deduplicated sequence of rotation candidates with a current
/// position.
///
/// Invariant: the index is always in `0..len`, and `len >= 1`.
#[derive(Debug, Clone)]
pub struct BackendRotation {
    kinds: Vec<BackendKind>,
    index: usize,
}

impl BackendRotation {
    /// Builds a rotation from an explicit candidate list.
    ///
    /// Duplicates are removed, keeping the first occurrence. An empty list
    /// is a configuration error.
    pub fn new(kinds: Vec<BackendKind>) -> Result<Self, ConfigError> {
        let mut deduped: Vec<BackendKind> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !deduped.contains(&kind) {
                deduped.push(kind);
            }
        }
        if deduped.is_empty() {
            return Err(ConfigError::NoBackendsAvailable { excluded: vec![] });
        }
        Ok(Self {
            kinds: deduped,
            index: 0,
        })
    }

    /// Builds the rotation the given settings describe for the given host.
    pub fn from_settings(
        settings: &RotationSettings,
        host: HostPlatform,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        Self::new(available_backends(&settings.excluded_backends, host)?)
    }

    /// The backend at the current rotation position.
    pub fn current(&self) -> BackendKind {
        self.kinds[self.index]
    }

    /// The backend the next switch will target, wrapping circularly.
    pub fn peek_next(&self) -> BackendKind {
        self.kinds[(self.index + 1) % self.kinds.len()]
    }

    /// Advances the rotation position, wrapping circularly, and returns the
    /// new current backend.
    pub fn advance(&mut self) -> BackendKind {
        self.index = (self.index + 1) % self.kinds.len();
        self.current()
    }

    /// Moves the rotation position onto `kind`, if it is a candidate.
    /// Returns `true` when the position changed or already matched.
    pub fn align_to(&mut self, kind: BackendKind) -> bool {
        match self.kinds.iter().position(|k| *k == kind) {
            Some(position) => {
                self.index = position;
                true
            }
            None => false,
        }
    }

    /// The current rotation position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The rotation candidates, in order.
    pub fn kinds(&self) -> &[BackendKind] {
        &self.kinds
    }

    /// The number of rotation candidates. Always at least 1.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always `false`; present for `len` symmetry.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A tick counter with a fixed period.
///
/// Fires exactly every `period` ticks, then resets.
#[derive(Debug, Clone)]
pub struct RotationClock {
    period: u32,
    count: u32,
}

impl RotationClock {
    /// Creates a clock firing every `period` ticks. Zero is a configuration
    /// error.
    pub fn new(period: u32) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::InvalidRotationPeriod { ticks: period });
        }
        Ok(Self { period, count: 0 })
    }

    /// Advances the counter by one tick; returns `true` on the period
    /// boundary.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count == self.period {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Ticks since the last boundary.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The configured period, in ticks.
    pub fn period(&self) -> u32 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_backends_respects_exclusions() {
        let kinds =
            available_backends(&[BackendKind::Dx12], HostPlatform::Windows).expect("non-empty");
        assert!(!kinds.contains(&BackendKind::Dx12));
        assert!(kinds.contains(&BackendKind::Vulkan));
        assert!(kinds.contains(&BackendKind::OpenGl));
    }

    #[test]
    fn available_backends_respects_host_support() {
        let kinds = available_backends(&[], HostPlatform::Linux).expect("non-empty");
        assert_eq!(kinds, vec![BackendKind::Vulkan, BackendKind::OpenGl]);
    }

    #[test]
    fn excluding_everything_is_a_config_error() {
        let err = available_backends(&BackendKind::ALL, HostPlatform::Windows).unwrap_err();
        assert!(matches!(err, ConfigError::NoBackendsAvailable { .. }));
    }

    #[test]
    fn rotation_wraps_circularly() {
        let mut rotation = BackendRotation::new(vec![
            BackendKind::Vulkan,
            BackendKind::Dx12,
            BackendKind::OpenGl,
        ])
        .unwrap();

        assert_eq!(rotation.current(), BackendKind::Vulkan);
        assert_eq!(rotation.peek_next(), BackendKind::Dx12);
        assert_eq!(rotation.advance(), BackendKind::Dx12);
        assert_eq!(rotation.advance(), BackendKind::OpenGl);
        assert_eq!(rotation.peek_next(), BackendKind::Vulkan);
        assert_eq!(rotation.advance(), BackendKind::Vulkan);
        assert_eq!(rotation.index(), 0);
    }

    #[test]
    fn rotation_deduplicates_preserving_order() {
        let rotation = BackendRotation::new(vec![
            BackendKind::Vulkan,
            BackendKind::OpenGl,
            BackendKind::Vulkan,
        ])
        .unwrap();
        assert_eq!(rotation.kinds(), &[BackendKind::Vulkan, BackendKind::OpenGl]);
    }

    #[test]
    fn single_candidate_rotation_targets_itself() {
        let rotation = BackendRotation::new(vec![BackendKind::Vulkan]).unwrap();
        assert_eq!(rotation.peek_next(), BackendKind::Vulkan);
    }

    #[test]
    fn align_to_moves_the_position() {
        let mut rotation =
            BackendRotation::new(vec![BackendKind::Vulkan, BackendKind::OpenGl]).unwrap();
        assert!(rotation.align_to(BackendKind::OpenGl));
        assert_eq!(rotation.current(), BackendKind::OpenGl);
        assert!(!rotation.align_to(BackendKind::Metal));
        assert_eq!(rotation.current(), BackendKind::OpenGl);
    }

    #[test]
    fn clock_fires_exactly_on_period() {
        let mut clock = RotationClock::new(3).unwrap();
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert!(clock.tick());
        assert_eq!(clock.count(), 0);
        assert!(!clock.tick());
    }

    #[test]
    fn zero_period_clock_is_rejected() {
        assert!(RotationClock::new(0).is_err());
    }
}
