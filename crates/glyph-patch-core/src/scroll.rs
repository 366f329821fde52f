// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Horizontal scroll with wraparound for the scrolling text mode.

use serde::{Deserialize, Serialize};

use crate::layout::Phrase;

/// Tuning for the scroll animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Lowest allowed speed (translation units per step).
    pub min_speed: f32,
    /// Highest allowed speed.
    pub max_speed: f32,
    /// Increment applied by one speed-up/slow-down command.
    pub speed_step: f32,
    /// Speed used when the animator is created.
    pub initial_speed: f32,
    /// Translation the phrase jumps back to after wrapping.
    pub restart_offset: f32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            min_speed: 0.02,
            max_speed: 0.2,
            speed_step: 0.02,
            initial_speed: 0.02,
            restart_offset: 3.0,
        }
    }
}

impl ScrollSettings {
    /// Replace non-finite or non-positive values with defaults and order
    /// the speed bounds.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let mut min_speed = positive(self.min_speed, d.min_speed);
        let mut max_speed = positive(self.max_speed, d.max_speed);
        if min_speed > max_speed {
            std::mem::swap(&mut min_speed, &mut max_speed);
        }
        let initial = positive(self.initial_speed, d.initial_speed);
        Self {
            min_speed,
            max_speed,
            speed_step: positive(self.speed_step, d.speed_step),
            initial_speed: initial.clamp(min_speed, max_speed),
            restart_offset: if self.restart_offset.is_finite() {
                self.restart_offset
            } else {
                d.restart_offset
            },
        }
    }
}

/// Mutable scroll values owned by the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Current horizontal translation of the phrase.
    pub translation: f32,
    /// Translation removed per step.
    pub speed: f32,
}

/// Result of one [`ScrollAnimator::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAdvance {
    /// Translation decreased; no wrap.
    Moved,
    /// Threshold crossed; translation reset to the restart offset and the
    /// text buffer must be rebuilt from scratch.
    Wrapped,
}

/// Advances a translation leftwards and wraps it past a threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollAnimator {
    settings: ScrollSettings,
    state: ScrollState,
    wrap_threshold: f32,
}

impl ScrollAnimator {
    /// Animator at translation 0 wrapping below `wrap_threshold`.
    pub fn new(settings: ScrollSettings, wrap_threshold: f32) -> Self {
        let settings = settings.sanitized();
        Self {
            state: ScrollState {
                translation: 0.0,
                speed: settings.initial_speed,
            },
            settings,
            wrap_threshold,
        }
    }

    /// Animator whose wrap point is the measured width of `phrase`.
    pub fn for_phrase(settings: ScrollSettings, phrase: &Phrase) -> Self {
        Self::new(settings, phrase.wrap_threshold())
    }

    /// Effective settings after sanitizing.
    pub fn settings(&self) -> ScrollSettings {
        self.settings
    }

    /// Snapshot of translation and speed.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Current translation.
    pub fn translation(&self) -> f32 {
        self.state.translation
    }

    /// Current speed.
    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    /// Translation below which the animator wraps.
    pub fn wrap_threshold(&self) -> f32 {
        self.wrap_threshold
    }

    /// Return to translation 0; speed is kept.
    pub fn reset(&mut self) {
        self.state.translation = 0.0;
    }

    /// Put back a previously captured state.
    pub fn restore(&mut self, state: ScrollState) {
        self.state = state;
    }

    /// Move one step left, wrapping once the threshold is passed.
    pub fn advance(&mut self) -> ScrollAdvance {
        self.state.translation -= self.state.speed;
        if self.state.translation < self.wrap_threshold {
            self.state.translation = self.settings.restart_offset;
            ScrollAdvance::Wrapped
        } else {
            ScrollAdvance::Moved
        }
    }

    /// Change speed by `delta`, clamped to the configured range. Non-finite
    /// deltas are ignored. Returns the new speed.
    pub fn adjust_speed(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            self.set_speed(self.state.speed + delta);
        }
        self.state.speed
    }

    /// Set speed directly, clamped to the configured range.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.state.speed = speed.clamp(self.settings.min_speed, self.settings.max_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn advance_moves_left_by_speed() {
        let mut a = ScrollAnimator::new(ScrollSettings::default(), -1.0);
        assert_eq!(a.advance(), ScrollAdvance::Moved);
        assert_relative_eq!(a.translation(), -0.02);
    }

    #[test]
    fn wrap_jumps_to_restart_offset() {
        let mut a = ScrollAnimator::new(ScrollSettings::default(), -0.05);
        a.set_speed(0.2);
        assert_eq!(a.advance(), ScrollAdvance::Wrapped);
        assert_relative_eq!(a.translation(), 3.0);
    }

    #[test]
    fn sanitize_orders_bounds_and_clamps_initial() {
        let s = ScrollSettings {
            min_speed: 0.5,
            max_speed: 0.1,
            speed_step: f32::NAN,
            initial_speed: 9.0,
            restart_offset: f32::INFINITY,
        }
        .sanitized();
        assert_relative_eq!(s.min_speed, 0.1);
        assert_relative_eq!(s.max_speed, 0.5);
        assert_relative_eq!(s.speed_step, 0.02);
        assert_relative_eq!(s.initial_speed, 0.5);
        assert_relative_eq!(s.restart_offset, 3.0);
    }

    #[test]
    fn nan_delta_leaves_speed() {
        let mut a = ScrollAnimator::new(ScrollSettings::default(), -1.0);
        assert_relative_eq!(a.adjust_speed(f32::NAN), 0.02);
    }
}
