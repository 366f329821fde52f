// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rolling frame time tracker.

use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct PerfStats {
    frame_ms: VecDeque<f32>,
    max_samples: usize,
}

impl Default for PerfStats {
    fn default() -> Self {
        Self::with_capacity(240)
    }
}

impl PerfStats {
    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_ms: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    pub fn push(&mut self, frame: f32) {
        if !frame.is_finite() || frame <= 0.0 {
            return;
        }
        if self.frame_ms.len() == self.max_samples {
            self.frame_ms.pop_front();
        }
        self.frame_ms.push_back(frame);
    }

    /// Frames per second averaged over the window.
    pub fn fps(&self) -> f32 {
        if self.frame_ms.is_empty() {
            return 0.0;
        }
        let total: f32 = self.frame_ms.iter().sum();
        1000.0 * self.frame_ms.len() as f32 / total
    }

    pub fn last_ms(&self) -> f32 {
        self.frame_ms.back().copied().unwrap_or(0.0)
    }
}
