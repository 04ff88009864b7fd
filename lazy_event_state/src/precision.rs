// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precision ladders: ordered step sizes for numeric controls.
//!
//! The active step governs both drag sensitivity (value change per pointer unit) and how
//! many fractional digits a control displays.

use smallvec::SmallVec;

/// Step sizes used by float sliders unless configured otherwise.
pub const DEFAULT_STEPS: [f32; 7] = [0.0001, 0.001, 0.01, 0.1, 1.0, 10.0, 100.0];

/// Step sizes used by whole-number sliders.
pub const WHOLE_STEPS: [f32; 4] = [1.0, 10.0, 100.0, 1000.0];

/// Relative tolerance when comparing step sizes with powers of ten.
const STEP_TOLERANCE: f32 = 1e-3;

/// An ordered, ascending sequence of step magnitudes.
///
/// The ladder itself is immutable; the selected index lives with the control that uses it.
#[derive(Clone, Debug, PartialEq)]
pub struct PrecisionLadder {
    steps: SmallVec<[f32; 8]>,
}

impl Default for PrecisionLadder {
    fn default() -> Self {
        Self::from_steps(&DEFAULT_STEPS)
    }
}

impl PrecisionLadder {
    /// Build a ladder from arbitrary steps.
    ///
    /// Non-finite and non-positive steps are dropped, the rest are sorted ascending and
    /// deduplicated. An empty result falls back to [`DEFAULT_STEPS`].
    pub fn from_steps(steps: &[f32]) -> Self {
        let mut sorted: SmallVec<[f32; 8]> = steps
            .iter()
            .copied()
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        sorted.sort_by(f32::total_cmp);
        sorted.dedup();
        if sorted.is_empty() {
            sorted.extend_from_slice(&DEFAULT_STEPS);
        }
        Self { steps: sorted }
    }

    /// The ladder for whole-number controls.
    pub fn whole_numbers() -> Self {
        Self::from_steps(&WHOLE_STEPS)
    }

    /// Number of steps. Never zero.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps, ascending.
    pub fn steps(&self) -> &[f32] {
        &self.steps
    }

    /// Step at `index`, clamped to the ladder bounds.
    pub fn step(&self, index: usize) -> f32 {
        self.steps[index.min(self.steps.len() - 1)]
    }

    /// Index of the first step that is at least `1`, or the last index if none is.
    pub fn first_whole_index(&self) -> usize {
        self.steps
            .iter()
            .position(|s| *s >= 1.0 - STEP_TOLERANCE)
            .unwrap_or(self.steps.len() - 1)
    }

    /// Index of a step equal to `step` within a small tolerance.
    pub fn index_of(&self, step: f32) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| *s >= step * (1.0 - STEP_TOLERANCE) && *s <= step * (1.0 + STEP_TOLERANCE))
    }

    /// Index of the step that displays `digits` fractional digits.
    ///
    /// Zero digits selects [`first_whole_index`](Self::first_whole_index). More digits than
    /// the finest step supports select the finest step.
    pub fn index_for_fraction_digits(&self, digits: usize) -> usize {
        if digits == 0 {
            return self.first_whole_index();
        }
        let mut target = 1.0_f32;
        for _ in 0..digits {
            target /= 10.0;
        }
        self.steps
            .iter()
            .position(|s| *s >= target * (1.0 - STEP_TOLERANCE))
            .unwrap_or(self.steps.len() - 1)
    }
}

/// Number of fractional digits a step displays: `0.01` shows two, `1` and above show none.
pub fn fraction_digits(step: f32) -> usize {
    let mut digits = 0;
    let mut scaled = step;
    while scaled < 1.0 - STEP_TOLERANCE && digits < 9 {
        scaled *= 10.0;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_sorted_and_filtered() {
        let ladder = PrecisionLadder::from_steps(&[10.0, 0.1, f32::NAN, -1.0, 1.0, 0.1]);
        assert_eq!(ladder.steps(), &[0.1, 1.0, 10.0]);
        let fallback = PrecisionLadder::from_steps(&[]);
        assert_eq!(fallback.steps(), &DEFAULT_STEPS);
    }

    #[test]
    fn whole_and_fraction_indices() {
        let ladder = PrecisionLadder::default();
        assert_eq!(ladder.first_whole_index(), 4);
        assert_eq!(ladder.index_for_fraction_digits(0), 4);
        assert_eq!(ladder.index_for_fraction_digits(1), 3);
        assert_eq!(ladder.index_for_fraction_digits(4), 0);
        assert_eq!(ladder.index_for_fraction_digits(7), 0);
        assert_eq!(ladder.index_of(0.1), Some(3));
        assert_eq!(ladder.index_of(0.5), None);
    }

    #[test]
    fn whole_number_ladder_has_no_fractions() {
        let ladder = PrecisionLadder::whole_numbers();
        assert_eq!(ladder.first_whole_index(), 0);
        assert_eq!(ladder.index_for_fraction_digits(2), 0);
    }

    #[test]
    fn fraction_digits_of_steps() {
        assert_eq!(fraction_digits(0.0001), 4);
        assert_eq!(fraction_digits(0.1), 1);
        assert_eq!(fraction_digits(1.0), 0);
        assert_eq!(fraction_digits(100.0), 0);
    }
}
