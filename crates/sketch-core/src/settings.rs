use crate::constants::{PROGRESS_MAX, PROGRESS_MIN, PROGRESS_STEP};

/// Bounds and step for a tweakable parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    /// Clamp into range and snap to the nearest step from `min`.
    pub fn quantize(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

pub const PROGRESS_RANGE: ParamRange = ParamRange {
    min: PROGRESS_MIN,
    max: PROGRESS_MAX,
    step: PROGRESS_STEP,
};

/// Values exposed to the debug panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    progress: f32,
}

impl Settings {
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, value: f32) -> f32 {
        self.progress = PROGRESS_RANGE.quantize(value);
        self.progress
    }
}
