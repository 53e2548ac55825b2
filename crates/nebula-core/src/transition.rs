//! Morph transition driver.
//!
//! The blend coefficient eases toward 0 (compact planet) or 1 (dispersed
//! nebula) by exponential smoothing. Rates are defined per frame at
//! [`REFERENCE_FPS`]; other frame rates are normalised so the wall-clock curve
//! stays the same.

use std::time::Duration;

use crate::config::TransitionParams;
use crate::constants::REFERENCE_FPS;

/// Logical shape the blend is heading toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TargetMode {
    #[default]
    Compact,
    Dispersed,
}

impl TargetMode {
    /// Blend value this mode converges to.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            TargetMode::Compact => 0.0,
            TargetMode::Dispersed => 1.0,
        }
    }
}

pub struct TransitionDriver {
    blend: f32,
    mode: TargetMode,
    params: TransitionParams,
}

impl TransitionDriver {
    /// Start compact with `blend = 0`.
    pub fn new(params: TransitionParams) -> Self {
        Self {
            blend: 0.0,
            mode: TargetMode::Compact,
            params,
        }
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TargetMode) {
        self.mode = mode;
    }

    /// Advance by `dt` and return the new blend.
    pub fn step(&mut self, dt: Duration) -> f32 {
        self.step_secs(dt.as_secs_f32())
    }

    /// Advance by `dt_sec` seconds. Negative or non-finite steps advance nothing.
    pub fn step_secs(&mut self, dt_sec: f32) -> f32 {
        let dt_sec = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        let target = self.mode.target();
        let rate = if target > self.blend {
            self.params.expand_rate
        } else {
            self.params.collapse_rate
        };
        let alpha = smoothing_alpha(rate, dt_sec);
        self.blend = (self.blend + (target - self.blend) * alpha).clamp(0.0, 1.0);
        self.blend
    }
}

/// Fraction of the remaining distance covered in `dt_sec` for a per-frame
/// `rate` defined at [`REFERENCE_FPS`].
#[inline]
pub fn smoothing_alpha(rate: f32, dt_sec: f32) -> f32 {
    let frames = dt_sec * REFERENCE_FPS;
    (1.0 - (1.0 - rate.clamp(0.0, 1.0)).powf(frames)).clamp(0.0, 1.0)
}

/// Cubic Hermite ease with flat tangents at both ends.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}
