//! Scene configuration.
//!
//! Every tunable of a scene lives in [`SceneConfig`]. Defaults come from
//! [`crate::constants`]; callers override fields and then hand the value to
//! [`Scene::start`](crate::Scene::start), which calls [`SceneConfig::validate`]
//! before generating anything.

use std::time::Duration;

use crate::constants::*;
use crate::error::ConfigError;

/// Shape parameters for the particle field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub particle_count: usize,
    pub body_fraction: f32,
    pub body_radius: f32,
    pub flattening: f32,
    pub ring_inner_radius: f32,
    pub ring_outer_radius: f32,
    pub ring_thickness: f32,
    pub body_scatter: f32,
    pub ring_scatter: f32,
    pub body_base_size: f32,
    pub ring_base_size: f32,
    pub size_jitter: f32,
    pub seed: u64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            body_fraction: BODY_FRACTION,
            body_radius: BODY_RADIUS,
            flattening: BODY_FLATTENING,
            ring_inner_radius: RING_INNER_RADIUS,
            ring_outer_radius: RING_OUTER_RADIUS,
            ring_thickness: RING_THICKNESS,
            body_scatter: BODY_SCATTER,
            ring_scatter: RING_SCATTER,
            body_base_size: BODY_BASE_SIZE,
            ring_base_size: RING_BASE_SIZE,
            size_jitter: SIZE_JITTER,
            seed: DEFAULT_SEED,
        }
    }
}

impl FieldParams {
    /// Number of particles in the spheroid; the rest form the ring.
    pub fn body_count(&self) -> usize {
        (self.particle_count as f32 * self.body_fraction).floor() as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NonPositiveParticleCount);
        }
        open_unit("body_fraction", self.body_fraction)?;
        positive("body_radius", self.body_radius)?;
        positive("flattening", self.flattening)?;
        non_negative("ring_inner_radius", self.ring_inner_radius)?;
        positive("ring_outer_radius", self.ring_outer_radius)?;
        if self.ring_inner_radius >= self.ring_outer_radius {
            return Err(ConfigError::RingRadiiOrder {
                inner: self.ring_inner_radius,
                outer: self.ring_outer_radius,
            });
        }
        non_negative("ring_thickness", self.ring_thickness)?;
        positive("body_scatter", self.body_scatter)?;
        positive("ring_scatter", self.ring_scatter)?;
        positive("body_base_size", self.body_base_size)?;
        positive("ring_base_size", self.ring_base_size)?;
        if !(0.0..1.0).contains(&self.size_jitter) {
            return Err(ConfigError::OutOfRange {
                name: "size_jitter",
                range: "[0, 1)",
                value: self.size_jitter,
            });
        }
        Ok(())
    }
}

/// Per-direction easing rates, as the fraction of the remaining distance
/// covered in one frame at [`REFERENCE_FPS`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionParams {
    pub expand_rate: f32,
    pub collapse_rate: f32,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            expand_rate: EXPAND_RATE,
            collapse_rate: COLLAPSE_RATE,
        }
    }
}

impl TransitionParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        rate("expand_rate", self.expand_rate)?;
        rate("collapse_rate", self.collapse_rate)
    }
}

/// Time-driven motion applied on top of the home/scatter positions.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionParams {
    pub spin_rate: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub bob_phase_step: f32,
    pub wander_amplitude: f32,
    pub wander_frequency: f32,
    pub axial_tilt: f32,
    pub dispersed_fade: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            spin_rate: SPIN_RATE,
            bob_amplitude: BOB_AMPLITUDE,
            bob_frequency: BOB_FREQUENCY,
            bob_phase_step: BOB_PHASE_STEP,
            wander_amplitude: WANDER_AMPLITUDE,
            wander_frequency: WANDER_FREQUENCY,
            axial_tilt: AXIAL_TILT,
            dispersed_fade: DISPERSED_FADE,
        }
    }
}

impl MotionParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("spin_rate", self.spin_rate)?;
        non_negative("bob_amplitude", self.bob_amplitude)?;
        finite("bob_frequency", self.bob_frequency)?;
        finite("bob_phase_step", self.bob_phase_step)?;
        non_negative("wander_amplitude", self.wander_amplitude)?;
        finite("wander_frequency", self.wander_frequency)?;
        finite("axial_tilt", self.axial_tilt)?;
        if !(0.0..=1.0).contains(&self.dispersed_fade) {
            return Err(ConfigError::OutOfRange {
                name: "dispersed_fade",
                range: "[0, 1]",
                value: self.dispersed_fade,
            });
        }
        Ok(())
    }
}

/// Cadence and limits for the classifier polling task.
#[derive(Clone, Debug, PartialEq)]
pub struct PollParams {
    pub interval: Duration,
    pub request_timeout: Duration,
    pub max_in_flight: usize,
}

impl Default for PollParams {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(POLL_INTERVAL_MS),
            request_timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            max_in_flight: MAX_IN_FLIGHT,
        }
    }
}

impl PollParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "poll interval",
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "request timeout",
            });
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::NoInFlightBudget);
        }
        Ok(())
    }
}

/// Complete description of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub field: FieldParams,
    pub transition: TransitionParams,
    pub motion: MotionParams,
    pub polling: PollParams,
    pub phrases: Vec<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            field: FieldParams::default(),
            transition: TransitionParams::default(),
            motion: MotionParams::default(),
            polling: PollParams::default(),
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl SceneConfig {
    /// Check every parameter, failing on the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.transition.validate()?;
        self.motion.validate()?;
        self.polling.validate()?;
        if self.phrases.is_empty() {
            return Err(ConfigError::EmptyPhrasePool);
        }
        Ok(())
    }
}

// NaN fails every comparison below, so it is rejected along with bad signs.

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLength { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeLength { name, value })
    }
}

fn open_unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            range: "(0, 1)",
            value,
        })
    }
}

fn rate(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            range: "(0, 1]",
            value,
        })
    }
}
