//! Error types raised by the core.
//!
//! Configuration errors are the only fatal path: they surface from
//! [`SceneConfig::validate`](crate::SceneConfig::validate) before any particle
//! is generated. Classifier errors never reach the frame loop; the poller
//! degrades them to [`GestureSignal::None`](crate::GestureSignal::None).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be a positive integer")]
    NonPositiveParticleCount,

    #[error("{name} must be finite and positive, got {value}")]
    InvalidLength { name: &'static str, value: f32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeLength { name: &'static str, value: f32 },

    #[error("ring inner radius ({inner}) must be smaller than outer radius ({outer})")]
    RingRadiiOrder { inner: f32, outer: f32 },

    #[error("{name} must lie in {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: f32,
    },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("phrase pool must contain at least one phrase")]
    EmptyPhrasePool,

    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },

    #[error("max in-flight classifier requests must be at least 1")]
    NoInFlightBudget,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("classifier transport failed: {0}")]
    Transport(String),

    #[error("classifier returned a malformed reply: {0}")]
    Malformed(String),

    #[error("classifier reply arrived after {elapsed_ms} ms (limit {limit_ms} ms)")]
    TimedOut { elapsed_ms: u128, limit_ms: u128 },
}
