// Host-side tests for configuration validation.

use std::time::Duration;

use nebula_core::*;

fn check(edit: impl FnOnce(&mut SceneConfig)) -> Result<(), ConfigError> {
    let mut config = SceneConfig::default();
    edit(&mut config);
    config.validate()
}

#[test]
fn defaults_are_valid() {
    assert_eq!(SceneConfig::default().validate(), Ok(()));
}

#[test]
fn zero_particles_rejected() {
    assert_eq!(
        check(|c| c.field.particle_count = 0),
        Err(ConfigError::NonPositiveParticleCount)
    );
}

#[test]
fn ring_radii_must_be_ordered() {
    assert!(matches!(
        check(|c| {
            c.field.ring_inner_radius = 5.0;
            c.field.ring_outer_radius = 5.0;
        }),
        Err(ConfigError::RingRadiiOrder { .. })
    ));
    assert!(matches!(
        check(|c| c.field.ring_inner_radius = -1.0),
        Err(ConfigError::NegativeLength { name: "ring_inner_radius", .. })
    ));
}

#[test]
fn non_finite_lengths_rejected() {
    assert!(matches!(
        check(|c| c.field.body_radius = f32::NAN),
        Err(ConfigError::InvalidLength { name: "body_radius", .. })
    ));
    assert!(matches!(
        check(|c| c.field.ring_scatter = f32::INFINITY),
        Err(ConfigError::InvalidLength { name: "ring_scatter", .. })
    ));
    assert!(matches!(
        check(|c| c.motion.bob_phase_step = f32::INFINITY),
        Err(ConfigError::NotFinite { name: "bob_phase_step", .. })
    ));
    assert!(matches!(
        check(|c| c.motion.axial_tilt = f32::NAN),
        Err(ConfigError::NotFinite { name: "axial_tilt", .. })
    ));
}

#[test]
fn fractions_must_be_in_range() {
    for bad in [0.0, 1.0, -0.2, f32::NAN] {
        assert!(
            matches!(
                check(|c| c.field.body_fraction = bad),
                Err(ConfigError::OutOfRange { name: "body_fraction", .. })
            ),
            "body_fraction {bad} accepted"
        );
    }
    assert!(check(|c| c.motion.dispersed_fade = 1.5).is_err());
    assert!(check(|c| c.field.size_jitter = 1.0).is_err());
}

#[test]
fn easing_rates_must_be_in_unit_interval() {
    assert!(check(|c| c.transition.expand_rate = 0.0).is_err());
    assert!(check(|c| c.transition.collapse_rate = 1.2).is_err());
    assert_eq!(check(|c| c.transition.collapse_rate = 1.0), Ok(()));
}

#[test]
fn polling_limits_rejected() {
    assert_eq!(
        check(|c| c.polling.interval = Duration::ZERO),
        Err(ConfigError::ZeroDuration { name: "poll interval" })
    );
    assert_eq!(
        check(|c| c.polling.request_timeout = Duration::ZERO),
        Err(ConfigError::ZeroDuration { name: "request timeout" })
    );
    assert_eq!(
        check(|c| c.polling.max_in_flight = 0),
        Err(ConfigError::NoInFlightBudget)
    );
}

#[test]
fn empty_phrase_pool_rejected() {
    assert_eq!(
        check(|c| c.phrases.clear()),
        Err(ConfigError::EmptyPhrasePool)
    );
}

#[test]
fn body_count_floors() {
    let mut field = FieldParams::default();
    field.particle_count = 7;
    field.body_fraction = 0.4;
    assert_eq!(field.body_count(), 2);
}

#[test]
fn errors_name_the_parameter() {
    let err = check(|c| c.field.body_radius = -2.0).unwrap_err();
    assert!(err.to_string().contains("body_radius"), "{err}");
}
