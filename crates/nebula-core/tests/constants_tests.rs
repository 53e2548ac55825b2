// Host-side sanity checks for tuning constants.

use nebula_core::*;

#[test]
fn geometry_constants_are_consistent() {
    assert!(PARTICLE_COUNT > 0);
    assert!(BODY_RADIUS > 0.0);
    assert!(BODY_FLATTENING > 0.0 && BODY_FLATTENING <= 1.0);
    assert!(BODY_RADIUS < RING_INNER_RADIUS, "ring must clear the body");
    assert!(RING_INNER_RADIUS < RING_OUTER_RADIUS);
    assert!(RING_THICKNESS >= 0.0);
    assert!(BODY_SCATTER > BODY_RADIUS);
    assert!(RING_SCATTER > RING_OUTER_RADIUS);
}

#[test]
fn body_share_in_expected_band() {
    assert!((0.35..=0.4).contains(&BODY_FRACTION));
}

#[test]
fn collapse_is_faster_than_expand() {
    assert!(EXPAND_RATE > 0.0 && EXPAND_RATE <= 1.0);
    assert!(COLLAPSE_RATE > 0.0 && COLLAPSE_RATE <= 1.0);
    assert!(COLLAPSE_RATE > EXPAND_RATE);
}

#[test]
fn palettes_are_in_unit_range() {
    for color in BODY_PALETTE.iter().chain(RING_PALETTE.iter()) {
        for channel in color {
            assert!((0.0..=1.0).contains(channel), "{color:?}");
        }
    }
    assert_eq!(body_palette()[0].to_array(), BODY_PALETTE[0]);
    assert_eq!(ring_palette()[3].to_array(), RING_PALETTE[3]);
}

#[test]
fn polling_defaults_are_sane() {
    assert!(POLL_INTERVAL_MS > 0);
    assert!(REQUEST_TIMEOUT_MS > POLL_INTERVAL_MS);
    assert!(MAX_IN_FLIGHT > 0);
    assert!(!DEFAULT_PHRASES.is_empty());
    assert!(DEFAULT_PHRASES.iter().all(|p| !p.trim().is_empty()));
}
