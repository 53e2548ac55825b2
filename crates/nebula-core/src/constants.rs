use glam::Vec3;

// Shared shape/motion tuning constants used by the core and the native frontend.

// Field size
pub const PARTICLE_COUNT: usize = 6000;
pub const BODY_FRACTION: f32 = 0.4; // share of particles forming the spheroid
pub const DEFAULT_SEED: u64 = 42;

// Planet body
pub const BODY_RADIUS: f32 = 2.0;
pub const BODY_FLATTENING: f32 = 0.9; // y-axis compression of the spheroid

// Rings (world units, measured from the planet center)
pub const RING_INNER_RADIUS: f32 = 2.8;
pub const RING_OUTER_RADIUS: f32 = 4.6;
pub const RING_THICKNESS: f32 = 0.08; // half-height of the vertical jitter

// Nebula spread; rings blow apart farther than the body
pub const BODY_SCATTER: f32 = 6.5;
pub const RING_SCATTER: f32 = 10.0;

// Particle sizing (world units)
pub const BODY_BASE_SIZE: f32 = 0.055;
pub const RING_BASE_SIZE: f32 = 0.04;
pub const SIZE_JITTER: f32 = 0.35; // +/- fraction of the base size

// Morph easing, expressed per frame at REFERENCE_FPS
pub const REFERENCE_FPS: f32 = 60.0;
pub const EXPAND_RATE: f32 = 0.025; // gentle expansion
pub const COLLAPSE_RATE: f32 = 0.06; // snappier reformation
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp for long stalls (hidden window)

// Compact-mode motion
pub const SPIN_RATE: f32 = 0.18; // radians per second around +Y
pub const BOB_AMPLITUDE: f32 = 0.03;
pub const BOB_FREQUENCY: f32 = 1.3; // radians per second
pub const BOB_PHASE_STEP: f32 = 0.05; // per-particle phase offset

// Dispersed-mode motion
pub const WANDER_AMPLITUDE: f32 = 0.35;
pub const WANDER_FREQUENCY: f32 = 0.45;
// Per-axis (x, y, z) wander: time-rate multiplier and per-particle phase step
pub const WANDER_AXIS_RATES: [f32; 3] = [1.0, 0.8, 0.6];
pub const WANDER_PHASE_STEPS: [f32; 3] = [0.13, 0.07, 0.11];

// Whole-field orientation and fade
pub const AXIAL_TILT: f32 = 0.41; // radians around +Z (about 23.5 degrees)
pub const DISPERSED_FADE: f32 = 0.3; // opacity lost at full dispersion

// Gesture polling
pub const POLL_INTERVAL_MS: u64 = 1500;
pub const REQUEST_TIMEOUT_MS: u64 = 4000;
pub const MAX_IN_FLIGHT: usize = 3;

// Palettes per structural group
pub const BODY_PALETTE: [[f32; 3]; 4] = [
    [1.0, 0.78, 0.42], // warm gold
    [0.98, 0.58, 0.28], // amber
    [1.0, 0.9, 0.68],  // pale sand
    [0.9, 0.45, 0.3],  // rust
];

pub const RING_PALETTE: [[f32; 3]; 4] = [
    [0.55, 0.75, 1.0], // ice blue
    [0.7, 0.6, 1.0],   // lavender
    [0.45, 0.9, 0.95], // cyan
    [0.85, 0.85, 1.0], // silver
];

/// Phrases shown when the planet bursts into a nebula.
pub const DEFAULT_PHRASES: &[&str] = &[
    "We are made of star stuff.",
    "Every atom in you was forged in a dying star.",
    "The cosmos is within us.",
    "Look up at the stars and not down at your feet.",
    "Somewhere, something incredible is waiting to be known.",
    "The universe is under no obligation to make sense to you.",
    "Not only do we live among the stars, the stars live within us.",
    "Across the sea of space, the stars are other suns.",
];

#[inline]
pub fn body_palette() -> [Vec3; 4] {
    BODY_PALETTE.map(Vec3::from)
}

#[inline]
pub fn ring_palette() -> [Vec3; 4] {
    RING_PALETTE.map(Vec3::from)
}
