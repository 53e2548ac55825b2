use glam::{Quat, Vec3};

use crate::config::MotionParams;
use crate::constants::{WANDER_AXIS_RATES, WANDER_PHASE_STEPS};
use crate::particles::{Particle, ParticleField};
use crate::transition::smoothstep;

/// Render-ready buffers for one frame.
///
/// `colors` and `sizes` are copied from the field once; only `positions`,
/// `opacity` and `blend` change from frame to frame.
#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub opacity: f32,
    pub blend: f32,
}

impl RenderFrame {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Turns a blend coefficient and elapsed time into particle positions.
///
/// The buffers are allocated in `new` and rewritten in place by `produce`, so
/// the per-frame path is O(N) with no heap allocation.
pub struct FrameProducer {
    motion: MotionParams,
    tilt: Quat,
    frame: RenderFrame,
}

impl FrameProducer {
    pub fn new(field: &ParticleField, motion: MotionParams) -> Self {
        let particles = field.particles();
        let frame = RenderFrame {
            positions: vec![Vec3::ZERO; particles.len()],
            colors: particles.iter().map(|p| p.color).collect(),
            sizes: particles.iter().map(|p| p.size).collect(),
            opacity: 1.0,
            blend: 0.0,
        };
        let tilt = Quat::from_rotation_z(motion.axial_tilt);
        Self {
            motion,
            tilt,
            frame,
        }
    }

    pub fn motion(&self) -> &MotionParams {
        &self.motion
    }

    /// Constant axial tilt applied to the whole field.
    pub fn tilt(&self) -> Quat {
        self.tilt
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    /// Rewrite the position buffer for `blend` at elapsed time `t` seconds.
    pub fn produce(&mut self, field: &ParticleField, blend: f32, t: f32) -> &RenderFrame {
        debug_assert_eq!(field.len(), self.frame.positions.len());
        let blend = blend.clamp(0.0, 1.0);
        let eased = smoothstep(blend);
        let spin = Quat::from_rotation_y(t * self.motion.spin_rate);
        for (i, (out, p)) in self
            .frame
            .positions
            .iter_mut()
            .zip(field.particles())
            .enumerate()
        {
            let compact = compact_position_with(p, i, t, spin, &self.motion);
            let dispersed = dispersed_position(p, i, t, &self.motion);
            *out = self.tilt * compact.lerp(dispersed, eased);
        }
        self.frame.blend = blend;
        self.frame.opacity = 1.0 - self.motion.dispersed_fade * eased;
        &self.frame
    }
}

/// Compact-mode position before tilt: `home` spun around +Y plus a vertical bob.
pub fn compact_position(p: &Particle, index: usize, t: f32, motion: &MotionParams) -> Vec3 {
    let spin = Quat::from_rotation_y(t * motion.spin_rate);
    compact_position_with(p, index, t, spin, motion)
}

#[inline]
fn compact_position_with(
    p: &Particle,
    index: usize,
    t: f32,
    spin: Quat,
    motion: &MotionParams,
) -> Vec3 {
    let phase = t * motion.bob_frequency + index as f32 * motion.bob_phase_step;
    let mut pos = spin * p.home;
    pos.y += phase.sin() * motion.bob_amplitude;
    pos
}

/// Dispersed-mode position before tilt: `scatter` plus a slow per-particle wander.
pub fn dispersed_position(p: &Particle, index: usize, t: f32, motion: &MotionParams) -> Vec3 {
    let i = index as f32;
    let w = t * motion.wander_frequency;
    let [rx, ry, rz] = WANDER_AXIS_RATES;
    let [px, py, pz] = WANDER_PHASE_STEPS;
    let wander = Vec3::new(
        (w * rx + i * px).sin(),
        (w * ry + i * py).cos(),
        (w * rz + i * pz).sin(),
    );
    p.scatter + wander * motion.wander_amplitude
}
