use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::config::FieldParams;
use crate::constants::{body_palette, ring_palette};

/// Structural group a particle belongs to. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    Body,
    Ring,
}

/// A single point of the field.
///
/// Fields:
/// - `home`: position in the compact planet shape
/// - `scatter`: target position in the dispersed nebula
/// - `color`: linear RGB taken from the group palette
/// - `size`: world-space billboard size
/// - `group`: which structural group produced `home`
#[derive(Clone, Debug)]
pub struct Particle {
    pub home: Vec3,
    pub scatter: Vec3,
    pub color: Vec3,
    pub size: f32,
    pub group: Group,
}

/// Immutable set of particles: body particles first, ring particles after.
///
/// Typical usage:
/// - Validate a [`FieldParams`] (normally through `SceneConfig::validate`)
/// - Build with `ParticleField::generate(&params)`
/// - Hand the field to a `FrameProducer`, which reads it every frame
pub struct ParticleField {
    particles: Vec<Particle>,
    body_count: usize,
}

impl ParticleField {
    /// Generate the field. Deterministic for a given `params.seed`.
    ///
    /// `params` is expected to be validated; an invalid radius would otherwise
    /// leak NaN into the frame buffers.
    pub fn generate(params: &FieldParams) -> Self {
        let n = params.particle_count;
        let body_count = params.body_count().min(n);
        let mut rng = StdRng::seed_from_u64(params.seed);
        let body_colors = body_palette();
        let ring_colors = ring_palette();

        let mut particles = Vec::with_capacity(n);
        for i in 0..body_count {
            let home = spheroid_point(i, body_count, params.body_radius, params.flattening);
            particles.push(Particle {
                home,
                scatter: ball_point(&mut rng, params.body_scatter),
                color: *body_colors.choose(&mut rng).unwrap_or(&Vec3::ONE),
                size: jittered_size(&mut rng, params.body_base_size, params.size_jitter),
                group: Group::Body,
            });
        }
        for _ in body_count..n {
            let home = annulus_point(
                &mut rng,
                params.ring_inner_radius,
                params.ring_outer_radius,
                params.ring_thickness,
            );
            particles.push(Particle {
                home,
                scatter: ball_point(&mut rng, params.ring_scatter),
                color: *ring_colors.choose(&mut rng).unwrap_or(&Vec3::ONE),
                size: jittered_size(&mut rng, params.ring_base_size, params.size_jitter),
                group: Group::Ring,
            });
        }

        log::debug!(
            "[field] generated {} particles ({} body, {} ring)",
            n,
            body_count,
            n - body_count
        );
        Self {
            particles,
            body_count,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn body_count(&self) -> usize {
        self.body_count
    }

    pub fn ring_count(&self) -> usize {
        self.particles.len() - self.body_count
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn body(&self) -> &[Particle] {
        &self.particles[..self.body_count]
    }

    pub fn ring(&self) -> &[Particle] {
        &self.particles[self.body_count..]
    }
}

/// Point `index` of `count` on a Fibonacci spiral over a sphere of `radius`,
/// with the y axis scaled by `flattening`.
///
/// `phi = acos(-1 + 2i/M)` spaces the latitudes by equal area, and
/// `theta = sqrt(M*pi) * phi` winds the spiral so neighbours stay evenly apart.
pub fn spheroid_point(index: usize, count: usize, radius: f32, flattening: f32) -> Vec3 {
    if count == 0 {
        return Vec3::ZERO;
    }
    let m = count as f32;
    let phi = (-1.0 + 2.0 * index as f32 / m).clamp(-1.0, 1.0).acos();
    let theta = (m * PI).sqrt() * phi;
    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * phi.cos() * flattening,
        radius * theta.sin() * phi.sin(),
    )
}

/// Uniform-by-area sample of the annulus `[inner, outer]` in the XZ plane with
/// a vertical jitter of `+/- thickness`.
pub fn annulus_point<R: Rng + ?Sized>(rng: &mut R, inner: f32, outer: f32, thickness: f32) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let radius = annulus_radius(rng.gen::<f32>(), inner, outer);
    let y = if thickness > 0.0 {
        rng.gen_range(-thickness..=thickness)
    } else {
        0.0
    };
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Map `u` in `[0, 1]` to a ring radius whose square is uniform over
/// `[inner^2, outer^2]`, i.e. uniform area density across the annulus.
#[inline]
pub fn annulus_radius(u: f32, inner: f32, outer: f32) -> f32 {
    let inner_sq = inner * inner;
    (inner_sq + u.clamp(0.0, 1.0) * (outer * outer - inner_sq)).sqrt()
}

/// Uniform sample inside a ball of `radius` centered at the origin.
pub fn ball_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let z = rng.gen_range(-1.0f32..=1.0);
    let angle = rng.gen::<f32>() * TAU;
    let planar = (1.0 - z * z).max(0.0).sqrt();
    let dir = Vec3::new(planar * angle.cos(), z, planar * angle.sin());
    dir * radius * rng.gen::<f32>().cbrt()
}

#[inline]
fn jittered_size<R: Rng + ?Sized>(rng: &mut R, base: f32, jitter: f32) -> f32 {
    if jitter <= 0.0 {
        return base;
    }
    base * (1.0 + rng.gen_range(-jitter..=jitter))
}
