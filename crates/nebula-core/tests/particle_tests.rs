// Host-side tests for particle field generation.

use nebula_core::*;
use rand::prelude::*;

fn params(n: usize) -> FieldParams {
    FieldParams {
        particle_count: n,
        ..FieldParams::default()
    }
}

#[test]
fn field_has_exact_count_and_partition() {
    for n in [1usize, 2, 3, 7, 10, 99, 1000, 6000] {
        for fraction in [0.35f32, 0.38, 0.4] {
            let p = FieldParams {
                body_fraction: fraction,
                ..params(n)
            };
            let field = ParticleField::generate(&p);
            let expected_body = (n as f32 * fraction).floor() as usize;
            assert_eq!(field.len(), n, "n={n} fraction={fraction}");
            assert_eq!(field.body_count(), expected_body, "n={n} fraction={fraction}");
            assert_eq!(field.ring_count(), n - expected_body);
            assert!(field.body().iter().all(|p| p.group == Group::Body));
            assert!(field.ring().iter().all(|p| p.group == Group::Ring));
        }
    }
}

#[test]
fn body_count_stays_within_fraction_bounds() {
    let field = ParticleField::generate(&params(5000));
    let lo = (5000.0 * 0.35f32).floor() as usize;
    let hi = (5000.0 * 0.4f32).floor() as usize;
    assert!(field.body_count() >= lo && field.body_count() <= hi);
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let a = ParticleField::generate(&params(500));
    let b = ParticleField::generate(&params(500));
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.home, pb.home);
        assert_eq!(pa.scatter, pb.scatter);
        assert_eq!(pa.color, pb.color);
        assert_eq!(pa.size, pb.size);
    }
    let c = ParticleField::generate(&FieldParams {
        seed: 7,
        ..params(500)
    });
    let differs = a
        .ring()
        .iter()
        .zip(c.ring())
        .any(|(pa, pc)| pa.home != pc.home);
    assert!(differs, "different seeds should move the ring particles");
}

#[test]
fn body_lies_on_flattened_sphere() {
    let p = params(2000);
    let field = ParticleField::generate(&p);
    for particle in field.body() {
        let h = particle.home;
        // Undo the flattening and check the radius.
        let unflattened = glam::Vec3::new(h.x, h.y / p.flattening, h.z);
        assert!(
            (unflattened.length() - p.body_radius).abs() < 1e-3,
            "body point off the spheroid: {h:?}"
        );
        assert!(h.y.abs() <= p.body_radius * p.flattening + 1e-4);
    }
}

#[test]
fn body_points_cover_both_hemispheres_evenly() {
    let field = ParticleField::generate(&params(4000));
    let north = field.body().iter().filter(|p| p.home.y > 0.0).count();
    let south = field.body().iter().filter(|p| p.home.y < 0.0).count();
    let total = field.body_count() as f32;
    assert!(((north as f32 - south as f32).abs() / total) < 0.02);
}

#[test]
fn spheroid_point_first_index_is_south_pole() {
    let p = spheroid_point(0, 100, 2.0, 0.9);
    assert!((p.y + 2.0 * 0.9).abs() < 1e-5);
    assert!(p.x.abs() < 1e-4 && p.z.abs() < 1e-4);
    assert_eq!(spheroid_point(0, 0, 2.0, 0.9), glam::Vec3::ZERO);
}

#[test]
fn ring_stays_inside_annulus_and_thickness() {
    let p = params(3000);
    let field = ParticleField::generate(&p);
    for particle in field.ring() {
        let h = particle.home;
        let r = (h.x * h.x + h.z * h.z).sqrt();
        assert!(r >= p.ring_inner_radius - 1e-4 && r <= p.ring_outer_radius + 1e-4);
        assert!(h.y.abs() <= p.ring_thickness + 1e-6);
    }
}

#[test]
fn ring_radius_is_uniform_by_area() {
    // Histogram of r^2 must be flat; a histogram of r would not be.
    let (inner, outer) = (1.0f32, 4.0f32);
    let mut rng = StdRng::seed_from_u64(1234);
    let samples = 200_000;
    let bins = 10;
    let mut hist_sq = vec![0usize; bins];
    let mut hist_r = vec![0usize; bins];
    for _ in 0..samples {
        let p = annulus_point(&mut rng, inner, outer, 0.0);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        let u_sq = (r * r - inner * inner) / (outer * outer - inner * inner);
        let u_r = (r - inner) / (outer - inner);
        hist_sq[((u_sq * bins as f32) as usize).min(bins - 1)] += 1;
        hist_r[((u_r * bins as f32) as usize).min(bins - 1)] += 1;
    }
    let expected = samples as f32 / bins as f32;
    for (i, &count) in hist_sq.iter().enumerate() {
        let dev = (count as f32 - expected).abs() / expected;
        assert!(dev < 0.05, "r^2 bin {i} has {count}, expected ~{expected}");
    }
    // Radius density grows outward, so the radius histogram is skewed.
    assert!(hist_r[bins - 1] as f32 > 1.5 * hist_r[0] as f32);
}

#[test]
fn annulus_radius_maps_endpoints() {
    assert!((annulus_radius(0.0, 2.0, 5.0) - 2.0).abs() < 1e-6);
    assert!((annulus_radius(1.0, 2.0, 5.0) - 5.0).abs() < 1e-5);
    // Half the area sits below sqrt((4 + 25) / 2).
    assert!((annulus_radius(0.5, 2.0, 5.0) - (14.5f32).sqrt()).abs() < 1e-5);
}

#[test]
fn ring_scatters_farther_than_body() {
    let p = params(6000);
    let field = ParticleField::generate(&p);
    let mean = |ps: &[Particle]| ps.iter().map(|q| q.scatter.length()).sum::<f32>() / ps.len() as f32;
    assert!(field.body().iter().all(|q| q.scatter.length() <= p.body_scatter + 1e-4));
    assert!(field.ring().iter().all(|q| q.scatter.length() <= p.ring_scatter + 1e-4));
    assert!(mean(field.ring()) > mean(field.body()));
}

#[test]
fn colors_come_from_group_palettes_and_sizes_are_bounded() {
    let p = params(2000);
    let field = ParticleField::generate(&p);
    let body_colors = body_palette();
    let ring_colors = ring_palette();
    for q in field.body() {
        assert!(body_colors.contains(&q.color));
        let lo = p.body_base_size * (1.0 - p.size_jitter) - 1e-6;
        let hi = p.body_base_size * (1.0 + p.size_jitter) + 1e-6;
        assert!(q.size >= lo && q.size <= hi);
    }
    for q in field.ring() {
        assert!(ring_colors.contains(&q.color));
        let lo = p.ring_base_size * (1.0 - p.size_jitter) - 1e-6;
        let hi = p.ring_base_size * (1.0 + p.size_jitter) + 1e-6;
        assert!(q.size >= lo && q.size <= hi);
    }
}

#[test]
fn field_contains_no_nan() {
    let field = ParticleField::generate(&params(3000));
    for q in field.particles() {
        assert!(q.home.is_finite() && q.scatter.is_finite() && q.size.is_finite());
    }
}
