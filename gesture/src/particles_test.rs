#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn seeded() -> ParticleSystem {
    ParticleSystem::with_seed(ParticleConfig::default(), 42)
}

fn origin() -> Point {
    Point::new(200.0, 150.0)
}

// =============================================================
// Spawning
// =============================================================

#[test]
fn new_system_is_empty() {
    let sys = seeded();
    assert!(sys.is_empty());
    assert_eq!(sys.len(), 0);
}

#[test]
fn spawn_burst_adds_count_particles_at_origin() {
    let mut sys = seeded();
    assert_eq!(sys.spawn_burst(origin(), 8), 8);
    assert_eq!(sys.len(), 8);
    for p in sys.particles() {
        assert_eq!(p.position, origin());
        assert_eq!(p.remaining_life, p.ttl);
        assert_eq!(p.opacity(), 1.0);
    }
}

#[test]
fn default_burst_uses_configured_count() {
    let mut sys = seeded();
    assert_eq!(sys.spawn_default_burst(origin()), 8);
}

#[test]
fn spawned_values_fall_in_configured_ranges() {
    let cfg = ParticleConfig::default();
    let mut sys = ParticleSystem::with_seed(cfg, 9);
    sys.spawn_burst(origin(), 400);
    for p in sys.particles() {
        assert!(p.size >= cfg.size_min && p.size < cfg.size_max);
        assert!(p.ttl >= cfg.ttl_min && p.ttl < cfg.ttl_max);
        // Remove the pop impulse to recover the radial speed.
        let speed = p.vx.hypot(p.vy - cfg.pop_impulse);
        assert!(speed >= cfg.speed_min - EPSILON && speed < cfg.speed_max + EPSILON);
        assert!(p.color.hue >= SPARK_HUE_DEG - SPARK_HUE_JITTER_DEG);
        assert!(p.color.hue < SPARK_HUE_DEG + SPARK_HUE_JITTER_DEG);
        assert_eq!(p.color.saturation, 100.0);
    }
}

#[test]
fn pop_impulse_biases_bursts_upward() {
    let mut sys = ParticleSystem::with_seed(ParticleConfig::default(), 3);
    sys.spawn_burst(origin(), 400);
    #[allow(clippy::cast_precision_loss)]
    let mean_vy = sys.particles().iter().map(|p| p.vy).sum::<f64>() / sys.len() as f64;
    assert!(mean_vy < -20.0, "mean vy = {mean_vy}");
}

#[test]
fn particles_are_independent() {
    let mut sys = seeded();
    sys.spawn_burst(origin(), 8);
    let first = sys.particles()[0];
    assert!(sys.particles()[1..].iter().any(|p| p.vx != first.vx || p.ttl != first.ttl));
}

#[test]
fn same_seed_reproduces_bursts() {
    let mut a = seeded();
    let mut b = seeded();
    a.spawn_burst(origin(), 16);
    b.spawn_burst(origin(), 16);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn spawn_respects_max_particles() {
    let cfg = ParticleConfig { max_particles: 10, ..ParticleConfig::default() };
    let mut sys = ParticleSystem::with_seed(cfg, 1);
    assert_eq!(sys.spawn_burst(origin(), 8), 8);
    assert_eq!(sys.spawn_burst(origin(), 8), 2);
    assert_eq!(sys.spawn_burst(origin(), 8), 0);
    assert_eq!(sys.len(), 10);
}

// =============================================================
// Advance
// =============================================================

#[test]
fn advance_matches_closed_form_euler() {
    let mut sys = seeded();
    sys.spawn_burst(origin(), 12);
    let before = sys.particles().to_vec();
    let dt = 0.016;
    let g = sys.config().gravity;
    sys.advance(dt);

    assert_eq!(sys.len(), before.len());
    for (old, new) in before.iter().zip(sys.particles()) {
        let vy = old.vy + g * dt;
        assert!(approx_eq(new.vy, vy));
        assert!(approx_eq(new.vx, old.vx));
        assert!(approx_eq(new.position.x, old.position.x + old.vx * dt));
        assert!(approx_eq(new.position.y, old.position.y + vy * dt));
        assert!(approx_eq(new.remaining_life, old.remaining_life - dt));
    }
}

#[test]
fn advance_removes_exactly_the_expired() {
    let mut sys = ParticleSystem::with_seed(ParticleConfig::default(), 77);
    sys.spawn_burst(origin(), 64);
    let before = sys.particles().to_vec();
    let dt = 0.4;
    sys.advance(dt);

    let survivors: Vec<&Particle> = before.iter().filter(|p| p.remaining_life - dt > 0.0).collect();
    assert!(!survivors.is_empty(), "seed should leave some survivors");
    assert!(survivors.len() < before.len(), "seed should expire some particles");
    assert_eq!(sys.len(), survivors.len());
    for (old, new) in survivors.iter().zip(sys.particles()) {
        assert_eq!(new.ttl, old.ttl);
        assert!(approx_eq(new.remaining_life, old.remaining_life - dt));
    }
}

#[test]
fn particle_with_exactly_zero_life_left_is_removed() {
    let mut sys = seeded();
    sys.spawn_burst(origin(), 1);
    let ttl = sys.particles()[0].ttl;
    sys.advance(ttl);
    assert!(sys.is_empty());
}

#[test]
fn all_particles_expire_after_max_ttl() {
    let mut sys = seeded();
    sys.spawn_burst(origin(), 50);
    for _ in 0..13 {
        sys.advance(0.05);
    }
    assert!(sys.is_empty());
}

#[test]
fn gravity_pulls_particles_down_over_time() {
    let cfg = ParticleConfig { ttl_min: 10.0, ttl_max: 11.0, ..ParticleConfig::default() };
    let mut sys = ParticleSystem::with_seed(cfg, 5);
    sys.spawn_burst(origin(), 1);
    let vy0 = sys.particles()[0].vy;
    for _ in 0..20 {
        sys.advance(0.05);
    }
    assert!(approx_eq(sys.particles()[0].vy, vy0 + cfg.gravity * 1.0));
}

#[test]
fn advance_zero_is_a_no_op_on_positions() {
    let mut sys = seeded();
    sys.spawn_burst(origin(), 4);
    let before = sys.particles().to_vec();
    sys.advance(0.0);
    assert_eq!(sys.particles(), &before[..]);
}

#[test]
fn clear_drops_everything() {
    let mut sys = seeded();
    sys.spawn_burst(origin(), 4);
    sys.clear();
    assert!(sys.is_empty());
}

// =============================================================
// Render hints
// =============================================================

#[test]
fn opacity_is_remaining_fraction_of_life() {
    let mut sys = ParticleSystem::with_seed(ParticleConfig { ttl_min: 0.5, ttl_max: 0.5, ..ParticleConfig::default() }, 2);
    sys.spawn_burst(origin(), 1);
    sys.advance(0.125);
    assert!(approx_eq(sys.particles()[0].opacity(), 0.75));
}

#[test]
fn opacity_clamps_to_zero() {
    let mut sys = seeded();
    sys.spawn_burst(origin(), 1);
    let mut p = sys.particles()[0];
    p.remaining_life = -0.2;
    assert_eq!(p.opacity(), 0.0);
    p.ttl = 0.0;
    assert_eq!(p.opacity(), 0.0);
}

#[test]
fn hsl_css_formats_with_alpha() {
    let c = Hsl { hue: 396.0, saturation: 100.0, lightness: 62.4 };
    assert_eq!(c.css(0.5), "hsla(36, 100%, 62%, 0.500)");
    assert_eq!(c.css(3.0), "hsla(36, 100%, 62%, 1.000)");
}

#[test]
fn huge_cap_reserves_only_the_default() {
    let cfg = ParticleConfig { max_particles: usize::MAX / 2, ..ParticleConfig::default() };
    let mut sys = ParticleSystem::with_seed(cfg, 1);
    assert_eq!(sys.spawn_burst(origin(), 8), 8);
    assert_eq!(sys.len(), 8);
}
