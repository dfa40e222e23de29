//! Random non-overlapping initial configurations.

use crate::config::ScenarioConfig;
use crate::core::{Body, ObstacleKind, Simulation, Vector2D};
use crate::error::{Error, Result};
use log::debug;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;

/// Placement attempts allowed per requested particle.
const ATTEMPTS_PER_PARTICLE: usize = 1000;

/// Seeded RNG when `seed` is given, otherwise seeded from the thread RNG.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(rng().random()),
    }
}

/// The obstacle: id 0, at rest at the arena centre.
pub fn build_obstacle(cfg: &ScenarioConfig) -> Result<Body> {
    let mass = match cfg.obstacle_kind {
        ObstacleKind::Static => 1.0,
        ObstacleKind::Movable => cfg.obstacle_mass,
    };
    Body::obstacle(
        0,
        Vector2D::ZERO,
        Vector2D::ZERO,
        cfg.obstacle_radius,
        mass,
        cfg.obstacle_kind,
    )
}

/// Place `cfg.num_particles` disks with ids `1..=N` uniformly over the ring between the
/// obstacle and the wall, each moving at `cfg.initial_speed` in a random direction.
///
/// Errors: `Error::Placement` when the attempt budget runs out.
pub fn generate_particles<R: Rng + ?Sized>(cfg: &ScenarioConfig, rng: &mut R) -> Result<Vec<Body>> {
    cfg.validate()?;
    let n = cfg.num_particles;
    let radius = cfg.particle_radius;
    let r_min = cfg.obstacle_radius + radius;
    let r_max = cfg.simulation.arena_radius() - radius;
    let min_sq = (2.0 * radius) * (2.0 * radius);

    let mut particles: Vec<Body> = Vec::with_capacity(n);
    let max_attempts = n.saturating_mul(ATTEMPTS_PER_PARTICLE);
    let mut attempts = 0usize;

    while particles.len() < n {
        if attempts >= max_attempts {
            return Err(Error::Placement(format!(
                "placed {} of {} particles in {} attempts; try fewer particles or a smaller radius",
                particles.len(),
                n,
                attempts
            )));
        }
        attempts += 1;

        let u: f64 = rng.random();
        let r = (u * (r_max * r_max - r_min * r_min) + r_min * r_min).sqrt();
        let theta = rng.random_range(0.0..TAU);
        let position = Vector2D::new(r * theta.cos(), r * theta.sin());

        let overlaps = particles
            .iter()
            .any(|p| (p.position - position).magnitude_squared() < min_sq);
        if overlaps {
            continue;
        }

        let angle = rng.random_range(0.0..TAU);
        let velocity = Vector2D::new(angle.cos(), angle.sin()) * cfg.initial_speed;
        let id = particles.len() as u32 + 1;
        particles.push(Body::particle(id, position, velocity, radius, cfg.particle_mass)?);
    }

    debug!("placed {} particles in {} attempts", n, attempts);
    Ok(particles)
}

/// Build the full initial configuration from `cfg`, seeded by `cfg.seed`.
pub fn build_scenario(cfg: &ScenarioConfig) -> Result<(Vec<Body>, Body)> {
    let mut rng = make_rng(cfg.seed);
    let particles = generate_particles(cfg, &mut rng)?;
    let obstacle = build_obstacle(cfg)?;
    Ok((particles, obstacle))
}

/// Generate a configuration and hand it to a new [`Simulation`].
pub fn build_simulation(cfg: &ScenarioConfig) -> Result<Simulation> {
    let (particles, obstacle) = build_scenario(cfg)?;
    Simulation::new(particles, obstacle, cfg.simulation.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::core::count_violations;

    #[test]
    fn placement_is_valid_and_reproducible() -> Result<()> {
        let cfg = ScenarioConfig::new()
            .with_particles(50, 0.001, 1.0)
            .with_seed(42);
        let (a, obstacle) = build_scenario(&cfg)?;
        let (b, _) = build_scenario(&cfg)?;
        assert_eq!(a.len(), 50);
        assert!(a
            .iter()
            .zip(&b)
            .all(|(p, q)| p.position == q.position && p.velocity == q.velocity));
        assert_eq!(a[0].id, 1);
        assert_eq!(a[49].id, 50);

        let mut bodies = vec![obstacle];
        bodies.extend(a);
        assert_eq!(count_violations(&bodies, cfg.simulation.arena_radius(), 1e-12), 0);
        for p in &bodies[1..] {
            assert!((p.velocity.magnitude() - cfg.initial_speed).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn overfull_arena_fails_with_placement_error() {
        let cfg = ScenarioConfig::new()
            .with_simulation(SimulationConfig::new().with_arena_diameter(0.02))
            .with_particles(500, 0.001, 1.0)
            .with_obstacle(ObstacleKind::Static, 0.001, 1.0)
            .with_seed(1);
        let err = build_scenario(&cfg).unwrap_err();
        assert!(matches!(err, Error::Placement(_)), "got {err}");
    }

    #[test]
    fn movable_obstacle_keeps_its_mass() -> Result<()> {
        let cfg = ScenarioConfig::new().with_obstacle(ObstacleKind::Movable, 0.005, 3.0);
        let o = build_obstacle(&cfg)?;
        assert_eq!(o.mass, 3.0);
        assert!(!o.is_static());
        assert_eq!(o.id, 0);
        Ok(())
    }
}
