//! Geometric drift repair.
//!
//! Floating-point error in `advance` and in collision responses can leave disks
//! slightly interpenetrating or slightly outside the arena. This pass nudges them
//! back; it is not physics and never fails the run.

use crate::core::body::Body;
use crate::core::vector::Vector2D;
use log::{debug, warn};

/// Outcome of one bounded correction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    /// Sweeps performed.
    pub passes: u32,
    /// Individual position corrections applied.
    pub corrections: u64,
    /// No violation remains beyond tolerance.
    pub resolved: bool,
    /// Bodies whose outward velocity was negated at the wall. Their collision counts
    /// were bumped, so their pending events are stale and they need re-prediction.
    pub reflected: Vec<usize>,
}

/// Bounded overlap correction with a fixed tolerance.
#[derive(Debug, Clone, Copy)]
pub struct OverlapRepair {
    pub tolerance: f64,
    pub max_passes: u32,
}

impl OverlapRepair {
    pub fn new(tolerance: f64, max_passes: u32) -> Self {
        Self {
            tolerance,
            max_passes,
        }
    }

    /// Sweep until clean or until `max_passes` sweeps are spent. Idempotent on a clean state.
    pub fn run(&self, bodies: &mut [Body], arena_radius: f64, time: f64) -> RepairReport {
        let mut report = RepairReport::default();
        for pass in 1..=self.max_passes {
            report.passes = pass;
            if self.sweep(bodies, arena_radius, time, &mut report) == 0 {
                report.resolved = true;
                break;
            }
        }
        if !report.resolved {
            let left = count_violations(bodies, arena_radius, self.tolerance);
            report.resolved = left == 0;
            if !report.resolved {
                warn!(
                    "{} overlap(s) left unresolved after {} correction passes at t={:.6}",
                    left, report.passes, time
                );
            }
        }
        report
    }

    fn sweep(
        &self,
        bodies: &mut [Body],
        arena_radius: f64,
        time: f64,
        report: &mut RepairReport,
    ) -> u64 {
        let tol = self.tolerance;
        let mut fixed = 0u64;
        let n = bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let (left, right) = bodies.split_at_mut(j);
                let (a, b) = (&mut left[i], &mut right[0]);
                let min_dist = a.radius + b.radius;
                let dr = b.position - a.position;
                let dist = dr.magnitude();
                if dist >= min_dist - tol {
                    continue;
                }
                let deficit = min_dist - dist;
                let dir = separation_axis(dr, dist);
                match (a.is_obstacle(), b.is_obstacle()) {
                    (true, false) => b.position = b.position + dir * deficit,
                    (false, true) => a.position = a.position - dir * deficit,
                    _ => {
                        a.position = a.position - dir * (deficit / 2.0);
                        b.position = b.position + dir * (deficit / 2.0);
                    }
                }
                debug!(
                    "separated bodies {} and {} by {:.3e} at t={:.6}",
                    a.id, b.id, deficit, time
                );
                fixed += 1;
            }
        }

        for (i, body) in bodies.iter_mut().enumerate() {
            if body.is_static() {
                continue;
            }
            let max_dist = arena_radius - body.radius;
            let dist = body.position.magnitude();
            if dist <= max_dist + tol {
                continue;
            }
            let normal = body.position.direction();
            body.position = normal * max_dist;
            if body.velocity.dot(&normal) > 0.0 {
                body.velocity = -body.velocity;
                body.bump_collision_count();
                if !report.reflected.contains(&i) {
                    report.reflected.push(i);
                }
            }
            debug!(
                "pulled body {} inside the arena by {:.3e} at t={:.6}",
                body.id,
                dist - max_dist,
                time
            );
            fixed += 1;
        }

        report.corrections += fixed;
        fixed
    }
}

fn separation_axis(dr: Vector2D, dist: f64) -> Vector2D {
    if dist > 1e-12 {
        dr / dist
    } else {
        // Coincident centres: any axis separates them.
        Vector2D::new(1.0, 0.0)
    }
}

/// Count pairs and bodies violating the non-penetration invariants beyond `tolerance`.
pub fn count_violations(bodies: &[Body], arena_radius: f64, tolerance: f64) -> usize {
    let mut count = 0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if a.position.distance_to(&b.position) < a.radius + b.radius - tolerance {
                count += 1;
            }
        }
        if !a.is_static() && a.position.magnitude() > arena_radius - a.radius + tolerance {
            count += 1;
        }
    }
    count
}
