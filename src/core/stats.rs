use std::f64::consts::PI;

/// Running counters over a simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Valid events dispatched.
    pub events_processed: u64,
    pub particle_particle: u64,
    pub wall: u64,
    /// All particle–obstacle collisions.
    pub obstacle: u64,
    /// Distinct particles that have hit the obstacle at least once.
    pub obstacle_first_hits: u64,
    /// Events dropped at pop or dispatch time because a participant collided since prediction.
    pub stale_discarded: u64,
    /// Events skipped because their time step was negative or non-finite.
    pub scheduling_anomalies: u64,
    /// Geometric corrections applied by the repair pass.
    pub corrections: u64,
    /// Repair runs that exhausted their pass budget with violations left.
    pub unresolved_repairs: u64,
    /// Total events ever queued, stale ones included.
    pub events_scheduled: u64,
}

/// One pressure bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSample {
    pub start: f64,
    pub wall: f64,
    pub obstacle: f64,
}

/// Accumulates normal impulses on the wall and the obstacle into fixed-width time bins.
///
/// Pressure in 2D is force per unit length: `Σ|Δp| / (Δt · perimeter)`.
#[derive(Debug, Clone)]
pub struct PressureAccumulator {
    interval: f64,
    wall_perimeter: f64,
    obstacle_perimeter: f64,
    // (wall impulse, obstacle impulse) per bin
    bins: Vec<(f64, f64)>,
}

impl PressureAccumulator {
    pub fn new(interval: f64, arena_radius: f64, obstacle_radius: f64) -> Self {
        Self {
            interval,
            wall_perimeter: 2.0 * PI * arena_radius,
            obstacle_perimeter: 2.0 * PI * obstacle_radius,
            bins: Vec::new(),
        }
    }

    fn bin_mut(&mut self, time: f64) -> &mut (f64, f64) {
        let idx = (time / self.interval).floor().max(0.0) as usize;
        if idx >= self.bins.len() {
            self.bins.resize(idx + 1, (0.0, 0.0));
        }
        &mut self.bins[idx]
    }

    pub fn record_wall(&mut self, time: f64, impulse: f64) {
        self.bin_mut(time).0 += impulse;
    }

    pub fn record_obstacle(&mut self, time: f64, impulse: f64) {
        self.bin_mut(time).1 += impulse;
    }

    /// Pressure per bin from t = 0 up to the last bin that received an impulse.
    pub fn series(&self) -> Vec<PressureSample> {
        self.bins
            .iter()
            .enumerate()
            .map(|(k, &(wall, obstacle))| PressureSample {
                start: k as f64 * self.interval,
                wall: wall / (self.interval * self.wall_perimeter),
                obstacle: obstacle / (self.interval * self.obstacle_perimeter),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulses_land_in_their_bins() {
        let mut acc = PressureAccumulator::new(0.5, 1.0, 0.5);
        acc.record_wall(0.1, 2.0 * PI);
        acc.record_wall(0.2, 2.0 * PI);
        acc.record_obstacle(1.2, PI);
        let s = acc.series();
        assert_eq!(s.len(), 3);
        // 4π impulse over 0.5 time units on a 2π perimeter.
        assert!((s[0].wall - 4.0).abs() < 1e-12);
        assert_eq!(s[1].wall, 0.0);
        assert!((s[2].start - 1.0).abs() < 1e-12);
        assert!((s[2].obstacle - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_accumulator_has_no_series() {
        assert!(PressureAccumulator::new(0.1, 1.0, 0.1).series().is_empty());
    }
}
