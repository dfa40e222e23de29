//! Run parameters.
//!
//! [`SimulationConfig`] holds what the engine itself needs; [`ScenarioConfig`]
//! adds what the placement generator needs to build the initial bodies.
//! Both load from JSON.

use crate::core::ObstacleKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Diameter of the circular arena, centred at the origin.
    pub arena_diameter: f64,

    /// Simulated time at which the run stops.
    pub time_limit: f64,

    /// Interpenetration or boundary excursion tolerated before the repair pass acts.
    pub overlap_tolerance: f64,

    /// Upper bound on repair sweeps per correction run.
    pub max_correction_passes: u32,

    /// Events closer than this to the current instant are resolved in the same batch.
    pub simultaneity_epsilon: f64,

    /// Width of the pressure accumulation bins.
    pub pressure_interval: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena_diameter: 0.1,
            time_limit: 100.0,
            overlap_tolerance: 1e-6,
            max_correction_passes: 3,
            simultaneity_epsilon: 1e-10,
            pressure_interval: 0.1,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arena_diameter(mut self, diameter: f64) -> Self {
        self.arena_diameter = diameter;
        self
    }

    pub fn with_time_limit(mut self, time_limit: f64) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_overlap_tolerance(mut self, tolerance: f64) -> Self {
        self.overlap_tolerance = tolerance;
        self
    }

    pub fn with_max_correction_passes(mut self, passes: u32) -> Self {
        self.max_correction_passes = passes;
        self
    }

    pub fn with_simultaneity_epsilon(mut self, epsilon: f64) -> Self {
        self.simultaneity_epsilon = epsilon;
        self
    }

    pub fn with_pressure_interval(mut self, interval: f64) -> Self {
        self.pressure_interval = interval;
        self
    }

    pub fn arena_radius(&self) -> f64 {
        self.arena_diameter / 2.0
    }

    pub fn validate(&self) -> Result<()> {
        if !self.arena_diameter.is_finite() || self.arena_diameter <= 0.0 {
            return Err(Error::InvalidParam(
                "arena_diameter must be finite and > 0".into(),
            ));
        }
        if !self.time_limit.is_finite() || self.time_limit < 0.0 {
            return Err(Error::InvalidParam(
                "time_limit must be finite and >= 0".into(),
            ));
        }
        if !self.overlap_tolerance.is_finite() || self.overlap_tolerance < 0.0 {
            return Err(Error::InvalidParam(
                "overlap_tolerance must be finite and >= 0".into(),
            ));
        }
        if self.max_correction_passes == 0 {
            return Err(Error::InvalidParam(
                "max_correction_passes must be >= 1".into(),
            ));
        }
        if !self.simultaneity_epsilon.is_finite() || self.simultaneity_epsilon < 0.0 {
            return Err(Error::InvalidParam(
                "simultaneity_epsilon must be finite and >= 0".into(),
            ));
        }
        if !self.pressure_interval.is_finite() || self.pressure_interval <= 0.0 {
            return Err(Error::InvalidParam(
                "pressure_interval must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Inputs for generating an initial configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub simulation: SimulationConfig,
    pub num_particles: usize,
    pub particle_radius: f64,
    pub particle_mass: f64,
    /// Speed every particle starts with; directions are random.
    pub initial_speed: f64,
    pub obstacle_radius: f64,
    /// Only used when the obstacle is movable.
    pub obstacle_mass: f64,
    pub obstacle_kind: ObstacleKind,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            num_particles: 210,
            particle_radius: 0.0005,
            particle_mass: 1.0,
            initial_speed: 1.0,
            obstacle_radius: 0.005,
            obstacle_mass: 3.0,
            obstacle_kind: ObstacleKind::Static,
            seed: None,
        }
    }
}

impl ScenarioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn with_particles(mut self, count: usize, radius: f64, mass: f64) -> Self {
        self.num_particles = count;
        self.particle_radius = radius;
        self.particle_mass = mass;
        self
    }

    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_obstacle(mut self, kind: ObstacleKind, radius: f64, mass: f64) -> Self {
        self.obstacle_kind = kind;
        self.obstacle_radius = radius;
        self.obstacle_mass = mass;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read a JSON config file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        for (name, v) in [
            ("particle_radius", self.particle_radius),
            ("particle_mass", self.particle_mass),
            ("obstacle_radius", self.obstacle_radius),
            ("obstacle_mass", self.obstacle_mass),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::InvalidParam(format!("{name} must be finite and > 0")));
            }
        }
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(Error::InvalidParam(
                "initial_speed must be finite and >= 0".into(),
            ));
        }
        let ring = self.simulation.arena_radius() - self.obstacle_radius - 2.0 * self.particle_radius;
        if self.num_particles > 0 && ring < 0.0 {
            return Err(Error::InvalidParam(
                "no room for particles between the obstacle and the wall".into(),
            ));
        }
        Ok(())
    }
}
