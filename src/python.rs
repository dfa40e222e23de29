use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::{ScenarioConfig, SimulationConfig};
use crate::core::{NullSink, ObstacleKind, Simulation, Vector2D};
use crate::placement::build_simulation;

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the Rust Simulation core.
///
/// - __new__(num_particles, arena_diameter, time_limit, particle_radius=0.0005, particle_mass=1.0,
///   initial_speed=1.0, obstacle_radius=0.005, obstacle_mass=3.0, movable_obstacle=False, seed=None)
/// - advance_to(time)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N + 1, 2), obstacle in row 0
#[pyclass]
pub struct EdmdSim {
    sim: Simulation,
}

#[pymethods]
impl EdmdSim {
    /// Build a random non-overlapping configuration and prepare the event queue.
    ///
    /// Errors: raises ValueError on invalid parameters or when placement fails.
    #[new]
    #[pyo3(signature = (
        num_particles,
        arena_diameter,
        time_limit,
        particle_radius=0.0005,
        particle_mass=1.0,
        initial_speed=1.0,
        obstacle_radius=0.005,
        obstacle_mass=3.0,
        movable_obstacle=false,
        seed=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        num_particles: usize,
        arena_diameter: f64,
        time_limit: f64,
        particle_radius: f64,
        particle_mass: f64,
        initial_speed: f64,
        obstacle_radius: f64,
        obstacle_mass: f64,
        movable_obstacle: bool,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let kind = if movable_obstacle {
            ObstacleKind::Movable
        } else {
            ObstacleKind::Static
        };
        let mut cfg = ScenarioConfig::new()
            .with_simulation(
                SimulationConfig::new()
                    .with_arena_diameter(arena_diameter)
                    .with_time_limit(time_limit),
            )
            .with_particles(num_particles, particle_radius, particle_mass)
            .with_initial_speed(initial_speed)
            .with_obstacle(kind, obstacle_radius, obstacle_mass);
        cfg.seed = seed;
        let sim = build_simulation(&cfg).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance to an absolute time, clamped to the time limit (releases the GIL).
    fn advance_to(&mut self, py: Python<'_>, target_time: f64) -> PyResult<()> {
        py.detach(|| self.sim.advance_to(target_time, &mut NullSink))
            .map_err(py_err)
    }

    fn time(&self) -> f64 {
        self.sim.time()
    }

    fn finished(&self) -> bool {
        matches!(
            self.sim.state(),
            crate::core::SimulationState::Terminated(_)
        )
    }

    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }

    /// Positions as a float64 array of shape (N + 1, 2); row 0 is the obstacle.
    fn get_positions(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        self.body_array(py, |b| b.position)
    }

    /// Velocities as a float64 array of shape (N + 1, 2); row 0 is the obstacle.
    fn get_velocities(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        self.body_array(py, |b| b.velocity)
    }

    /// Overwrite the velocity of body `index` (0 is the obstacle) and re-predict its events.
    fn set_velocity(&mut self, index: usize, vx: f64, vy: f64) -> PyResult<()> {
        self.sim
            .set_velocity(index, Vector2D::new(vx, vy))
            .map_err(py_err)
    }

    /// Collision counters as a dict of ints.
    fn collision_counts<'py>(&self, py: Python<'py>) -> PyResult<Py<PyDict>> {
        let s = self.sim.stats();
        let out = PyDict::new(py);
        out.set_item("events", s.events_processed)?;
        out.set_item("particle_particle", s.particle_particle)?;
        out.set_item("wall", s.wall)?;
        out.set_item("obstacle", s.obstacle)?;
        out.set_item("obstacle_first", s.obstacle_first_hits)?;
        out.set_item("stale_discarded", s.stale_discarded)?;
        out.set_item("corrections", s.corrections)?;
        Ok(out.unbind())
    }

    /// Return a (M, 3) array of [bin_start, wall_pressure, obstacle_pressure].
    fn pressure_history(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        let series = self.sim.pressure_series();
        let mut arr = Array2::<f64>::zeros((series.len(), 3));
        for (i, s) in series.iter().enumerate() {
            arr[[i, 0]] = s.start;
            arr[[i, 1]] = s.wall;
            arr[[i, 2]] = s.obstacle;
        }
        arr.into_pyarray(py).unbind()
    }
}

impl EdmdSim {
    fn body_array(
        &self,
        py: Python<'_>,
        field: impl Fn(&crate::core::Body) -> Vector2D,
    ) -> Py<PyArray2<f64>> {
        let bodies = self.sim.bodies();
        let mut arr = Array2::<f64>::zeros((bodies.len(), 2));
        for (i, b) in bodies.iter().enumerate() {
            let v = field(b);
            arr[[i, 0]] = v.x;
            arr[[i, 1]] = v.y;
        }
        arr.into_pyarray(py).unbind()
    }
}

/// The edmd Python module entry point.
#[pymodule]
fn edmd(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<EdmdSim>()?;
    Ok(())
}
