//! Event-driven hard-disk engine.
//!
//! Bodies move ballistically between collisions. The engine predicts every collision
//! in closed form, keeps the predictions in a time-ordered queue, and resolves them
//! one instant at a time.

pub mod body;
pub mod event;
pub mod queue;
pub mod repair;
pub mod sim;
pub mod snapshot;
pub mod stats;
pub mod vector;

pub use body::{Body, BodyKind, ObstacleKind};
pub use event::{Event, EventKind};
pub use queue::EventQueue;
pub use repair::{count_violations, OverlapRepair, RepairReport};
pub use sim::{Simulation, SimulationState, StepOutcome, Termination, OBSTACLE_INDEX};
pub use snapshot::{BodyState, NullSink, OwnedSnapshot, Snapshot, SnapshotSink, Tee};
pub use stats::{CollisionStats, PressureAccumulator, PressureSample};
pub use vector::Vector2D;
