//! Event-driven simulation of hard disks in a circular arena with a central obstacle.
//!
//! The engine lives in [`core`]. [`placement`] builds random initial configurations and
//! [`output`] provides snapshot sinks; neither is needed to drive the engine directly.
//!
//! ```
//! use edmd::config::ScenarioConfig;
//! use edmd::core::NullSink;
//!
//! let cfg = ScenarioConfig::new().with_particles(20, 0.001, 1.0).with_seed(7);
//! let mut sim = edmd::placement::build_simulation(&cfg)?;
//! sim.advance_to(0.05, &mut NullSink)?;
//! assert!(sim.time() >= 0.05);
//! # Ok::<(), edmd::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod placement;

#[cfg(feature = "python")]
mod python;
