use crate::config::SimulationConfig;
use crate::core::body::Body;
use crate::core::event::{Event, EventKind};
use crate::core::queue::EventQueue;
use crate::core::repair::OverlapRepair;
use crate::core::snapshot::{Snapshot, SnapshotSink};
use crate::core::stats::{CollisionStats, PressureAccumulator, PressureSample};
use crate::core::vector::Vector2D;
use crate::error::{Error, Result};
use log::{debug, info, trace, warn};
use std::collections::HashSet;

/// Index of the obstacle in [`Simulation::bodies`].
pub const OBSTACLE_INDEX: usize = 0;

/// Re-gather rounds allowed within one instant before leftovers wait for the next.
const MAX_CASCADE_ROUNDS: usize = 64;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An event at the time limit was resolved.
    TimeLimit,
    /// No event remained at or before the time limit; bodies were drifted to the limit.
    QueueExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Initializing,
    Running,
    Terminated(Termination),
}

/// Result of a single [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// One instant was resolved; `events` valid collisions were dispatched in its batch.
    Resolved { time: f64, events: usize },
    Terminated(Termination),
}

/// Event-driven hard-disk simulation in a circular arena of radius `arena_diameter / 2`
/// centred at the origin, with one obstacle.
///
/// All bodies are advanced together to each event time. Stale events are detected by
/// collision-count snapshots when popped, never removed from the heap eagerly.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    arena_radius: f64,
    bodies: Vec<Body>,
    queue: EventQueue,
    time_now: f64,
    state: SimulationState,
    repair: OverlapRepair,
    stats: CollisionStats,
    pressure: PressureAccumulator,
    obstacle_hit: Vec<bool>,
    snapshots_emitted: u64,
}

impl Simulation {
    /// Take ownership of a non-overlapping configuration.
    ///
    /// The obstacle is stored at index 0, particles follow in the given order. Small
    /// initial overlaps are repaired in place; anything the repair pass cannot fix is
    /// logged and left to the run.
    ///
    /// Errors: `Error::InvalidParam` on an invalid config, a non-obstacle `obstacle`, an
    /// obstacle among `particles`, duplicate ids, or a body wider than the arena.
    pub fn new(particles: Vec<Body>, obstacle: Body, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        if !obstacle.is_obstacle() {
            return Err(Error::InvalidParam(format!(
                "body {} passed as obstacle is a particle",
                obstacle.id
            )));
        }
        if let Some(p) = particles.iter().find(|p| p.is_obstacle()) {
            return Err(Error::InvalidParam(format!(
                "body {} passed as particle is an obstacle",
                p.id
            )));
        }

        let arena_radius = config.arena_radius();
        let mut bodies = Vec::with_capacity(particles.len() + 1);
        bodies.push(obstacle);
        bodies.extend(particles);

        let mut seen = HashSet::with_capacity(bodies.len());
        for b in &bodies {
            if !seen.insert(b.id) {
                return Err(Error::InvalidParam(format!("duplicate body id {}", b.id)));
            }
            if b.radius >= arena_radius {
                return Err(Error::InvalidParam(format!(
                    "body {} (radius {}) does not fit in an arena of radius {}",
                    b.id, b.radius, arena_radius
                )));
            }
        }

        let repair = OverlapRepair::new(config.overlap_tolerance, config.max_correction_passes);
        let pressure =
            PressureAccumulator::new(config.pressure_interval, arena_radius, bodies[OBSTACLE_INDEX].radius);
        let n = bodies.len();
        let mut sim = Self {
            config,
            arena_radius,
            bodies,
            queue: EventQueue::new(),
            time_now: 0.0,
            state: SimulationState::Initializing,
            repair,
            stats: CollisionStats::default(),
            pressure,
            obstacle_hit: vec![false; n],
            snapshots_emitted: 0,
        };
        sim.correct_overlaps()?;
        Ok(sim)
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn arena_radius(&self) -> f64 {
        self.arena_radius
    }

    /// All bodies, obstacle first.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn particles(&self) -> &[Body] {
        &self.bodies[OBSTACLE_INDEX + 1..]
    }

    pub fn obstacle(&self) -> &Body {
        &self.bodies[OBSTACLE_INDEX]
    }

    pub fn num_particles(&self) -> usize {
        self.bodies.len() - 1
    }

    /// Entries currently in the queue, stale ones included.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> CollisionStats {
        CollisionStats {
            events_scheduled: self.queue.total_pushed(),
            ..self.stats.clone()
        }
    }

    pub fn pressure_series(&self) -> Vec<PressureSample> {
        self.pressure.series()
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Total linear momentum; a static obstacle contributes nothing.
    pub fn momentum(&self) -> Vector2D {
        self.bodies
            .iter()
            .fold(Vector2D::ZERO, |acc, b| acc + b.momentum())
    }

    /// Mean kinetic energy per mobile particle (k_B = 1).
    pub fn temperature(&self) -> f64 {
        let particles = self.particles();
        if particles.is_empty() {
            return 0.0;
        }
        particles.iter().map(Body::kinetic_energy).sum::<f64>() / particles.len() as f64
    }

    /// Seed the queue with every body's wall prediction and every unordered pair once,
    /// emit the initial snapshot and enter `Running`. No-op after the first call.
    pub fn initialize<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.state != SimulationState::Initializing {
            return Ok(());
        }
        self.schedule_initial_events()?;
        self.state = SimulationState::Running;
        info!(
            "simulation started: {} particles, arena radius {}, time limit {}, {} events queued",
            self.num_particles(),
            self.arena_radius,
            self.config.time_limit,
            self.queue.len()
        );
        self.emit(sink)
    }

    /// Run until the time limit or until the queue is exhausted.
    pub fn run<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<Termination> {
        loop {
            if let StepOutcome::Terminated(reason) = self.step(sink)? {
                return Ok(reason);
            }
        }
    }

    /// Resolve the next collision instant, or terminate if there is none before the limit.
    pub fn step<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<StepOutcome> {
        self.initialize(sink)?;
        if let SimulationState::Terminated(reason) = self.state {
            return Ok(StepOutcome::Terminated(reason));
        }
        let limit = self.config.time_limit;
        match self.resolve_next_instant(limit, sink)? {
            Some(events) => {
                if self.time_now >= limit {
                    self.terminate(Termination::TimeLimit);
                }
                Ok(StepOutcome::Resolved {
                    time: self.time_now,
                    events,
                })
            }
            None => {
                self.drift_to(limit);
                self.terminate(Termination::QueueExhausted);
                Ok(StepOutcome::Terminated(Termination::QueueExhausted))
            }
        }
    }

    /// Resolve every instant up to `target_time` (clamped to the time limit), then drift
    /// all bodies to it.
    pub fn advance_to<S: SnapshotSink + ?Sized>(
        &mut self,
        target_time: f64,
        sink: &mut S,
    ) -> Result<()> {
        if !target_time.is_finite() {
            return Err(Error::InvalidParam("target_time must be finite".into()));
        }
        if target_time < self.time_now {
            return Err(Error::InvalidParam(
                "target_time cannot be earlier than current time".into(),
            ));
        }
        self.initialize(sink)?;
        if matches!(self.state, SimulationState::Terminated(_)) {
            return Ok(());
        }

        let limit = self.config.time_limit;
        let horizon = target_time.min(limit);
        while self.resolve_next_instant(horizon, sink)?.is_some() {
            if self.time_now >= limit {
                self.terminate(Termination::TimeLimit);
                return Ok(());
            }
        }
        self.drift_to(horizon);
        if self.time_now >= limit {
            self.terminate(Termination::QueueExhausted);
        }
        Ok(())
    }

    /// Overwrite one body's velocity and re-predict its events.
    pub fn set_velocity(&mut self, index: usize, velocity: Vector2D) -> Result<()> {
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        let body = self
            .bodies
            .get_mut(index)
            .ok_or_else(|| Error::InvalidParam(format!("no body at index {index}")))?;
        if body.is_static() {
            return Err(Error::InvalidParam("a static obstacle cannot move".into()));
        }
        body.velocity = velocity;
        // Outstanding predictions for this body are now wrong.
        body.bump_collision_count();
        self.repredict(index)
    }

    // ============ Internal helpers ============

    fn terminate(&mut self, reason: Termination) {
        self.state = SimulationState::Terminated(reason);
        let s = self.stats();
        info!(
            "simulation finished at t={:.6} ({:?}): {} events, {} particle-particle, {} wall, {} obstacle ({} distinct), {} stale discarded",
            self.time_now,
            reason,
            s.events_processed,
            s.particle_particle,
            s.wall,
            s.obstacle,
            s.obstacle_first_hits,
            s.stale_discarded
        );
    }

    fn is_current(&self, ev: &Event) -> bool {
        ev.is_valid(
            self.bodies[ev.a].collision_count(),
            ev.b.map(|j| self.bodies[j].collision_count()),
        )
    }

    /// Pop the earliest valid event at or before `horizon` and resolve its instant.
    /// Returns the number of collisions dispatched, or `None` if no such event exists.
    fn resolve_next_instant<S: SnapshotSink + ?Sized>(
        &mut self,
        horizon: f64,
        sink: &mut S,
    ) -> Result<Option<usize>> {
        loop {
            let Some(&next) = self.queue.peek() else {
                return Ok(None);
            };
            if !self.is_current(&next) {
                self.queue.pop();
                self.stats.stale_discarded += 1;
                continue;
            }
            let t_ev = next.time_f64();
            if t_ev > horizon {
                return Ok(None);
            }
            self.queue.pop();

            let dt = t_ev - self.time_now;
            if !dt.is_finite() || dt < -self.config.simultaneity_epsilon {
                warn!(
                    "skipping event {:?} at t={} scheduled before current time {} (dt={})",
                    next.kind, t_ev, self.time_now, dt
                );
                self.stats.scheduling_anomalies += 1;
                continue;
            }

            // A step inside the simultaneity window resolves at the current instant.
            if dt > 0.0 {
                self.drift_all(dt);
                self.time_now = t_ev;
            }

            let mut batch = vec![next];
            self.gather_simultaneous(&mut batch);

            self.correct_overlaps()?;

            // Re-predictions can land on this same instant; they join it rather than
            // opening a zero-length one.
            let mut dispatched = 0;
            for _ in 0..MAX_CASCADE_ROUNDS {
                if batch.is_empty() {
                    break;
                }
                for ev in std::mem::take(&mut batch) {
                    if !self.is_current(&ev) {
                        self.stats.stale_discarded += 1;
                        continue;
                    }
                    self.dispatch(&ev);
                    dispatched += 1;
                    self.repredict(ev.a)?;
                    if let Some(b) = ev.b {
                        self.repredict(b)?;
                    }
                }
                self.gather_simultaneous(&mut batch);
            }
            if !batch.is_empty() {
                debug!(
                    "{} simultaneous events at t={} deferred to the next instant",
                    batch.len(),
                    self.time_now
                );
                for ev in batch {
                    self.queue.push(ev);
                }
            }

            self.correct_overlaps()?;
            self.emit(sink)?;
            return Ok(Some(dispatched));
        }
    }

    /// Move every queued event within the simultaneity window of now into `batch`.
    fn gather_simultaneous(&mut self, batch: &mut Vec<Event>) {
        while let Some(&peer) = self.queue.peek() {
            if (peer.time_f64() - self.time_now).abs() > self.config.simultaneity_epsilon {
                break;
            }
            self.queue.pop();
            batch.push(peer);
        }
    }

    fn dispatch(&mut self, ev: &Event) {
        trace!(
            "t={:.9} {:?} a={} b={:?}",
            self.time_now,
            ev.kind,
            self.bodies[ev.a].id,
            ev.b.map(|j| self.bodies[j].id)
        );
        self.stats.events_processed += 1;
        match (ev.kind, ev.b) {
            (EventKind::Wall, _) | (_, None) => {
                let impulse = self.bodies[ev.a].bounce_off_circular_boundary(self.arena_radius);
                self.stats.wall += 1;
                self.pressure.record_wall(self.time_now, impulse);
            }
            (kind, Some(b)) => {
                let (x, y) = pair_mut(&mut self.bodies, ev.a, b);
                let impulse = x.bounce_off(y);
                if kind == EventKind::Obstacle {
                    self.stats.obstacle += 1;
                    self.pressure.record_obstacle(self.time_now, impulse);
                    let particle = if self.bodies[ev.a].is_obstacle() { b } else { ev.a };
                    if !self.obstacle_hit[particle] {
                        self.obstacle_hit[particle] = true;
                        self.stats.obstacle_first_hits += 1;
                    }
                } else {
                    self.stats.particle_particle += 1;
                }
            }
        }
    }

    fn schedule_initial_events(&mut self) -> Result<()> {
        let n = self.bodies.len();
        for i in 0..n {
            self.predict_wall(i)?;
            for j in (i + 1)..n {
                self.predict_pair(i, j)?;
            }
        }
        Ok(())
    }

    /// New wall and pairwise predictions for body `i` against every other body.
    fn repredict(&mut self, i: usize) -> Result<()> {
        if self.bodies[i].is_static() {
            return Ok(());
        }
        self.predict_wall(i)?;
        for j in 0..self.bodies.len() {
            if j != i {
                self.predict_pair(i, j)?;
            }
        }
        Ok(())
    }

    fn predict_wall(&mut self, i: usize) -> Result<()> {
        let dt = self.bodies[i].time_to_hit_circular_boundary(self.arena_radius);
        self.schedule(dt, EventKind::Wall, i, None)
    }

    fn predict_pair(&mut self, i: usize, j: usize) -> Result<()> {
        let (a, b) = (&self.bodies[i], &self.bodies[j]);
        if a.is_static() && b.is_static() {
            return Ok(());
        }
        let dt = a.time_to_hit(b);
        let kind = if a.is_obstacle() || b.is_obstacle() {
            EventKind::Obstacle
        } else {
            EventKind::ParticleParticle
        };
        self.schedule(dt, kind, i, Some(j))
    }

    /// Queue an event `dt` from now unless it never happens or falls past the time limit.
    fn schedule(&mut self, dt: f64, kind: EventKind, a: usize, b: Option<usize>) -> Result<()> {
        if !dt.is_finite() {
            return Ok(());
        }
        let t_abs = self.time_now + dt;
        if !t_abs.is_finite() || t_abs > self.config.time_limit {
            return Ok(());
        }
        let ev = Event::new(
            t_abs,
            kind,
            a,
            b,
            self.bodies[a].collision_count(),
            b.map(|j| self.bodies[j].collision_count()),
        )?;
        self.queue.push(ev);
        Ok(())
    }

    fn correct_overlaps(&mut self) -> Result<()> {
        let report = self
            .repair
            .run(&mut self.bodies, self.arena_radius, self.time_now);
        self.stats.corrections += report.corrections;
        if !report.resolved {
            self.stats.unresolved_repairs += 1;
        }
        if self.state != SimulationState::Initializing {
            for i in report.reflected {
                self.repredict(i)?;
            }
        }
        Ok(())
    }

    fn drift_all(&mut self, dt: f64) {
        for b in &mut self.bodies {
            b.advance(dt);
        }
    }

    fn drift_to(&mut self, to_time: f64) {
        let dt = to_time - self.time_now;
        if dt > 0.0 {
            self.drift_all(dt);
            self.time_now = to_time;
        }
    }

    fn emit<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        let snapshot = Snapshot::new(self.snapshots_emitted, self.time_now, &self.bodies);
        sink.record(&snapshot)?;
        self.snapshots_emitted += 1;
        Ok(())
    }
}

/// Two distinct mutable bodies out of one slice.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::ObstacleKind;
    use crate::core::snapshot::{NullSink, OwnedSnapshot};

    fn obstacle() -> Result<Body> {
        Body::obstacle(0, Vector2D::ZERO, Vector2D::ZERO, 0.005, 1.0, ObstacleKind::Static)
    }

    fn particle(id: u32, x: f64, y: f64, vx: f64, vy: f64) -> Result<Body> {
        Body::particle(id, Vector2D::new(x, y), Vector2D::new(vx, vy), 0.001, 1.0)
    }

    fn config(time_limit: f64) -> SimulationConfig {
        SimulationConfig::new()
            .with_arena_diameter(0.2)
            .with_time_limit(time_limit)
    }

    #[test]
    fn initial_predictions_cover_walls_and_obstacle() -> Result<()> {
        let mut sim = Simulation::new(
            vec![particle(1, 0.05, 0.0, -1.0, 0.0)?],
            obstacle()?,
            config(1.0),
        )?;
        sim.initialize(&mut NullSink)?;
        assert_eq!(sim.state(), SimulationState::Running);
        // Obstacle hit at t = 0.05 - 0.006 and the wall hit further out.
        let first = sim.queue.peek().copied();
        assert_eq!(first.map(|e| e.kind), Some(EventKind::Obstacle));
        assert!(first.is_some_and(|e| (e.time_f64() - 0.044).abs() < 1e-12));
        assert_eq!(sim.pending_events(), 2);
        Ok(())
    }

    #[test]
    fn stale_event_is_discarded_not_dispatched() -> Result<()> {
        let mut sim = Simulation::new(
            vec![particle(1, 0.05, 0.0, 0.0, 1.0)?],
            obstacle()?,
            config(1.0),
        )?;
        sim.initialize(&mut NullSink)?;
        sim.queue.clear();
        // Snapshot count 0, then the particle "collides" before the event pops.
        sim.queue
            .push(Event::new(0.01, EventKind::Wall, 1, None, 0, None)?);
        sim.bodies[1].bump_collision_count();

        let before = sim.bodies[1].velocity;
        let outcome = sim.step(&mut NullSink)?;
        assert_eq!(outcome, StepOutcome::Terminated(Termination::QueueExhausted));
        assert_eq!(sim.bodies[1].velocity, before);
        assert_eq!(sim.stats().stale_discarded, 1);
        assert_eq!(sim.stats().wall, 0);
        Ok(())
    }

    #[test]
    fn negative_dt_is_skipped_as_anomaly() -> Result<()> {
        let mut sim = Simulation::new(
            vec![particle(1, 0.05, 0.0, 0.0, 0.0)?],
            obstacle()?,
            config(1.0),
        )?;
        sim.initialize(&mut NullSink)?;
        sim.time_now = 0.5;
        sim.queue
            .push(Event::new(0.25, EventKind::Wall, 1, None, 0, None)?);
        let outcome = sim.step(&mut NullSink)?;
        assert_eq!(outcome, StepOutcome::Terminated(Termination::QueueExhausted));
        assert_eq!(sim.stats().scheduling_anomalies, 1);
        assert_eq!(sim.time(), 1.0);
        Ok(())
    }

    #[test]
    fn simultaneous_hits_resolve_in_one_instant() -> Result<()> {
        // Two particles mirror-symmetric about the y axis reach the wall together.
        let mut sim = Simulation::new(
            vec![
                particle(1, 0.05, 0.0, 1.0, 0.0)?,
                particle(2, -0.05, 0.0, -1.0, 0.0)?,
            ],
            obstacle()?,
            config(0.06),
        )?;
        let mut snaps: Vec<OwnedSnapshot> = Vec::new();
        let outcome = sim.step(&mut snaps)?;
        match outcome {
            StepOutcome::Resolved { time, events } => {
                assert!((time - 0.049).abs() < 1e-12);
                assert_eq!(events, 2);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        // Initial snapshot plus one for the instant.
        assert_eq!(snaps.len(), 2);
        assert_eq!(sim.stats().wall, 2);
        Ok(())
    }

    #[test]
    fn chained_contacts_resolve_in_one_instant() -> Result<()> {
        // Three touching disks in a row; the first is moving into the other two.
        let mut sim = Simulation::new(
            vec![
                particle(1, -0.002, 0.05, 1.0, 0.0)?,
                particle(2, 0.0, 0.05, 0.0, 0.0)?,
                particle(3, 0.002, 0.05, 0.0, 0.0)?,
            ],
            obstacle()?,
            config(1.0),
        )?;
        let mut snaps: Vec<OwnedSnapshot> = Vec::new();
        let outcome = sim.step(&mut snaps)?;
        assert_eq!(outcome, StepOutcome::Resolved { time: 0.0, events: 2 });
        assert_eq!(snaps.len(), 2);
        assert_eq!(sim.stats().particle_particle, 2);
        assert!(sim.bodies[1].velocity.magnitude() < 1e-12);
        assert!(sim.bodies[2].velocity.magnitude() < 1e-12);
        assert!((sim.bodies[3].velocity - Vector2D::new(1.0, 0.0)).magnitude() < 1e-12);

        // Nothing else happens at t = 0.
        match sim.step(&mut snaps)? {
            StepOutcome::Resolved { time, .. } => assert!(time > 1e-3, "t = {time}"),
            StepOutcome::Terminated(_) => {}
        }
        Ok(())
    }

    #[test]
    fn rejects_bad_inputs() -> Result<()> {
        let dup = Simulation::new(
            vec![particle(1, 0.05, 0.0, 0.0, 0.0)?, particle(1, -0.05, 0.0, 0.0, 0.0)?],
            obstacle()?,
            config(1.0),
        );
        assert!(dup.unwrap_err().to_string().contains("duplicate"));

        let not_obstacle = Simulation::new(Vec::new(), particle(0, 0.0, 0.0, 0.0, 0.0)?, config(1.0));
        assert!(not_obstacle.is_err());

        let bad_cfg = Simulation::new(Vec::new(), obstacle()?, config(-1.0));
        assert!(bad_cfg.is_err());
        Ok(())
    }

    #[test]
    fn advance_to_stops_at_target_and_can_resume() -> Result<()> {
        let mut sim = Simulation::new(
            vec![particle(1, 0.05, 0.0, 1.0, 0.0)?],
            obstacle()?,
            config(1.0),
        )?;
        sim.advance_to(0.02, &mut NullSink)?;
        assert_eq!(sim.time(), 0.02);
        assert_eq!(sim.state(), SimulationState::Running);
        assert!((sim.bodies[1].position.x - 0.07).abs() < 1e-12);

        assert!(sim.advance_to(0.01, &mut NullSink).is_err());
        sim.advance_to(5.0, &mut NullSink)?;
        assert_eq!(sim.time(), 1.0);
        assert!(matches!(sim.state(), SimulationState::Terminated(_)));
        Ok(())
    }

    #[test]
    fn set_velocity_invalidates_old_predictions() -> Result<()> {
        let mut sim = Simulation::new(
            vec![particle(1, 0.05, 0.0, 1.0, 0.0)?],
            obstacle()?,
            config(1.0),
        )?;
        sim.initialize(&mut NullSink)?;
        sim.set_velocity(1, Vector2D::new(-1.0, 0.0))?;
        assert!(sim.set_velocity(OBSTACLE_INDEX, Vector2D::new(1.0, 0.0)).is_err());
        // The next resolved instant is the obstacle hit, not the old wall prediction.
        let outcome = sim.step(&mut NullSink)?;
        assert!(matches!(outcome, StepOutcome::Resolved { time, .. } if (time - 0.044).abs() < 1e-12));
        assert_eq!(sim.stats().obstacle, 1);
        Ok(())
    }
}
