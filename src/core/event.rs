use crate::error::{Error, Result};
use ordered_float::NotNan;

/// What a predicted collision involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Two mobile particles.
    ParticleParticle,
    /// A body and the arena wall (`b` is `None`).
    Wall,
    /// A particle and the obstacle.
    Obstacle,
}

/// A predicted collision.
///
/// - `time`: absolute occurrence time (finite, non-NaN).
/// - `a`, `b`: body indices; `b == None` stands for the arena wall.
/// - `count_a`, `count_b`: collision-count snapshots taken at prediction time.
///
/// Events are never mutated once created; a later collision of either participant
/// makes them stale instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: NotNan<f64>,
    pub kind: EventKind,
    pub a: usize,
    pub b: Option<usize>,
    pub count_a: u64,
    pub count_b: Option<u64>,
}

impl Event {
    /// Create a new event, validating that time is finite and non-NaN.
    pub fn new(
        time: f64,
        kind: EventKind,
        a: usize,
        b: Option<usize>,
        count_a: u64,
        count_b: Option<u64>,
    ) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidParam(format!(
                "event time must be finite, got {time}"
            )));
        }
        let time = NotNan::new(time)
            .map_err(|_| Error::InvalidParam("event time cannot be NaN".into()))?;
        if (kind == EventKind::Wall) != b.is_none() {
            return Err(Error::InvalidParam(
                "wall events have exactly one participant".into(),
            ));
        }
        if b == Some(a) {
            return Err(Error::InvalidParam(
                "a body cannot collide with itself".into(),
            ));
        }
        Ok(Self {
            time,
            kind,
            a,
            b,
            count_a,
            count_b,
        })
    }

    /// Returns the raw f64 event time.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }

    /// Validate against current collision counts. For a wall event pass `None` for `count_b_now`.
    #[inline]
    pub fn is_valid(&self, count_a_now: u64, count_b_now: Option<u64>) -> bool {
        if self.count_a != count_a_now {
            return false;
        }
        match (self.count_b, count_b_now) {
            (Some(then), Some(now)) => then == now,
            (None, _) => true,
            // The event expected a second participant but none is provided now.
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EventKind::{ParticleParticle, Wall};

    #[test]
    fn new_event_rejects_non_finite_time() {
        let err = Event::new(f64::NAN, ParticleParticle, 1, Some(2), 0, Some(0)).unwrap_err();
        assert!(err.to_string().contains("finite"));
        assert!(Event::new(f64::INFINITY, Wall, 1, None, 0, None).is_err());
    }

    #[test]
    fn wall_events_have_no_second_participant() {
        assert!(Event::new(1.0, Wall, 1, Some(2), 0, Some(0)).is_err());
        assert!(Event::new(1.0, ParticleParticle, 1, None, 0, None).is_err());
    }

    #[test]
    fn is_valid_checks_collision_counts() -> Result<()> {
        let pp = Event::new(1.0, ParticleParticle, 1, Some(2), 10, Some(20))?;
        assert!(pp.is_valid(10, Some(20)));
        assert!(!pp.is_valid(11, Some(20)));
        assert!(!pp.is_valid(10, Some(21)));
        assert!(!pp.is_valid(10, None));

        let wall = Event::new(1.0, Wall, 3, None, 7, None)?;
        assert!(wall.is_valid(7, None));
        assert!(!wall.is_valid(8, None));
        Ok(())
    }
}
