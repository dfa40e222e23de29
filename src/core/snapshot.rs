use crate::core::body::Body;
use crate::core::vector::Vector2D;
use crate::error::Result;

/// Kinematic state of one body at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub id: u32,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl From<&Body> for BodyState {
    fn from(b: &Body) -> Self {
        Self {
            id: b.id,
            position: b.position,
            velocity: b.velocity,
        }
    }
}

/// Read-only view of the simulation at one resolved instant. The obstacle comes first.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Running snapshot number, starting at 0 for the initial state.
    pub index: u64,
    pub time: f64,
    bodies: &'a [Body],
}

impl<'a> Snapshot<'a> {
    pub fn new(index: u64, time: f64, bodies: &'a [Body]) -> Self {
        Self {
            index,
            time,
            bodies,
        }
    }

    pub fn bodies(&self) -> &'a [Body] {
        self.bodies
    }

    pub fn states(&self) -> impl Iterator<Item = BodyState> + 'a {
        self.bodies.iter().map(BodyState::from)
    }

    pub fn to_owned(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            index: self.index,
            time: self.time,
            bodies: self.states().collect(),
        }
    }
}

/// A detached copy of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedSnapshot {
    pub index: u64,
    pub time: f64,
    pub bodies: Vec<BodyState>,
}

/// Receives one snapshot per resolved instant. Sinks only observe; they cannot
/// reach back into the simulation.
pub trait SnapshotSink {
    fn record(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;

    /// Push buffered output to its destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn record(&mut self, _snapshot: &Snapshot<'_>) -> Result<()> {
        Ok(())
    }
}

impl SnapshotSink for Vec<OwnedSnapshot> {
    fn record(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        self.push(snapshot.to_owned());
        Ok(())
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn record(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        (**self).record(snapshot)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for Box<S> {
    fn record(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        (**self).record(snapshot)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Fans one snapshot out to two sinks.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: SnapshotSink, B: SnapshotSink> SnapshotSink for Tee<A, B> {
    fn record(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        self.0.record(snapshot)?;
        self.1.record(snapshot)
    }

    fn flush(&mut self) -> Result<()> {
        self.0.flush()?;
        self.1.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_copies_states() -> Result<()> {
        let bodies = vec![Body::particle(4, Vector2D::new(0.1, 0.2), Vector2D::new(1.0, 0.0), 0.01, 1.0)?];
        let mut sink: Vec<OwnedSnapshot> = Vec::new();
        sink.record(&Snapshot::new(0, 1.5, &bodies))?;
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].time, 1.5);
        assert_eq!(sink[0].bodies[0].id, 4);
        assert_eq!(sink[0].bodies[0].velocity, Vector2D::new(1.0, 0.0));
        Ok(())
    }

    #[test]
    fn tee_feeds_both_sinks() -> Result<()> {
        let bodies: Vec<Body> = Vec::new();
        let mut tee = Tee(Vec::<OwnedSnapshot>::new(), Vec::<OwnedSnapshot>::new());
        tee.record(&Snapshot::new(3, 0.0, &bodies))?;
        assert_eq!(tee.0.len(), 1);
        assert_eq!(tee.1[0].index, 3);
        Ok(())
    }
}
