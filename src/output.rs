//! Snapshot sinks that live outside the engine.

use crate::core::{BodyKind, ObstacleKind, PressureSample, Snapshot, SnapshotSink, Vector2D};
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Plain-text trajectory writer.
///
/// Per snapshot: a header `e<k> <time>` followed by one `p<id> x y vx vy` line per body,
/// obstacle first.
#[derive(Debug)]
pub struct SnapshotWriter<W: Write> {
    out: W,
}

impl SnapshotWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SnapshotSink for SnapshotWriter<W> {
    fn record(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        writeln!(self.out, "e{} {:.5}", snapshot.index, snapshot.time)?;
        for s in snapshot.states() {
            writeln!(
                self.out,
                "p{} {:.6} {:.6} {:.6} {:.6}",
                s.id, s.position.x, s.position.y, s.velocity.x, s.velocity.y
            )?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Records the trajectory of a movable obstacle for displacement statistics.
/// A static obstacle never moves and is not recorded.
#[derive(Debug, Default, Clone)]
pub struct ObstacleTracker {
    times: Vec<f64>,
    positions: Vec<Vector2D>,
}

impl ObstacleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn positions(&self) -> &[Vector2D] {
        &self.positions
    }

    /// Squared displacement from the first recorded position, one value per record.
    pub fn squared_displacements(&self) -> Vec<f64> {
        let Some(&origin) = self.positions.first() else {
            return Vec::new();
        };
        self.positions
            .iter()
            .map(|p| (*p - origin).magnitude_squared())
            .collect()
    }
}

impl SnapshotSink for ObstacleTracker {
    fn record(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let movable = snapshot
            .bodies()
            .iter()
            .find(|b| b.kind == BodyKind::Obstacle(ObstacleKind::Movable));
        if let Some(obstacle) = movable {
            self.times.push(snapshot.time);
            self.positions.push(obstacle.position);
        }
        Ok(())
    }
}

/// Write `time wall_pressure obstacle_pressure` rows with a header line.
pub fn write_pressure_series<W: Write>(out: &mut W, series: &[PressureSample]) -> Result<()> {
    writeln!(out, "time pressure_walls pressure_obstacle")?;
    for s in series {
        writeln!(out, "{:.5} {:.6} {:.6}", s.start, s.wall, s.obstacle)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Body;

    #[test]
    fn writer_emits_header_and_one_line_per_body() -> Result<()> {
        let bodies = vec![
            Body::obstacle(0, Vector2D::ZERO, Vector2D::ZERO, 0.005, 1.0, ObstacleKind::Static)?,
            Body::particle(1, Vector2D::new(0.01, -0.02), Vector2D::new(1.0, 0.0), 0.001, 1.0)?,
        ];
        let mut w = SnapshotWriter::new(Vec::new());
        w.record(&Snapshot::new(0, 0.25, &bodies))?;
        let text = String::from_utf8(w.into_inner()).unwrap_or_default();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "e0 0.25000");
        assert_eq!(lines[1], "p0 0.000000 0.000000 0.000000 0.000000");
        assert_eq!(lines[2], "p1 0.010000 -0.020000 1.000000 0.000000");
        Ok(())
    }

    #[test]
    fn tracker_ignores_static_obstacle() -> Result<()> {
        let still = vec![Body::obstacle(0, Vector2D::ZERO, Vector2D::ZERO, 0.005, 1.0, ObstacleKind::Static)?];
        let mut t = ObstacleTracker::new();
        t.record(&Snapshot::new(0, 0.0, &still))?;
        assert!(t.positions().is_empty());

        let mut moving = vec![Body::obstacle(0, Vector2D::ZERO, Vector2D::ZERO, 0.005, 3.0, ObstacleKind::Movable)?];
        t.record(&Snapshot::new(0, 0.0, &moving))?;
        moving[0].position = Vector2D::new(0.003, 0.004);
        t.record(&Snapshot::new(1, 1.0, &moving))?;
        let msd = t.squared_displacements();
        assert_eq!(msd.len(), 2);
        assert_eq!(msd[0], 0.0);
        assert!((msd[1] - 2.5e-5).abs() < 1e-15);
        assert_eq!(t.times(), &[0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn pressure_rows_follow_header() -> Result<()> {
        let mut buf = Vec::new();
        write_pressure_series(
            &mut buf,
            &[PressureSample { start: 0.0, wall: 1.5, obstacle: 0.25 }],
        )?;
        let text = String::from_utf8(buf).unwrap_or_default();
        assert_eq!(text, "time pressure_walls pressure_obstacle\n0.00000 1.500000 0.250000\n");
        Ok(())
    }
}
