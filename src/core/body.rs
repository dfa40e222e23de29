use crate::core::vector::Vector2D;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How an obstacle responds to contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    /// Never moves; reflects particles like an infinite-mass circular wall.
    Static,
    /// Finite mass; exchanges momentum like any other disk.
    Movable,
}

/// Role of a body in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Particle,
    Obstacle(ObstacleKind),
}

/// A rigid disk: either a mobile particle or the central obstacle.
///
/// Fields:
/// - `id`: stable identifier (the obstacle is conventionally 0)
/// - `position`, `velocity`: kinematic state
/// - `radius`: disk radius (> 0)
/// - `mass`: mass (> 0); ignored for a static obstacle
/// - `kind`: particle or obstacle variant
/// - `collision_count`: incremented once per collision the body takes part in
#[derive(Debug, Clone)]
pub struct Body {
    pub id: u32,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub mass: f64,
    pub kind: BodyKind,
    collision_count: u64,
}

impl Body {
    /// Create a mobile particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any component is NaN/inf.
    pub fn particle(
        id: u32,
        position: Vector2D,
        velocity: Vector2D,
        radius: f64,
        mass: f64,
    ) -> Result<Self> {
        Self::validated(id, position, velocity, radius, mass, BodyKind::Particle)
    }

    /// Create an obstacle. A static obstacle is stored at rest whatever `velocity` is given.
    pub fn obstacle(
        id: u32,
        position: Vector2D,
        velocity: Vector2D,
        radius: f64,
        mass: f64,
        kind: ObstacleKind,
    ) -> Result<Self> {
        let velocity = match kind {
            ObstacleKind::Static => Vector2D::ZERO,
            ObstacleKind::Movable => velocity,
        };
        Self::validated(id, position, velocity, radius, mass, BodyKind::Obstacle(kind))
    }

    fn validated(
        id: u32,
        position: Vector2D,
        velocity: Vector2D,
        radius: f64,
        mass: f64,
        kind: BodyKind,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !position.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            id,
            position,
            velocity,
            radius,
            mass,
            kind,
            collision_count: 0,
        })
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Obstacle(ObstacleKind::Static)
    }

    #[inline]
    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, BodyKind::Obstacle(_))
    }

    /// Collision participation counter (used for event invalidation).
    #[inline]
    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    #[inline]
    pub fn bump_collision_count(&mut self) {
        self.collision_count = self.collision_count.saturating_add(1);
    }

    /// Returns the body's kinetic energy: 1/2 m |v|^2 (zero for a static obstacle).
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static() {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    /// Linear momentum (zero for a static obstacle).
    pub fn momentum(&self) -> Vector2D {
        if self.is_static() {
            return Vector2D::ZERO;
        }
        self.velocity * self.mass
    }

    /// Straight-line motion over `dt`. No-op for a static obstacle.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }
        self.position = self.position + self.velocity * dt;
    }

    /// Relative time until this disk touches `other`, or `f64::INFINITY` if they never do.
    ///
    /// Solves `|Δr + Δv t| = σ` for the earliest root; separating or grazing pairs,
    /// negative discriminants and negative or non-finite roots are all "no collision".
    /// A closing pair that already touches or overlaps returns `0.0`.
    pub fn time_to_hit(&self, other: &Body) -> f64 {
        if self.id == other.id {
            return f64::INFINITY;
        }
        let dr = other.position - self.position;
        let dv = other.velocity - self.velocity;
        let dvdr = dv.dot(&dr);
        if dvdr >= 0.0 {
            return f64::INFINITY;
        }
        let dvdv = dv.dot(&dv);
        let drdr = dr.dot(&dr);
        let sigma = self.radius + other.radius;
        // Already in contact and still closing: resolve now, before they pass through.
        if drdr <= sigma * sigma {
            return 0.0;
        }
        let d = dvdr * dvdr - dvdv * (drdr - sigma * sigma);
        if d < 0.0 {
            return f64::INFINITY;
        }
        let t = -(dvdr + d.sqrt()) / dvdv;
        if !t.is_finite() || t < 0.0 {
            return f64::INFINITY;
        }
        t
    }

    /// Relative time until this disk touches a circular wall of radius `container_radius`
    /// centred at the origin, or `f64::INFINITY`.
    ///
    /// The centre is confined to a circle of radius `container_radius - radius`. Only roots
    /// where the centre is heading outward count; from inside the circle that is the
    /// smallest strictly positive root. A centre on or beyond the circle that is moving
    /// outward returns `0.0`.
    pub fn time_to_hit_circular_boundary(&self, container_radius: f64) -> f64 {
        let r = self.position;
        let v = self.velocity;
        let effective_radius = container_radius - self.radius;

        let a = v.dot(&v);
        if a == 0.0 {
            return f64::INFINITY;
        }
        let b = 2.0 * r.dot(&v);
        let c = r.dot(&r) - effective_radius * effective_radius;
        // On or just past the reachable circle and heading out: the hit is now.
        if c >= 0.0 && b > 0.0 {
            return 0.0;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return f64::INFINITY;
        }
        let sqrt_d = discriminant.sqrt();
        // The "-" root is where the centre enters the circle; the wall is hit on the way out.
        let t = (-b + sqrt_d) / (2.0 * a);
        if t > 0.0 && t.is_finite() {
            t
        } else {
            f64::INFINITY
        }
    }

    /// Resolve contact with `other` and return the magnitude of the exchanged impulse.
    ///
    /// Two finite-mass disks exchange an elastic impulse along the line of centres.
    /// Against a static obstacle the moving disk is reflected specularly about the
    /// obstacle's outward normal and only its counter is bumped.
    pub fn bounce_off(&mut self, other: &mut Body) -> f64 {
        match (self.is_static(), other.is_static()) {
            (true, true) => 0.0,
            (true, false) => other.reflect_off(self),
            (false, true) => self.reflect_off(other),
            (false, false) => self.exchange_impulse(other),
        }
    }

    fn exchange_impulse(&mut self, other: &mut Body) -> f64 {
        let dr = other.position - self.position;
        let dv = other.velocity - self.velocity;
        let dvdr = dv.dot(&dr);
        let sigma = self.radius + other.radius;
        // At contact |Δr| == σ; the measured distance keeps the exchange elastic
        // when drift repair has left the pair slightly off contact.
        let dist = match dr.magnitude() {
            d if d > 0.0 && d.is_finite() => d,
            _ => sigma,
        };

        let (m1, m2) = (self.mass, other.mass);
        let j = 2.0 * m1 * m2 * dvdr / (dist * (m1 + m2));
        let impulse = dr * (j / dist);

        self.velocity = self.velocity + impulse / m1;
        other.velocity = other.velocity - impulse / m2;

        self.bump_collision_count();
        other.bump_collision_count();
        j.abs()
    }

    fn reflect_off(&mut self, fixed: &Body) -> f64 {
        let normal = (self.position - fixed.position).direction();
        let v_n = self.velocity.dot(&normal);
        self.velocity = self.velocity.reflect(&normal);
        self.bump_collision_count();
        2.0 * self.mass * v_n.abs()
    }

    /// Specular reflection off the arena wall about the radial normal.
    ///
    /// Returns the impulse delivered to the wall. If drift carried the centre past
    /// the reachable circle it is clamped back onto it.
    pub fn bounce_off_circular_boundary(&mut self, container_radius: f64) -> f64 {
        let normal = self.position.direction();
        let v_n = self.velocity.dot(&normal);
        self.velocity = self.velocity.reflect(&normal);
        self.bump_collision_count();

        let effective_radius = container_radius - self.radius;
        if self.position.magnitude() > effective_radius {
            self.position = normal * effective_radius;
        }
        2.0 * self.mass * v_n.abs()
    }
}
