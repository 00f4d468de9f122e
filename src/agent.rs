use image::Rgb;
use nalgebra::Vector2;

use crate::error::Error;
use crate::geometry::{self, Circle};

/// A moving point with a color and a unit direction vector. The direction
/// stays unit length: it is normalized at construction and reflection
/// preserves the norm.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub color: Rgb<u8>,
    pub position: Vector2<f64>,
    pub direction: Vector2<f64>,
}

impl Agent {
    pub fn new(
        color: Rgb<u8>,
        position: Vector2<f64>,
        direction: Vector2<f64>,
    ) -> Result<Self, Error> {
        Ok(Agent {
            color,
            position,
            direction: geometry::unit(direction)?,
        })
    }

    /// Standalone collision predicate against a single obstacle.
    pub fn collides(&self, circle: &Circle) -> bool {
        circle.contains(self.position)
    }

    /// One tick of motion. The candidate position is `pos + dt * dir`; the
    /// first obstacle (in slice order) containing it wins the tick. On a
    /// hit the agent is placed on the entry point of the boundary and its
    /// direction is mirrored about the surface normal there. At most one
    /// obstacle is resolved per tick.
    ///
    /// When the candidate is inside an obstacle but the ray has no real
    /// intersection (negative discriminant), the tick is still consumed:
    /// position and direction stay unchanged and no full step is taken.
    pub fn advance(&mut self, dt: f64, obstacles: &[Circle]) {
        let candidate = self.position + dt * self.direction;

        for circle in obstacles {
            if !circle.contains(candidate) {
                continue;
            }
            if let Some(t) = circle.ray_entry(self.position, self.direction) {
                let entry = self.position + t * self.direction;
                self.position = entry;
                self.direction = geometry::reflect(self.direction, circle.normal_at(entry));
            }
            return;
        }

        self.position = candidate;
    }

    /// Velocity-flip border policy: past `width / 2` in |x| flips the x
    /// component, past `height / 2` in |y| flips the y component. The two
    /// checks are independent and the position is never clamped, so an
    /// agent past a boundary keeps flipping until it moves back inside.
    pub fn reflect_border(&mut self, width: f64, height: f64) {
        if self.position.x.abs() >= width / 2.0 {
            self.direction.x = -self.direction.x;
        }
        if self.position.y.abs() >= height / 2.0 {
            self.direction.y = -self.direction.y;
        }
    }
}
