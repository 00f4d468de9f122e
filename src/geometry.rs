use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A fixed circular obstacle. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vector2<f64>, radius: f64) -> Result<Self, Error> {
        if radius <= 0.0 {
            return Err(Error::InvalidRadius(radius));
        }
        Ok(Circle { center, radius })
    }

    /// Closed disk test. This is the single collision predicate shared by
    /// the standalone check and the stepping code.
    pub fn contains(&self, point: Vector2<f64>) -> bool {
        (self.center - point).norm() <= self.radius
    }

    /// Distance along `direction` from `origin` to the near intersection
    /// with this circle's boundary, solving a*t^2 + b*t + c = 0 with
    /// a = d.d, b = -2(center-o).d, c = (center-o).(center-o) - r^2.
    ///
    /// Returns `None` when the ray misses (negative discriminant). The
    /// smaller root is returned even when it is negative: an origin already
    /// inside the circle yields the entry point behind it, matching the
    /// stepping contract.
    pub fn ray_entry(&self, origin: Vector2<f64>, direction: Vector2<f64>) -> Option<f64> {
        let oc = self.center - origin;
        let a = direction.dot(&direction);
        let b = -2.0 * oc.dot(&direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        Some((-b - discriminant.sqrt()) / (2.0 * a))
    }

    /// Outward unit normal at a point on (or near) the boundary.
    pub fn normal_at(&self, point: Vector2<f64>) -> Vector2<f64> {
        ((point - self.center) / self.radius).normalize()
    }
}

/// Mirror `d` about the unit normal `n`: d' = d - 2(d.n)n. Preserves |d|.
pub fn reflect(d: Vector2<f64>, n: Vector2<f64>) -> Vector2<f64> {
    d - 2.0 * d.dot(&n) * n
}

/// Normalization that reports a zero-length input instead of emitting NaN.
pub fn unit(v: Vector2<f64>) -> Result<Vector2<f64>, Error> {
    v.try_normalize(0.0).ok_or(Error::ZeroDirection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(cx: f64, cy: f64, r: f64) -> Circle {
        Circle::new(Vector2::new(cx, cy), r).unwrap()
    }

    #[test]
    fn contains_is_a_closed_disk() {
        let c = circle(0.0, 400.0, 80.0);
        assert!(c.contains(Vector2::new(0.0, 400.0)));
        // Boundary point counts as inside
        assert!(c.contains(Vector2::new(0.0, 320.0)));
        assert!(!c.contains(Vector2::new(0.0, 319.9)));
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(Circle::new(Vector2::new(0.0, 0.0), 0.0).is_err());
        assert!(Circle::new(Vector2::new(0.0, 0.0), -1.0).is_err());
    }

    #[test]
    fn ray_entry_head_on() {
        let c = circle(0.0, 400.0, 80.0);
        let t = c
            .ray_entry(Vector2::new(0.0, 0.0), Vector2::new(0.0, 1.0))
            .unwrap();
        assert!((t - 320.0).abs() < 1e-9);
    }

    #[test]
    fn ray_entry_misses_sideways() {
        let c = circle(0.0, 400.0, 80.0);
        let t = c.ray_entry(Vector2::new(200.0, 0.0), Vector2::new(0.0, 1.0));
        assert!(t.is_none());
    }

    #[test]
    fn ray_entry_from_inside_takes_smaller_root() {
        let c = circle(0.0, 0.0, 80.0);
        // Origin at the center: roots are -80 and 80, the smaller one wins.
        let t = c
            .ray_entry(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0))
            .unwrap();
        assert!((t + 80.0).abs() < 1e-9);
    }

    #[test]
    fn unit_rejects_zero_vector() {
        assert!(unit(Vector2::new(0.0, 0.0)).is_err());
        let u = unit(Vector2::new(3.0, 4.0)).unwrap();
        assert!((u.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reflect_head_on_reverses() {
        let d = Vector2::new(0.0, 1.0);
        let n = Vector2::new(0.0, -1.0);
        let r = reflect(d, n);
        assert!((r.x).abs() < 1e-12);
        assert!((r.y + 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn reflection_law(
            dx in -1.0f64..1.0, dy in -1.0f64..1.0,
            nx in -1.0f64..1.0, ny in -1.0f64..1.0,
        ) {
            prop_assume!(dx * dx + dy * dy > 1e-6);
            prop_assume!(nx * nx + ny * ny > 1e-6);
            let d = Vector2::new(dx, dy);
            let n = unit(Vector2::new(nx, ny)).unwrap();
            let r = reflect(d, n);
            // Speed is preserved and the normal component is negated.
            prop_assert!((r.norm() - d.norm()).abs() < 1e-9);
            prop_assert!((r.dot(&n) + d.dot(&n)).abs() < 1e-9);
        }
    }
}
