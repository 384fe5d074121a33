// src/geometry.rs

use std::ops::{Add, Div, Mul, Sub};

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

/// A 2D point, also used as a displacement/direction vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 2D cross product (z component of the 3D cross).
    pub fn cross(&self, other: &Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotated 90 degrees counter-clockwise.
    pub fn perp(&self) -> Point2 {
        DVec2::from(*self).perp().into()
    }

    /// Unit vector in the same direction, or `None` for a zero-length (or
    /// non-finite) vector.
    pub fn try_normalize(&self) -> Option<Point2> {
        DVec2::from(*self).try_normalize().map(Point2::from)
    }

    pub fn normalize_or_zero(&self) -> Point2 {
        DVec2::from(*self).normalize_or_zero().into()
    }

    /// Halves before adding so large finite endpoints don't overflow.
    pub fn midpoint(&self, other: Point2) -> Point2 {
        *self * 0.5 + other * 0.5
    }

    pub fn distance(&self, other: Point2) -> f64 {
        (other - *self).length()
    }

    /// Unsigned distance from `self` to the infinite line through `a` and `b`.
    /// Falls back to the distance to `a` when the line is degenerate.
    pub fn distance_to_line(&self, a: Point2, b: Point2) -> f64 {
        let dir = b - a;
        let len = dir.length();
        if len == 0.0 {
            return self.distance(a);
        }
        dir.cross(&(*self - a)).abs() / len
    }
}

impl From<DVec2> for Point2 {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2> for DVec2 {
    fn from(p: Point2) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;
    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point2 {
    type Output = Point2;
    fn div(self, rhs: f64) -> Point2 {
        Point2::new(self.x / rhs, self.y / rhs)
    }
}
