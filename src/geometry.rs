//! Plain 2D vector used for laying out dashes and arrow heads.

use embedded_graphics::prelude::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.magnitude();
        if len > f64::EPSILON {
            Some(self.scale(1.0 / len))
        } else {
            None
        }
    }

    /// Rotated counter-clockwise by `radians` (in screen space, where y
    /// points down, this turns clockwise).
    pub fn rotate(self, radians: f64) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        self.add(other.subtract(self).scale(0.5))
    }

    /// Nearest pixel.
    pub fn to_point(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(f64::from(p.x), f64::from(p.y))
    }
}
