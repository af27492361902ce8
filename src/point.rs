use std::ops::{Add, Sub};

/// Side length of the square playfield, both axes span `[0, MAP_SIZE]`.
pub const MAP_SIZE: i32 = 10000;
pub const MAP_CENTER: i32 = MAP_SIZE / 2;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn len(self) -> f64 {
        let (x, y) = (self.x as f64, self.y as f64);
        ((x * x) + (y * y)).sqrt()
    }

    /// Euclidean distance, symmetric and zero only for equal points.
    pub fn dist(self, other: Point) -> f64 {
        (other - self).len()
    }

    pub fn is_valid(self) -> bool {
        (0..=MAP_SIZE).contains(&self.x) && (0..=MAP_SIZE).contains(&self.y)
    }

    pub fn clamp(self, lt: Point, rb: Point) -> Point {
        let x = self.x.clamp(lt.x, rb.x);
        let y = self.y.clamp(lt.y, rb.y);
        Point { x, y }
    }

    pub fn clamp_to_map(self) -> Point {
        self.clamp(Point::new(0, 0), Point::new(MAP_SIZE, MAP_SIZE))
    }

    /// Moves at most `max_dist` from `self` towards `to`.
    ///
    /// Targets within reach are returned as is. Otherwise the point is scaled
    /// onto the segment, truncated to the grid and clamped per axis, so the
    /// effective heading may bend near the map border.
    pub fn step_toward(self, to: Point, max_dist: f64) -> Point {
        let dist = self.dist(to);
        if dist <= max_dist {
            return to;
        }

        let ratio = max_dist / dist;
        let delta = to - self;
        let x = (self.x as f64 + delta.x as f64 * ratio) as i32;
        let y = (self.y as f64 + delta.y as f64 * ratio) as i32;

        Point { x, y }.clamp_to_map()
    }
}
