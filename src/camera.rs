#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Mapping between the on-screen surface and the fixed logical room.
///
/// `origin_x` / `origin_y` are the surface's on-screen offset in CSS pixels.
/// `zoom` is surface pixels per world unit and never exceeds 1.0, so the room
/// is shrunk to fit a narrow surface but never enlarged past native size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin_x: f64,
    pub origin_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Fit a room of `room_width` world units into a surface of
    /// `surface_width` CSS pixels placed at `(left, top)` on screen.
    #[must_use]
    pub fn fit(left: f64, top: f64, surface_width: f64, room_width: i32) -> Self {
        let zoom = if surface_width > 0.0 && room_width > 0 {
            (surface_width / f64::from(room_width)).min(1.0)
        } else {
            1.0
        };
        Self { origin_x: left, origin_y: top, zoom }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.origin_x) / self.zoom,
            y: (screen.y - self.origin_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.origin_x,
            y: world.y * self.zoom + self.origin_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}
