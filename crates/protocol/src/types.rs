use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The visible window onto a rendered timeline, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the vertical band `[top, bottom]` intersects this viewport.
    pub fn intersects_rows(&self, top: f64, bottom: f64) -> bool {
        bottom >= self.y && top <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_band_intersection() {
        let viewport = Viewport::new(0.0, 100.0, 400.0, 50.0);
        assert!(viewport.intersects_rows(90.0, 110.0));
        assert!(viewport.intersects_rows(149.0, 160.0));
        assert!(!viewport.intersects_rows(0.0, 99.0));
        assert!(!viewport.intersects_rows(151.0, 200.0));
    }
}
