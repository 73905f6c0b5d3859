//! Fit the fixed 800x400 playfield into the browser window

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Uniform scale and centering offsets for the game container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub left: f32,
    pub top: f32,
}

impl Viewport {
    /// Largest scale that keeps the aspect ratio, centered in the window
    pub fn fit(window_w: f32, window_h: f32) -> Self {
        let scale = (window_w / CANVAS_WIDTH).min(window_h / CANVAS_HEIGHT).max(0.0);
        Self {
            scale,
            left: (window_w - CANVAS_WIDTH * scale) / 2.0,
            top: (window_h - CANVAS_HEIGHT * scale) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_window_letterboxes_sides() {
        let vp = Viewport::fit(1600.0, 400.0);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.left, 400.0);
        assert_eq!(vp.top, 0.0);
    }

    #[test]
    fn test_tall_window_letterboxes_top() {
        let vp = Viewport::fit(400.0, 1000.0);
        assert_eq!(vp.scale, 0.5);
        assert_eq!(vp.left, 0.0);
        assert_eq!(vp.top, 400.0);
    }

    #[test]
    fn test_collapsed_window() {
        let vp = Viewport::fit(0.0, 0.0);
        assert_eq!(vp.scale, 0.0);
        assert_eq!((vp.left, vp.top), (0.0, 0.0));
    }
}
