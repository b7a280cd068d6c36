//! Viewport and row geometry snapshots.

use serde::{Deserialize, Serialize};

/// Scroll state of the grid container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Vertical scroll offset of the container
    pub scroll_top: f64,
    /// Visible height of the container
    pub client_height: f64,
    /// Total height of the scrollable content
    pub scroll_height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// Bottom edge of the visible area in content coordinates.
    pub fn bottom(&self) -> f64 {
        self.scroll_top + self.client_height
    }

    /// Largest `scroll_top` the content allows.
    pub fn max_scroll_top(&self) -> f64 {
        self.scroll_height - self.client_height
    }

    /// True when content height differs from the visible height.
    pub fn is_scrollable(&self) -> bool {
        (self.scroll_height - self.client_height).abs() > f64::EPSILON
    }

    pub fn can_scroll_up(&self) -> bool {
        self.scroll_top > 0.0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.scroll_top < self.max_scroll_top()
    }

    /// Clamp an offset to the range the container can actually scroll to.
    pub fn clamp_scroll_top(&self, offset: f64) -> f64 {
        offset.min(self.max_scroll_top()).max(0.0)
    }

    /// Set absolute scroll position, clamped like a browser would.
    pub fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = self.clamp_scroll_top(offset);
    }
}

/// Position of a row relative to the grid's scrollable area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RowGeometry {
    pub top: f64,
    pub height: f64,
}

impl RowGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_bounds() {
        let viewport = Viewport::new(50.0, 100.0, 300.0);
        assert_eq!(viewport.bottom(), 150.0);
        assert_eq!(viewport.max_scroll_top(), 200.0);
        assert!(viewport.is_scrollable());
        assert!(viewport.can_scroll_up());
        assert!(viewport.can_scroll_down());
    }

    #[test]
    fn test_not_scrollable_when_content_fits() {
        let viewport = Viewport::new(0.0, 100.0, 100.0);
        assert!(!viewport.is_scrollable());
        assert!(!viewport.can_scroll_up());
        assert!(!viewport.can_scroll_down());
    }

    #[test]
    fn test_set_scroll_top_clamps() {
        let mut viewport = Viewport::new(0.0, 100.0, 300.0);
        viewport.set_scroll_top(1000.0);
        assert_eq!(viewport.scroll_top, 200.0);
        viewport.set_scroll_top(-20.0);
        assert_eq!(viewport.scroll_top, 0.0);

        // Content shorter than the container never scrolls.
        let mut short = Viewport::new(0.0, 100.0, 40.0);
        short.set_scroll_top(30.0);
        assert_eq!(short.scroll_top, 0.0);
    }

    #[test]
    fn test_row_bottom() {
        assert_eq!(RowGeometry::new(30.0, 20.0).bottom(), 50.0);
    }
}
