//! Geometry for the picture-in-picture overlay

/// Width and height in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Create a new size, negative and non-finite values become 0
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
        }
    }
}

/// Top-left corner in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset from the viewport's left edge
    pub x: f64,
    /// Vertical offset from the viewport's top edge
    pub y: f64,
}

/// Position and size of the floating overlay
///
/// The overlay always stays fully inside the viewport unless the viewport is
/// smaller than the minimum overlay size, in which case it is pinned to the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    /// Top-left corner
    pub origin: Point,
    /// Current size
    pub size: Size,
}

impl OverlayGeometry {
    /// Place an overlay of `size` in the bottom-right corner of `viewport`
    #[must_use]
    pub fn docked(viewport: Size, size: Size, margin: f64) -> Self {
        let mut geometry = Self {
            origin: Point::default(),
            size,
        };
        geometry.fit_within(viewport, size);
        let x = viewport.width - geometry.size.width - margin;
        let y = viewport.height - geometry.size.height - margin;
        geometry.move_to(x, y, viewport);
        geometry
    }

    /// Drag the overlay so its corner lands at (`x`, `y`), kept inside the viewport
    pub fn move_to(&mut self, x: f64, y: f64, viewport: Size) {
        let max_x = (viewport.width - self.size.width).max(0.0);
        let max_y = (viewport.height - self.size.height).max(0.0);
        self.origin.x = finite_or(x, self.origin.x).clamp(0.0, max_x);
        self.origin.y = finite_or(y, self.origin.y).clamp(0.0, max_y);
    }

    /// Resize from the bottom-right handle
    ///
    /// The size never drops below `min` and never exceeds the viewport. If the
    /// new size would overflow the viewport the overlay slides back inside.
    pub fn resize(&mut self, width: f64, height: f64, min: Size, viewport: Size) {
        let width = finite_or(width, self.size.width);
        let height = finite_or(height, self.size.height);
        self.size.width = width.min(viewport.width).max(min.width);
        self.size.height = height.min(viewport.height).max(min.height);
        self.move_to(self.origin.x, self.origin.y, viewport);
    }

    /// Shrink and move the overlay after the viewport changed
    pub fn fit_within(&mut self, viewport: Size, min: Size) {
        self.resize(self.size.width, self.size.height, min, viewport);
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 720.0,
    };
    const MIN: Size = Size {
        width: 200.0,
        height: 112.0,
    };

    #[test]
    fn test_docked_bottom_right() {
        let geometry = OverlayGeometry::docked(VIEWPORT, Size::new(320.0, 180.0), 16.0);
        assert_eq!(geometry.origin, Point { x: 944.0, y: 524.0 });
        assert_eq!(geometry.size, Size::new(320.0, 180.0));
    }

    #[test]
    fn test_move_clamped_to_viewport() {
        let mut geometry = OverlayGeometry::docked(VIEWPORT, Size::new(320.0, 180.0), 16.0);

        geometry.move_to(-50.0, 10_000.0, VIEWPORT);
        assert_eq!(geometry.origin, Point { x: 0.0, y: 540.0 });

        geometry.move_to(f64::NAN, 100.0, VIEWPORT);
        assert_eq!(geometry.origin, Point { x: 0.0, y: 100.0 });
    }

    #[test]
    fn test_resize_respects_minimum() {
        let mut geometry = OverlayGeometry::docked(VIEWPORT, Size::new(320.0, 180.0), 16.0);
        geometry.resize(50.0, 20.0, MIN, VIEWPORT);
        assert_eq!(geometry.size, MIN);
    }

    #[test]
    fn test_resize_slides_back_inside() {
        let mut geometry = OverlayGeometry::docked(VIEWPORT, Size::new(320.0, 180.0), 16.0);
        geometry.resize(640.0, 360.0, MIN, VIEWPORT);

        assert_eq!(geometry.size, Size::new(640.0, 360.0));
        assert!(geometry.origin.x + geometry.size.width <= VIEWPORT.width);
        assert!(geometry.origin.y + geometry.size.height <= VIEWPORT.height);
    }

    #[test]
    fn test_fit_within_smaller_viewport() {
        let mut geometry = OverlayGeometry::docked(VIEWPORT, Size::new(320.0, 180.0), 16.0);
        let phone = Size::new(300.0, 500.0);
        geometry.fit_within(phone, MIN);

        assert_eq!(geometry.size.width, 300.0);
        assert_eq!(geometry.origin.x, 0.0);
        assert!(geometry.origin.y + geometry.size.height <= phone.height);
    }

    #[test]
    fn test_size_sanitized() {
        assert_eq!(Size::new(-1.0, f64::INFINITY), Size::new(0.0, 0.0));
    }
}
