/// Bits per axis of the global tile-coordinate space
pub const TILE_COORD_BITS: u32 = 31;

/// Deepest zoom level addressable in 31-bit tile coordinates
pub const MAX_ZOOM_LEVEL: u32 = TILE_COORD_BITS;

const TILE_COORD_MASK: i32 = i32::MAX;

/// Integer point, used both for 31-bit tile coordinates and pixel sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PointI {
    pub x: i32,
    pub y: i32,
}

impl PointI {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Wrap both axes into `[0, 2^31)`
    pub const fn wrapped31(self) -> Self {
        Self {
            x: self.x & TILE_COORD_MASK,
            y: self.y & TILE_COORD_MASK,
        }
    }

    /// Component-wise wrapping subtraction
    pub const fn wrapping_sub(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_sub(dx),
            y: self.y.wrapping_sub(dy),
        }
    }
}

/// Axis-aligned pixel rectangle (the viewport)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AreaI {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl AreaI {
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Center of the rectangle in pixels
    pub fn center(&self) -> (f32, f32) {
        (
            self.left as f32 + self.width() as f32 * 0.5,
            self.top as f32 + self.height() as f32 * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped31_keeps_in_range_values() {
        let p = PointI::new(1102430866, 704978668);
        assert_eq!(p.wrapped31(), p);
    }

    #[test]
    fn test_wrapped31_negative_wraps_to_top() {
        let p = PointI::new(-1, -2).wrapped31();
        assert_eq!(p.x, i32::MAX);
        assert_eq!(p.y, i32::MAX - 1);
    }

    #[test]
    fn test_wrapping_sub_then_wrap() {
        let p = PointI::new(5, 0).wrapping_sub(10, -3).wrapped31();
        assert_eq!(p.x, i32::MAX - 4);
        assert_eq!(p.y, 3);
    }

    #[test]
    fn test_area_dimensions() {
        let area = AreaI::new(0, 0, 600, 800);
        assert_eq!(area.width(), 800);
        assert_eq!(area.height(), 600);
        assert_eq!(area.center(), (400.0, 300.0));
    }
}
