//! Plain pixel-space geometry.

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink the rectangle by `amount` on every side.
    pub fn inset(self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - amount * 2.0,
            height: self.height - amount * 2.0,
        }
    }
}

/// The drawable area an engine is sized to, plus the page scroll offset
/// used for parallax.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Vertical page scroll in pixels. Never reset by a resize.
    pub scroll_offset: f32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scroll_offset: 0.0,
        }
    }

    /// Width and height as floats for pixel math.
    pub fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// Change the size, keeping the scroll offset.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Whether `point` lies strictly inside the viewport grown by `margin`
    /// on every side.
    pub fn contains_expanded(&self, point: Point, margin: f32) -> bool {
        let (width, height) = self.size();
        point.x > -margin
            && point.x < width + margin
            && point.y > -margin
            && point.y < height + margin
    }
}
