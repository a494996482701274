//! In-memory raster implementation of [`Surface`].

use crate::{Point, Rect, Rgba, Surface};

/// Linear RGB triple stored per pixel.
type Pixel = [f32; 3];

/// An opaque RGB raster that blends every primitive source-over onto an
/// opaque background color.
///
/// A pixel is covered by a shape when the pixel's center lies inside it.
/// This keeps integer-aligned rectangles crisp and keeps every pixel
/// touched at most once per primitive.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    background: Rgba,
    pixels: Vec<Pixel>,
}

impl PixelCanvas {
    /// Create a canvas filled with `background` (its alpha is ignored).
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let mut canvas = Self {
            width,
            height,
            background,
            pixels: Vec::new(),
        };
        canvas.resize(width, height);
        canvas
    }

    /// The opaque color of the pixel at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.pixels[(y * self.width + x) as usize];
        Some(Rgba::rgb(
            r.round().clamp(0.0, 255.0) as u8,
            g.round().clamp(0.0, 255.0) as u8,
            b.round().clamp(0.0, 255.0) as u8,
        ))
    }

    /// Background color the canvas clears to.
    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Whether every pixel still holds the background color.
    pub fn is_blank(&self) -> bool {
        let bg = self.background_pixel();
        self.pixels.iter().all(|p| *p == bg)
    }

    fn background_pixel(&self) -> Pixel {
        [
            self.background.r as f32,
            self.background.g as f32,
            self.background.b as f32,
        ]
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if color.a <= 0.0 || x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let a = color.a.min(1.0);
        let dst = &mut self.pixels[(y as u32 * self.width + x as u32) as usize];
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = s * a + *d * (1.0 - a);
        }
    }

    /// Pixel index range whose centers fall in `[from, to)`, clipped to `limit`.
    fn span(from: f32, to: f32, limit: u32) -> std::ops::Range<i64> {
        let start = ((from - 0.5).ceil() as i64).max(0);
        let end = ((to - 0.5).ceil() as i64).min(limit as i64);
        start..end.max(start)
    }

    /// Visit every pixel whose center lies within `reach` of `center`'s
    /// bounding square, passing the pixel center.
    fn for_each_near(&mut self, center: Point, reach: f32, mut f: impl FnMut(&mut Self, i64, i64, Point)) {
        let xs = Self::span(center.x - reach, center.x + reach + 1.0, self.width);
        let ys = Self::span(center.y - reach, center.y + reach + 1.0, self.height);
        for y in ys {
            for x in xs.clone() {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                f(self, x, y, p);
            }
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f32, color_at: impl Fn(f32) -> Rgba) {
        let half = width.max(1.0) / 2.0;
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len_sq = dx * dx + dy * dy;

        let xs = Self::span(from.x.min(to.x) - half, from.x.max(to.x) + half + 1.0, self.width);
        let ys = Self::span(from.y.min(to.y) - half, from.y.max(to.y) + half + 1.0, self.height);
        for y in ys {
            for x in xs.clone() {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let t = if len_sq > 0.0 {
                    (((px - from.x) * dx + (py - from.y) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let cx = from.x + dx * t - px;
                let cy = from.y + dy * t - py;
                if cx * cx + cy * cy <= half * half {
                    self.blend(x, y, color_at(t));
                }
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background_pixel(); width as usize * height as usize];
    }

    fn clear(&mut self) {
        let bg = self.background_pixel();
        self.pixels.fill(bg);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let xs = Self::span(rect.x, rect.x + rect.width, self.width);
        let ys = Self::span(rect.y, rect.y + rect.height, self.height);
        for y in ys {
            for x in xs.clone() {
                self.blend(x, y, color);
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.stroke_segment(from, to, width, |_| color);
    }

    fn stroke_gradient_line(&mut self, from: Point, to: Point, width: f32, start: Rgba, end: Rgba) {
        self.stroke_segment(from, to, width, |t| start.lerp(end, t));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let mut covered = false;
        self.for_each_near(center, radius, |canvas, x, y, p| {
            let (dx, dy) = (p.x - center.x, p.y - center.y);
            if dx * dx + dy * dy <= radius * radius {
                canvas.blend(x, y, color);
                covered = true;
            }
        });
        // Sub-pixel dots still light the pixel they sit in, dimmed by area.
        if !covered {
            let area = (std::f32::consts::PI * radius * radius).min(1.0);
            let dimmed = color.with_alpha(color.a * area);
            self.blend(center.x.floor() as i64, center.y.floor() as i64, dimmed);
        }
    }

    fn fill_circle_gradient(&mut self, center: Point, radius: f32, start: Rgba, end: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let (left, top) = (center.x - radius, center.y - radius);
        self.for_each_near(center, radius, |canvas, x, y, p| {
            let (dx, dy) = (p.x - center.x, p.y - center.y);
            if dx * dx + dy * dy <= radius * radius {
                let t = ((p.x - left) + (p.y - top)) / (4.0 * radius);
                canvas.blend(x, y, start.lerp(end, t));
            }
        });
    }

    fn stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        width: f32,
        color: Rgba,
    ) {
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return;
        }
        let half = width.max(1.0) / 2.0;
        let (sin, cos) = rotation.sin_cos();
        self.for_each_near(center, radius_x.max(radius_y) + half, |canvas, x, y, p| {
            // Rotate into the ellipse's local frame.
            let (dx, dy) = (p.x - center.x, p.y - center.y);
            let lx = dx * cos + dy * sin;
            let ly = -dx * sin + dy * cos;
            let nx = lx / radius_x;
            let ny = ly / radius_y;
            let f = (nx * nx + ny * ny).sqrt();
            if f == 0.0 {
                return;
            }
            // First-order distance to the outline: |f - 1| / |grad f|.
            let gx = nx / (radius_x * f);
            let gy = ny / (radius_y * f);
            let grad = (gx * gx + gy * gy).sqrt();
            if grad > 0.0 && (f - 1.0).abs() / grad <= half {
                canvas.blend(x, y, color);
            }
        });
    }
}
