//! The drawing surface engines paint onto.

use crate::{Point, Rect, Rgba};

/// A resizable 2-D drawing surface.
///
/// Coordinates are pixels with the origin at the top-left corner. Colors
/// are blended source-over onto whatever is already on the surface.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Resize the surface, discarding its contents.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset every pixel to the surface background.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Stroke a straight line of the given width.
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba);

    /// Stroke a line whose color ramps linearly from `start` at `from` to
    /// `end` at `to`.
    fn stroke_gradient_line(&mut self, from: Point, to: Point, width: f32, start: Rgba, end: Rgba);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Fill a circle with a linear gradient running from the top-left of its
    /// bounding box (`start`) to the bottom-right (`end`).
    fn fill_circle_gradient(&mut self, center: Point, radius: f32, start: Rgba, end: Rgba);

    /// Stroke the outline of an ellipse rotated by `rotation` radians.
    fn stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        width: f32,
        color: Rgba,
    );
}
