use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

use platescan::Point2f;

/// Frame dimensions matching the reference capture resolution.
pub const FRAME_WIDTH: u32 = 320;
pub const FRAME_HEIGHT: u32 = 240;

pub fn blank_frame() -> GrayImage {
    GrayImage::new(FRAME_WIDTH, FRAME_HEIGHT)
}

/// Corners of a `width` x `height` rectangle centered at `(cx, cy)` with
/// its long axis rotated by `angle_deg`, in convex winding order.
pub fn rotated_rect_corners(
    cx: f32,
    cy: f32,
    width: f32,
    height: f32,
    angle_deg: f32,
) -> Vec<Point2f> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (half_w, half_h) = (width / 2.0, height / 2.0);
    [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)]
        .iter()
        .map(|&(su, sv)| {
            let u = su * half_w;
            let v = sv * half_h;
            Point2f::new(cx + u * cos - v * sin, cy + u * sin + v * cos)
        })
        .collect()
}

/// Fill the quadrilateral with the given intensity.
pub fn draw_quad(frame: &mut GrayImage, corners: &[Point2f], value: u8) {
    let polygon: Vec<Point<i32>> = corners
        .iter()
        .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
        .collect();
    draw_polygon_mut(frame, &polygon, Luma([value]));
}
