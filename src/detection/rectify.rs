use image::imageops::crop_imm;
use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{Interpolation, rotate};

use crate::models::{PlateCandidate, Point2f};

/// How a candidate's pixel region is turned into an upright patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectifyStrategy {
    /// Crop the candidate's upright bounding box, ignoring rotation.
    /// Cheap, and accurate enough for small skew angles.
    #[default]
    Crop,
    /// Rotate the frame about the candidate center so the plate's long
    /// axis lands horizontal, then extract the patch at sub-pixel accuracy.
    Deskew,
}

/// Extract the candidate's region from the frame as an upright patch.
///
/// Returns `None` when the extraction window falls outside the frame
/// bounds; the caller treats that frame as having no candidate.
pub fn rectify(
    frame: &GrayImage,
    candidate: &PlateCandidate,
    strategy: RectifyStrategy,
) -> Option<GrayImage> {
    match strategy {
        RectifyStrategy::Crop => crop_upright(frame, candidate),
        RectifyStrategy::Deskew => deskew(frame, candidate),
    }
}

fn crop_upright(frame: &GrayImage, candidate: &PlateCandidate) -> Option<GrayImage> {
    let (x, y, w, h) = candidate.rect.bounding_box();
    let x0 = x.floor();
    let y0 = y.floor();
    let x1 = (x + w).ceil();
    let y1 = (y + h).ceil();
    if x0 < 0.0 || y0 < 0.0 || x1 > frame.width() as f32 || y1 > frame.height() as f32 {
        return None;
    }

    let width = (x1 - x0) as u32;
    let height = (y1 - y0) as u32;
    if width == 0 || height == 0 {
        return None;
    }
    Some(crop_imm(frame, x0 as u32, y0 as u32, width, height).to_image())
}

fn deskew(frame: &GrayImage, candidate: &PlateCandidate) -> Option<GrayImage> {
    // min-area rectangles report angles in [-90, 0); unwrap past -45 and
    // put the long axis horizontal before sampling, swapping the patch
    // dimensions at each quarter turn
    let mut axis = candidate.rect.angle;
    let mut width = candidate.rect.size.width;
    let mut height = candidate.rect.size.height;
    if axis < -45.0 {
        axis += 90.0;
        std::mem::swap(&mut width, &mut height);
    }
    if height > width {
        axis += 90.0;
        std::mem::swap(&mut width, &mut height);
    }

    let center = candidate.rect.center;
    // imageproc rotates content clockwise for positive theta; negate so a
    // feature axis at `axis` degrees comes out horizontal
    let rotated = rotate(
        frame,
        (center.x, center.y),
        -axis.to_radians(),
        Interpolation::Bilinear,
        Luma([0u8]),
    );

    extract_rect_subpix(&rotated, center, width.round() as u32, height.round() as u32)
}

/// Bilinear extraction of a `width` x `height` patch centered at `center`.
pub fn extract_rect_subpix(
    frame: &GrayImage,
    center: Point2f,
    width: u32,
    height: u32,
) -> Option<GrayImage> {
    if width == 0 || height == 0 {
        return None;
    }

    let x0 = center.x - (width as f32 - 1.0) / 2.0;
    let y0 = center.y - (height as f32 - 1.0) / 2.0;
    let x_max = x0 + (width - 1) as f32;
    let y_max = y0 + (height - 1) as f32;
    if x0 < 0.0
        || y0 < 0.0
        || x_max > (frame.width() - 1) as f32
        || y_max > (frame.height() - 1) as f32
    {
        return None;
    }

    let mut patch = GrayImage::new(width, height);
    for j in 0..height {
        for i in 0..width {
            let value = sample_bilinear(frame, x0 + i as f32, y0 + j as f32);
            patch.put_pixel(i, j, Luma([value]));
        }
    }
    Some(patch)
}

fn sample_bilinear(frame: &GrayImage, x: f32, y: f32) -> u8 {
    let xf = x.floor();
    let yf = y.floor();
    let x0 = xf as u32;
    let y0 = yf as u32;
    let x1 = (x0 + 1).min(frame.width() - 1);
    let y1 = (y0 + 1).min(frame.height() - 1);
    let fx = x - xf;
    let fy = y - yf;

    let p00 = frame.get_pixel(x0, y0)[0] as f32;
    let p10 = frame.get_pixel(x1, y0)[0] as f32;
    let p01 = frame.get_pixel(x0, y1)[0] as f32;
    let p11 = frame.get_pixel(x1, y1)[0] as f32;
    let top = p00 * (1.0 - fx) + p10 * fx;
    let bottom = p01 * (1.0 - fx) + p11 * fx;
    (top * (1.0 - fy) + bottom * fy).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RotatedRect, Size2f};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    fn axis_aligned_candidate(cx: f32, cy: f32, w: f32, h: f32) -> PlateCandidate {
        // the [-90, 0) convention reports an upright rectangle with the
        // vertical extent as its width
        PlateCandidate {
            rect: RotatedRect {
                center: Point2f::new(cx, cy),
                size: Size2f {
                    width: h,
                    height: w,
                },
                angle: -90.0,
            },
            source_area: w * h,
        }
    }

    fn frame_with_rect(x: i32, y: i32, w: u32, h: u32) -> GrayImage {
        let mut frame = GrayImage::new(100, 100);
        draw_filled_rect_mut(&mut frame, Rect::at(x, y).of_size(w, h), Luma([255u8]));
        frame
    }

    #[test]
    fn crop_returns_upright_bounding_box() {
        let frame = frame_with_rect(30, 40, 30, 20);
        let candidate = axis_aligned_candidate(44.5, 49.5, 30.0, 20.0);
        let patch = rectify(&frame, &candidate, RectifyStrategy::Crop).unwrap();
        // floor/ceil of the float box may pad by one pixel on either side
        let (w, h) = patch.dimensions();
        assert!((30..=32).contains(&w), "width {w}");
        assert!((20..=22).contains(&h), "height {h}");
        assert_eq!(patch.get_pixel(w / 2, h / 2)[0], 255);
    }

    #[test]
    fn crop_out_of_bounds_is_rejected() {
        let frame = GrayImage::new(100, 100);
        let candidate = axis_aligned_candidate(5.0, 5.0, 30.0, 20.0);
        assert!(rectify(&frame, &candidate, RectifyStrategy::Crop).is_none());
    }

    #[test]
    fn deskew_of_upright_candidate_preserves_content() {
        let frame = frame_with_rect(30, 40, 30, 20);
        let candidate = axis_aligned_candidate(44.5, 49.5, 30.0, 20.0);
        let patch = rectify(&frame, &candidate, RectifyStrategy::Deskew).unwrap();
        assert_eq!(patch.dimensions(), (30, 20));
        assert_eq!(patch.get_pixel(15, 10)[0], 255);
    }

    #[test]
    fn subpix_window_must_stay_inside_frame() {
        let frame = GrayImage::new(50, 50);
        assert!(extract_rect_subpix(&frame, Point2f::new(25.0, 25.0), 20, 10).is_some());
        assert!(extract_rect_subpix(&frame, Point2f::new(4.0, 25.0), 20, 10).is_none());
        assert!(extract_rect_subpix(&frame, Point2f::new(25.0, 46.0), 20, 10).is_none());
        assert!(extract_rect_subpix(&frame, Point2f::new(25.0, 25.0), 0, 10).is_none());
    }
}
