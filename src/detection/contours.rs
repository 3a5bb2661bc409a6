use image::GrayImage;

use crate::models::{Contour, Point2f};

/// Extract contours from a binary edge map using Suzuki-Abe border
/// following. Each contour is the ordered point sequence of one connected
/// edge region; single-point contours carry no geometry and are dropped.
pub fn extract_contours(edges: &GrayImage) -> Vec<Contour> {
    let traced: Vec<imageproc::contours::Contour<i32>> =
        imageproc::contours::find_contours(edges);

    traced
        .into_iter()
        .filter(|c| c.points.len() >= 2)
        .map(|c| {
            c.points
                .into_iter()
                .map(|p| Point2f::new(p.x as f32, p.y as f32))
                .collect()
        })
        .collect()
}
