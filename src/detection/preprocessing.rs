use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

/// Apply Gaussian blur to reduce sensor noise before edge detection.
pub fn apply_blur(frame: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(frame, sigma)
}

/// Detect edges using the Canny edge detector. Thresholds are
/// caller-supplied; the low one admits weak edges connected to strong ones.
pub fn detect_edges(frame: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(frame, low_threshold, high_threshold)
}
