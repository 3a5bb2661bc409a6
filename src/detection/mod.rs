pub mod binarize;
pub mod contours;
pub mod geometry;
pub mod ocr;
pub mod preprocessing;
pub mod rank;
pub mod rectify;
pub mod validate;

use image::GrayImage;

use crate::models::{Contour, PlateCandidate};
use validate::ValidatorConfig;

/// Perimeter fraction used as the polygon approximation tolerance.
const APPROX_TOLERANCE_FACTOR: f32 = 0.018;

/// Scans one grayscale frame for plate-shaped quadrilaterals.
pub struct PlateDetector {
    /// Canny lower threshold; weak edges above it survive when connected
    /// to strong ones.
    pub lower_threshold: f32,
    /// Canny upper threshold for strong edges.
    pub upper_threshold: f32,
    /// Gaussian blur applied before edge detection, `None` to skip.
    pub blur_sigma: Option<f32>,
    pub validator: ValidatorConfig,
    pub verbose: bool,
}

impl PlateDetector {
    pub fn new() -> Self {
        Self {
            lower_threshold: 60.0,
            upper_threshold: 175.0,
            blur_sigma: Some(1.5),
            validator: ValidatorConfig::default(),
            verbose: false,
        }
    }

    pub fn with_thresholds(mut self, lower: f32, upper: f32) -> Self {
        self.lower_threshold = lower;
        self.upper_threshold = upper;
        self
    }

    pub fn with_validator(mut self, validator: ValidatorConfig) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Detect plate candidates in a frame: edges, contours, polygon
    /// approximation, then the quadrilateral filters.
    pub fn detect(&self, frame: &GrayImage) -> Vec<PlateCandidate> {
        let edges = match self.blur_sigma {
            Some(sigma) => {
                let blurred = preprocessing::apply_blur(frame, sigma);
                preprocessing::detect_edges(&blurred, self.lower_threshold, self.upper_threshold)
            }
            None => {
                preprocessing::detect_edges(frame, self.lower_threshold, self.upper_threshold)
            }
        };

        let frame_contours = contours::extract_contours(&edges);
        if self.verbose {
            println!("Found {} contours", frame_contours.len());
        }

        let candidates = self.scan_contours(&frame_contours);
        if self.verbose {
            println!(
                "{} candidate(s) passed the quadrilateral filters",
                candidates.len()
            );
        }
        candidates
    }

    /// Approximate each contour to a polygon and keep the ones the
    /// validator accepts. Contours that fail a filter are simply excluded.
    pub fn scan_contours(&self, frame_contours: &[Contour]) -> Vec<PlateCandidate> {
        frame_contours
            .iter()
            .filter_map(|contour| {
                let tolerance = APPROX_TOLERANCE_FACTOR * geometry::arc_length(contour, true);
                let polygon = geometry::approximate_polygon(contour, tolerance);
                validate::validate(&polygon, &self.validator)
            })
            .collect()
    }
}

impl Default for PlateDetector {
    fn default() -> Self {
        Self::new()
    }
}
