use image::GrayImage;

use crate::detection::PlateDetector;
use crate::detection::binarize::{self, BinarizeMethod};
use crate::detection::rank;
use crate::detection::rectify::{self, RectifyStrategy};
use crate::models::{FrameResult, PlateDetection};

/// Per-frame processing pipeline: detect candidates, keep the best one,
/// rectify its pixel region and normalize it for recognition.
///
/// Holds configuration only; every invocation is independent and nothing
/// survives from one frame to the next.
pub struct FramePipeline {
    pub detector: PlateDetector,
    pub rectify_strategy: RectifyStrategy,
    pub binarize_method: BinarizeMethod,
    pub verbose: bool,
}

impl FramePipeline {
    pub fn new() -> Self {
        Self {
            detector: PlateDetector::new(),
            rectify_strategy: RectifyStrategy::default(),
            binarize_method: BinarizeMethod::default(),
            verbose: false,
        }
    }

    pub fn with_detector(mut self, detector: PlateDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_rectify_strategy(mut self, strategy: RectifyStrategy) -> Self {
        self.rectify_strategy = strategy;
        self
    }

    pub fn with_binarize_method(mut self, method: BinarizeMethod) -> Self {
        self.binarize_method = method;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self.detector.verbose = verbose;
        self
    }

    /// Process one frame to zero-or-one rectified plate patch.
    pub fn process(&self, frame: &GrayImage) -> FrameResult {
        let candidates = self.detector.detect(frame);

        let Some(candidate) = rank::select_largest(&candidates) else {
            if self.verbose {
                println!("No plate candidate in this frame");
            }
            return FrameResult::empty();
        };

        let Some(patch) = rectify::rectify(frame, &candidate, self.rectify_strategy) else {
            // extraction window fell outside the frame; treat as no candidate
            if self.verbose {
                println!("Candidate extraction window left the frame, skipping");
            }
            return FrameResult::empty();
        };

        let patch = binarize::binarize(&patch, self.binarize_method);
        if self.verbose {
            let rect = candidate.rect;
            println!(
                "Plate candidate at ({:.1}, {:.1}), {:.0}x{:.0}, {:.1} deg",
                rect.center.x, rect.center.y, rect.size.width, rect.size.height, rect.angle
            );
        }

        FrameResult {
            detection: Some(PlateDetection { candidate, patch }),
        }
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new()
    }
}
