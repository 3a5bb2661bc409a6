pub mod detection;
pub mod models;
pub mod pipeline;
pub mod worker;

pub use detection::PlateDetector;
pub use detection::binarize::BinarizeMethod;
pub use detection::rectify::RectifyStrategy;
pub use detection::validate::ValidatorConfig;
pub use models::{
    Contour, FrameResult, PlateCandidate, PlateDetection, Point2f, RotatedRect, Size2f,
};
pub use pipeline::FramePipeline;
pub use worker::{AnalysisWorker, FrameSlot};
