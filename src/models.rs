use image::GrayImage;

/// Ordered boundary points of one connected edge region, scoped to a frame.
pub type Contour = Vec<Point2f>;

/// 2-D point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size2f {
    pub width: f32,
    pub height: f32,
}

impl Size2f {
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Minimum-area enclosing oriented rectangle.
///
/// The angle is in degrees, always in [-90, 0); `size.width` is the extent
/// along the angle direction and `size.height` the perpendicular extent.
#[derive(Debug, Clone, Copy)]
pub struct RotatedRect {
    pub center: Point2f,
    pub size: Size2f,
    pub angle: f32,
}

impl RotatedRect {
    /// Axis-aligned bounding box as (min_x, min_y, width, height).
    pub fn bounding_box(&self) -> (f32, f32, f32, f32) {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let ext_x = (self.size.width * cos).abs() + (self.size.height * sin).abs();
        let ext_y = (self.size.width * sin).abs() + (self.size.height * cos).abs();
        (
            self.center.x - ext_x / 2.0,
            self.center.y - ext_y / 2.0,
            ext_x,
            ext_y,
        )
    }
}

/// A validated plate-shaped region of one frame.
#[derive(Debug, Clone, Copy)]
pub struct PlateCandidate {
    pub rect: RotatedRect,
    /// Absolute area of the approximated polygon the candidate came from.
    pub source_area: f32,
}

impl PlateCandidate {
    /// Area of the enclosing rectangle, used for ranking.
    pub fn area(&self) -> f32 {
        self.rect.size.area()
    }
}

/// Selected candidate plus its rectified, binarized patch.
#[derive(Debug, Clone)]
pub struct PlateDetection {
    pub candidate: PlateCandidate,
    pub patch: GrayImage,
}

/// Outcome of processing one frame. Frames are independent; a result never
/// influences a later frame.
#[derive(Debug, Clone, Default)]
pub struct FrameResult {
    pub detection: Option<PlateDetection>,
}

impl FrameResult {
    pub fn empty() -> Self {
        Self { detection: None }
    }

    pub fn is_empty(&self) -> bool {
        self.detection.is_none()
    }
}
