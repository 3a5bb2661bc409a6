use crate::detection::geometry;
use crate::models::{PlateCandidate, Point2f};

/// Acceptance bounds for the quadrilateral filters.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    /// Smallest accepted polygon area, in pixels squared.
    pub min_area: f32,
    /// Largest accepted polygon area, in pixels squared.
    pub max_area: f32,
    /// Upper bound on the worst corner cosine; 0.3 admits roughly 17
    /// degrees of perspective skew per corner.
    pub max_cosine: f32,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_area: 600.0,
            max_area: 100_000.0,
            max_cosine: 0.3,
        }
    }
}

impl ValidatorConfig {
    /// Derive the area bounds from frame dimensions instead of absolute
    /// pixel counts. The fractions reproduce the defaults at 640x480.
    pub fn for_frame(width: u32, height: u32) -> Self {
        let frame_area = (width * height) as f32;
        Self {
            min_area: frame_area * 0.002,
            max_area: frame_area * 0.325,
            ..Self::default()
        }
    }
}

/// Decide whether a polygon is a plate-shaped quadrilateral.
///
/// Pure predicate chain, cheapest filter first, short-circuiting on the
/// first failure: vertex count, area bounds, convexity, rectangularity.
/// On acceptance the polygon's minimum-area enclosing rectangle becomes
/// the candidate.
pub fn validate(polygon: &[Point2f], config: &ValidatorConfig) -> Option<PlateCandidate> {
    if polygon.len() != 4 {
        return None;
    }

    let area = geometry::polygon_area(polygon).abs();
    if area < config.min_area || area > config.max_area {
        return None;
    }

    if !geometry::is_convex(polygon) {
        return None;
    }

    if geometry::max_corner_cosine(polygon) >= config.max_cosine {
        return None;
    }

    Some(PlateCandidate {
        rect: geometry::min_area_rect(polygon),
        source_area: area,
    })
}
