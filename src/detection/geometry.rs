//! Planar geometry over contour point sequences: perimeter, polygon
//! simplification, area, convexity, corner angles and minimum-area
//! enclosing rectangles.

use crate::models::{Point2f, RotatedRect, Size2f};

/// Total length of a polyline, including the closing segment when `closed`.
pub fn arc_length(points: &[Point2f], closed: bool) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut length: f32 = points
        .windows(2)
        .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
        .sum();
    if closed {
        let first = points[0];
        let last = points[points.len() - 1];
        length += (first.x - last.x).hypot(first.y - last.y);
    }
    length
}

/// Signed area of a polygon (shoelace). Positive for counter-clockwise
/// vertex order in y-down image coordinates.
pub fn polygon_area(polygon: &[Point2f]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for i in 0..polygon.len() {
        let p = polygon[i];
        let q = polygon[(i + 1) % polygon.len()];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// Ramer-Douglas-Peucker simplification of a closed contour.
///
/// Every input point ends up within `epsilon` of the simplified boundary.
/// The closed curve is split at its two most distant vertices so the
/// chord-based recursion has non-degenerate anchors.
pub fn approximate_polygon(contour: &[Point2f], epsilon: f32) -> Vec<Point2f> {
    if contour.len() < 3 {
        return contour.to_vec();
    }

    let start = contour[0];
    let far = contour
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|(_, a), (_, b)| {
            let da = (a.x - start.x).hypot(a.y - start.y);
            let db = (b.x - start.x).hypot(b.y - start.y);
            da.total_cmp(&db)
        })
        .map(|(i, _)| i)
        .unwrap_or(contour.len() / 2);

    let first_half = simplify_open(&contour[..=far], epsilon);
    let mut second_half: Vec<Point2f> = contour[far..].to_vec();
    second_half.push(start);
    let second_half = simplify_open(&second_half, epsilon);

    // first_half ends where second_half begins, and second_half closes on
    // the start vertex; drop both duplicates when joining
    let mut polygon = first_half;
    polygon.extend_from_slice(&second_half[1..second_half.len() - 1]);

    // the split anchors survive the recursion even when they sit on a
    // straight run; remove vertices within tolerance of their neighbours
    let mut i = 0;
    while polygon.len() > 3 && i < polygon.len() {
        let prev = polygon[(i + polygon.len() - 1) % polygon.len()];
        let next = polygon[(i + 1) % polygon.len()];
        if perpendicular_distance(polygon[i], prev, next) <= epsilon {
            polygon.remove(i);
        } else {
            i += 1;
        }
    }

    polygon
}

fn simplify_open(points: &[Point2f], epsilon: f32) -> Vec<Point2f> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let mut split = 0;
    let mut max_dist = 0.0f32;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(*p, first, last);
        if d > max_dist {
            max_dist = d;
            split = i;
        }
    }

    if max_dist <= epsilon {
        return vec![first, last];
    }

    let mut left = simplify_open(&points[..=split], epsilon);
    let right = simplify_open(&points[split..], epsilon);
    left.pop();
    left.extend(right);
    left
}

/// Distance from `p` to the segment `a`-`b`.
fn perpendicular_distance(p: Point2f, a: Point2f, b: Point2f) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        return (p.x - a.x).hypot(p.y - a.y);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    let (px, py) = (a.x + t * dx, a.y + t * dy);
    (p.x - px).hypot(p.y - py)
}

/// Whether consecutive edges all turn in the same direction.
pub fn is_convex(polygon: &[Point2f]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let n = polygon.len();
    let mut has_pos = false;
    let mut has_neg = false;
    for i in 0..n {
        let p0 = polygon[i];
        let p1 = polygon[(i + 1) % n];
        let p2 = polygon[(i + 2) % n];
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);
        if cross > 0.0 {
            has_pos = true;
        }
        if cross < 0.0 {
            has_neg = true;
        }
        if has_pos && has_neg {
            return false;
        }
    }
    true
}

/// Cosine of the angle at `apex` between the rays towards `a` and `b`.
/// The 1e-10 term keeps the denominator finite for near-zero rays.
pub fn corner_cosine(a: Point2f, b: Point2f, apex: Point2f) -> f32 {
    let dx1 = a.x - apex.x;
    let dy1 = a.y - apex.y;
    let dx2 = b.x - apex.x;
    let dy2 = b.y - apex.y;
    (dx1 * dx2 + dy1 * dy2)
        / ((dx1 * dx1 + dy1 * dy1) * (dx2 * dx2 + dy2 * dy2) + 1e-10).sqrt()
}

/// Largest absolute corner cosine over the three measurable vertex triples
/// of a quadrilateral. 0 for a perfect rectangle, 1 for a degenerate one.
pub fn max_corner_cosine(quad: &[Point2f]) -> f32 {
    let mut max_cosine = 0.0f32;
    for j in 2..5 {
        let cosine = corner_cosine(quad[j % 4], quad[j - 2], quad[j - 1]).abs();
        max_cosine = max_cosine.max(cosine);
    }
    max_cosine
}

/// Minimum-area enclosing oriented rectangle of a convex polygon, found by
/// rotating calipers: one side of the optimum is collinear with a polygon
/// edge, so every edge direction is tried.
///
/// The caller is expected to pass a convex polygon; the quad filters
/// upstream establish that.
pub fn min_area_rect(polygon: &[Point2f]) -> RotatedRect {
    let mut best: Option<(f32, RotatedRect)> = None;
    let n = polygon.len();

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        let edge_len = (p2.x - p1.x).hypot(p2.y - p1.y);
        if edge_len < 1e-6 {
            continue;
        }
        let ux = (p2.x - p1.x) / edge_len;
        let uy = (p2.y - p1.y) / edge_len;
        // perpendicular axis
        let vx = -uy;
        let vy = ux;

        let mut min_u = f32::MAX;
        let mut max_u = f32::MIN;
        let mut min_v = f32::MAX;
        let mut max_v = f32::MIN;
        for p in polygon {
            let dx = p.x - p1.x;
            let dy = p.y - p1.y;
            let u = dx * ux + dy * uy;
            let v = dx * vx + dy * vy;
            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }

        let extent_u = max_u - min_u;
        let extent_v = max_v - min_v;
        let area = extent_u * extent_v;
        if best.as_ref().is_some_and(|(a, _)| area >= *a) {
            continue;
        }

        let center_u = (min_u + max_u) / 2.0;
        let center_v = (min_v + max_v) / 2.0;
        let center = Point2f::new(
            p1.x + center_u * ux + center_v * vx,
            p1.y + center_u * uy + center_v * vy,
        );

        let theta = uy.atan2(ux).to_degrees();
        // wrap the edge direction into [-90, 0) and keep width measured
        // along that direction
        let mut angle = theta % 90.0;
        if angle >= 0.0 {
            angle -= 90.0;
        }
        let quarter_turns = ((theta - angle) / 90.0).round() as i32;
        let (width, height) = if quarter_turns % 2 == 0 {
            (extent_u, extent_v)
        } else {
            (extent_v, extent_u)
        };

        best = Some((
            area,
            RotatedRect {
                center,
                size: Size2f { width, height },
                angle,
            },
        ));
    }

    best.map(|(_, rect)| rect).unwrap_or_else(|| {
        // all edges degenerate; fall back to the (zero-sized) point bounds
        let p = polygon.first().copied().unwrap_or(Point2f::new(0.0, 0.0));
        RotatedRect {
            center: p,
            size: Size2f {
                width: 0.0,
                height: 0.0,
            },
            angle: -90.0,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f32) -> Vec<Point2f> {
        vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(side, 0.0),
            Point2f::new(side, side),
            Point2f::new(0.0, side),
        ]
    }

    #[test]
    fn arc_length_closed_square() {
        let quad = square(10.0);
        assert_eq!(arc_length(&quad, false), 30.0);
        assert_eq!(arc_length(&quad, true), 40.0);
    }

    #[test]
    fn polygon_area_is_signed() {
        let quad = square(10.0);
        let mut reversed = quad.clone();
        reversed.reverse();
        assert_eq!(polygon_area(&quad).abs(), 100.0);
        assert_eq!(polygon_area(&quad), -polygon_area(&reversed));
    }

    #[test]
    fn perfect_square_has_zero_max_cosine() {
        let quad = square(50.0);
        assert!(max_corner_cosine(&quad).abs() < 1e-6);
    }

    #[test]
    fn convexity_detects_reflex_vertex() {
        assert!(is_convex(&square(10.0)));
        let concave = vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(10.0, 0.0),
            Point2f::new(3.0, 3.0), // reflex
            Point2f::new(0.0, 10.0),
        ];
        assert!(!is_convex(&concave));
    }

    #[test]
    fn simplify_dense_square_to_four_corners() {
        // walk the boundary of a 20x20 square starting mid-edge, one point
        // per pixel
        let mut contour = Vec::new();
        for i in 10..20 {
            contour.push(Point2f::new(i as f32, 0.0));
        }
        for i in 0..20 {
            contour.push(Point2f::new(20.0, i as f32));
        }
        for i in 0..20 {
            contour.push(Point2f::new(20.0 - i as f32, 20.0));
        }
        for i in 0..20 {
            contour.push(Point2f::new(0.0, 20.0 - i as f32));
        }
        for i in 0..10 {
            contour.push(Point2f::new(i as f32, 0.0));
        }

        let epsilon = 0.018 * arc_length(&contour, true);
        let polygon = approximate_polygon(&contour, epsilon);
        assert_eq!(polygon.len(), 4, "got {polygon:?}");
        for corner in [(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0)] {
            assert!(
                polygon
                    .iter()
                    .any(|p| p.x == corner.0 && p.y == corner.1),
                "missing corner {corner:?} in {polygon:?}"
            );
        }
    }

    #[test]
    fn min_area_rect_axis_aligned() {
        let quad = vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(10.0, 0.0),
            Point2f::new(10.0, 5.0),
            Point2f::new(0.0, 5.0),
        ];
        let rect = min_area_rect(&quad);
        assert!((rect.center.x - 5.0).abs() < 1e-4);
        assert!((rect.center.y - 2.5).abs() < 1e-4);
        // width is the extent along the angle direction, here vertical
        assert_eq!(rect.angle, -90.0);
        assert!((rect.size.width - 5.0).abs() < 1e-4);
        assert!((rect.size.height - 10.0).abs() < 1e-4);
    }

    #[test]
    fn min_area_rect_rotated_quad() {
        // 100x50 rectangle tilted along a 3-4-5 direction, so every corner
        // lands on integer coordinates
        let quad = vec![
            Point2f::new(185.0, 170.0),
            Point2f::new(215.0, 130.0),
            Point2f::new(135.0, 70.0),
            Point2f::new(105.0, 110.0),
        ];
        let rect = min_area_rect(&quad);
        assert!((rect.center.x - 160.0).abs() < 1e-3);
        assert!((rect.center.y - 120.0).abs() < 1e-3);
        assert!((rect.angle + 53.13).abs() < 0.01);
        assert!((rect.size.width - 50.0).abs() < 1e-2);
        assert!((rect.size.height - 100.0).abs() < 1e-2);
        assert!(rect.angle >= -90.0 && rect.angle < 0.0);
    }
}
