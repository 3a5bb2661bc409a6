use crate::models::PlateCandidate;

/// Pick the candidate whose enclosing rectangle has the largest area.
///
/// Ties keep the first candidate encountered. An empty input is the normal
/// no-plate case for most frames, not an error.
pub fn select_largest(candidates: &[PlateCandidate]) -> Option<PlateCandidate> {
    let mut best: Option<PlateCandidate> = None;
    for candidate in candidates {
        if best.map_or(true, |b| candidate.area() > b.area()) {
            best = Some(*candidate);
        }
    }
    best
}
