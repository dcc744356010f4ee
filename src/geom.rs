//! Planar point and polyline helpers shared by the geometry engine and the
//! network builders. All coordinates are metres in the source's inertial
//! frame (or the shifted frame after the coordinate offset is applied).

/// Points closer than this on both axes are considered coincident. Chosen to
/// preserve geometric precision; larger tolerances collapse legitimately
/// distinct points.
pub const COINCIDENT_TOLERANCE: f64 = 0.01;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Coincidence test used for node deduplication and sample-point dedup:
    /// within 1 cm on both axes.
    #[inline]
    pub fn coincident(self, other: Point) -> bool {
        (self.x - other.x).abs() < COINCIDENT_TOLERANCE
            && (self.y - other.y).abs() < COINCIDENT_TOLERANCE
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Appends `point` unless it coincides with the current last point.
pub fn push_deduped(points: &mut Vec<Point>, point: Point) {
    match points.last() {
        Some(last) if last.coincident(point) => {}
        _ => points.push(point),
    }
}

/// Total arc length of a polyline.
pub fn polyline_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].distance(w[1]))
        .sum()
}

/// Drops `trim` metres from both ends of the polyline, measured by
/// accumulated arc length. Keeps at least two points; a polyline too short to
/// trim is returned unchanged.
pub fn trim_polyline(points: &[Point], trim: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut cum = Vec::with_capacity(points.len());
    cum.push(0.0);
    for w in points.windows(2) {
        cum.push(cum.last().unwrap() + w[0].distance(w[1]));
    }
    let total = *cum.last().unwrap();

    let start = cum.iter().position(|&d| d >= trim).unwrap_or(0);
    let end = cum
        .iter()
        .position(|&d| d >= total - trim)
        .unwrap_or(points.len() - 1);

    if end > start {
        points[start..=end].to_vec()
    } else {
        points.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_distinct_points() {
        let mut points = vec![Point::new(0.0, 0.0)];
        push_deduped(&mut points, Point::new(0.005, 0.005));
        push_deduped(&mut points, Point::new(0.05, 0.0));
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Point::new(0.05, 0.0));
    }

    #[test]
    fn polyline_length_sums_segments() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 4.0),
        ];
        assert!((polyline_length(&points) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn trim_removes_both_ends() {
        let points: Vec<Point> = (0..=10).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect();
        let trimmed = trim_polyline(&points, 25.0);
        assert_eq!(trimmed.first().unwrap().x, 30.0);
        assert_eq!(trimmed.last().unwrap().x, 80.0);
    }

    #[test]
    fn trim_short_polyline_is_identity() {
        let points = vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)];
        assert_eq!(trim_polyline(&points, 50.0), points);
    }
}
