//! Pass 3: evaluate the parametric plan-view primitives into sampled
//! polylines with bounded deviation, and expose road endpoint queries.
//!
//! All math happens on raw f64 coordinates extracted from the dimensioned
//! source quantities. Sample points closer than 1 cm are deduplicated, as
//! are the joints between consecutive segments.

use crate::compiler::NetworkCompiler;
use crate::geom::{push_deduped, Point};
use crate::road::geometry::{Geometry, GeometryType};
use crate::road::geometry::param_poly_3::ParamPoly3;
use crate::road::geometry::param_poly_3_p_range::ParamPoly3pRange;
use crate::road::Road;
use log::info;

/// Arcs flatter than this curvature are evaluated as straight lines.
const MIN_ARC_CURVATURE: f64 = 1e-4;

/// Integration substeps per sample interval of a spiral.
const SPIRAL_SUBSTEPS: usize = 10;

impl<'a> NetworkCompiler<'a> {
    pub(super) fn evaluate_geometry(&mut self) {
        for road in &self.doc.road {
            self.polylines
                .insert(road.id.as_str(), road_polyline(road));
        }
        info!("evaluated {} road polylines", self.polylines.len());
    }

    pub(super) fn polyline(&self, road_id: &str) -> &[Point] {
        self.polylines
            .get(road_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(super) fn road_start_point(&self, road_id: &str) -> Option<Point> {
        self.polyline(road_id).first().copied()
    }

    pub(super) fn road_end_point(&self, road_id: &str) -> Option<Point> {
        self.polyline(road_id).last().copied()
    }
}

/// The first geometry's origin: the road's start point by definition.
pub fn road_start(road: &Road) -> Point {
    let first = road.plan_view.geometry.first();
    Point::new(first.x.value, first.y.value)
}

/// Concatenates all segment polylines, deduplicating the shared points at
/// segment boundaries.
pub fn road_polyline(road: &Road) -> Vec<Point> {
    let mut points = Vec::new();
    for geometry in road.plan_view.geometry.iter() {
        for point in sample_geometry(geometry) {
            push_deduped(&mut points, point);
        }
    }
    points
}

/// Samples one plan-view segment into global coordinates.
pub fn sample_geometry(geometry: &Geometry) -> Vec<Point> {
    let x0 = geometry.x.value;
    let y0 = geometry.y.value;
    let hdg = geometry.hdg.value;
    let length = geometry.length.value;

    match &geometry.choice {
        GeometryType::Line(_) => sample_line(x0, y0, hdg, length),
        GeometryType::Arc(arc) => sample_arc(x0, y0, hdg, length, arc.curvature.value),
        GeometryType::Spiral(spiral) => sample_spiral(
            x0,
            y0,
            hdg,
            length,
            spiral.curvature_start.value,
            spiral.curvature_end.value,
        ),
        GeometryType::ParamPoly3(poly) => sample_param_poly3(x0, y0, hdg, length, poly),
    }
}

fn sample_line(x0: f64, y0: f64, hdg: f64, length: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x0 + length * hdg.cos(), y0 + length * hdg.sin()),
    ]
}

/// Sample count for curved segments: one point per 2 m of arc length or per
/// 5 degrees of heading change, whichever is denser, clamped to [3, 50].
fn curve_sample_count(length: f64, curvature: f64) -> usize {
    let by_length = length / 2.0;
    let by_angle = (length * curvature).abs().to_degrees() / 5.0;
    by_length.max(by_angle).clamp(3.0, 50.0) as usize
}

fn sample_arc(x0: f64, y0: f64, hdg: f64, length: f64, curvature: f64) -> Vec<Point> {
    if curvature.abs() < MIN_ARC_CURVATURE {
        return sample_line(x0, y0, hdg, length);
    }

    let radius = curvature.abs().recip();
    let angle_change = length * curvature;
    // Center sits on the left normal for a left turn, right normal otherwise.
    let (cx, cy) = if curvature > 0.0 {
        (x0 - radius * hdg.sin(), y0 + radius * hdg.cos())
    } else {
        (x0 + radius * hdg.sin(), y0 - radius * hdg.cos())
    };

    let samples = curve_sample_count(length, curvature);
    let mut points = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let angle = hdg + angle_change * i as f64 / samples as f64;
        let point = if curvature > 0.0 {
            Point::new(cx + radius * angle.sin(), cy - radius * angle.cos())
        } else {
            Point::new(cx - radius * angle.sin(), cy + radius * angle.cos())
        };
        push_deduped(&mut points, point);
    }
    points
}

/// Clothoid evaluation: the heading is available in closed form,
/// `theta(s) = hdg + k0*s + (k1-k0)*s^2/(2*length)`, and the position is the
/// accumulated integral of `(cos theta, sin theta)`, taken with the midpoint
/// rule over at least ten substeps per emitted sample.
fn sample_spiral(x0: f64, y0: f64, hdg: f64, length: f64, k0: f64, k1: f64) -> Vec<Point> {
    if length <= 0.0 {
        return vec![Point::new(x0, y0)];
    }

    let theta = |s: f64| hdg + k0 * s + (k1 - k0) * s * s / (2.0 * length);

    let samples = curve_sample_count(length, 0.5 * (k0 + k1));
    let total_steps = samples * SPIRAL_SUBSTEPS;
    let ds = length / total_steps as f64;

    let mut points = Vec::with_capacity(samples + 1);
    let (mut x, mut y) = (x0, y0);
    push_deduped(&mut points, Point::new(x, y));
    for step in 0..total_steps {
        let angle = theta((step as f64 + 0.5) * ds);
        x += angle.cos() * ds;
        y += angle.sin() * ds;
        if (step + 1) % SPIRAL_SUBSTEPS == 0 {
            push_deduped(&mut points, Point::new(x, y));
        }
    }
    points
}

fn sample_param_poly3(x0: f64, y0: f64, hdg: f64, length: f64, poly: &ParamPoly3) -> Vec<Point> {
    let samples = (length / 2.0).clamp(3.0, 50.0) as usize;
    let p_max = match poly.p_range {
        ParamPoly3pRange::ArcLength => length,
        ParamPoly3pRange::Normalized => 1.0,
    };

    let (sin, cos) = hdg.sin_cos();
    let mut points = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let p = p_max * i as f64 / samples as f64;
        let u = poly.a_u + poly.b_u * p + poly.c_u * p * p + poly.d_u * p * p * p;
        let v = poly.a_v + poly.b_v * p + poly.c_v * p * p + poly.d_v * p * p * p;
        push_deduped(
            &mut points,
            Point::new(x0 + u * cos - v * sin, y0 + u * sin + v * cos),
        );
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road::geometry::arc::Arc;
    use crate::road::geometry::line::Line;
    use crate::road::geometry::spiral::Spiral;
    use uom::si::angle::radian;
    use uom::si::curvature::radian_per_meter;
    use uom::si::f64::{Angle, Curvature, Length};
    use uom::si::length::meter;

    fn segment(x: f64, y: f64, hdg: f64, length: f64, choice: GeometryType) -> Geometry {
        Geometry {
            hdg: Angle::new::<radian>(hdg),
            length: Length::new::<meter>(length),
            s: Length::new::<meter>(0.0),
            x: Length::new::<meter>(x),
            y: Length::new::<meter>(y),
            choice,
        }
    }

    fn arc(curvature: f64) -> GeometryType {
        GeometryType::Arc(Arc {
            curvature: Curvature::new::<radian_per_meter>(curvature),
        })
    }

    fn spiral(k0: f64, k1: f64) -> GeometryType {
        GeometryType::Spiral(Spiral {
            curvature_start: Curvature::new::<radian_per_meter>(k0),
            curvature_end: Curvature::new::<radian_per_meter>(k1),
        })
    }

    #[test]
    fn line_endpoint() {
        let points = sample_geometry(&segment(1.0, 2.0, 0.0, 100.0, GeometryType::Line(Line)));
        assert_eq!(points.len(), 2);
        assert!(points[1].coincident(Point::new(101.0, 2.0)));
    }

    #[test]
    fn arc_endpoint_matches_analytic_formula() {
        // curvature 0.01 1/m over 50 m from the origin heading east:
        // x = sin(kL)/k, y = (1 - cos(kL))/k.
        let points = sample_geometry(&segment(0.0, 0.0, 0.0, 50.0, arc(0.01)));
        let expected = Point::new(
            (0.01_f64 * 50.0).sin() / 0.01,
            (1.0 - (0.01_f64 * 50.0).cos()) / 0.01,
        );
        let last = *points.last().unwrap();
        assert!(last.distance(expected) < 0.01, "endpoint {last} vs {expected}");
        assert!(points.len() >= 10, "only {} samples", points.len());
    }

    #[test]
    fn arc_right_turn_mirrors_left_turn() {
        let left = sample_geometry(&segment(0.0, 0.0, 0.0, 50.0, arc(0.01)));
        let right = sample_geometry(&segment(0.0, 0.0, 0.0, 50.0, arc(-0.01)));
        let l = left.last().unwrap();
        let r = right.last().unwrap();
        assert!((l.x - r.x).abs() < 1e-9);
        assert!((l.y + r.y).abs() < 1e-9);
    }

    #[test]
    fn full_circle_arc_keeps_dense_sampling() {
        // |kappa * length| > 2*pi: 20 m radius circle, 140 m long.
        let points = sample_geometry(&segment(0.0, 0.0, 0.0, 140.0, arc(0.05)));
        assert!(points.len() >= 20);
        let expected = Point::new(
            (0.05_f64 * 140.0).sin() / 0.05,
            (1.0 - (0.05_f64 * 140.0).cos()) / 0.05,
        );
        assert!(points.last().unwrap().distance(expected) < 0.01);
    }

    #[test]
    fn constant_curvature_spiral_equals_arc() {
        let spiral_points = sample_geometry(&segment(0.0, 0.0, 0.5, 50.0, spiral(0.01, 0.01)));
        let arc_points = sample_geometry(&segment(0.0, 0.0, 0.5, 50.0, arc(0.01)));
        assert!(
            spiral_points
                .last()
                .unwrap()
                .distance(*arc_points.last().unwrap())
                < 0.01
        );
    }

    #[test]
    fn spiral_straightens_to_line() {
        let points = sample_geometry(&segment(0.0, 0.0, 0.0, 80.0, spiral(0.0, 0.0)));
        let last = points.last().unwrap();
        assert!(last.distance(Point::new(80.0, 0.0)) < 0.01);
    }

    #[test]
    fn param_poly3_normalized_equals_arc_length_range() {
        use crate::road::geometry::param_poly_3::ParamPoly3;

        let normalized = ParamPoly3 {
            a_u: 0.0,
            a_v: 0.0,
            b_u: 60.0,
            b_v: 0.0,
            c_u: 0.0,
            c_v: 12.0,
            d_u: 0.0,
            d_v: 0.0,
            p_range: ParamPoly3pRange::Normalized,
        };
        // Reparameterized over p in [0, 60]: u = p, v = 12 * (p/60)^2.
        let arc_length = ParamPoly3 {
            a_u: 0.0,
            a_v: 0.0,
            b_u: 1.0,
            b_v: 0.0,
            c_u: 0.0,
            c_v: 12.0 / 3600.0,
            d_u: 0.0,
            d_v: 0.0,
            p_range: ParamPoly3pRange::ArcLength,
        };

        let a = sample_geometry(&segment(
            5.0,
            -3.0,
            0.3,
            60.0,
            GeometryType::ParamPoly3(normalized),
        ));
        let b = sample_geometry(&segment(
            5.0,
            -3.0,
            0.3,
            60.0,
            GeometryType::ParamPoly3(arc_length),
        ));
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert!(pa.distance(*pb) < 0.01);
        }
    }

    #[test]
    fn segment_joints_are_deduplicated() {
        let road = Road {
            id: "r".into(),
            junction: "-1".into(),
            length: Length::new::<meter>(200.0),
            name: None,
            rule: None,
            link: None,
            r#type: Vec::new(),
            plan_view: crate::road::geometry::plan_view::PlanView {
                geometry: vec1::vec1![
                    segment(0.0, 0.0, 0.0, 100.0, GeometryType::Line(Line)),
                    segment(100.0, 0.0, 0.0, 100.0, GeometryType::Line(Line)),
                ],
            },
            lanes: crate::lane::lanes::Lanes {
                lane_section: vec1::vec1![crate::lane::lane_section::LaneSection {
                    s: 0.0,
                    left: None,
                    right: None,
                }],
            },
        };
        let polyline = road_polyline(&road);
        assert_eq!(polyline.len(), 3);
        assert!((crate::geom::polyline_length(&polyline) - 200.0).abs() < 1e-9);
    }
}
