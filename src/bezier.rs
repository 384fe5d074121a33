// src/bezier.rs

use log::debug;

use crate::error::{Error, Result};
use crate::geometry::Point2;

/// One cubic Bezier piece: two on-curve anchors and two off-curve controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub start_anchor: Point2,
    pub end_anchor: Point2,
    pub control1: Point2,
    pub control2: Point2,
}

impl CubicSegment {
    pub fn new(
        start_anchor: Point2,
        end_anchor: Point2,
        control1: Point2,
        control2: Point2,
    ) -> Self {
        Self {
            start_anchor,
            end_anchor,
            control1,
            control2,
        }
    }

    /// Point at parameter `t` in [0, 1].
    pub fn eval(&self, t: f64) -> Point2 {
        let s = 1.0 - t;
        self.start_anchor * (s * s * s)
            + self.control1 * (3.0 * s * s * t)
            + self.control2 * (3.0 * s * t * t)
            + self.end_anchor * (t * t * t)
    }
}

/// A chain of cubic segments passing through every input point.
///
/// Controls come from a chord tangent estimate: the tangent at an interior
/// point `P[i]` is `P[i+1] - P[i-1]`, at the first point it is `P[1] - P[0]`,
/// and the last point reuses the tangent of the point before it. Each control
/// sits a third of its tangent away from its anchor. Neighbouring segments
/// always share their anchor; the tangents only roughly agree.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeBezierCurve {
    segments: Vec<CubicSegment>,
}

impl CompositeBezierCurve {
    pub fn fit(points: &[Point2]) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints {
                count: points.len(),
            });
        }

        let mut segments = Vec::with_capacity(points.len() - 1);
        let mut tangent_in = points[1] - points[0];

        for window in points.windows(3) {
            let (prev, current, next) = (window[0], window[1], window[2]);
            let tangent_out = next - prev;
            segments.push(Self::segment(prev, current, tangent_in, tangent_out));
            tangent_in = tangent_out;
        }

        let (prev, last) = (points[points.len() - 2], points[points.len() - 1]);
        segments.push(Self::segment(prev, last, tangent_in, tangent_in));

        debug!(
            "fitted {} cubic segments through {} points",
            segments.len(),
            points.len()
        );
        Ok(Self { segments })
    }

    fn segment(
        start: Point2,
        end: Point2,
        tangent_start: Point2,
        tangent_end: Point2,
    ) -> CubicSegment {
        CubicSegment::new(start, end, start + tangent_start / 3.0, end - tangent_end / 3.0)
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<CubicSegment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a fitted curve; kept alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CubicSegment> {
        self.segments.iter()
    }

    pub fn start(&self) -> Point2 {
        self.segments[0].start_anchor
    }

    pub fn end(&self) -> Point2 {
        self.segments[self.segments.len() - 1].end_anchor
    }

    /// Samples each segment at `samples_per_segment` evenly spaced parameters
    /// and returns the polyline, anchors included. Shared anchors appear once.
    pub fn flatten(&self, samples_per_segment: usize) -> Vec<Point2> {
        let n = samples_per_segment.max(1);
        let mut out = Vec::with_capacity(self.segments.len() * n + 1);
        out.push(self.start());
        for seg in &self.segments {
            for i in 1..n {
                out.push(seg.eval(i as f64 / n as f64));
            }
            out.push(seg.end_anchor);
        }
        out
    }
}

impl<'a> IntoIterator for &'a CompositeBezierCurve {
    type Item = &'a CubicSegment;
    type IntoIter = std::slice::Iter<'a, CubicSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for CompositeBezierCurve {
    type Item = CubicSegment;
    type IntoIter = std::vec::IntoIter<CubicSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point2, b: Point2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn right_angle_controls() {
        let p0 = Point2::new(0.0, 0.0);
        let p1 = Point2::new(10.0, 0.0);
        let p2 = Point2::new(10.0, 10.0);
        let curve = CompositeBezierCurve::fit(&[p0, p1, p2]).unwrap();
        assert_eq!(curve.len(), 2);

        let s0 = curve.segments()[0];
        assert_eq!(s0.start_anchor, p0);
        assert_eq!(s0.end_anchor, p1);
        assert!(close(s0.control1, Point2::new(10.0 / 3.0, 0.0)));
        assert!(close(s0.control2, Point2::new(20.0 / 3.0, -10.0 / 3.0)));

        let s1 = curve.segments()[1];
        assert_eq!(s1.start_anchor, p1);
        assert_eq!(s1.end_anchor, p2);
        assert!(close(s1.control1, Point2::new(40.0 / 3.0, 10.0 / 3.0)));
        assert!(close(s1.control2, Point2::new(20.0 / 3.0, 20.0 / 3.0)));
    }

    #[test]
    fn two_points_make_a_straight_cubic() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(9.0, 3.0);
        let curve = CompositeBezierCurve::fit(&[a, b]).unwrap();
        assert_eq!(curve.len(), 1);
        let seg = curve.segments()[0];
        assert!(close(seg.control1, Point2::new(3.0, 1.0)));
        assert!(close(seg.control2, Point2::new(6.0, 2.0)));
        assert!(close(seg.eval(0.5), Point2::new(4.5, 1.5)));
    }

    #[test]
    fn too_few_points() {
        assert_eq!(
            CompositeBezierCurve::fit(&[]),
            Err(Error::TooFewPoints { count: 0 })
        );
        assert_eq!(
            CompositeBezierCurve::fit(&[Point2::new(1.0, 1.0)]),
            Err(Error::TooFewPoints { count: 1 })
        );
    }

    #[test]
    fn eval_hits_anchors() {
        let seg = CubicSegment::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 2.0),
        );
        assert!(close(seg.eval(0.0), seg.start_anchor));
        assert!(close(seg.eval(1.0), seg.end_anchor));
        assert!(close(seg.eval(0.5), Point2::new(2.0, 1.5)));
    }

    #[test]
    fn flatten_keeps_anchors_once() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 2.0),
            Point2::new(10.0, 0.0),
        ];
        let curve = CompositeBezierCurve::fit(&pts).unwrap();
        let poly = curve.flatten(4);
        assert_eq!(poly.len(), 9);
        assert_eq!(poly[0], pts[0]);
        assert_eq!(poly[4], pts[1]);
        assert_eq!(poly[8], pts[2]);
    }
}
