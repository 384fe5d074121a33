// src/path.rs

use std::str::FromStr;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bezier::CompositeBezierCurve;
use crate::error::{Error, Result};
use crate::generator::MidpointDisplacement;
use crate::geometry::Point2;

/// How a generated point sequence is turned into path commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// One straight line per consecutive pair of points.
    #[default]
    Straight,
    /// A composite Bezier curve fitted through the points.
    Curved,
}

impl FromStr for EdgeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "straight" => Ok(EdgeType::Straight),
            "curved" => Ok(EdgeType::Curved),
            _ => Err(Error::UnknownEdgeType(s.to_string())),
        }
    }
}

impl TryFrom<u8> for EdgeType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(EdgeType::Straight),
            1 => Ok(EdgeType::Curved),
            other => Err(Error::UnknownEdgeType(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathElement {
    MoveTo(Point2),
    LineTo(Point2),
    CubicTo {
        control1: Point2,
        control2: Point2,
        end: Point2,
    },
}

/// An owned list of drawing commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawPath {
    elements: Vec<PathElement>,
    current: Option<Point2>,
}

impl DrawPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn current_point(&self) -> Option<Point2> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn move_to(&mut self, p: Point2) {
        self.elements.push(PathElement::MoveTo(p));
        self.current = Some(p);
    }

    pub fn line_to(&mut self, p: Point2) {
        self.elements.push(PathElement::LineTo(p));
        self.current = Some(p);
    }

    pub fn cubic_to(&mut self, control1: Point2, control2: Point2, end: Point2) {
        self.elements.push(PathElement::CubicTo {
            control1,
            control2,
            end,
        });
        self.current = Some(end);
    }

    /// Connects `points` with straight lines. Starts a new sub-path at the
    /// first point unless the path already sits there.
    pub fn append_points(&mut self, points: &[Point2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if self.current != Some(*first) {
            self.move_to(*first);
        }
        for p in rest {
            self.line_to(*p);
        }
    }

    /// Appends one cubic per segment, joining at the curve's start the same
    /// way [`append_points`](Self::append_points) does.
    pub fn append_curve(&mut self, curve: &CompositeBezierCurve) {
        if self.current != Some(curve.start()) {
            self.move_to(curve.start());
        }
        for seg in curve {
            self.cubic_to(seg.control1, seg.control2, seg.end_anchor);
        }
    }

    /// SVG path data (`d` attribute) for this path.
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            d.push_str(&match element {
                PathElement::MoveTo(p) => format!("M {} {}", p.x, p.y),
                PathElement::LineTo(p) => format!("L {} {}", p.x, p.y),
                PathElement::CubicTo {
                    control1: c1,
                    control2: c2,
                    end,
                } => format!("C {} {} {} {} {} {}", c1.x, c1.y, c2.x, c2.y, end.x, end.y),
            });
        }
        d
    }
}

/// Builds a path out of displaced edges.
///
/// The builder owns its generator, its output path, and a single random
/// stream seeded once at construction. Each
/// [`displaced_line_to`](Self::displaced_line_to) continues that stream, so
/// successive edges look different while the whole path stays reproducible
/// from the initial seed.
#[derive(Clone, Debug)]
pub struct DisplacedPathBuilder {
    generator: MidpointDisplacement,
    edge_type: EdgeType,
    rng: StdRng,
    path: DrawPath,
}

impl DisplacedPathBuilder {
    pub fn new(generator: MidpointDisplacement, edge_type: EdgeType, seed: u64) -> Self {
        Self {
            generator,
            edge_type,
            rng: StdRng::seed_from_u64(seed),
            path: DrawPath::new(),
        }
    }

    /// A path holding one displaced edge from `start` to `end`.
    pub fn between(
        generator: &MidpointDisplacement,
        start: Point2,
        end: Point2,
        seed: u64,
        edge_type: EdgeType,
    ) -> Result<DrawPath> {
        let points = generator.generate(start, end, seed)?;
        let mut path = DrawPath::new();
        append_edge(&mut path, &points, edge_type)?;
        Ok(path)
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub fn generator(&self) -> &MidpointDisplacement {
        &self.generator
    }

    pub fn move_to(&mut self, p: Point2) -> Result<()> {
        if !p.is_finite() {
            return Err(Error::NonFinitePoint { x: p.x, y: p.y });
        }
        self.path.move_to(p);
        Ok(())
    }

    /// Extends the path from its current point to `target` with a freshly
    /// displaced edge.
    pub fn displaced_line_to(&mut self, target: Point2) -> Result<()> {
        let start = self.path.current_point().ok_or(Error::NoCurrentPoint)?;
        let points = self
            .generator
            .generate_with_rng(start, target, &mut self.rng)?;
        append_edge(&mut self.path, &points, self.edge_type)?;
        debug!(
            "displaced edge to ({}, {}): path now has {} elements",
            target.x,
            target.y,
            self.path.elements().len()
        );
        Ok(())
    }

    pub fn path(&self) -> &DrawPath {
        &self.path
    }

    pub fn into_path(self) -> DrawPath {
        self.path
    }
}

fn append_edge(path: &mut DrawPath, points: &[Point2], edge_type: EdgeType) -> Result<()> {
    match edge_type {
        EdgeType::Straight => path.append_points(points),
        EdgeType::Curved => path.append_curve(&CompositeBezierCurve::fit(points)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::DisplacementConfig;

    fn generator() -> MidpointDisplacement {
        MidpointDisplacement::new(DisplacementConfig::new(3, 2.0, 1.0).unwrap())
    }

    #[test]
    fn parses_edge_types() {
        assert_eq!("straight".parse::<EdgeType>(), Ok(EdgeType::Straight));
        assert_eq!("Curved".parse::<EdgeType>(), Ok(EdgeType::Curved));
        assert_eq!(EdgeType::try_from(1u8), Ok(EdgeType::Curved));
        assert_eq!(
            "zigzag".parse::<EdgeType>(),
            Err(Error::UnknownEdgeType("zigzag".into()))
        );
        assert_eq!(
            EdgeType::try_from(2u8),
            Err(Error::UnknownEdgeType("2".into()))
        );
        for alias in ["0", "1", "bezier", "composite-bezier", "straight-edged"] {
            assert_eq!(
                alias.parse::<EdgeType>(),
                Err(Error::UnknownEdgeType(alias.into()))
            );
        }
    }

    #[test]
    fn straight_edge_has_one_line_per_gap() {
        let path = DisplacedPathBuilder::between(
            &generator(),
            Point2::new(0.0, 0.0),
            Point2::new(16.0, 0.0),
            3,
            EdgeType::Straight,
        )
        .unwrap();
        let elements = path.elements();
        assert_eq!(elements.len(), 9);
        assert_eq!(elements[0], PathElement::MoveTo(Point2::new(0.0, 0.0)));
        assert!(elements[1..]
            .iter()
            .all(|e| matches!(e, PathElement::LineTo(_))));
        assert_eq!(path.current_point(), Some(Point2::new(16.0, 0.0)));
    }

    #[test]
    fn curved_edge_has_one_cubic_per_gap() {
        let path = DisplacedPathBuilder::between(
            &generator(),
            Point2::new(0.0, 0.0),
            Point2::new(16.0, 0.0),
            3,
            EdgeType::Curved,
        )
        .unwrap();
        let elements = path.elements();
        assert_eq!(elements.len(), 9);
        assert!(elements[1..]
            .iter()
            .all(|e| matches!(e, PathElement::CubicTo { .. })));
        assert_eq!(path.current_point(), Some(Point2::new(16.0, 0.0)));
    }

    #[test]
    fn line_to_without_move_fails() {
        let mut builder = DisplacedPathBuilder::new(generator(), EdgeType::Straight, 0);
        assert_eq!(
            builder.displaced_line_to(Point2::new(1.0, 1.0)),
            Err(Error::NoCurrentPoint)
        );
        assert!(builder.path().is_empty());
    }

    #[test]
    fn consecutive_edges_chain_without_extra_moves() {
        let mut builder = DisplacedPathBuilder::new(generator(), EdgeType::Straight, 21);
        builder.move_to(Point2::new(0.0, 0.0)).unwrap();
        builder.displaced_line_to(Point2::new(8.0, 0.0)).unwrap();
        builder.displaced_line_to(Point2::new(8.0, 8.0)).unwrap();
        let path = builder.into_path();
        let moves = path
            .elements()
            .iter()
            .filter(|e| matches!(e, PathElement::MoveTo(_)))
            .count();
        assert_eq!(moves, 1);
        assert_eq!(path.elements().len(), 17);
        assert_eq!(path.current_point(), Some(Point2::new(8.0, 8.0)));
    }

    #[test]
    fn svg_data_formats_commands() {
        let mut path = DrawPath::new();
        path.move_to(Point2::new(0.0, 0.0));
        path.line_to(Point2::new(1.5, 2.0));
        path.cubic_to(
            Point2::new(2.0, 3.0),
            Point2::new(4.0, 5.0),
            Point2::new(6.0, 7.0),
        );
        assert_eq!(path.to_svg_data(), "M 0 0 L 1.5 2 C 2 3 4 5 6 7");
    }
}
