// src/lib.rs

pub mod bezier;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod path;

pub use bezier::{CompositeBezierCurve, CubicSegment};
pub use error::{Error, Result};
pub use generator::{DisplacementConfig, MidpointDisplacement};
pub use geometry::Point2;
pub use path::{DisplacedPathBuilder, DrawPath, EdgeType, PathElement};
