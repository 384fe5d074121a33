// src/error.rs

use thiserror::Error;

/// Errors returned by path generation and fitting.
///
/// Every variant is an invalid-argument condition: valid input always
/// succeeds, and invalid input fails before any point is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("point ({x}, {y}) has a non-finite coordinate")]
    NonFinitePoint { x: f64, y: f64 },

    #[error("maximum displacement must not be negative, got {0}")]
    NegativeDisplacement(f64),

    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("displacement overflows at depth {depth} with roughness {roughness}")]
    DisplacementOverflow { depth: u32, roughness: f64 },

    #[error("curve fitting needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("unknown edge type \"{0}\": expected \"straight\" or \"curved\"")]
    UnknownEdgeType(String),

    #[error("displaced line requested before any move_to")]
    NoCurrentPoint,
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::NonFinitePoint { .. }
            | Self::NegativeDisplacement(_)
            | Self::NonFiniteParameter { .. }
            | Self::DisplacementOverflow { .. }
            | Self::TooFewPoints { .. }
            | Self::UnknownEdgeType(_)
            | Self::NoCurrentPoint => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
