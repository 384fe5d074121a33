// src/generator.rs

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::geometry::Point2;

/// Parameters of a midpoint displacement run.
///
/// `steps` bounds the recursion depth, `maximum_displacement` is the
/// magnitude used for the first midpoint, and every deeper level multiplies
/// the magnitude by `2^(-roughness)`. Roughness above 1 smooths the line out
/// quickly; below 1 it stays jagged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementConfig {
    steps: u32,
    maximum_displacement: f64,
    roughness: f64,
}

impl DisplacementConfig {
    pub fn new(steps: u32, maximum_displacement: f64, roughness: f64) -> Result<Self> {
        if !maximum_displacement.is_finite() {
            return Err(Error::NonFiniteParameter {
                name: "maximum displacement",
                value: maximum_displacement,
            });
        }
        if maximum_displacement < 0.0 {
            return Err(Error::NegativeDisplacement(maximum_displacement));
        }
        if !roughness.is_finite() {
            return Err(Error::NonFiniteParameter {
                name: "roughness",
                value: roughness,
            });
        }

        let config = Self {
            steps,
            maximum_displacement,
            roughness,
        };
        config.check_sample_ranges()?;
        Ok(config)
    }

    /// Walks the magnitudes exactly as the subdivision will, so every range
    /// `[-m, m]` it samples from has a finite width.
    fn check_sample_ranges(&self) -> Result<()> {
        let decay = self.decay();
        let mut magnitude = self.maximum_displacement;
        for depth in 0..self.steps {
            if magnitude <= 0.0 {
                break;
            }
            // The inclusive sampler divides the width by `1 - EPSILON`.
            if !(magnitude * 2.0 / (1.0 - f64::EPSILON)).is_finite() {
                return Err(Error::DisplacementOverflow {
                    depth,
                    roughness: self.roughness,
                });
            }
            // Non-growing magnitudes can't overflow deeper down.
            if decay <= 1.0 {
                break;
            }
            magnitude *= decay;
        }
        Ok(())
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn maximum_displacement(&self) -> f64 {
        self.maximum_displacement
    }

    pub fn roughness(&self) -> f64 {
        self.roughness
    }

    pub fn with_steps(self, steps: u32) -> Result<Self> {
        Self::new(steps, self.maximum_displacement, self.roughness)
    }

    pub fn with_maximum_displacement(self, maximum_displacement: f64) -> Result<Self> {
        Self::new(self.steps, maximum_displacement, self.roughness)
    }

    pub fn with_roughness(self, roughness: f64) -> Result<Self> {
        Self::new(self.steps, self.maximum_displacement, roughness)
    }

    /// Factor applied to the magnitude at each deeper level.
    pub fn decay(&self) -> f64 {
        (-self.roughness).exp2()
    }
}

impl Default for DisplacementConfig {
    fn default() -> Self {
        Self {
            steps: 6,
            maximum_displacement: 10.0,
            roughness: 1.0,
        }
    }
}

/// Turns a straight segment into a fractal polyline by recursively pushing
/// midpoints sideways.
///
/// The generator holds no state between calls, so one instance can serve any
/// number of segments, each with its own seed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MidpointDisplacement {
    config: DisplacementConfig,
}

impl MidpointDisplacement {
    pub fn new(config: DisplacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DisplacementConfig {
        &self.config
    }

    /// Upper bound on the number of points `generate` returns.
    pub fn max_point_count(&self) -> usize {
        1usize
            .checked_shl(self.config.steps)
            .and_then(|n| n.checked_add(1))
            .unwrap_or(usize::MAX)
    }

    /// Points from `start` to `end`, displaced with a stream seeded from
    /// `seed`. The same inputs always give the same points.
    pub fn generate(&self, start: Point2, end: Point2, seed: u64) -> Result<Vec<Point2>> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with_rng(start, end, &mut rng)
    }

    /// Like [`generate`](Self::generate), seeded from thread-local entropy.
    /// Not reproducible.
    pub fn generate_unseeded(&self, start: Point2, end: Point2) -> Result<Vec<Point2>> {
        let seed = rand::thread_rng().gen::<u64>();
        self.generate(start, end, seed)
    }

    /// Runs the subdivision drawing from a caller-owned stream, so several
    /// segments can share one evolving stream.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        start: Point2,
        end: Point2,
        rng: &mut R,
    ) -> Result<Vec<Point2>> {
        for p in [start, end] {
            if !p.is_finite() {
                return Err(Error::NonFinitePoint { x: p.x, y: p.y });
            }
        }

        let capacity = self.max_point_count().min(1 << 16);
        let mut points = Vec::with_capacity(capacity);
        points.push(start);
        self.displace(
            &mut points,
            start,
            end,
            rng,
            self.config.steps,
            self.config.maximum_displacement,
        );
        points.push(end);

        debug!(
            "midpoint displacement produced {} points (steps={}, max={}, roughness={})",
            points.len(),
            self.config.steps,
            self.config.maximum_displacement,
            self.config.roughness
        );
        Ok(points)
    }

    fn displace<R: Rng + ?Sized>(
        &self,
        points: &mut Vec<Point2>,
        a: Point2,
        b: Point2,
        rng: &mut R,
        remaining: u32,
        magnitude: f64,
    ) {
        if remaining == 0 || magnitude <= 0.0 {
            return;
        }

        let mid = a.midpoint(b);
        // Zero for a zero-length segment, which leaves the midpoint in place.
        let normal = (b - a).perp().normalize_or_zero();
        let offset = rng.gen_range(-magnitude..=magnitude);
        let new_point = mid + normal * offset;
        trace!(
            "depth {}: midpoint ({}, {}) offset by {}",
            self.config.steps - remaining,
            mid.x,
            mid.y,
            offset
        );

        let next_magnitude = magnitude * self.config.decay();
        self.displace(points, a, new_point, rng, remaining - 1, next_magnitude);
        points.push(new_point);
        self.displace(points, new_point, b, rng, remaining - 1, next_magnitude);
    }
}
