use num::complex::Complex;
use serde::{Deserialize, Serialize};

use crate::core::viewport::Viewport;

/// A point escapes once its squared radius exceeds this value (radius 2).
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Divergence value reported for points that never escape.
pub const NON_ESCAPING: u32 = 0;

/// Largest iteration cap accepted from parameter files.
pub const MAX_ITER_COUNT_LIMIT: u32 = 1 << 20;

/// Julia constant used by default: `-0.835 - 0.2321i`.
pub const JULIA_SPIRAL: [f64; 2] = [-0.835, -0.2321];

/// Alternate Julia constant: `-0.79 + 0.15i`.
pub const JULIA_DENDRITE: [f64; 2] = [-0.79, 0.15];

/// The two members of the quadratic-map family that can be rendered.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia,
}

impl FractalKind {
    pub const ALL: [FractalKind; 2] = [FractalKind::Mandelbrot, FractalKind::Julia];

    pub fn display_name(&self) -> &'static str {
        match self {
            FractalKind::Mandelbrot => "Mandelbrot",
            FractalKind::Julia => "Julia",
        }
    }
}

/**
 * Data structure for storing the internal state of the quadratic map sequence.
 * Squares of both components are cached so that each step needs only three
 * multiplications.
 */
pub struct QuadraticMapSequence {
    pub x0: f64,
    pub y0: f64,
    pub x: f64,
    pub y: f64,
    pub x_sqr: f64,
    pub y_sqr: f64,
    pub iter_count: u32,
}

impl QuadraticMapSequence {
    /// Implements the equation:  Z := Z*Z + C, where both Z and C are complex numbers
    /// point:  initial value for "Z" in the above equation
    /// constant_term:  value for "C" in the above equation
    pub fn new(point: Complex<f64>, constant_term: Complex<f64>) -> QuadraticMapSequence {
        QuadraticMapSequence {
            x0: constant_term.re,
            y0: constant_term.im,
            x: point.re,
            y: point.im,
            x_sqr: point.re * point.re,
            y_sqr: point.im * point.im,
            iter_count: 0,
        }
    }

    pub fn radius_squared(&self) -> f64 {
        self.x_sqr + self.y_sqr
    }

    // Z = Z*Z + C
    pub fn step(&mut self) {
        self.y = (self.x + self.x) * self.y + self.y0;
        self.x = self.x_sqr - self.y_sqr + self.x0;
        self.x_sqr = self.x * self.x;
        self.y_sqr = self.y * self.y;
        self.iter_count += 1;
    }

    /// Steps the sequence until it escapes or `max_iter_count` steps are taken.
    /// @return: `n + 1` if the escape was detected before step `n`, otherwise `NON_ESCAPING`.
    pub fn escape_count(&mut self, max_iter_count: u32) -> u32 {
        while self.iter_count < max_iter_count {
            if self.radius_squared() > ESCAPE_RADIUS_SQUARED {
                return self.iter_count + 1;
            }
            self.step();
        }
        NON_ESCAPING
    }
}

/// Everything needed to evaluate one fractal, independent of the viewport.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct QuadraticMapParams {
    pub kind: FractalKind,
    #[serde(default = "default_julia_constant")]
    pub julia_constant: [f64; 2],
    pub max_iter_count: u32,
}

fn default_julia_constant() -> [f64; 2] {
    JULIA_SPIRAL
}

impl Default for QuadraticMapParams {
    fn default() -> Self {
        QuadraticMapParams {
            kind: FractalKind::Mandelbrot,
            julia_constant: JULIA_SPIRAL,
            max_iter_count: 16,
        }
    }
}

impl QuadraticMapParams {
    pub fn julia_constant(&self) -> Complex<f64> {
        Complex::new(self.julia_constant[0], self.julia_constant[1])
    }

    /// Iteration constant "C" for a given starting point.
    pub fn constant_term(&self, point: Complex<f64>) -> Complex<f64> {
        match self.kind {
            FractalKind::Mandelbrot => point,
            FractalKind::Julia => self.julia_constant(),
        }
    }

    /// Divergence of a point that is already in the complex plane.
    pub fn divergence(&self, point: Complex<f64>) -> u32 {
        QuadraticMapSequence::new(point, self.constant_term(point)).escape_count(self.max_iter_count)
    }
}

/// Divergence of a single pixel: the result is in `[0, max_iter_count]`, where
/// `NON_ESCAPING` marks points that stayed bounded for every iteration.
/// Panics if the pixel is outside of the viewport.
pub fn compute_divergence(
    viewport: &Viewport,
    pixel: (u32, u32),
    kind: FractalKind,
    julia_constant: Complex<f64>,
    max_iter_count: u32,
) -> u32 {
    let point = viewport.map(pixel);
    let constant_term = match kind {
        FractalKind::Mandelbrot => point,
        FractalKind::Julia => julia_constant,
    };
    QuadraticMapSequence::new(point, constant_term).escape_count(max_iter_count)
}
