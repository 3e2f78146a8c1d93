use num::complex::Complex;
use serde::{Deserialize, Serialize};

/// Number of pixels spanning one unit of the complex plane.
pub const DEFAULT_PIXELS_PER_UNIT: f64 = 80.0;

/// Resolution of the reference display: 320 x 240.
pub const DEFAULT_RESOLUTION: [u32; 2] = [320, 240];

/**
 * Fixed-resolution window onto the complex plane. The center pixel
 * (`width / 2`, `height / 2`, integer division) maps to the origin, and every
 * pixel step moves `1 / pixels_per_unit` along the corresponding axis. Rows
 * grow downward and map to increasing imaginary part.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Viewport {
    pub resolution: nalgebra::Vector2<u32>,
    pub pixels_per_unit: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            resolution: nalgebra::Vector2::new(DEFAULT_RESOLUTION[0], DEFAULT_RESOLUTION[1]),
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixels_per_unit: f64) -> Viewport {
        Viewport {
            resolution: nalgebra::Vector2::new(width, height),
            pixels_per_unit,
        }
    }

    pub fn width(&self) -> u32 {
        self.resolution[0]
    }

    pub fn height(&self) -> u32 {
        self.resolution[1]
    }

    pub fn contains(&self, pixel: (u32, u32)) -> bool {
        pixel.0 < self.width() && pixel.1 < self.height()
    }

    /// The pixel that maps exactly onto the origin of the complex plane.
    pub fn center_pixel(&self) -> (u32, u32) {
        (self.width() / 2, self.height() / 2)
    }

    pub fn pixel_mapper(&self) -> PixelMapper {
        PixelMapper::new(self)
    }

    /// Maps a single pixel into the complex plane.
    /// Panics if the pixel is outside of the viewport.
    pub fn map(&self, pixel: (u32, u32)) -> Complex<f64> {
        assert!(
            self.contains(pixel),
            "pixel ({}, {}) is outside of the {}x{} viewport",
            pixel.0,
            pixel.1,
            self.width(),
            self.height()
        );
        self.pixel_mapper().map(pixel)
    }
}

#[derive(Clone, Debug)]
/**
 * Used to map from pixel space along one axis into the complex plane.
 */
pub struct LinearPixelMap {
    origin_index: f64,
    pixels_per_unit: f64,
}

impl LinearPixelMap {
    /**
     * @param n: number of pixels along this axis
     * @param pixels_per_unit: number of pixels spanning one unit of the plane
     */
    pub fn new(n: u32, pixels_per_unit: f64) -> LinearPixelMap {
        assert!(n > 0);
        assert!(pixels_per_unit > 0.0);
        LinearPixelMap {
            origin_index: (n / 2) as f64,
            pixels_per_unit,
        }
    }

    // Map from pixel (integer) to point (float)
    pub fn map(&self, index: u32) -> f64 {
        (index as f64 - self.origin_index) / self.pixels_per_unit
    }
}

#[derive(Clone, Debug)]
pub struct PixelMapper {
    pub width: LinearPixelMap,
    pub height: LinearPixelMap,
}

impl PixelMapper {
    pub fn new(viewport: &Viewport) -> PixelMapper {
        PixelMapper {
            width: LinearPixelMap::new(viewport.width(), viewport.pixels_per_unit),
            height: LinearPixelMap::new(viewport.height(), viewport.pixels_per_unit),
        }
    }

    pub fn map(&self, pixel: (u32, u32)) -> Complex<f64> {
        let (x, y) = pixel;
        Complex::new(self.width.map(x), self.height.map(y))
    }
}

/// Allocates a column-major buffer: `buffer[x][y]`.
pub fn create_buffer<T: Clone>(value: T, resolution: &nalgebra::Vector2<u32>) -> Vec<Vec<T>> {
    vec![vec![value; resolution[1] as usize]; resolution[0] as usize]
}
