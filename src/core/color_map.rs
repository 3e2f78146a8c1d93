use image::Rgb;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::interpolation::{
    validate_keyframe_queries, InterpolationKeyframe, KeyframeInterpolator, LinearInterpolator,
};
use crate::core::lookup_table::LookupTable;
use crate::fractals::gradient::ColorIndex;

/// One entry per possible `ColorIndex`.
const PALETTE_ENTRY_COUNT: usize = 256;

/**
 * Represents a single "keyframe" of the color map, pairing a
 * "query" with the color that should be produced at that query point.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorMapKeyFrame {
    pub query: f32,       // specify location of this color within the map; on [0,1]
    pub rgb_raw: [u8; 3], // [R, G, B]
}

pub fn validate_keyframes(keyframes: &[ColorMapKeyFrame]) -> Result<(), String> {
    let queries: Vec<f32> = keyframes.iter().map(|kf| kf.query).collect();
    validate_keyframe_queries(&queries)
}

pub trait ColorMapper {
    fn compute_pixel(&self, query: f32) -> Rgb<u8>;
}

/**
 * Simple implementation of a "piecewise linear" color map, where the colors
 * are represented by simple linear interpolation in RGB color space.
 */
pub struct ColorMap {
    interpolator: KeyframeInterpolator<f32, Vector3<f32>, LinearInterpolator>,
}

impl ColorMap {
    pub fn new(keyframes: &[ColorMapKeyFrame]) -> Self {
        let internal_keyframes: Vec<InterpolationKeyframe<f32, Vector3<f32>>> = keyframes
            .iter()
            .map(|kf| InterpolationKeyframe {
                input: kf.query,
                output: Vector3::new(
                    kf.rgb_raw[0] as f32,
                    kf.rgb_raw[1] as f32,
                    kf.rgb_raw[2] as f32,
                ),
            })
            .collect();

        Self {
            interpolator: KeyframeInterpolator::new(internal_keyframes, LinearInterpolator),
        }
    }
}

impl ColorMapper for ColorMap {
    fn compute_pixel(&self, query: f32) -> Rgb<u8> {
        let color: Vector3<f32> = self.interpolator.evaluate(query);
        Rgb([
            color[0].round().clamp(0.0, 255.0) as u8,
            color[1].round().clamp(0.0, 255.0) as u8,
            color[2].round().clamp(0.0, 255.0) as u8,
        ])
    }
}

/**
 * Converts display color indices into RGB for presentation. The keyframe
 * color map is evaluated once per index up front, so presenting a frame is a
 * table lookup per pixel.
 */
pub struct Palette {
    table: LookupTable<Rgb<u8>>,
}

impl Palette {
    pub fn new(keyframes: &[ColorMapKeyFrame]) -> Palette {
        let color_map = ColorMap::new(keyframes);
        let max_index = (PALETTE_ENTRY_COUNT - 1) as f32;
        Palette {
            table: LookupTable::new([0.0, max_index], PALETTE_ENTRY_COUNT, |index: f32| {
                color_map.compute_pixel(index / max_index)
            }),
        }
    }

    pub fn grayscale() -> Palette {
        Palette::new(&[
            ColorMapKeyFrame {
                query: 0.0,
                rgb_raw: [0, 0, 0],
            },
            ColorMapKeyFrame {
                query: 1.0,
                rgb_raw: [255, 255, 255],
            },
        ])
    }

    pub fn rgb(&self, color: ColorIndex) -> Rgb<u8> {
        self.table.lookup(color as f32)
    }
}
