use serde::{Deserialize, Serialize};

use crate::core::color_map::ColorMapKeyFrame;
use crate::fractals::quadratic_map::NON_ESCAPING;

/// Index into the display palette. Interpreted as a color intensity.
pub type ColorIndex = u8;

pub const GRADIENT_BUCKET_COUNT: usize = 16;

pub const BLUE_GRADIENT: [ColorIndex; GRADIENT_BUCKET_COUNT] = [
    0, 24, 25, 26, 27, 28, 29, 30, 31, 63, 95, 127, 159, 191, 223, 255,
];

pub const ORANGE_GRADIENT: [ColorIndex; GRADIENT_BUCKET_COUNT] = [
    0, 8, 40, 72, 104, 136, 168, 200, 232, 233, 234, 235, 236, 237, 238, 239,
];

const LINEAR_SCALE_STEP: u64 = 8;
const DARKEN_BASE_COLOR: ColorIndex = 0xFF;

/**
 * Maps an escape count onto a display color. Every variant is total over the
 * full `[0, max_iter]` range, and the out-of-range results are clamped rather
 * than rejected.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gradient {
    #[default]
    Blue,
    Orange,
    /// `result * 8`, saturating at full intensity.
    LinearScale,
    /// Full intensity, darkened more for points that take longer to escape.
    Darken,
    /// User supplied 16-entry table. Entry 0 is the inside color.
    Table([ColorIndex; GRADIENT_BUCKET_COUNT]),
}

impl Gradient {
    /// Gradients offered by the selection menu, in menu order.
    pub const MENU: [Gradient; 4] = [
        Gradient::Blue,
        Gradient::Orange,
        Gradient::LinearScale,
        Gradient::Darken,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Gradient::Blue => "Blue",
            Gradient::Orange => "Orange",
            Gradient::LinearScale => "Linear",
            Gradient::Darken => "Darken",
            Gradient::Table(_) => "Custom",
        }
    }

    pub fn table(&self) -> Option<&[ColorIndex; GRADIENT_BUCKET_COUNT]> {
        match self {
            Gradient::Blue => Some(&BLUE_GRADIENT),
            Gradient::Orange => Some(&ORANGE_GRADIENT),
            Gradient::Table(table) => Some(table),
            Gradient::LinearScale | Gradient::Darken => None,
        }
    }

    /// Color used for points that never escape.
    pub fn inside_color(&self) -> ColorIndex {
        match self {
            Gradient::LinearScale => 0,
            Gradient::Darken => DARKEN_BASE_COLOR,
            _ => self.table().map_or(0, |table| table[0]),
        }
    }

    /// Palette keyframes used when the parameters do not specify any.
    pub fn default_palette(&self) -> Vec<ColorMapKeyFrame> {
        let keyframe = |query: f32, rgb_raw: [u8; 3]| ColorMapKeyFrame { query, rgb_raw };
        match self {
            Gradient::Blue => vec![
                keyframe(0.0, [0, 0, 0]),
                keyframe(0.5, [20, 60, 230]),
                keyframe(1.0, [240, 245, 255]),
            ],
            Gradient::Orange => vec![
                keyframe(0.0, [0, 0, 0]),
                keyframe(0.6, [240, 120, 10]),
                keyframe(1.0, [255, 235, 190]),
            ],
            Gradient::LinearScale | Gradient::Darken | Gradient::Table(_) => vec![
                keyframe(0.0, [0, 0, 0]),
                keyframe(1.0, [255, 255, 255]),
            ],
        }
    }
}

/// Scales an escaped result into the gradient buckets `1..=15`; bucket 0 is
/// reserved for points that never escape.
pub fn gradient_bucket(result: u32, max_iter: u32) -> usize {
    let scaled = (result as u64) * (GRADIENT_BUCKET_COUNT as u64) / (max_iter.max(1) as u64);
    (scaled as usize).clamp(1, GRADIENT_BUCKET_COUNT - 1)
}

/// Scales `color` by `amount / 255`.
pub fn darken(color: ColorIndex, amount: u8) -> ColorIndex {
    ((color as u32) * (amount as u32) / 255) as ColorIndex
}

/// Maps a divergence result onto a display color.
pub fn map_to_color(result: u32, gradient: &Gradient, max_iter: u32) -> ColorIndex {
    let max_iter = max_iter.max(1);
    let result = result.min(max_iter);
    if result == NON_ESCAPING {
        return gradient.inside_color();
    }
    // Widened so that large iteration caps cannot overflow.
    let (result_wide, max_iter_wide) = (result as u64, max_iter as u64);
    match gradient {
        Gradient::LinearScale => (result_wide * LINEAR_SCALE_STEP).min(255) as ColorIndex,
        Gradient::Darken => {
            let amount = 255 * (max_iter_wide - result_wide) / max_iter_wide;
            darken(DARKEN_BASE_COLOR, amount as u8)
        }
        _ => match gradient.table() {
            Some(table) => table[gradient_bucket(result, max_iter)],
            None => gradient.inside_color(),
        },
    }
}
