use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::{validate_keyframes, ColorMapKeyFrame, Palette},
    file_io::{serialize_to_json, FilePrefix},
};
use crate::errors::{FractalError, Result};
use crate::fractals::{
    common::{validate_max_iter_count, validate_resolution},
    gradient::{map_to_color, Gradient},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColorSwatchParams {
    pub resolution: nalgebra::Vector2<u32>,
    pub gradient: Gradient,
    pub max_iter_count: u32,
    #[serde(default)]
    pub palette: Option<Vec<ColorMapKeyFrame>>,
}

impl ColorSwatchParams {
    pub fn validate(&self) -> Result<()> {
        validate_resolution(&self.resolution)?;
        validate_max_iter_count(self.max_iter_count)?;
        if let Some(keyframes) = &self.palette {
            validate_keyframes(keyframes).map_err(FractalError::InvalidParams)?;
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        match &self.palette {
            Some(keyframes) => Palette::new(keyframes),
            None => Palette::new(&self.gradient.default_palette()),
        }
    }
}

/**
 * Draws one vertical band per divergence value, from `0` (inside color) on the
 * left through `max_iter_count` on the right.
 */
pub fn color_swatch_image(params: &ColorSwatchParams) -> RgbImage {
    let palette = params.palette();
    let band_count = params.max_iter_count.max(1) + 1;
    let width = params.resolution[0].max(1);
    let mut imgbuf = RgbImage::new(width, params.resolution[1]);
    for (x, _, pixel) in imgbuf.enumerate_pixels_mut() {
        let result = (x as u64 * band_count as u64 / width as u64) as u32;
        *pixel = palette.rgb(map_to_color(result, &params.gradient, params.max_iter_count));
    }
    imgbuf
}

pub fn generate_color_swatch(params_path: &str, file_prefix: FilePrefix) -> Result<()> {
    let params: ColorSwatchParams = serde_json::from_str(&std::fs::read_to_string(params_path)?)?;
    params.validate()?;

    serialize_to_json(&file_prefix.with_suffix(".json"), &params)?;

    let render_path = file_prefix.with_suffix(".png");
    color_swatch_image(&params).save(&render_path)?;
    log::info!("Wrote image file to: {}", render_path.display());
    Ok(())
}
