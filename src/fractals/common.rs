use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::{validate_keyframes, ColorMapKeyFrame, Palette},
    scan_renderer::{ScanRenderer, ScanStrategy},
    viewport::Viewport,
};
use crate::errors::{FractalError, Result};

use super::{
    gradient::Gradient,
    quadratic_map::{QuadraticMapParams, MAX_ITER_COUNT_LIMIT},
};

/// Contents of a render parameter file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FractalParams {
    #[serde(default)]
    pub viewport: Viewport,
    pub fractal: QuadraticMapParams,
    #[serde(default)]
    pub gradient: Gradient,
    #[serde(default)]
    pub scan_strategy: ScanStrategy,
    /// Overrides the default palette of the gradient.
    #[serde(default)]
    pub palette: Option<Vec<ColorMapKeyFrame>>,
}

impl FractalParams {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FractalParams> {
        let params: FractalParams = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(FractalError::InvalidParams(message));
        validate_resolution(&self.viewport.resolution)?;
        if !(self.viewport.pixels_per_unit > 0.0 && self.viewport.pixels_per_unit.is_finite()) {
            return invalid(format!(
                "pixels_per_unit must be positive, got {}",
                self.viewport.pixels_per_unit
            ));
        }
        validate_max_iter_count(self.fractal.max_iter_count)?;
        if !self.fractal.julia_constant.iter().all(|value| value.is_finite()) {
            return invalid("julia_constant must be finite".to_owned());
        }
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

    pub fn renderer(&self) -> ScanRenderer {
        ScanRenderer::new(
            self.viewport.clone(),
            self.fractal,
            self.gradient,
            self.scan_strategy,
        )
    }
}

pub fn validate_resolution(resolution: &nalgebra::Vector2<u32>) -> Result<()> {
    if resolution[0] == 0 || resolution[1] == 0 {
        return Err(FractalError::InvalidParams(format!(
            "resolution must be positive, got {}x{}",
            resolution[0], resolution[1]
        )));
    }
    Ok(())
}

pub fn validate_max_iter_count(max_iter_count: u32) -> Result<()> {
    if max_iter_count == 0 || max_iter_count > MAX_ITER_COUNT_LIMIT {
        return Err(FractalError::InvalidParams(format!(
            "max_iter_count must be in [1, {}], got {}",
            MAX_ITER_COUNT_LIMIT, max_iter_count
        )));
    }
    Ok(())
}
