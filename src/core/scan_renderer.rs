use serde::{Deserialize, Serialize};

use crate::core::{
    cancel::CancelSignal,
    display::{DisplayBackend, DisplayError},
    histogram::Histogram,
    viewport::{PixelMapper, Viewport},
};
use crate::fractals::{
    gradient::{map_to_color, ColorIndex, Gradient},
    quadratic_map::QuadraticMapParams,
};

/// How pixels are pushed to the display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// One vertical line per run of identical colors within a column.
    #[default]
    Coalesced,
    /// One `set_pixel` call per pixel.
    PerPixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("draw call failed in column {column}: {source}")]
    Draw {
        column: u32,
        #[source]
        source: DisplayError,
    },
}

/// Counters collected during a single render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub pixel_count: u64,
    pub draw_call_count: u64,
    pub divergence_histogram: Histogram,
}

impl RenderStats {
    pub fn new(max_iter_count: u32) -> RenderStats {
        RenderStats {
            pixel_count: 0,
            draw_call_count: 0,
            divergence_histogram: Histogram::new(max_iter_count),
        }
    }

    /// Average number of pixels covered by each draw call.
    pub fn pixels_per_draw_call(&self) -> f64 {
        if self.draw_call_count == 0 {
            0.0
        } else {
            self.pixel_count as f64 / self.draw_call_count as f64
        }
    }
}

/// Run of identical colors within the column that is being scanned.
#[derive(Debug, Clone, Copy)]
struct ColumnRun {
    color: ColorIndex,
    start_row: u32,
}

/**
 * Renders a full frame, column by column. Each pixel is evaluated exactly once
 * and the resulting colors are pushed to the display either per pixel or as
 * coalesced vertical runs; both produce identical frames.
 */
#[derive(Debug, Clone)]
pub struct ScanRenderer {
    viewport: Viewport,
    fractal: QuadraticMapParams,
    gradient: Gradient,
    strategy: ScanStrategy,
}

impl ScanRenderer {
    pub fn new(
        viewport: Viewport,
        fractal: QuadraticMapParams,
        gradient: Gradient,
        strategy: ScanStrategy,
    ) -> ScanRenderer {
        ScanRenderer {
            viewport,
            fractal,
            gradient,
            strategy,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Renders without collecting statistics.
    pub fn render<D, C>(&self, display: &mut D, cancel: &C) -> Result<RenderOutcome, RenderError>
    where
        D: DisplayBackend,
        C: CancelSignal,
    {
        self.scan(display, cancel, None)
    }

    /// Same as `render`, also accumulating counters into `stats`.
    pub fn render_with_stats<D, C>(
        &self,
        display: &mut D,
        cancel: &C,
        stats: &mut RenderStats,
    ) -> Result<RenderOutcome, RenderError>
    where
        D: DisplayBackend,
        C: CancelSignal,
    {
        self.scan(display, cancel, Some(stats))
    }

    fn scan<D, C>(
        &self,
        display: &mut D,
        cancel: &C,
        mut stats: Option<&mut RenderStats>,
    ) -> Result<RenderOutcome, RenderError>
    where
        D: DisplayBackend,
        C: CancelSignal,
    {
        debug_assert_eq!(display.resolution(), self.viewport.resolution);
        display
            .clear_screen()
            .map_err(|source| RenderError::Draw { column: 0, source })?;
        count_draw_call(stats.as_deref_mut());

        let pixel_mapper = self.viewport.pixel_mapper();
        for x in 0..self.viewport.width() {
            let outcome = match self.strategy {
                ScanStrategy::Coalesced => self.scan_column_coalesced(
                    &pixel_mapper,
                    x,
                    display,
                    cancel,
                    stats.as_deref_mut(),
                ),
                ScanStrategy::PerPixel => self.scan_column_per_pixel(
                    &pixel_mapper,
                    x,
                    display,
                    cancel,
                    stats.as_deref_mut(),
                ),
            }
            .map_err(|source| RenderError::Draw { column: x, source })?;

            if outcome == RenderOutcome::Cancelled {
                return Ok(RenderOutcome::Cancelled);
            }
        }
        Ok(RenderOutcome::Completed)
    }

    fn evaluate(
        &self,
        pixel_mapper: &PixelMapper,
        pixel: (u32, u32),
        stats: Option<&mut RenderStats>,
    ) -> ColorIndex {
        let divergence = self.fractal.divergence(pixel_mapper.map(pixel));
        if let Some(stats) = stats {
            stats.pixel_count += 1;
            stats.divergence_histogram.insert(divergence);
        }
        map_to_color(divergence, &self.gradient, self.fractal.max_iter_count)
    }

    fn scan_column_coalesced<D, C>(
        &self,
        pixel_mapper: &PixelMapper,
        x: u32,
        display: &mut D,
        cancel: &C,
        mut stats: Option<&mut RenderStats>,
    ) -> Result<RenderOutcome, DisplayError>
    where
        D: DisplayBackend,
        C: CancelSignal,
    {
        let mut run: Option<ColumnRun> = None;
        for y in 0..self.viewport.height() {
            if cancel.is_cancel_requested() {
                return Ok(RenderOutcome::Cancelled);
            }
            let color = self.evaluate(pixel_mapper, (x, y), stats.as_deref_mut());
            match run {
                Some(current) if current.color == color => {}
                Some(current) => {
                    display.draw_vertical_line(x, current.start_row, y - 1, current.color)?;
                    count_draw_call(stats.as_deref_mut());
                    run = Some(ColumnRun {
                        color,
                        start_row: y,
                    });
                }
                None => {
                    run = Some(ColumnRun {
                        color,
                        start_row: y,
                    })
                }
            }
        }

        // Finish the line to the bottom of the column.
        if let Some(current) = run {
            display.draw_vertical_line(
                x,
                current.start_row,
                self.viewport.height() - 1,
                current.color,
            )?;
            count_draw_call(stats.as_deref_mut());
        }
        Ok(RenderOutcome::Completed)
    }

    fn scan_column_per_pixel<D, C>(
        &self,
        pixel_mapper: &PixelMapper,
        x: u32,
        display: &mut D,
        cancel: &C,
        mut stats: Option<&mut RenderStats>,
    ) -> Result<RenderOutcome, DisplayError>
    where
        D: DisplayBackend,
        C: CancelSignal,
    {
        for y in 0..self.viewport.height() {
            if cancel.is_cancel_requested() {
                return Ok(RenderOutcome::Cancelled);
            }
            let color = self.evaluate(pixel_mapper, (x, y), stats.as_deref_mut());
            display.set_pixel(x, y, color)?;
            count_draw_call(stats.as_deref_mut());
        }
        Ok(RenderOutcome::Completed)
    }
}

fn count_draw_call(stats: Option<&mut RenderStats>) {
    if let Some(stats) = stats {
        stats.draw_call_count += 1;
    }
}
