use std::io::Write;

use crate::core::{
    cancel::NeverCancel,
    display::FrameBuffer,
    file_io::{serialize_to_json, FilePrefix},
    scan_renderer::{RenderOutcome, RenderStats},
    stopwatch::Stopwatch,
};
use crate::errors::Result;
use crate::fractals::common::FractalParams;

/// Result of rendering a full frame into memory.
pub struct RenderedFrame {
    pub frame_buffer: FrameBuffer,
    pub stats: RenderStats,
    pub outcome: RenderOutcome,
}

/// Renders the full frame into memory. Batch renders are never cancelled.
pub fn render_to_frame_buffer(params: &FractalParams) -> Result<RenderedFrame> {
    params.validate()?;
    let renderer = params.renderer();
    let mut frame_buffer = FrameBuffer::new(params.viewport.resolution);
    let mut stats = RenderStats::new(params.fractal.max_iter_count);
    let outcome = renderer.render_with_stats(&mut frame_buffer, &NeverCancel, &mut stats)?;
    Ok(RenderedFrame {
        frame_buffer,
        stats,
        outcome,
    })
}

/**
 * Renders the fractal and writes the image, a copy of the parameters and a
 * diagnostics file (timing, divergence histogram and draw statistics).
 */
pub fn render_fractal(params: &FractalParams, file_prefix: FilePrefix) -> Result<RenderOutcome> {
    let mut stopwatch = Stopwatch::new(format!(
        "{} Render Stopwatch",
        params.fractal.kind.display_name()
    ));

    serialize_to_json(&file_prefix.with_suffix(".json"), params)?;
    let palette = params.palette();
    stopwatch.record_split("basic setup".to_owned());

    let RenderedFrame {
        frame_buffer,
        stats,
        outcome,
    } = render_to_frame_buffer(params)?;
    stopwatch.record_split("scan render".to_owned());
    if outcome == RenderOutcome::Cancelled {
        log::info!("Render cancelled, no image written");
        return Ok(outcome);
    }
    log::debug!(
        "{} pixels drawn with {} draw calls ({:.1} pixels per call)",
        stats.pixel_count,
        stats.draw_call_count,
        stats.pixels_per_draw_call()
    );

    let imgbuf = frame_buffer.to_image(&palette);
    stopwatch.record_split("apply palette".to_owned());

    let render_path = file_prefix.with_suffix(".png");
    imgbuf.save(&render_path)?;
    stopwatch.record_split("write PNG".to_owned());
    log::info!("Wrote image file to: {}", render_path.display());

    let mut diagnostics_file = file_prefix.create_file_with_suffix("_diagnostics.txt")?;
    stopwatch.display(&mut diagnostics_file)?;
    writeln!(
        diagnostics_file,
        "Render stats: pixel_count: {}, draw_call_count: {}, pixels_per_draw_call: {:.3}",
        stats.pixel_count,
        stats.draw_call_count,
        stats.pixels_per_draw_call()
    )?;
    stats.divergence_histogram.display(&mut diagnostics_file)?;
    diagnostics_file.flush()?;

    Ok(outcome)
}
