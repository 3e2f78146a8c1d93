#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use escape_time_fractals::core::{
        cancel::{CancelFlag, NeverCancel},
        display::{DisplayBackend, DisplayError, DrawCommand, FrameBuffer},
        scan_renderer::{RenderError, RenderOutcome, RenderStats, ScanRenderer, ScanStrategy},
        viewport::Viewport,
    };
    use escape_time_fractals::fractals::{
        gradient::{map_to_color, ColorIndex, Gradient},
        quadratic_map::{compute_divergence, FractalKind, QuadraticMapParams, JULIA_SPIRAL},
    };
    use more_asserts::assert_le;
    use num::complex::Complex;

    /// Records every draw call, optionally failing after a fixed number of them.
    struct RecordingDisplay {
        resolution: nalgebra::Vector2<u32>,
        commands: Vec<DrawCommand>,
        fail_after: Option<usize>,
    }

    impl RecordingDisplay {
        fn new(viewport: &Viewport) -> RecordingDisplay {
            RecordingDisplay {
                resolution: viewport.resolution,
                commands: Vec::new(),
                fail_after: None,
            }
        }

        fn record(&mut self, command: DrawCommand) -> Result<(), DisplayError> {
            if let Some(limit) = self.fail_after {
                if self.commands.len() >= limit {
                    return Err(DisplayError::Disconnected);
                }
            }
            self.commands.push(command);
            Ok(())
        }

        /// Per-pixel colors of one column, rebuilt from the recorded line draws.
        fn expand_column(&self, column: u32) -> Vec<ColorIndex> {
            let mut colors = Vec::new();
            for command in self.commands.iter() {
                if let DrawCommand::VerticalLine {
                    x,
                    y_start,
                    y_end,
                    color,
                } = command
                {
                    if *x == column {
                        assert_eq!(*y_start as usize, colors.len(), "runs must be contiguous");
                        colors.extend(std::iter::repeat(*color).take((y_end - y_start + 1) as usize));
                    }
                }
            }
            colors
        }
    }

    impl DisplayBackend for RecordingDisplay {
        fn resolution(&self) -> nalgebra::Vector2<u32> {
            self.resolution
        }

        fn clear_screen(&mut self) -> Result<(), DisplayError> {
            self.record(DrawCommand::ClearScreen)
        }

        fn draw_vertical_line(
            &mut self,
            x: u32,
            y_start: u32,
            y_end: u32,
            color: ColorIndex,
        ) -> Result<(), DisplayError> {
            self.record(DrawCommand::VerticalLine {
                x,
                y_start,
                y_end,
                color,
            })
        }

        fn set_pixel(&mut self, x: u32, y: u32, color: ColorIndex) -> Result<(), DisplayError> {
            self.record(DrawCommand::Pixel { x, y, color })
        }

        fn draw_text(&mut self, _: &str, _: u32, _: u32, _: ColorIndex) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    fn renderer(kind: FractalKind, gradient: Gradient, strategy: ScanStrategy) -> ScanRenderer {
        ScanRenderer::new(
            Viewport::default(),
            QuadraticMapParams {
                kind,
                julia_constant: JULIA_SPIRAL,
                max_iter_count: 16,
            },
            gradient,
            strategy,
        )
    }

    #[test]
    fn test_coalesced_runs_expand_to_per_pixel_colors() {
        for kind in FractalKind::ALL {
            let renderer = renderer(kind, Gradient::Blue, ScanStrategy::Coalesced);
            let viewport = renderer.viewport().clone();
            let mut display = RecordingDisplay::new(&viewport);
            let outcome = renderer.render(&mut display, &NeverCancel).unwrap();
            assert_eq!(outcome, RenderOutcome::Completed);
            assert_eq!(display.commands[0], DrawCommand::ClearScreen);

            for x in [0, 1, 80, 159, 160, 161, 250, 319] {
                let expected: Vec<ColorIndex> = (0..viewport.height())
                    .map(|y| {
                        let divergence = compute_divergence(
                            &viewport,
                            (x, y),
                            kind,
                            Complex::new(JULIA_SPIRAL[0], JULIA_SPIRAL[1]),
                            16,
                        );
                        map_to_color(divergence, &Gradient::Blue, 16)
                    })
                    .collect();
                assert_eq!(display.expand_column(x), expected, "column {}", x);
            }
        }
    }

    #[test]
    fn test_adjacent_runs_have_different_colors() {
        let renderer = renderer(FractalKind::Mandelbrot, Gradient::Orange, ScanStrategy::Coalesced);
        let mut display = RecordingDisplay::new(renderer.viewport());
        renderer.render(&mut display, &NeverCancel).unwrap();

        let lines: Vec<(u32, ColorIndex)> = display
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::VerticalLine { x, color, .. } => Some((*x, *color)),
                _ => None,
            })
            .collect();
        for pair in lines.windows(2) {
            if pair[0].0 == pair[1].0 {
                assert_ne!(pair[0].1, pair[1].1);
            }
        }
        // Columns are drawn left-to-right.
        assert!(lines.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    }

    #[test]
    fn test_strategies_produce_identical_frames() {
        for gradient in Gradient::MENU {
            let mut coalesced = FrameBuffer::new(Viewport::default().resolution);
            let mut per_pixel = FrameBuffer::new(Viewport::default().resolution);
            renderer(FractalKind::Julia, gradient, ScanStrategy::Coalesced)
                .render(&mut coalesced, &NeverCancel)
                .unwrap();
            renderer(FractalKind::Julia, gradient, ScanStrategy::PerPixel)
                .render(&mut per_pixel, &NeverCancel)
                .unwrap();
            assert_eq!(coalesced.to_row_major_bytes(), per_pixel.to_row_major_bytes());
        }
    }

    #[test]
    fn test_per_pixel_issues_one_draw_per_pixel() {
        let renderer = renderer(FractalKind::Mandelbrot, Gradient::Blue, ScanStrategy::PerPixel);
        let mut buffer = FrameBuffer::new(renderer.viewport().resolution);
        let mut stats = RenderStats::new(16);
        renderer
            .render_with_stats(&mut buffer, &NeverCancel, &mut stats)
            .unwrap();
        assert_eq!(stats.pixel_count, 320 * 240);
        assert_eq!(stats.draw_call_count, 320 * 240 + 1);
    }

    #[test]
    fn test_cancellation_stops_promptly() {
        let pixel_limit = 1_000;
        let renderer = renderer(FractalKind::Mandelbrot, Gradient::Blue, ScanStrategy::Coalesced);
        let mut display = RecordingDisplay::new(renderer.viewport());
        let polls = Cell::new(0usize);
        let cancel = || {
            polls.set(polls.get() + 1);
            polls.get() > pixel_limit
        };

        let outcome = renderer.render(&mut display, &cancel).unwrap();
        assert_eq!(outcome, RenderOutcome::Cancelled);
        assert_eq!(polls.get(), pixel_limit + 1);

        // Only pixels that were evaluated may have been drawn.
        let drawn_pixels: u32 = display
            .commands
            .iter()
            .map(|command| match command {
                DrawCommand::VerticalLine { y_start, y_end, .. } => y_end - y_start + 1,
                DrawCommand::Pixel { .. } => 1,
                _ => 0,
            })
            .sum();
        assert_le!(drawn_pixels as usize, pixel_limit);
    }

    #[test]
    fn test_cancel_flag_before_render() {
        let renderer = renderer(FractalKind::Julia, Gradient::Blue, ScanStrategy::PerPixel);
        let mut display = RecordingDisplay::new(renderer.viewport());
        let cancel = CancelFlag::new();
        cancel.request_cancel();
        let outcome = renderer.render(&mut display, &cancel).unwrap();
        assert_eq!(outcome, RenderOutcome::Cancelled);
        assert_eq!(display.commands, vec![DrawCommand::ClearScreen]);
    }

    #[test]
    fn test_draw_failure_is_propagated() {
        let renderer = renderer(FractalKind::Mandelbrot, Gradient::Blue, ScanStrategy::Coalesced);
        let mut display = RecordingDisplay::new(renderer.viewport());
        display.fail_after = Some(50);
        let error = renderer.render(&mut display, &NeverCancel).unwrap_err();
        match error {
            RenderError::Draw { source, .. } => assert_eq!(source, DisplayError::Disconnected),
        }
        assert_eq!(display.commands.len(), 50);
    }
}
