//! Benchmark to measure (and then optimize) a full-frame scan render.
//! This exercises the divergence evaluation, the gradient lookup and the
//! draw-call path of the frame buffer, once for each scan strategy.
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use escape_time_fractals::core::{
    cancel::NeverCancel,
    display::FrameBuffer,
    scan_renderer::{ScanRenderer, ScanStrategy},
    viewport::Viewport,
};
use escape_time_fractals::fractals::{
    gradient::Gradient,
    quadratic_map::{FractalKind, QuadraticMapParams, JULIA_SPIRAL},
};

fn render_frame(renderer: &ScanRenderer, frame_buffer: &mut FrameBuffer) {
    let outcome = renderer.render(frame_buffer, &NeverCancel);
    black_box(outcome.is_ok());
}

fn benchmark(c: &mut Criterion) {
    for kind in FractalKind::ALL {
        for strategy in [ScanStrategy::Coalesced, ScanStrategy::PerPixel] {
            let renderer = ScanRenderer::new(
                Viewport::default(),
                QuadraticMapParams {
                    kind,
                    julia_constant: JULIA_SPIRAL,
                    max_iter_count: 32,
                },
                Gradient::Blue,
                strategy,
            );
            let mut frame_buffer = FrameBuffer::new(renderer.viewport().resolution);
            let name = format!("render_{}_{:?}", kind.display_name(), strategy);
            c.bench_function(&name, |b| {
                b.iter(|| render_frame(&renderer, &mut frame_buffer));
            });
        }
    }
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
