#[cfg(test)]
mod tests {
    use escape_time_fractals::core::viewport::Viewport;
    use escape_time_fractals::fractals::{
        gradient::{map_to_color, Gradient, BLUE_GRADIENT},
        quadratic_map::{
            compute_divergence, FractalKind, JULIA_DENDRITE, JULIA_SPIRAL, NON_ESCAPING,
        },
    };
    use more_asserts::{assert_ge, assert_le};
    use num::complex::Complex;

    fn spiral() -> Complex<f64> {
        Complex::new(JULIA_SPIRAL[0], JULIA_SPIRAL[1])
    }

    #[test]
    fn test_divergence_is_total_over_viewport() {
        let viewport = Viewport::default();
        for kind in FractalKind::ALL {
            for max_iter in [16, 32] {
                for x in 0..viewport.width() {
                    for y in 0..viewport.height() {
                        let result = compute_divergence(&viewport, (x, y), kind, spiral(), max_iter);
                        assert_le!(result, max_iter);
                    }
                }
            }
        }
    }

    #[test]
    fn test_mandelbrot_is_symmetric_about_real_axis() {
        let viewport = Viewport::default();
        let (_, center_row) = viewport.center_pixel();
        for x in (0..viewport.width()).step_by(3) {
            for offset in 1..center_row {
                let above = compute_divergence(
                    &viewport,
                    (x, center_row - offset),
                    FractalKind::Mandelbrot,
                    spiral(),
                    32,
                );
                let below = compute_divergence(
                    &viewport,
                    (x, center_row + offset),
                    FractalKind::Mandelbrot,
                    spiral(),
                    32,
                );
                assert_eq!(above, below, "column {}, offset {}", x, offset);
            }
        }
    }

    #[test]
    fn test_origin_is_inside_mandelbrot_set() {
        let viewport = Viewport::default();
        assert_eq!(viewport.center_pixel(), (160, 120));
        for max_iter in [16, 32] {
            assert_eq!(
                compute_divergence(&viewport, (160, 120), FractalKind::Mandelbrot, spiral(), max_iter),
                NON_ESCAPING
            );
        }
    }

    #[test]
    fn test_far_pixel_escapes_immediately() {
        let viewport = Viewport::default();
        // (0, 0) --> -2.0 - 1.5i, already outside of the escape radius.
        for kind in FractalKind::ALL {
            let result = compute_divergence(&viewport, (0, 0), kind, spiral(), 16);
            assert_ge!(result, 1);
            assert_le!(result, 2);
        }
    }

    #[test]
    fn test_end_to_end_mandelbrot_blue() {
        let viewport = Viewport::default();
        let inside = compute_divergence(&viewport, (160, 120), FractalKind::Mandelbrot, spiral(), 16);
        assert_eq!(map_to_color(inside, &Gradient::Blue, 16), BLUE_GRADIENT[0]);

        let corner = compute_divergence(&viewport, (0, 0), FractalKind::Mandelbrot, spiral(), 16);
        assert_eq!(corner, 1);
        assert_eq!(map_to_color(corner, &Gradient::Blue, 16), BLUE_GRADIENT[1]);
    }

    #[test]
    fn test_julia_is_deterministic() {
        let viewport = Viewport::default();
        let first = compute_divergence(&viewport, (160, 120), FractalKind::Julia, spiral(), 16);
        for _ in 0..10 {
            assert_eq!(
                compute_divergence(&viewport, (160, 120), FractalKind::Julia, spiral(), 16),
                first
            );
        }
        // The origin stays bounded for this constant.
        assert_eq!(first, NON_ESCAPING);
    }

    #[test]
    fn test_julia_constant_changes_result() {
        let viewport = Viewport::default();
        let differs = (0..viewport.width()).step_by(7).any(|x| {
            (0..viewport.height()).step_by(7).any(|y| {
                let dendrite = Complex::new(JULIA_DENDRITE[0], JULIA_DENDRITE[1]);
                compute_divergence(&viewport, (x, y), FractalKind::Julia, spiral(), 32)
                    != compute_divergence(&viewport, (x, y), FractalKind::Julia, dendrite, 32)
            })
        });
        assert!(differs);
    }

    #[test]
    #[should_panic]
    fn test_out_of_viewport_pixel_panics() {
        let viewport = Viewport::default();
        compute_divergence(&viewport, (0, 240), FractalKind::Mandelbrot, spiral(), 16);
    }
}
