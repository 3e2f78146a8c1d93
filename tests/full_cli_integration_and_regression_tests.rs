use std::path::Path;
use std::process::Command;

use escape_time_fractals::{
    cli::render::render_to_frame_buffer, core::scan_renderer::RenderOutcome,
    fractals::common::FractalParams,
};
use sha2::{Digest, Sha256};

fn compute_frame_hash(params_path: &str) -> String {
    let params = FractalParams::from_file(params_path)
        .unwrap_or_else(|err| panic!("failed to load {}: {}", params_path, err));
    let rendered = render_to_frame_buffer(&params).expect("render failed");
    assert_eq!(rendered.outcome, RenderOutcome::Completed);
    assert_eq!(
        rendered.stats.pixel_count,
        (params.viewport.width() * params.viewport.height()) as u64
    );

    let mut hasher = Sha256::new();
    hasher.update(rendered.frame_buffer.to_row_major_bytes());
    format!("{:x}", hasher.finalize())
}

fn check_frame_hash(params_path: &str, expected_hash: &str) -> bool {
    let computed_hash = compute_frame_hash(params_path);
    if computed_hash == expected_hash {
        println!("Hash matches the expected value.");
        true
    } else {
        println!(
            "Hash mismatch! Expected: {}, but got: {}",
            expected_hash, computed_hash
        );
        false
    }
}

fn run_command(args: &[&str]) {
    let status = Command::new(env!("CARGO_BIN_EXE_escape-time-fractals"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(args)
        .status()
        .expect("failed to execute process");
    assert!(status.success(), "Command {:?} failed", args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandelbrot_regression() {
        assert!(check_frame_hash(
            "tests/param_files/mandelbrot_tiny.json",
            "875aacde4a918fa18388a0a338058eb97bc4bc7a64ed8570dc59014f040a13ab"
        ));
    }

    #[test]
    fn test_julia_regression() {
        assert!(check_frame_hash(
            "tests/param_files/julia_tiny.json",
            "d028b8d08b6967ac7b05366a4976adce21085675bab692c596dc75bfe72c5d8c"
        ));
    }

    #[test]
    fn test_mandelbrot_render_command() {
        run_command(&["render", "tests/param_files/mandelbrot_tiny.json"]);
        let output_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("out/render/mandelbrot_tiny");

        let image = image::open(output_dir.join("mandelbrot_tiny.png"))
            .expect("render did not write a readable PNG")
            .to_rgb8();
        assert_eq!(image.dimensions(), (40, 30));
        assert!(output_dir.join("mandelbrot_tiny.json").exists());
        assert!(output_dir.join("mandelbrot_tiny_diagnostics.txt").exists());
    }

    #[test]
    fn test_color_swatch_command() {
        run_command(&["color-swatch", "params/color_swatch/blue.json"]);
        let swatch_path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("out/color_swatch/blue/blue.png");
        let image = image::open(swatch_path)
            .expect("color swatch was not written")
            .to_rgb8();
        assert_eq!(image.dimensions(), (512, 64));
    }

    #[test]
    fn test_invalid_parameter_file_fails() {
        let status = Command::new(env!("CARGO_BIN_EXE_escape-time-fractals"))
            .current_dir(env!("CARGO_MANIFEST_DIR"))
            .args(["render", "tests/param_files/does_not_exist.json"])
            .status()
            .expect("failed to execute process");
        assert!(!status.success());
    }
}
