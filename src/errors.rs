use crate::core::scan_renderer::RenderError;

/// Errors surfaced by the command line entry points.
#[derive(Debug, thiserror::Error)]
pub enum FractalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse parameter file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("unable to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("unable to create pixel surface: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("unable to resize pixel surface: {0}")]
    Texture(#[from] pixels::TextureError),
    #[error("unable to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("render worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, FractalError>;
