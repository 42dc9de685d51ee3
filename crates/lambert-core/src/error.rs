use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LambertError {
    #[error("could not load PDF: {0}")]
    LoadFailed(String),

    #[error("{tool} not found. {install_hint}")]
    ToolNotFound {
        tool: &'static str,
        install_hint: &'static str,
    },

    #[error("{tool} failed with exit code {code}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("page {page}: {reason}")]
    PageRead { page: usize, reason: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid coordinate pattern: {0}")]
    InvalidPattern(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
