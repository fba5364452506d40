use thiserror::Error;

/// Errors arising from decoding a session telemetry document.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty session document")]
    Empty,
}

/// Startup configuration errors. Fatal: the monitor loop is never entered
/// with a broken configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("refresh rate must be positive (got {0})")]
    RefreshRate(f64),

    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("cannot load banner font {path}: {reason}")]
    BannerFont { path: String, reason: String },

    #[error("speech synthesizer `{program}` unavailable: {source}")]
    Speech {
        program: String,
        source: std::io::Error,
    },

    #[error("cannot open record file {path}: {source}")]
    Record {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FrameError>;
