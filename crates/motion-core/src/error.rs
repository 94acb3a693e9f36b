use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("drawing surface not found: {0}")]
    MissingSurface(String),

    #[error("2d drawing context unavailable")]
    ContextUnavailable,

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MotionError>;
