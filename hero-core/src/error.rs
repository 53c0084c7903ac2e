use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeroError {
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
