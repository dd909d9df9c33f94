use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid surface width: {width}")]
    InvalidSurface { width: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to serialize chart config: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("render backend failure: {0}")]
    Render(String),
}
