use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("scale kind mismatch: expected {expected}, got {actual}")]
    ScaleKindMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("duplicate series id: {0}")]
    DuplicateSeries(String),

    #[error("unknown series id: {0}")]
    UnknownSeries(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
