use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid zoom factor {0}: must be finite and >= 1")]
    InvalidZoom(f64),

    #[error("series {id} not found (store holds {len})")]
    SeriesNotFound { id: usize, len: usize },

    #[error("container `{0}` not found")]
    ContainerNotFound(String),

    #[error("node `{0}` not found")]
    NodeNotFound(String),

    #[error("setting `{key}` expects {expected}")]
    SettingTypeMismatch { key: String, expected: &'static str },

    #[error("chart is not initialized")]
    NotInitialized,

    #[error("surface backend failure: {0}")]
    Backend(String),
}
