use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("no known CUDA version matches '{0}'")]
    VersionNotFound(String),

    #[error("version range is empty: the end resolves before the start")]
    EmptyRange,

    #[error("a changelog needs at least 2 versions, got {0}")]
    InsufficientRange(usize),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed cache entry: {0}")]
    Malformed(#[from] serde_json::Error),
}
