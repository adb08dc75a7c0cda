use thiserror::Error;

/// Error types for synthesis, encoding and file handling.
#[derive(Error, Debug)]
pub enum BinauralError {
    /// A caller-supplied parameter was rejected before any buffer was touched.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer/header inconsistency detected while serializing a container.
    /// No partial bytes are ever returned alongside this error.
    #[error("encoding failed: {0}")]
    EncodingFailure(String),

    /// Creating or writing an output file failed.
    #[error("i/o failure: {0}")]
    IoFailure(#[from] std::io::Error),
}

/// Type alias for results in this crate.
pub type BinauralResult<T> = Result<T, BinauralError>;
