use thiserror::Error;

/// Error types for the test utilities
#[derive(Debug, Error)]
pub enum TestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
