//! Conformance suite errors

/// Errors that can occur while configuring or running the conformance suite
#[derive(Debug, thiserror::Error)]
pub enum ConformanceError {
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unknown testee: {0}")]
    UnknownTestee(String),

    #[error("Testee '{testee}' is not conformant: {failed} scenario(s) failed")]
    NonConformant { testee: String, failed: usize },
}

pub type ConformanceResult<T> = Result<T, ConformanceError>;
