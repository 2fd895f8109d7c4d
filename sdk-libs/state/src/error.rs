use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to decode account data: {0}")]
    Decode(std::io::Error),

    #[error("failed to encode instruction data: {0}")]
    Encode(std::io::Error),

    /// The account exists but its type tag does not match the requested
    /// schema.
    #[error("validation phrase mismatch: expected {expected}, found {found}")]
    InvalidValidationPhrase { expected: u32, found: u32 },
}
