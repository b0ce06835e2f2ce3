use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeygenError {
    #[error("bit length too small (bits={bits}, min_bits={min_bits})")]
    InvalidBitLength { bits: u64, min_bits: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An invariant that holds for any correct implementation was violated.
    #[error("internal consistency fault: {0}")]
    InternalConsistency(String),

    #[error("modular inverse not found: {what}")]
    ModularInverseNotFound { what: &'static str },

    #[error("message representative out of range")]
    MessageOutOfRange,

    #[error("random generation failed")]
    RandomGenerationFailed,

    #[error("gave up generating {what} after {attempts} attempts")]
    AttemptsExhausted { what: &'static str, attempts: usize },
}

pub type Result<T> = std::result::Result<T, KeygenError>;
