use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("pod age must be an integer number of minutes, got {0:?}")]
    UnparseableAge(String),

    #[error("pod age must be greater than 0, got {0}")]
    NonPositiveAge(i64),

    #[error("pod age of {0} minutes is out of range")]
    AgeOutOfRange(i64),

    #[error("malformed exemption policy: {0}")]
    MalformedExemptions(String),

    #[error("unknown selection policy: {0}")]
    UnknownPolicy(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
