use thiserror::Error;

#[derive(Debug, Error)]
pub enum PodApiError {
    #[error("pod not found: {0}")]
    NotFound(String),

    #[error("request rejected with status {code}: {message}")]
    Rejected { code: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
