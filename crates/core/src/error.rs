use thiserror::Error;

/// Top-level error type for the shotwire pipeline.
///
/// Every stage returns this, so the driver can tell the provider-side
/// failures it handles itself apart from the ones that terminate the process.
#[derive(Debug, Error)]
pub enum ShotError {
    #[error("screen capture failed: {0}")]
    Capture(String),

    #[error("text recognition failed: {0}")]
    Ocr(String),

    #[error("answer provider error ({provider}): {message}")]
    Answerer { provider: String, message: String },

    #[error("vision provider error ({provider}): {message}")]
    Describer { provider: String, message: String },

    #[error("email delivery failed: {0}")]
    Delivery(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
