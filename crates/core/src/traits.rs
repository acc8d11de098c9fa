use async_trait::async_trait;

use crate::error::ShotError;
use crate::types::{AnswerRequest, AnswerResponse, ImageLabel, OutboundEmail};

/// Capability for answering a textual prompt through a chat model.
#[async_trait]
pub trait TextAnswerer: Send + Sync {
    /// Provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and return the answer text.
    async fn answer(&self, request: &AnswerRequest) -> Result<AnswerResponse, ShotError>;
}

/// Capability for describing an image as a list of labels.
///
/// Used on the fallback branch when OCR finds no text in the capture.
#[async_trait]
pub trait ImageDescriber: Send + Sync {
    /// Provider name (e.g., "google-vision").
    fn name(&self) -> &str;

    /// Submit raw image bytes and return label annotations in service order.
    async fn describe(&self, image_bytes: &[u8]) -> Result<Vec<ImageLabel>, ShotError>;
}

/// Capability for delivering a finished report by email.
#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ShotError>;
}
