//! Image labeling through the Google Vision REST API.
//!
//! Used only when OCR finds no text: the raw screenshot bytes are submitted
//! to `images:annotate` for label detection and the annotations come back in
//! service order.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use shotwire_core::{ImageDescriber, ImageLabel, ShotError};

const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com/v1";
const MAX_LABELS: u32 = 10;

/// Label-detection describer backed by the Google Vision `images:annotate`
/// endpoint, authenticated with an API key.
pub struct GoogleVisionDescriber {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleVisionDescriber {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn error(&self, message: impl Into<String>) -> ShotError {
        ShotError::Describer {
            provider: self.name().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<RpcStatus>,
}

#[derive(Deserialize)]
struct LabelAnnotation {
    description: String,
    #[serde(default)]
    score: f32,
}

#[derive(Deserialize)]
struct RpcStatus {
    message: String,
}

#[async_trait]
impl ImageDescriber for GoogleVisionDescriber {
    fn name(&self) -> &str {
        "google-vision"
    }

    async fn describe(&self, image_bytes: &[u8]) -> Result<Vec<ImageLabel>, ShotError> {
        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image_bytes),
                },
                features: vec![Feature {
                    kind: "LABEL_DETECTION".to_string(),
                    max_results: MAX_LABELS,
                }],
            }],
        };

        debug!(bytes = image_bytes.len(), "requesting label detection");

        let response = self
            .client
            .post(format!(
                "{}/images:annotate?key={}",
                self.base_url, self.api_key
            ))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.error(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.error(format!("{status}: {error_body}")));
        }

        let annotate: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| self.error(format!("failed to parse response: {e}")))?;

        let first = annotate.responses.into_iter().next().unwrap_or_default();
        if let Some(error) = first.error {
            return Err(self.error(error.message));
        }

        Ok(first
            .label_annotations
            .into_iter()
            .map(|l| ImageLabel {
                description: l.description,
                score: l.score,
            })
            .collect())
    }
}

/// Join label descriptions in service order, one per line.
pub fn join_labels(labels: &[ImageLabel]) -> String {
    labels
        .iter()
        .map(|l| l.description.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_annotations_in_order() {
        let raw = r#"{
            "responses": [{
                "labelAnnotations": [
                    { "description": "Computer keyboard", "score": 0.97 },
                    { "description": "Screenshot", "score": 0.91 },
                    { "description": "Font" }
                ]
            }]
        }"#;
        let parsed: AnnotateResponse = serde_json::from_str(raw).unwrap();
        let first = parsed.responses.into_iter().next().unwrap();
        let labels: Vec<_> = first
            .label_annotations
            .iter()
            .map(|l| l.description.as_str())
            .collect();
        assert_eq!(labels, vec!["Computer keyboard", "Screenshot", "Font"]);
        assert_eq!(first.label_annotations[2].score, 0.0);
    }

    #[test]
    fn parses_service_error() {
        let raw = r#"{ "responses": [{ "error": { "message": "invalid image" } }] }"#;
        let parsed: AnnotateResponse = serde_json::from_str(raw).unwrap();
        let first = parsed.responses.into_iter().next().unwrap();
        assert_eq!(first.error.unwrap().message, "invalid image");
        assert!(first.label_annotations.is_empty());
    }

    #[test]
    fn joins_labels_one_per_line() {
        let labels = vec![
            ImageLabel {
                description: "Sky".to_string(),
                score: 0.9,
            },
            ImageLabel {
                description: "Cloud".to_string(),
                score: 0.8,
            },
        ];
        assert_eq!(join_labels(&labels), "Sky\nCloud");
        assert_eq!(join_labels(&[]), "");
    }
}
