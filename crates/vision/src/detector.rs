use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credentials::{AuthError, Authenticator};

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";
/// Matches the service's own default when `maxResults` is omitted.
pub const DEFAULT_MAX_LABELS: u32 = 10;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Label detection request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Credentials error: {0}")]
    Auth(#[from] AuthError),
    #[error("Label detection service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("Image could not be annotated: {0}")]
    Annotate(String),
}

/// Abstraction over an image label-detection backend.
/// Implementations accept base64-encoded image content and return label
/// descriptions in the order the backend ranks them.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    async fn detect_labels(&self, image_base64: &str) -> Result<Vec<String>, DetectionError>;
}

// ── Mock backend ──────────────────────────────────────────────────────────────

/// Returns preset labels, or a preset failure, regardless of the image.
pub struct MockDetector {
    outcome: Result<Vec<String>, String>,
}

impl MockDetector {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { outcome: Ok(labels.into_iter().map(Into::into).collect()) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

#[async_trait]
impl LabelDetector for MockDetector {
    async fn detect_labels(&self, _image_base64: &str) -> Result<Vec<String>, DetectionError> {
        self.outcome.clone().map_err(DetectionError::Annotate)
    }
}

// ── Google Cloud Vision backend ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    requests: [ImageRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    image: ImageContent<'a>,
    features: [Feature; 1],
}

#[derive(Debug, Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

pub struct GoogleVisionDetector {
    client: reqwest::Client,
    auth: Arc<Authenticator>,
    endpoint: String,
    max_results: u32,
}

impl GoogleVisionDetector {
    pub fn new(client: reqwest::Client, auth: Arc<Authenticator>) -> Self {
        Self {
            client,
            auth,
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_LABELS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    fn url(&self) -> String {
        format!("{}/v1/images:annotate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl LabelDetector for GoogleVisionDetector {
    async fn detect_labels(&self, image_base64: &str) -> Result<Vec<String>, DetectionError> {
        let body = AnnotateRequest {
            requests: [ImageRequest {
                image: ImageContent { content: image_base64 },
                features: [Feature { kind: "LABEL_DETECTION", max_results: self.max_results }],
            }],
        };

        let request = self.auth.authorize(self.client.post(self.url()).json(&body)).await?;
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DetectionError::Service { status: status.as_u16(), message });
        }

        let labels = parse_annotate_response(response.json().await?)?;
        tracing::debug!(count = labels.len(), ?labels, "labels detected");
        Ok(labels)
    }
}

fn parse_annotate_response(response: AnnotateResponse) -> Result<Vec<String>, DetectionError> {
    let Some(image) = response.responses.into_iter().next() else {
        return Ok(Vec::new());
    };
    if let Some(status) = image.error {
        return Err(DetectionError::Annotate(format!("{} (code {})", status.message, status.code)));
    }
    Ok(image.label_annotations.into_iter().map(|l| l.description).collect())
}
