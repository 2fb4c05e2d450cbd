use std::sync::Arc;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use patata_core::FoodLabelPipeline;
use thiserror::Error;

use crate::detector::{DetectionError, LabelDetector};
use crate::translator::{TranslationError, Translator};

#[derive(Debug, Error)]
pub enum DetectFoodError {
    #[error("Invalid image payload: {0}")]
    InvalidImage(String),
    #[error("Label detection failed: {0}")]
    Detection(#[from] DetectionError),
    #[error("Label translation failed: {0}")]
    Translation(#[from] TranslationError),
}

impl DetectFoodError {
    /// Whether the caller sent something unusable, as opposed to an upstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DetectFoodError::InvalidImage(_))
    }
}

/// The result of a single food detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodDetection {
    /// Labels as returned by the detector.
    pub raw_labels: Vec<String>,
    /// The same labels in the target language.
    pub translated_labels: Vec<String>,
    /// Display-formatted food names.
    pub food_labels: Vec<String>,
}

/// Orchestrates: validate payload → detect labels → translate → food label pipeline.
pub struct FoodDetector {
    detector: Box<dyn LabelDetector>,
    translator: Box<dyn Translator>,
    labels: Arc<FoodLabelPipeline>,
    target_language: String,
}

impl FoodDetector {
    pub fn new(
        detector: impl LabelDetector + 'static,
        translator: impl Translator + 'static,
        labels: Arc<FoodLabelPipeline>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            detector: Box::new(detector),
            translator: Box::new(translator),
            labels,
            target_language: target_language.into(),
        }
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub async fn detect_food(&self, image: &str) -> Result<FoodDetection, DetectFoodError> {
        let content = image_content(image)?;

        let raw_labels = self.detector.detect_labels(&content).await?;
        let translated_labels = if raw_labels.is_empty() {
            Vec::new()
        } else {
            self.translator.translate(&raw_labels, &self.target_language).await?
        };

        let report = self.labels.report(&translated_labels);
        tracing::debug!(rejected = ?report.rejected, "labels not recognized as food");
        tracing::info!(
            detected = raw_labels.len(),
            foods = report.foods.len(),
            "food detection complete"
        );

        Ok(FoodDetection { raw_labels, translated_labels, food_labels: report.foods })
    }
}

const PADDING_INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDING_INDIFFERENT);
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDING_INDIFFERENT);

/// Validates the image payload and returns it as padded standard base64.
///
/// Accepts an optional `data:<mime>;base64,` prefix, line-wrapped content,
/// the URL-safe alphabet and missing padding.
fn image_content(image: &str) -> Result<String, DetectFoodError> {
    let image = image.trim();
    let content = match image.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| DetectFoodError::InvalidImage("malformed data URL".into()))?;
            if !header.ends_with(";base64") {
                return Err(DetectFoodError::InvalidImage("data URL is not base64".into()));
            }
            data
        }
        None => image,
    };

    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(DetectFoodError::InvalidImage("image is empty".into()));
    }
    let bytes = LENIENT_STANDARD
        .decode(&compact)
        .or_else(|e| LENIENT_URL_SAFE.decode(&compact).map_err(|_| e))
        .map_err(|e| DetectFoodError::InvalidImage(e.to_string()))?;
    Ok(STANDARD.encode(bytes))
}
