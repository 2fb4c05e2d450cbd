use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credentials::{AuthError, Authenticator};

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translation.googleapis.com";

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Translation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Credentials error: {0}")]
    Auth(#[from] AuthError),
    #[error("Translation service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("Expected {expected} translations, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("Translation failed: {0}")]
    Backend(String),
}

/// Translates a batch of short texts into `target` (an ISO-639 code).
/// The result has one entry per input, in input order.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, texts: &[String], target: &str) -> Result<Vec<String>, TranslationError>;
}

// ── Mock backend ──────────────────────────────────────────────────────────────

/// Dictionary-backed translator; unknown texts pass through unchanged.
#[derive(Default)]
pub struct MockTranslator {
    dictionary: HashMap<String, String>,
    failure: Option<String>,
}

impl MockTranslator {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            dictionary: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            failure: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { dictionary: HashMap::new(), failure: Some(message.into()) }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, texts: &[String], _target: &str) -> Result<Vec<String>, TranslationError> {
        if let Some(message) = &self.failure {
            return Err(TranslationError::Backend(message.clone()));
        }
        Ok(texts
            .iter()
            .map(|t| self.dictionary.get(t).cloned().unwrap_or_else(|| t.clone()))
            .collect())
    }
}

// ── Google Cloud Translation (v2) backend ────────────────────────────────────

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

pub struct GoogleTranslator {
    client: reqwest::Client,
    auth: Arc<Authenticator>,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, auth: Arc<Authenticator>) -> Self {
        Self { client, auth, endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string() }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self) -> String {
        format!("{}/language/translate/v2", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, texts: &[String], target: &str) -> Result<Vec<String>, TranslationError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // "text" keeps the service from HTML-escaping apostrophes and accents.
        let body = TranslateRequest { q: texts, target, format: "text" };
        let request = self.auth.authorize(self.client.post(self.url()).json(&body)).await?;
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::Service { status: status.as_u16(), message });
        }

        let translated = parse_translate_response(response.json().await?, texts.len())?;
        tracing::debug!(language = target, ?translated, "labels translated");
        Ok(translated)
    }
}

fn parse_translate_response(
    response: TranslateResponse,
    expected: usize,
) -> Result<Vec<String>, TranslationError> {
    let translations: Vec<String> =
        response.data.translations.into_iter().map(|t| t.translated_text).collect();
    if translations.len() != expected {
        return Err(TranslationError::CountMismatch { expected, actual: translations.len() });
    }
    Ok(translations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn mock_translates_known_words() {
        let t = MockTranslator::new([("Tomato", "Tomate"), ("Cheese", "Queso")]);
        let out = t.translate(&texts(&["Tomato", "Table", "Cheese"]), "es").await.unwrap();
        assert_eq!(out, vec!["Tomate", "Table", "Queso"]);
    }

    #[tokio::test]
    async fn failing_mock_returns_error() {
        let t = MockTranslator::failing("boom");
        assert!(matches!(
            t.translate(&texts(&["Tomato"]), "es").await,
            Err(TranslationError::Backend(_))
        ));
    }

    #[tokio::test]
    async fn google_translator_skips_empty_batch() {
        let auth = Arc::new(Authenticator::new(
            Credentials::ApiKey("k".into()),
            reqwest::Client::new(),
        ));
        // Unroutable endpoint: any request would fail.
        let t = GoogleTranslator::new(reqwest::Client::new(), auth).with_endpoint("http://127.0.0.1:1");
        assert!(t.translate(&[], "es").await.unwrap().is_empty());
    }

    #[test]
    fn request_body_matches_v2_schema() {
        let q = texts(&["Food", "Tomato"]);
        let body = TranslateRequest { q: &q, target: "es", format: "text" };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"q": ["Food", "Tomato"], "target": "es", "format": "text"})
        );
    }

    #[test]
    fn parses_translations_in_order() {
        let response: TranslateResponse = serde_json::from_str(
            r#"{"data": {"translations": [
                {"translatedText": "Alimento", "detectedSourceLanguage": "en"},
                {"translatedText": "Tomate", "detectedSourceLanguage": "en"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(parse_translate_response(response, 2).unwrap(), vec!["Alimento", "Tomate"]);
    }

    #[test]
    fn count_mismatch_is_error() {
        let response: TranslateResponse =
            serde_json::from_str(r#"{"data": {"translations": [{"translatedText": "Tomate"}]}}"#)
                .unwrap();
        assert!(matches!(
            parse_translate_response(response, 2),
            Err(TranslationError::CountMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn url_joins_endpoint() {
        let auth = Arc::new(Authenticator::new(
            Credentials::ApiKey("k".into()),
            reqwest::Client::new(),
        ));
        let t = GoogleTranslator::new(reqwest::Client::new(), auth).with_endpoint("http://localhost:9100/");
        assert_eq!(t.url(), "http://localhost:9100/language/translate/v2");
    }
}
