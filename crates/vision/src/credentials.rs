use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid key file: {0}")]
    KeyFile(#[from] serde_json::Error),
    #[error("Failed to sign token request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Token endpoint returned {status}: {body}")]
    TokenEndpoint { status: u16, body: String },
}

/// The subset of a Google service-account JSON key that token minting needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Clone)]
pub enum Credentials {
    ApiKey(String),
    ServiceAccount(ServiceAccountKey),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => write!(f, "ApiKey(..)"),
            Credentials::ServiceAccount(key) => {
                write!(f, "ServiceAccount({})", key.client_email)
            }
        }
    }
}

impl Credentials {
    pub fn from_key_file(path: &Path) -> Result<Self, AuthError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_key_json(&content)
    }

    pub fn from_key_json(json: &str) -> Result<Self, AuthError> {
        let key: ServiceAccountKey = serde_json::from_str(json)?;
        Ok(Credentials::ServiceAccount(key))
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Attaches credentials to outgoing Google API requests.
///
/// Service-account access tokens are cached and shared by every client
/// holding the same `Authenticator`.
pub struct Authenticator {
    credentials: Credentials,
    client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl Authenticator {
    pub fn new(credentials: Credentials, client: reqwest::Client) -> Self {
        Self { credentials, client, token: Mutex::new(None) }
    }

    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AuthError> {
        match &self.credentials {
            Credentials::ApiKey(key) => Ok(request.query(&[("key", key)])),
            Credentials::ServiceAccount(key) => {
                let token = self.access_token(key).await?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    async fn access_token(&self, key: &ServiceAccountKey) -> Result<String, AuthError> {
        // Held across the refresh so concurrent requests mint one token.
        let mut cached = self.token.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        tracing::debug!(account = %key.client_email, "requesting access token");
        let assertion = sign_assertion(key, now)?;
        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenEndpoint { status: status.as_u16(), body });
        }

        let token: TokenResponse = response.json().await?;
        let fresh = CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        };
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }
}

fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, AuthError> {
    let iat = now.timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: CLOUD_PLATFORM_SCOPE,
        aud: &key.token_uri,
        iat,
        exp: iat + 3600,
    };
    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &signing_key)?)
}
