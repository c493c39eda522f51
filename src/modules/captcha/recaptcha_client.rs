//! reCAPTCHA `siteverify` client
//!
//! Any failure to reach the verification endpoint counts as a failed
//! verification, never as a server error.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::config::CaptchaConfig;
use crate::core::error::AppError;
use crate::shared::validation::trim_to_none;

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

pub struct RecaptchaClient {
    http_client: Client,
    verify_url: String,
}

impl RecaptchaClient {
    pub fn new(config: &CaptchaConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            verify_url: config.verify_url.clone(),
        })
    }

    /// Check a response token produced by the browser widget
    pub async fn verify(&self, secret: &str, response: Option<&str>, remote_ip: Option<&str>) -> bool {
        let Some(response) = trim_to_none(response) else {
            debug!("Missing CAPTCHA response");
            return false;
        };

        let mut form = vec![("secret", secret), ("response", response)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let result = self
            .http_client
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let body = match result {
            Ok(r) => r.json::<SiteVerifyResponse>().await,
            Err(e) => {
                warn!("CAPTCHA verification request failed: {}", e);
                return false;
            }
        };

        match body {
            Ok(body) => {
                if !body.success {
                    debug!("CAPTCHA rejected: {:?}", body.error_codes);
                }
                body.success
            }
            Err(e) => {
                warn!("Invalid CAPTCHA verification response: {}", e);
                false
            }
        }
    }
}
