use crate::domain::model::EmailRequest;
use crate::domain::ports::EmailDelivery;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_EMAILJS_URL: &str = "https://api.emailjs.com";
const SEND_PATH: &str = "/api/v1.0/email/send";

/// REST client for the EmailJS send endpoint.
#[derive(Debug, Clone)]
pub struct EmailJsClient {
    client: Client,
    base_url: String,
}

impl EmailJsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SEND_PATH)
    }
}

impl Default for EmailJsClient {
    fn default() -> Self {
        Self::new(DEFAULT_EMAILJS_URL)
    }
}

#[async_trait]
impl EmailDelivery for EmailJsClient {
    async fn send(&self, request: &EmailRequest) -> Result<()> {
        let url = self.endpoint();
        tracing::debug!("Making EmailJS request to: {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        tracing::debug!("EmailJS response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("EmailJS rejected the request: {} {}", status, body);
        Err(IntakeError::RemoteError {
            service: "emailjs".to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
