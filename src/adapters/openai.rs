use crate::domain::model::AudioClip;
use crate::domain::ports::Transcriber;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_TRANSLATION_MODEL: &str = "whisper-1";
const TRANSLATIONS_PATH: &str = "/v1/audio/translations";
const KEY_PLACEHOLDER: &str = "<PUT_OPENAI_API_KEY_HERE>";

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    text: Option<String>,
}

/// Speech-to-English through the OpenAI audio translations endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiTranscriber {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiTranscriber {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: DEFAULT_TRANSLATION_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() && !key.contains(KEY_PLACEHOLDER) => Ok(key),
            _ => Err(IntakeError::MissingConfigError {
                field: "transcription.api_key".to_string(),
            }),
        }
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn translate(&self, clip: &AudioClip) -> Result<String> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url, TRANSLATIONS_PATH);

        let file = Part::bytes(clip.bytes.clone())
            .file_name(clip.file_name())
            .mime_str(&clip.mime_type)?;
        let form = Form::new().part("file", file).text("model", self.model.clone());

        tracing::debug!("Uploading {} bytes of audio to {}", clip.bytes.len(), url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Transcription request failed: {} {}", status, body);
            return Err(IntakeError::RemoteError {
                service: "openai".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let data: TranslationResponse = response.json().await?;
        Ok(data.text.unwrap_or_default().trim().to_string())
    }
}
