use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::whisper_request::{audio_form, build_client, send};

/// Azure OpenAI resource hosting a Whisper deployment.
pub struct AzureDeployment<'a> {
    pub base_url: &'a str,
    pub deployment: &'a str,
    pub api_version: &'a str,
}

impl AzureDeployment<'_> {
    fn transcription_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            self.base_url.trim_end_matches('/'),
            self.deployment,
            self.api_version,
        )
    }
}

pub struct AzureWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AzureWhisperEngine {
    pub fn new(
        deployment: AzureDeployment<'_>,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: deployment.transcription_url(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct TranscriptionBody {
    text: String,
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        let form = audio_form(audio_data, &self.model, "json")?;

        tracing::debug!(endpoint = %self.endpoint, bytes = audio_data.len(), "Sending audio to Azure Whisper deployment");

        let request = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .multipart(form);

        let body: TranscriptionBody = send(request).await?.json().await.map_err(|e| {
            TranscriptionError::TranscriptionFailed(format!("parse response: {}", e))
        })?;

        Ok(body.text.trim().to_string())
    }
}
