use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::azure_whisper_engine::{AzureDeployment, AzureWhisperEngine};
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let timeout = settings.timeout();

        match settings.provider {
            TranscriptionProviderSetting::OpenAi => {
                if settings.api_key.is_none() && settings.base_url.is_none() {
                    return Err(TranscriptionError::Configuration(
                        "api_key required for the hosted OpenAI Whisper API".to_string(),
                    ));
                }
                let engine = OpenAiWhisperEngine::new(
                    settings.api_key.clone(),
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                    timeout,
                )?;
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Azure => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration("base_url required for Azure".into())
                })?;
                let deployment = settings.azure_deployment.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration("azure_deployment required".into())
                })?;
                let key = settings.api_key.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration("api_key required for Azure".into())
                })?;
                let engine = AzureWhisperEngine::new(
                    AzureDeployment {
                        base_url,
                        deployment,
                        api_version: &settings.azure_api_version,
                    },
                    key,
                    &settings.model,
                    timeout,
                )?;
                Ok(Arc::new(engine))
            }
        }
    }
}
