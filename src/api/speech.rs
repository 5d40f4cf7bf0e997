//! Voice input: audio upload for server-side recognition.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sync::{ApiClient, ApiError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Pcm,
    Wav,
}

impl AudioFormat {
    fn mime(&self) -> &'static str {
        match self {
            AudioFormat::Pcm => "application/octet-stream",
            AudioFormat::Wav => "audio/wav",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Pcm => "pcm",
            AudioFormat::Wav => "wav",
        }
    }
}

/// Recognition settings, sent as query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizeOptions {
    pub format: AudioFormat,
    pub sample_rate: u32,
    pub enable_punctuation_prediction: bool,
    pub enable_inverse_text_normalization: bool,
    pub enable_voice_detection: bool,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            format: AudioFormat::Pcm,
            sample_rate: 16_000,
            enable_punctuation_prediction: true,
            enable_inverse_text_normalization: true,
            enable_voice_detection: false,
        }
    }
}

/// Recognition outcome; `error` holds the provider payload when `success` is false
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRecognition {
    pub success: bool,
    #[serde(default)]
    pub recognized_text: Option<String>,
    #[serde(default)]
    pub raw: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ApiClient {
    pub async fn recognize_speech(
        &self,
        audio: Vec<u8>,
        options: &RecognizeOptions,
    ) -> Result<SpeechRecognition, ApiError> {
        info!("Uploading {} bytes of audio for recognition", audio.len());

        let file = Part::bytes(audio)
            .file_name(format!("audio.{}", options.format.extension()))
            .mime_str(options.format.mime())
            .map_err(|e| ApiError::Client(e.to_string()))?;

        self.send(
            self.request(Method::POST, "/api/speech/recognize")
                .query(options)
                .multipart(Form::new().part("file", file)),
        )
        .await
    }
}
