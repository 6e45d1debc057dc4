use async_trait::async_trait;
use bytes::BytesMut;
use log::debug;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::errors::{ProviderError, SpeechError};
use crate::language_utils::resolve_language;
use crate::providers::error_from_response;
use super::{AudioClip, SpeechSynthesizer, split_for_speech};

/// Languages the Google TTS voice set does not cover
const UNSUPPORTED_VOICES: &[&str] = &[
    "co", "fy", "haw", "hmn", "ig", "ky", "lb", "mg", "mt", "ny", "ps", "sd", "sm", "sn", "so",
    "st", "tg", "ug", "xh", "yi", "yo", "zu",
];

/// Speech synthesizer backed by the Google Translate TTS endpoint
///
/// The endpoint speaks at most about 100 characters per request, so longer
/// text is sent piece by piece and the MP3 frames are concatenated.
#[derive(Debug, Clone)]
pub struct GoogleSpeech {
    client: Client,
    endpoint: String,
    max_chars_per_request: usize,
}

impl GoogleSpeech {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64, max_chars_per_request: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            max_chars_per_request: max_chars_per_request.max(1),
        }
    }

    /// Voice code for a language, or `None` when no voice exists
    pub fn voice_for(language: &str) -> Option<String> {
        let code = resolve_language(language).ok()?;
        if UNSUPPORTED_VOICES.contains(&code.as_str()) {
            return None;
        }
        Some(match code.as_str() {
            "zh-cn" => "zh-CN".to_string(),
            "zh-tw" => "zh-TW".to_string(),
            "iw" => "he".to_string(),
            _ => code,
        })
    }

    /// Build the request URL for one piece of text
    pub fn piece_url(&self, piece: &str, voice: &str, index: usize, total: usize) -> Result<Url, SpeechError> {
        let base = if self.endpoint.is_empty() {
            "https://translate.google.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };

        let mut url = Url::parse(&format!("{}/translate_tts", base))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid speech endpoint {}: {}", base, e)))?;
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("q", piece)
            .append_pair("tl", voice)
            .append_pair("client", "tw-ob")
            .append_pair("idx", &index.to_string())
            .append_pair("total", &total.to_string())
            .append_pair("textlen", &piece.chars().count().to_string());
        Ok(url)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioClip, SpeechError> {
        let voice = Self::voice_for(language).ok_or_else(|| SpeechError::UnsupportedLanguage(language.to_string()))?;

        let pieces = split_for_speech(text, self.max_chars_per_request);
        if pieces.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        debug!("Synthesizing {} speech piece(s) in {}", pieces.len(), voice);

        let mut audio = BytesMut::new();
        for (index, piece) in pieces.iter().enumerate() {
            let url = self.piece_url(piece, &voice, index, pieces.len())?;
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(ProviderError::from)?;

            if !response.status().is_success() {
                return Err(error_from_response("Google TTS", response).await.into());
            }

            let bytes = response.bytes().await.map_err(ProviderError::from)?;
            audio.extend_from_slice(&bytes);
        }

        Ok(AudioClip::mp3(audio.freeze()))
    }
}
