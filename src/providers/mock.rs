/*!
 * Mock backends for testing.
 *
 * This module provides in-process translators and speech backends that
 * simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds with `[target] text`
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::failing_on_call(n)` - Fails only on the n-th call
 * - `MockTranslator::failing_on_text(s)` - Fails on chunks containing `s`
 *
 * Clones share their call log, so a test can hand one clone to the code
 * under test and inspect the other.
 */

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{ProviderError, SpeechError};
use crate::speech::{AudioClip, SpeechSynthesizer};
use crate::translation::core::{TranslationRequest, Translator};

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Always fails with an error
    Failing,
    /// Fails on the given call number (1-based), succeeds otherwise
    FailOnCall { call: usize },
    /// Fails on any chunk containing the given text
    FailOnText { needle: String },
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
}

/// Mock translator recording every request it receives
#[derive(Debug, Clone)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Requests seen so far, in call order
    requests: Arc<Mutex<Vec<TranslationRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslationRequest) -> String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock translator that fails on the n-th call (1-based)
    pub fn failing_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    /// Create a mock translator that fails on chunks containing `needle`
    pub fn failing_on_text(needle: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailOnText { needle: needle.into() })
    }

    /// Create a mock translator that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslationRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, request: &TranslationRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => format!("[{}] {}", request.target(), request.text()),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let call = {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            requests.len()
        };

        match &self.behavior {
            MockBehavior::Working => Ok(self.respond(request)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::FailOnCall { call: failing_call } => {
                if call == *failing_call {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated failure (request #{})", call),
                    })
                } else {
                    Ok(self.respond(request))
                }
            }

            MockBehavior::FailOnText { needle } => {
                if request.text().contains(needle.as_str()) {
                    Err(ProviderError::RequestFailed(format!("Simulated failure on '{}'", needle)))
                } else {
                    Ok(self.respond(request))
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(self.respond(request))
            }
        }
    }
}

/// Mock speech backend returning a fake MP3 payload
#[derive(Debug, Clone)]
pub struct MockSpeech {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockSpeech {
    /// Speech backend that always succeeds
    pub fn working() -> Self {
        Self {
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Speech backend that always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioClip, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(SpeechError::Provider(ProviderError::ConnectionError(
                "Simulated speech failure".to_string(),
            )));
        }
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        Ok(AudioClip::mp3(Bytes::from(format!("ID3 {}:{}", language, text))))
    }
}
