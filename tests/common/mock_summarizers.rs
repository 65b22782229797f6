/*!
 * Mock summarizer and provider implementations for testing
 *
 * These avoid any model or network access: the summarizer returns a fixed
 * summary and the provider returns a fixed generation response while
 * recording what it was asked.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use vidsum::errors::{ProviderError, SummaryError};
use vidsum::providers::Provider;
use vidsum::providers::ollama::{GenerationRequest, GenerationResponse};
use vidsum::summarizer::{Summarizer, SummaryOptions};

/// Summarizer that ignores its input and returns a canned summary
#[derive(Debug, Clone)]
pub struct FixedSummarizer {
    summary: String,
}

impl FixedSummarizer {
    pub fn new(summary: impl Into<String>) -> Self {
        FixedSummarizer { summary: summary.into() }
    }
}

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn summarize(&self, _text: &str, _options: &SummaryOptions) -> Result<String, SummaryError> {
        Ok(self.summary.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Tracks calls made to the mock provider
#[derive(Debug, Default)]
pub struct CallTracker {
    /// Count of mock API calls made
    pub call_count: usize,
    /// Last request received
    pub last_request: Option<GenerationRequest>,
}

/// Mock Ollama provider
#[derive(Debug, Clone)]
pub struct MockOllama {
    response: String,
    should_fail: bool,
    pub tracker: Arc<Mutex<CallTracker>>,
}

impl MockOllama {
    /// Provider answering every request with `response`
    pub fn new(response: impl Into<String>) -> Self {
        MockOllama {
            response: response.into(),
            should_fail: false,
            tracker: Arc::new(Mutex::new(CallTracker::default())),
        }
    }

    /// Provider failing every request with a connection error
    pub fn failing() -> Self {
        MockOllama {
            should_fail: true,
            ..Self::new("")
        }
    }
}

#[async_trait]
impl Provider for MockOllama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.last_request = Some(request.clone());
        }

        if self.should_fail {
            return Err(ProviderError::ConnectionError("mock connection refused".to_string()));
        }

        Ok(GenerationResponse {
            model: request.model,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            response: self.response.clone(),
            done: true,
            prompt_eval_count: None,
            eval_count: None,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.clone()
    }
}
