//! Mock generative model for testing.
//!
//! Provides a configurable mock implementation of the GenerativeModel port,
//! allowing tests to run without calling the real API.
//!
//! # Features
//!
//! - Pre-configured JSON and image responses, consumed in order
//! - Simulated delays for concurrency testing
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let model = MockGenerativeModel::new()
//!     .with_json(json!({ "title": "Walk", "topic": "Parks", "steps": ["Go"] }))
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::enrichment::Illustration;
use crate::ports::{AIError, GenerativeModel, ImageRequest, ProviderInfo, StructuredRequest};

/// Mock generative model.
#[derive(Debug, Clone)]
pub struct MockGenerativeModel {
    structured: Arc<Mutex<VecDeque<MockResponse<serde_json::Value>>>>,
    images: Arc<Mutex<VecDeque<MockResponse<Option<Illustration>>>>>,
    info: ProviderInfo,
    delay: Duration,
    structured_calls: Arc<Mutex<Vec<StructuredRequest>>>,
    image_calls: Arc<Mutex<Vec<ImageRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse<T> {
    Success(T),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Parse { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Parse { message } => AIError::parse(message),
            MockError::Timeout { timeout_secs } => AIError::timeout(timeout_secs),
        }
    }
}

impl Default for MockGenerativeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerativeModel {
    pub fn new() -> Self {
        Self {
            structured: Arc::new(Mutex::new(VecDeque::new())),
            images: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-text-1", "mock-image-1"),
            delay: Duration::ZERO,
            structured_calls: Arc::new(Mutex::new(Vec::new())),
            image_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a JSON response for `generate_structured`.
    pub fn with_json(self, value: serde_json::Value) -> Self {
        lock(&self.structured).push_back(MockResponse::Success(value));
        self
    }

    /// Queues an error for `generate_structured`.
    pub fn with_structured_error(self, error: MockError) -> Self {
        lock(&self.structured).push_back(MockResponse::Error(error));
        self
    }

    /// Queues an image (or an image-less answer) for `generate_image`.
    pub fn with_image(self, image: Option<Illustration>) -> Self {
        lock(&self.images).push_back(MockResponse::Success(image));
        self
    }

    /// Queues an error for `generate_image`.
    pub fn with_image_error(self, error: MockError) -> Self {
        lock(&self.images).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn structured_call_count(&self) -> usize {
        lock(&self.structured_calls).len()
    }

    pub fn image_call_count(&self) -> usize {
        lock(&self.image_calls).len()
    }

    /// Returns all recorded structured requests.
    pub fn get_structured_calls(&self) -> Vec<StructuredRequest> {
        lock(&self.structured_calls).clone()
    }

    /// Returns all recorded image requests.
    pub fn get_image_calls(&self) -> Vec<ImageRequest> {
        lock(&self.image_calls).clone()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl GenerativeModel for MockGenerativeModel {
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<serde_json::Value, AIError> {
        lock(&self.structured_calls).push(request);
        self.simulate_latency().await;

        // An empty queue answers with something no caller can use.
        let next = lock(&self.structured).pop_front();
        match next {
            Some(MockResponse::Success(value)) => Ok(value),
            Some(MockResponse::Error(err)) => Err(err.into()),
            None => Ok(serde_json::Value::Null),
        }
    }

    async fn generate_image(
        &self,
        request: ImageRequest,
    ) -> Result<Option<Illustration>, AIError> {
        lock(&self.image_calls).push(request);
        self.simulate_latency().await;

        let next = lock(&self.images).pop_front();
        match next {
            Some(MockResponse::Success(image)) => Ok(image),
            Some(MockResponse::Error(err)) => Err(err.into()),
            None => Ok(None),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
