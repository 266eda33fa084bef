mod practicum;

use crate::core::errors::ApiError;
use async_trait::async_trait;

pub use practicum::PracticumClient;

/// Source of homework status envelopes.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetches the raw response for changes since `since` (Unix seconds).
    /// Values `<= 0` mean "now".
    async fn fetch(&self, since: i64) -> Result<serde_json::Value, ApiError>;
}
