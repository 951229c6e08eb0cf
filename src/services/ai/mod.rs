pub mod gemini;

use async_trait::async_trait;
use serde_json::Value;

/// External text-generation collaborator. `generate` returns the raw
/// reply text; transport and API failures come back as `Err` and are
/// absorbed by the confirmation normalizer, never surfaced to visitors.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, prompt: &str, schema: &Value) -> anyhow::Result<String>;
}
