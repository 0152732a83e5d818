use async_trait::async_trait;

use crate::error::LookalikeError;

/// Maps free text to a unit-normalized embedding vector.
///
/// Implementations must be deterministic for a given model: the same text
/// always encodes to the same vector.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    /// Identifier of the underlying model, recorded in built artifacts.
    fn model(&self) -> &str;

    /// Encode a batch of texts, returning one vector per input in order.
    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, LookalikeError>;

    /// Encode a single text.
    async fn encode(&self, text: &str) -> Result<Vec<f32>, LookalikeError> {
        self.encode_batch(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LookalikeError::Encoder("encoder returned no embedding".into()))
    }
}
