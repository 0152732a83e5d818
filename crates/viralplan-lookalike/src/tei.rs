//! TEI (Text Embeddings Inference) client used as the text encoder.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::encoder::TextEncoder;
use crate::error::LookalikeError;
use crate::vector::l2_normalize;

/// Maximum number of texts per /embed call.
const BATCH_SIZE: usize = 64;

/// TEI HTTP client.
pub struct TeiEncoder {
    client: reqwest::Client,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
    normalize: bool,
}

impl TeiEncoder {
    /// Create a new `TeiEncoder` for the server at `tei_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::Encoder`] if the HTTP client cannot be built.
    pub fn new(tei_url: &str, model: &str, timeout_secs: u64) -> Result<Self, LookalikeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LookalikeError::Encoder(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/embed", tei_url.trim_end_matches('/')),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl TextEncoder for TeiEncoder {
    fn model(&self) -> &str {
        &self.model
    }

    /// Generate embeddings for a batch of texts.
    ///
    /// Texts are sent in groups of [`BATCH_SIZE`] per request. Every returned
    /// vector is L2-normalized locally as well, so the unit-norm guarantee does
    /// not depend on server configuration.
    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, LookalikeError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let request = EmbedRequest {
                inputs: chunk,
                normalize: true,
            };
            let response = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| LookalikeError::Encoder(format!("TEI request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(LookalikeError::Encoder(format!(
                    "TEI returned status {}",
                    response.status()
                )));
            }

            let embeddings: Vec<Vec<f32>> = response
                .json()
                .await
                .map_err(|e| LookalikeError::Encoder(format!("TEI response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(LookalikeError::Encoder(format!(
                    "TEI returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            for mut embedding in embeddings {
                if !l2_normalize(&mut embedding) {
                    return Err(LookalikeError::Encoder(
                        "TEI returned a zero or non-finite vector".to_string(),
                    ));
                }
                all_embeddings.push(embedding);
            }
        }

        tracing::debug!(
            texts = texts.len(),
            model = %self.model,
            "encoded texts via TEI"
        );
        Ok(all_embeddings)
    }
}
