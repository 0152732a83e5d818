use std::sync::Arc;

use viralplan_core::AppConfig;
use viralplan_lookalike::{LookalikeEngine, TeiEncoder};

/// Lookalike capability for the lifetime of the process.
///
/// Startup never fails on a missing or broken artifact; the server keeps
/// serving plans and answers lookalike routes with 503 instead.
#[derive(Clone)]
pub enum LookalikeService {
    Ready(Arc<LookalikeEngine>),
    Unavailable(Arc<str>),
}

impl LookalikeService {
    /// Builds the TEI encoder and loads the embedding artifact once.
    pub fn initialize(config: &AppConfig) -> Self {
        let encoder = match TeiEncoder::new(
            &config.tei_url,
            &config.embedding_model,
            config.tei_timeout_secs,
        ) {
            Ok(encoder) => encoder,
            Err(e) => {
                tracing::warn!(error = %e, "lookalike search disabled: encoder setup failed");
                return Self::Unavailable(e.to_string().into());
            }
        };

        match LookalikeEngine::load(&config.embeddings_path, Arc::new(encoder)) {
            Ok(engine) => {
                tracing::info!(
                    influencers = engine.table().len(),
                    dimension = engine.table().dimension(),
                    "lookalike search ready"
                );
                Self::Ready(Arc::new(engine))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %config.embeddings_path.display(),
                    "lookalike search disabled: embeddings unavailable"
                );
                Self::Unavailable(e.to_string().into())
            }
        }
    }

    #[must_use]
    pub fn engine(&self) -> Option<&Arc<LookalikeEngine>> {
        match self {
            Self::Ready(engine) => Some(engine),
            Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ok",
            Self::Unavailable(_) => "unavailable",
        }
    }
}
