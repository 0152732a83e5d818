//! Lookalike search over precomputed influencer embeddings.
//!
//! An offline build step embeds each influencer's content text through a
//! [`TextEncoder`] (TEI in production) and writes an [`EmbeddingArtifact`].
//! At startup the serving process loads that artifact into an immutable
//! [`EmbeddingTable`] and wraps it in a [`LookalikeEngine`], which ranks every
//! row by dot product against a query vector. Vectors are unit-normalized, so
//! the dot product is the cosine similarity.
//!
//! The search is a brute-force O(N·D) scan and is meant for tables of a few
//! thousand rows at most.

pub mod artifact;
pub mod builder;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod table;
pub mod tei;
pub mod vector;

pub use artifact::EmbeddingArtifact;
pub use builder::build_artifact;
pub use encoder::TextEncoder;
pub use engine::{LookalikeEngine, Neighbor, DEFAULT_TOP_K};
pub use error::LookalikeError;
pub use table::EmbeddingTable;
pub use tei::TeiEncoder;
