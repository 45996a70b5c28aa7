use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{kernel::ReasoningChain, memory::error::MemoryError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHit {
    pub text: String,
    pub score: f64,
    #[serde(default)]
    pub source: String,
}

/// Similarity store over past experience. Reads may run concurrently; the
/// backing index is maintained elsewhere and may lag recent writes.
#[async_trait]
pub trait MemoryIndexPort: Send + Sync {
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<MemoryHit>, MemoryError>;
}

/// Durable storage for finalized reasoning chains.
#[async_trait]
pub trait ChainStorePort: Send + Sync {
    async fn save(&self, chain: &ReasoningChain) -> Result<PathBuf, MemoryError>;
    async fn load(&self, id: Uuid) -> Result<Option<ReasoningChain>, MemoryError>;
}
