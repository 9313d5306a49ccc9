//! Pipeline trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::GenerationResult;
use crate::types::Generation;

/// Text generation transport, one attempt per call.
///
/// Retry scheduling lives in the pipeline core; implementations issue a
/// single request and classify its failure so the core can tell transient
/// overload from hard rejection.
#[mockall::automock]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue one generation request for a fully rendered user prompt
    async fn generate(&self, user_prompt: &str) -> GenerationResult<Generation>;
}
