use crate::types::{GenerationRequest, GenerationResult};
use crate::Result;
use async_trait::async_trait;

/// The opaque, potentially failing, non-deterministic model capability.
///
/// Given a prompt and optional schema/tool constraint, returns text, a tool
/// invocation, or both (text accompanying a call). Implementations own the
/// wire format; the rest of the crate only sees [`GenerationResult`].
#[async_trait]
pub trait ModelCapability: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}
