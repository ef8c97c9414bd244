use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Error;
use crate::types::{GenerationRequest, GenerationResult, OutputConstraint};
use crate::Result;

use super::ModelCapability;

/// The single choke point for outbound model calls.
///
/// Exactly one capability call per `dispatch` invocation; no implicit retry.
/// Retry, if desired, is an external policy layered on the boundary
/// operations.
#[derive(Clone)]
pub struct Dispatcher {
    capability: Arc<dyn ModelCapability>,
}

impl Dispatcher {
    pub fn new(capability: Arc<dyn ModelCapability>) -> Self {
        Self { capability }
    }

    pub async fn dispatch(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        Self::validate(request)?;

        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            tier = ?request.tier,
            constraint = Self::constraint_kind(request),
            grounded = request.grounded,
            "dispatching generation request"
        );

        match self.capability.generate(request).await {
            Ok(result) => {
                debug!(
                    %request_id,
                    text_len = result.raw_text.len(),
                    tool_call = result.tool_invocation.as_ref().map(|t| t.name.as_str()),
                    citations = result.citations.len(),
                    "capability reply"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(%request_id, error = %err, "capability call failed");
                Err(err)
            }
        }
    }

    /// Rejects requests that must never reach the wire.
    fn validate(request: &GenerationRequest) -> Result<()> {
        if request.prompt.trim().is_empty() {
            return Err(Error::InvalidRequest("prompt must be non-empty".into()));
        }
        match &request.constraint {
            OutputConstraint::Schema(contract) => {
                if !contract.is_well_formed() {
                    return Err(Error::InvalidRequest(
                        "schema contract is not well-formed".into(),
                    ));
                }
            }
            OutputConstraint::Tools(tools) => {
                if tools.is_empty() {
                    return Err(Error::InvalidRequest(
                        "tool constraint must list at least one tool".into(),
                    ));
                }
                let mut seen = HashSet::new();
                for tool in tools {
                    if !seen.insert(tool.name.as_str()) {
                        return Err(Error::InvalidRequest(format!(
                            "duplicate tool name: {}",
                            tool.name
                        )));
                    }
                }
            }
            OutputConstraint::None => {}
        }
        Ok(())
    }

    fn constraint_kind(request: &GenerationRequest) -> &'static str {
        match request.constraint {
            OutputConstraint::None => "none",
            OutputConstraint::Schema(_) => "schema",
            OutputConstraint::Tools(_) => "tools",
        }
    }
}
