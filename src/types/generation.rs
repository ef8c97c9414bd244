//! Generation request/result types exchanged with the model capability.

use crate::schema::{SchemaContract, UseCase};
use crate::types::tool::{ToolDescriptor, ToolInvocation};

/// Cost/quality trade-off selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTier {
    Fast,
    Deep,
}

/// What the model's output is constrained to.
#[derive(Debug, Clone, Default)]
pub enum OutputConstraint {
    #[default]
    None,
    /// The reply must serialize the given shape.
    Schema(SchemaContract),
    /// The reply may be a call into the given action set.
    Tools(Vec<ToolDescriptor>),
}

/// One outbound request to the model capability.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub constraint: OutputConstraint,
    pub tier: ModelTier,
    pub temperature: Option<f64>,
    /// Enables the retrieval capability (grounded generation).
    pub grounded: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            constraint: OutputConstraint::None,
            tier: ModelTier::Fast,
            temperature: None,
            grounded: false,
        }
    }

    /// Request pre-configured for a use case: contract, sampling profile,
    /// tier, and grounding all come from the use case definition.
    pub fn for_use_case(use_case: UseCase, prompt: impl Into<String>) -> Self {
        let mut request = Self::new(prompt);
        if let Some(contract) = use_case.contract() {
            request.constraint = OutputConstraint::Schema(contract);
        }
        request.temperature = use_case.temperature();
        request.tier = use_case.tier();
        request.grounded = use_case.grounded();
        request
    }

    pub fn system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.constraint = OutputConstraint::Tools(tools);
        self
    }
}

/// Cited source reference from a retrieval-augmented reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// Fully populated reply from a successful upstream call.
///
/// At most one of a non-empty `raw_text` and a present `tool_invocation` is
/// the actionable outcome; explanatory text may accompany an invocation.
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub raw_text: String,
    pub tool_invocation: Option<ToolInvocation>,
    pub citations: Vec<Citation>,
}

impl GenerationResult {
    /// Plain text reply with no invocation or citations.
    pub fn text(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }
}
