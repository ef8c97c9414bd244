//! # ai-mediator
//!
//! Structured generation and function-calling mediation layer for browser
//! profile automation backends.
//!
//! ## Overview
//!
//! This library turns free-form user intent (chat input, profile data, raw
//! cookie text) into schema-validated results produced by a generative
//! model, and lets the model invoke a fixed set of host-defined actions
//! instead of only returning text. Two protocols make up the core:
//!
//! - a natural-language request is paired with a strict output schema so the
//!   model's answer can be parsed deterministically, and
//! - a conversational request is paired with a catalog of callable actions
//!   so the model's answer can optionally be a machine-actionable call.
//!
//! When the model uses its retrieval capability, the final answer is
//! synthesized with a deduplicated "Sources:" block.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_mediator::Mediator;
//!
//! #[tokio::main]
//! async fn main() -> ai_mediator::Result<()> {
//!     let mediator = Mediator::from_env()?;
//!
//!     if let Some(geo) = mediator.geo_from_ip("8.8.8.8").await {
//!         println!("{} / {}", geo.timezone, geo.language);
//!     }
//!
//!     let reply = mediator.agent_response("launch the Work profile", &[]).await;
//!     if let Some(call) = reply.tool_invocation {
//!         println!("execute {} with {:?}", call.name, call.arguments);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Output-shape contracts and per-use-case builders |
//! | [`catalog`] | The fixed, process-wide tool catalog |
//! | [`dispatch`] | The outbound choke point and the model capability seam |
//! | [`decode`] | Strict structural decoding of model output |
//! | [`synthesis`] | Citation handling for grounded answers |
//! | [`agent`] | Conversational turn resolution |
//! | [`mediator`] | The boundary consumed by external collaborators |
//!
//! All boundary operations degrade to `None` or a fixed fallback string on
//! any upstream or decode failure; callers never see raw errors.

pub mod agent;
pub mod catalog;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod mediator;
pub mod schema;
pub mod synthesis;
pub mod types;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;

// Re-export main types for convenience
pub use agent::AgentReply;
pub use catalog::ToolCatalog;
pub use config::MediatorConfig;
pub use dispatch::{Dispatcher, GeminiCapability, ModelCapability};
pub use mediator::Mediator;
pub use schema::{FieldKind, ObjectContractBuilder, SchemaContract, UseCase};
pub use types::{
    Citation, GenerationRequest, GenerationResult, ModelTier, OutputConstraint, ProfileRecord,
    ProfileSummary, ToolDescriptor, ToolInvocation,
};
