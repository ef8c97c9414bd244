//! Core type definitions (generation requests, tools, decoded payloads).

pub mod generation;
pub mod payload;
pub mod profile;
pub mod tool;

pub use generation::{Citation, GenerationRequest, GenerationResult, ModelTier, OutputConstraint};
pub use payload::{
    CookieRecord, FingerprintAssessment, FingerprintData, FingerprintFinding, GeoData, RiskLevel,
};
pub use profile::{ProfileRecord, ProfileSummary};
pub use tool::{ToolDescriptor, ToolInvocation};
