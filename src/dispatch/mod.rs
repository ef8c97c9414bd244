//! Outbound communication with the generative model capability.
//!
//! [`Dispatcher`] is the single choke point: it validates requests, makes
//! exactly one capability call per invocation, and normalizes failures into
//! the crate error taxonomy. [`ModelCapability`] is the seam tests mock;
//! [`GeminiCapability`] is the production implementation.

mod capability;
mod dispatcher;
mod gemini;

pub use capability::ModelCapability;
pub use dispatcher::Dispatcher;
pub use gemini::GeminiCapability;
