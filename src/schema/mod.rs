//! Schema contracts for structured generation.
//!
//! A [`SchemaContract`] is the strict output-shape descriptor paired with a
//! prompt so the model's answer can be parsed deterministically. Contracts
//! are built once per use case by pure functions and never reference runtime
//! values.

mod contract;
mod use_case;

pub use contract::{FieldKind, ObjectContractBuilder, SchemaContract};
pub use use_case::UseCase;
