//! The fixed set of host actions exposed to the conversational model.
//!
//! The catalog is the only process-wide state in the crate. It is built once
//! at first use and never mutated; every caller sees the same snapshot.

use crate::error::Error;
use crate::schema::{FieldKind, ObjectContractBuilder};
use crate::types::ToolDescriptor;
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static GLOBAL_CATALOG: Lazy<ToolCatalog> = Lazy::new(|| {
    ToolCatalog::new(builtin_tools()).expect("builtin tool catalog has unique names")
});

/// Immutable snapshot of callable action descriptors.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    /// Build a catalog, rejecting duplicate tool names.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(Error::InvalidRequest(format!(
                    "duplicate tool name in catalog: {}",
                    tool.name
                )));
            }
        }
        Ok(Self { tools })
    }

    /// The process-wide catalog of browser-automation actions.
    pub fn global() -> &'static ToolCatalog {
        &GLOBAL_CATALOG
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn builtin_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "search_web",
            "Search the web for current information and summarize the results.",
            ObjectContractBuilder::new()
                .required_field("query", FieldKind::String)
                .build(),
        ),
        ToolDescriptor::new(
            "launch_profile",
            "Launch the browser profile with the given name.",
            ObjectContractBuilder::new()
                .required_field("profile_name", FieldKind::String)
                .build(),
        ),
        ToolDescriptor::new(
            "launch_and_navigate_profile",
            "Launch the browser profile with the given name, then open a URL in it.",
            ObjectContractBuilder::new()
                .required_field("profile_name", FieldKind::String)
                .required_field("url", FieldKind::String)
                .build(),
        ),
        ToolDescriptor::new(
            "close_profile",
            "Close the running browser profile with the given name.",
            ObjectContractBuilder::new()
                .required_field("profile_name", FieldKind::String)
                .build(),
        ),
        ToolDescriptor::new(
            "navigate_url",
            "Open a URL in an already running browser profile.",
            ObjectContractBuilder::new()
                .required_field("profile_name", FieldKind::String)
                .required_field("url", FieldKind::String)
                .build(),
        ),
        ToolDescriptor::new(
            "list_profiles",
            "List all browser profiles and their current status.",
            ObjectContractBuilder::new().build(),
        ),
        ToolDescriptor::new(
            "create_profile",
            "Create a new browser profile, optionally behind a proxy.",
            ObjectContractBuilder::new()
                .required_field("profile_name", FieldKind::String)
                .field("proxy", FieldKind::String)
                .build(),
        ),
    ]
}
