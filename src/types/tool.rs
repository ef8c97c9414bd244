//! Tool calling definitions.

use crate::schema::SchemaContract;
use serde::{Deserialize, Serialize};

/// A named, typed action the model may request instead of returning prose.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// Parameter shape, restricted to object-with-named-fields.
    pub parameters: SchemaContract,
    /// Names the model must supply; subset of the declared parameters.
    pub required: Vec<String>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: SchemaContract,
    ) -> Self {
        let required = match parameters.root() {
            crate::schema::FieldKind::Object { required, .. } => required.clone(),
            _ => Vec::new(),
        };
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            required,
        }
    }

    fn has_parameters(&self) -> bool {
        !matches!(
            self.parameters.root(),
            crate::schema::FieldKind::Object { fields, .. } if fields.is_empty()
        )
    }

    /// Wire `functionDeclarations` entry. Parameter-less tools omit the
    /// `parameters` key entirely.
    pub fn to_wire(&self) -> serde_json::Value {
        let mut decl = serde_json::json!({
            "name": self.name,
            "description": self.description,
        });
        if self.has_parameters() {
            decl["parameters"] = self.parameters.to_wire_schema();
        }
        decl
    }
}

/// Tool invocation surfaced from the model's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, ObjectContractBuilder};

    #[test]
    fn test_required_derived_from_contract() {
        let tool = ToolDescriptor::new(
            "create_profile",
            "Create a new browser profile.",
            ObjectContractBuilder::new()
                .required_field("profile_name", FieldKind::String)
                .field("proxy", FieldKind::String)
                .build(),
        );
        assert_eq!(tool.required, vec!["profile_name"]);
    }

    #[test]
    fn test_parameterless_tool_omits_parameters() {
        let tool = ToolDescriptor::new(
            "list_profiles",
            "List all browser profiles.",
            ObjectContractBuilder::new().build(),
        );
        let wire = tool.to_wire();
        assert!(wire.get("parameters").is_none());
        assert_eq!(wire["name"], "list_profiles");
    }
}
