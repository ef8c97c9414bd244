use serde_json::json;

/// Structural kind of a single field in a contract.
///
/// Primitive kinds terminate the tree; composite kinds recurse. Every leaf
/// of a well-formed contract is a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    /// String restricted to a fixed set of values.
    StringEnum(Vec<String>),
    /// Object with named fields and an explicit required-name list.
    Object {
        fields: Vec<(String, FieldKind)>,
        required: Vec<String>,
    },
    Array(Box<FieldKind>),
}

impl FieldKind {
    pub fn string_enum<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        FieldKind::StringEnum(values.into_iter().map(Into::into).collect())
    }

    /// Human-readable kind name, used in violation reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::StringEnum(_) => "enum",
            FieldKind::Object { .. } => "object",
            FieldKind::Array(_) => "array",
        }
    }

    fn is_well_formed(&self) -> bool {
        match self {
            FieldKind::String | FieldKind::Integer | FieldKind::Boolean => true,
            FieldKind::StringEnum(values) => !values.is_empty(),
            FieldKind::Object { fields, required } => {
                required
                    .iter()
                    .all(|name| fields.iter().any(|(f, _)| f == name))
                    && fields.iter().all(|(_, kind)| kind.is_well_formed())
            }
            FieldKind::Array(item) => item.is_well_formed(),
        }
    }

    fn to_wire(&self) -> serde_json::Value {
        match self {
            FieldKind::String => json!({"type": "string"}),
            FieldKind::Integer => json!({"type": "integer"}),
            FieldKind::Boolean => json!({"type": "boolean"}),
            FieldKind::StringEnum(values) => json!({"type": "string", "enum": values}),
            FieldKind::Object { fields, required } => {
                let mut properties = serde_json::Map::new();
                for (name, kind) in fields {
                    properties.insert(name.clone(), kind.to_wire());
                }
                let mut map = serde_json::Map::new();
                map.insert("type".into(), json!("object"));
                map.insert("properties".into(), properties.into());
                if !required.is_empty() {
                    map.insert("required".into(), json!(required));
                }
                map.into()
            }
            FieldKind::Array(item) => json!({"type": "array", "items": item.to_wire()}),
        }
    }
}

/// Immutable output-shape descriptor for one structured-generation use case.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaContract {
    root: FieldKind,
}

impl SchemaContract {
    pub fn new(root: FieldKind) -> Self {
        Self { root }
    }

    /// Contract whose root is an array of `item`.
    pub fn array_of(item: FieldKind) -> Self {
        Self {
            root: FieldKind::Array(Box::new(item)),
        }
    }

    pub fn root(&self) -> &FieldKind {
        &self.root
    }

    /// True when every required name is declared and every path resolves to
    /// a concrete kind. Contracts built through [`ObjectContractBuilder`]
    /// hold this by construction; the dispatcher re-checks hand-built ones.
    pub fn is_well_formed(&self) -> bool {
        self.root.is_well_formed()
    }

    /// Render the contract in the wire `responseSchema` form.
    pub fn to_wire_schema(&self) -> serde_json::Value {
        self.root.to_wire()
    }
}

/// Builder for object-rooted contracts.
#[derive(Debug, Clone, Default)]
pub struct ObjectContractBuilder {
    fields: Vec<(String, FieldKind)>,
    required: Vec<String>,
}

impl ObjectContractBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an optional field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    /// Declare a field and mark it required.
    pub fn required_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.fields.push((name, kind));
        self
    }

    pub fn build(self) -> SchemaContract {
        SchemaContract::new(FieldKind::Object {
            fields: self.fields,
            required: self.required,
        })
    }

    /// The object kind itself, for nesting inside another contract.
    pub fn build_kind(self) -> FieldKind {
        FieldKind::Object {
            fields: self.fields,
            required: self.required,
        }
    }
}
