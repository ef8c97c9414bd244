use crate::schema::{FieldKind, ObjectContractBuilder, SchemaContract};
use crate::types::ModelTier;

/// Fixed pairing of a prompt style with an expected output shape.
///
/// Each use case determines the schema contract (if any), the sampling
/// profile, and the model tier of its generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCase {
    GeoFromIp,
    FingerprintGeneration,
    FingerprintAnalysis,
    CookieParse,
    FreeTextGeneration,
    WebSearch,
    AgentTurn,
}

impl UseCase {
    /// The output contract for schema-constrained use cases, `None` for the
    /// open-ended ones. Deterministic; never references runtime values.
    pub fn contract(&self) -> Option<SchemaContract> {
        match self {
            UseCase::GeoFromIp => Some(
                ObjectContractBuilder::new()
                    .required_field("timezone", FieldKind::String)
                    .required_field("language", FieldKind::String)
                    .build(),
            ),
            UseCase::FingerprintGeneration => Some(
                ObjectContractBuilder::new()
                    .required_field("userAgent", FieldKind::String)
                    .required_field("screenResolution", FieldKind::String)
                    .required_field("webGLVendor", FieldKind::String)
                    .required_field("webGLRenderer", FieldKind::String)
                    .required_field("macAddress", FieldKind::String)
                    .required_field("deviceName", FieldKind::String)
                    .required_field("cpuCores", FieldKind::Integer)
                    .required_field("memory", FieldKind::Integer)
                    .build(),
            ),
            UseCase::FingerprintAnalysis => {
                let finding = ObjectContractBuilder::new()
                    .required_field("parameter", FieldKind::String)
                    .required_field("issue", FieldKind::String)
                    .required_field("suggestion", FieldKind::String)
                    .build_kind();
                Some(
                    ObjectContractBuilder::new()
                        .required_field("risk", FieldKind::string_enum(["low", "medium", "high"]))
                        .required_field("report", FieldKind::Array(Box::new(finding)))
                        .build(),
                )
            }
            UseCase::CookieParse => {
                let record = ObjectContractBuilder::new()
                    .required_field("name", FieldKind::String)
                    .required_field("value", FieldKind::String)
                    .required_field("domain", FieldKind::String)
                    .required_field("path", FieldKind::String)
                    .required_field("expires", FieldKind::String)
                    .required_field("secure", FieldKind::Boolean)
                    .build_kind();
                Some(SchemaContract::array_of(record))
            }
            UseCase::FreeTextGeneration | UseCase::WebSearch | UseCase::AgentTurn => None,
        }
    }

    /// Low-variance sampling on schema-constrained paths, provider default
    /// elsewhere.
    pub fn temperature(&self) -> Option<f64> {
        match self {
            UseCase::GeoFromIp
            | UseCase::FingerprintGeneration
            | UseCase::FingerprintAnalysis
            | UseCase::CookieParse => Some(0.2),
            UseCase::FreeTextGeneration | UseCase::WebSearch | UseCase::AgentTurn => None,
        }
    }

    /// The deep tier is used only for risk analysis.
    pub fn tier(&self) -> ModelTier {
        match self {
            UseCase::FingerprintAnalysis => ModelTier::Deep,
            _ => ModelTier::Fast,
        }
    }

    /// Whether the retrieval capability is enabled for this use case.
    pub fn grounded(&self) -> bool {
        matches!(self, UseCase::WebSearch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contracts_are_deterministic() {
        assert_eq!(
            UseCase::GeoFromIp.contract(),
            UseCase::GeoFromIp.contract()
        );
    }

    #[test]
    fn test_schema_paths_use_low_variance_sampling() {
        assert_eq!(UseCase::CookieParse.temperature(), Some(0.2));
        assert_eq!(UseCase::AgentTurn.temperature(), None);
    }

    #[test]
    fn test_deep_tier_only_for_analysis() {
        assert_eq!(UseCase::FingerprintAnalysis.tier(), ModelTier::Deep);
        assert_eq!(UseCase::FingerprintGeneration.tier(), ModelTier::Fast);
        assert_eq!(UseCase::WebSearch.tier(), ModelTier::Fast);
    }

    #[test]
    fn test_all_contracts_well_formed() {
        for use_case in [
            UseCase::GeoFromIp,
            UseCase::FingerprintGeneration,
            UseCase::FingerprintAnalysis,
            UseCase::CookieParse,
        ] {
            let contract = use_case.contract().unwrap();
            assert!(contract.is_well_formed(), "{use_case:?}");
        }
    }

    #[test]
    fn test_geo_contract_shape() {
        let wire = UseCase::GeoFromIp.contract().unwrap().to_wire_schema();
        assert_eq!(wire["type"], "object");
        assert_eq!(wire["properties"]["timezone"]["type"], "string");
        assert_eq!(
            wire["required"],
            serde_json::json!(["timezone", "language"])
        );
    }
}
