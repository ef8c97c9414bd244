//! Decoded payload types for the structured use cases.

use serde::{Deserialize, Serialize};

/// Geo lookup result for an IP address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoData {
    pub timezone: String,
    pub language: String,
}

/// Generated browser fingerprint fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintData {
    pub user_agent: String,
    pub screen_resolution: String,
    #[serde(rename = "webGLVendor")]
    pub webgl_vendor: String,
    #[serde(rename = "webGLRenderer")]
    pub webgl_renderer: String,
    pub mac_address: String,
    pub device_name: String,
    pub cpu_cores: i64,
    pub memory: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One flagged fingerprint parameter in a risk report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintFinding {
    pub parameter: String,
    pub issue: String,
    pub suggestion: String,
}

/// Risk assessment of a profile's fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintAssessment {
    pub risk: RiskLevel,
    pub report: Vec<FingerprintFinding>,
}

/// One cookie parsed out of free-form cookie text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub expires: String,
    pub secure: bool,
}
