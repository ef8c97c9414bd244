//! Browser profile views supplied by the host.

use crate::types::payload::FingerprintData;
use serde::{Deserialize, Serialize};

/// World-state context line for agent turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub status: String,
}

impl ProfileSummary {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

/// Profile view handed to fingerprint risk analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub proxy_ip: Option<String>,
    pub fingerprint: Option<FingerprintData>,
}
