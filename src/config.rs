//! Environment-driven configuration for the mediation layer.

use keyring::Entry;
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_FAST_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_DEEP_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the outbound model capability.
///
/// Everything is env-overridable with production-friendly defaults. The API
/// key is resolved keyring-first, then from `GEMINI_API_KEY`.
#[derive(Debug, Clone)]
pub struct MediatorConfig {
    pub base_url: String,
    pub fast_model: String,
    pub deep_model: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl MediatorConfig {
    pub fn from_env() -> Self {
        let timeout_secs = env::var("AI_MEDIATOR_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url: env::var("AI_MEDIATOR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            fast_model: env::var("AI_MEDIATOR_FAST_MODEL")
                .unwrap_or_else(|_| DEFAULT_FAST_MODEL.into()),
            deep_model: env::var("AI_MEDIATOR_DEEP_MODEL")
                .unwrap_or_else(|_| DEFAULT_DEEP_MODEL.into()),
            timeout: Duration::from_secs(timeout_secs),
            api_key: Self::get_api_key("gemini"),
        }
    }

    fn get_api_key(provider_id: &str) -> Option<String> {
        // 1. Try Keyring
        if let Ok(entry) = Entry::new("ai-mediator", provider_id) {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }

        // 2. Try Environment Variable (PROVIDER_API_KEY)
        let env_var = format!("{}_API_KEY", provider_id.to_uppercase());
        env::var(env_var).ok()
    }

    /// Model id for a tier. The deep model is reserved for analysis work
    /// where latency matters less than judgment.
    pub fn model_for(&self, tier: crate::types::ModelTier) -> &str {
        match tier {
            crate::types::ModelTier::Fast => &self.fast_model,
            crate::types::ModelTier::Deep => &self.deep_model,
        }
    }
}
