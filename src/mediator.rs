//! The boundary consumed by external collaborators (the action executor and
//! the UI layer).
//!
//! Every operation converts internal failures into `None` or a fixed
//! fallback string before returning; raw errors never cross this boundary.
//! Swallowed errors are logged at `warn` with the operation name.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::agent::{self, AgentReply};
use crate::catalog::ToolCatalog;
use crate::decode;
use crate::dispatch::{Dispatcher, GeminiCapability, ModelCapability};
use crate::schema::UseCase;
use crate::synthesis::synthesize;
use crate::types::{
    FingerprintAssessment, FingerprintData, GenerationRequest, GeoData, ProfileRecord,
    ProfileSummary,
};
use crate::Result;

/// Fallback string for the web-search surface, whose consumers render text
/// directly.
pub const SEARCH_FALLBACK: &str = "Sorry, I couldn't search the web right now.";

static MAC_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$").expect("mac pattern"));

/// Facade over the dispatcher and the tool catalog.
pub struct Mediator {
    dispatcher: Dispatcher,
    catalog: &'static ToolCatalog,
}

impl Mediator {
    pub fn new(capability: Arc<dyn ModelCapability>) -> Self {
        Self {
            dispatcher: Dispatcher::new(capability),
            catalog: ToolCatalog::global(),
        }
    }

    /// Mediator backed by the Gemini capability, configured from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(GeminiCapability::from_env()?)))
    }

    /// Timezone and language for the location of an IP address.
    pub async fn geo_from_ip(&self, ip: &str) -> Option<GeoData> {
        let prompt = format!(
            "Determine the most likely location of the IP address {ip}. \
             Reply with the IANA timezone identifier (e.g. \"America/Los_Angeles\") \
             and the primary browser language tag for that location (e.g. \"en-US\")."
        );
        self.structured(UseCase::GeoFromIp, prompt, "geo_from_ip")
            .await
    }

    /// A full set of plausible fingerprint fields for a new profile.
    pub async fn generate_full_fingerprint(&self, profile_name: &str) -> Option<FingerprintData> {
        let prompt = format!(
            "Generate a realistic, internally consistent browser fingerprint for a \
             modern Windows 11 desktop machine, for a browser profile named \"{profile_name}\". \
             The user agent must be a current Chrome release, the WebGL vendor and \
             renderer must match real hardware, the MAC address must use a real \
             vendor prefix, and cpuCores and memory (GB) must be plausible for \
             that hardware."
        );
        self.structured(UseCase::FingerprintGeneration, prompt, "generate_full_fingerprint")
            .await
    }

    /// Risk assessment of a profile's fingerprint, on the deep model tier.
    pub async fn analyze_profile_fingerprint(
        &self,
        profile: &ProfileRecord,
    ) -> Option<FingerprintAssessment> {
        let fingerprint = profile
            .fingerprint
            .as_ref()
            .and_then(|f| serde_json::to_string_pretty(f).ok())
            .unwrap_or_else(|| "none recorded".to_string());
        let proxy_ip = profile.proxy_ip.as_deref().unwrap_or("N/A");

        let prompt = format!(
            "Assess how detectable the browser profile \"{}\" is as an automated or \
             spoofed browser.\n\nFingerprint:\n{}\n\nProxy IP: {}\n\n\
             Judge the overall risk and report each inconsistent or suspicious \
             parameter with the issue and a concrete suggestion.",
            profile.name, fingerprint, proxy_ip
        );
        self.structured(UseCase::FingerprintAnalysis, prompt, "analyze_profile_fingerprint")
            .await
    }

    /// A single current user-agent string.
    pub async fn generate_user_agent(&self) -> Option<String> {
        let request = GenerationRequest::for_use_case(
            UseCase::FreeTextGeneration,
            "Reply with one realistic user agent string of the current stable Chrome \
             release on Windows 11, and nothing else.",
        );
        match self.dispatcher.dispatch(&request).await {
            Ok(result) => {
                let line = first_clean_line(&result.raw_text)?;
                Some(line)
            }
            Err(err) => {
                warn!(operation = "generate_user_agent", error = %err, "boundary degraded to None");
                None
            }
        }
    }

    /// A locally administered-looking MAC address. Replies that are not a
    /// well-formed colon-separated MAC are discarded.
    pub async fn generate_mac_address(&self) -> Option<String> {
        let request = GenerationRequest::for_use_case(
            UseCase::FreeTextGeneration,
            "Reply with one random MAC address using a real network card vendor \
             prefix, in the colon-separated form AA:BB:CC:DD:EE:FF, and nothing else.",
        );
        match self.dispatcher.dispatch(&request).await {
            Ok(result) => {
                let line = first_clean_line(&result.raw_text)?;
                if MAC_FORMAT.is_match(&line) {
                    Some(line)
                } else {
                    warn!(operation = "generate_mac_address", reply = %line, "discarding malformed MAC reply");
                    None
                }
            }
            Err(err) => {
                warn!(operation = "generate_mac_address", error = %err, "boundary degraded to None");
                None
            }
        }
    }

    /// Parse free-form cookie text into a JSON array string.
    ///
    /// Blank input short-circuits to `Some("[]")` without dispatching.
    pub async fn parse_cookies(&self, cookie_text: &str) -> Option<String> {
        if cookie_text.trim().is_empty() {
            return Some("[]".to_string());
        }

        let prompt = format!(
            "Parse the following raw cookie text into individual cookies. Use \"/\" \
             for a missing path, \"session\" for a missing expiry, and false for a \
             missing Secure attribute.\n\n{cookie_text}"
        );
        let contract = UseCase::CookieParse
            .contract()
            .expect("cookie parse is schema-constrained");
        let request = GenerationRequest::for_use_case(UseCase::CookieParse, prompt);

        let result = match self.dispatcher.dispatch(&request).await {
            Ok(result) => result,
            Err(err) => {
                warn!(operation = "parse_cookies", error = %err, "boundary degraded to None");
                return None;
            }
        };
        match decode::decode_value(&result.raw_text, &contract) {
            Ok(value) => serde_json::to_string(&value).ok(),
            Err(err) => {
                warn!(operation = "parse_cookies", error = %err, "boundary degraded to None");
                None
            }
        }
    }

    /// Grounded web search; the answer carries an appended "Sources:" block
    /// when the model cited sources.
    pub async fn search_web(&self, query: &str) -> String {
        let request = GenerationRequest::for_use_case(UseCase::WebSearch, query);
        match self.dispatcher.dispatch(&request).await {
            Ok(result) => synthesize(&result),
            Err(err) => {
                warn!(operation = "search_web", error = %err, "boundary degraded to fallback text");
                SEARCH_FALLBACK.to_string()
            }
        }
    }

    /// One conversational turn against the tool catalog.
    pub async fn agent_response(
        &self,
        user_input: &str,
        profiles: &[ProfileSummary],
    ) -> AgentReply {
        agent::resolve_turn(&self.dispatcher, self.catalog, user_input, profiles).await
    }

    async fn structured<T: serde::de::DeserializeOwned>(
        &self,
        use_case: UseCase,
        prompt: String,
        operation: &'static str,
    ) -> Option<T> {
        let contract = use_case.contract().expect("structured use case");
        let request = GenerationRequest::for_use_case(use_case, prompt);
        let result = match self.dispatcher.dispatch(&request).await {
            Ok(result) => result,
            Err(err) => {
                warn!(operation, error = %err, "boundary degraded to None");
                return None;
            }
        };
        match decode::decode(&result.raw_text, &contract) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(operation, error = %err, "boundary degraded to None");
                None
            }
        }
    }
}

/// First non-empty line of a reply, stripped of fencing and quotes.
fn first_clean_line(raw_text: &str) -> Option<String> {
    raw_text
        .lines()
        .map(|line| line.trim().trim_matches('`').trim_matches('"').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
