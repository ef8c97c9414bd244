//! Google Gemini generateContent capability. Key points of the wire format:
//! - Uses `contents` with `parts`; system text goes in `system_instruction`.
//! - `generationConfig` wraps temperature; schema constraints ride in it as
//!   `responseMimeType` + `responseSchema`.
//! - Function calling uses `tools.functionDeclarations`; retrieval uses the
//!   `google_search` tool.
//! - Response: `candidates[0].content.parts` (text and `functionCall`
//!   parts), grounding sources under `groundingMetadata.groundingChunks`.
//! - API key is passed as `?key=` query parameter, not in headers.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::MediatorConfig;
use crate::error::Error;
use crate::types::{
    Citation, GenerationRequest, GenerationResult, OutputConstraint, ToolInvocation,
};
use crate::Result;

/// Production [`super::ModelCapability`] over the Gemini HTTP API.
#[derive(Debug)]
pub struct GeminiCapability {
    client: reqwest::Client,
    config: MediatorConfig,
}

impl GeminiCapability {
    pub fn new(config: MediatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(MediatorConfig::from_env())
    }

    fn build_body(request: &GenerationRequest) -> Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });

        if let Some(ref system) = request.system_instruction {
            body["system_instruction"] = serde_json::json!({
                "parts": [{ "text": system }]
            });
        }

        let mut gen_config = serde_json::json!({});
        if let Some(t) = request.temperature {
            gen_config["temperature"] = serde_json::json!(t);
        }

        match &request.constraint {
            OutputConstraint::Schema(contract) => {
                gen_config["responseMimeType"] = serde_json::json!("application/json");
                gen_config["responseSchema"] = contract.to_wire_schema();
            }
            OutputConstraint::Tools(tools) => {
                let declarations: Vec<Value> = tools.iter().map(|t| t.to_wire()).collect();
                body["tools"] = serde_json::json!([{ "functionDeclarations": declarations }]);
            }
            OutputConstraint::None => {}
        }

        if request.grounded {
            body["tools"] = serde_json::json!([{ "google_search": {} }]);
        }

        if gen_config != serde_json::json!({}) {
            body["generationConfig"] = gen_config;
        }

        body
    }

    fn parse_reply(body: &Value) -> Result<GenerationResult> {
        let parts = body
            .pointer("/candidates/0/content/parts")
            .and_then(|p| p.as_array())
            .ok_or_else(|| Error::malformed("reply has no candidate content parts"))?;

        let raw_text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("");

        let tool_invocation = parts
            .iter()
            .find_map(|p| p.get("functionCall"))
            .and_then(Self::parse_function_call);

        let citations = body
            .pointer("/candidates/0/groundingMetadata/groundingChunks")
            .and_then(|c| c.as_array())
            .map(|chunks| {
                chunks
                    .iter()
                    .filter_map(|chunk| {
                        let title = chunk.pointer("/web/title")?.as_str()?;
                        let uri = chunk.pointer("/web/uri")?.as_str()?;
                        Some(Citation {
                            title: title.to_string(),
                            uri: uri.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(GenerationResult {
            raw_text,
            tool_invocation,
            citations,
        })
    }

    /// Intentionally tolerant: some providers serialize `args` as a JSON
    /// string instead of an object.
    fn parse_function_call(call: &Value) -> Option<ToolInvocation> {
        let name = call.get("name")?.as_str()?.to_string();
        let arguments = match call.get("args") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::String(s)) => serde_json::from_str::<Value>(s)
                .ok()
                .and_then(|v| v.as_object().cloned())
                .unwrap_or_default(),
            _ => serde_json::Map::new(),
        };
        Some(ToolInvocation { name, arguments })
    }
}

#[async_trait]
impl super::ModelCapability for GeminiCapability {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::InvalidRequest("no API key configured".into()))?;

        let model = self.config.model_for(request.tier);
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);
        let body = Self::build_body(request);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Transport(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
                message: text.chars().take(500).collect(),
            });
        }

        let parsed: Value =
            serde_json::from_str(&text).map_err(|e| Error::malformed(e.to_string()))?;
        Self::parse_reply(&parsed)
    }
}
