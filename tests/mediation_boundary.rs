//! Boundary scenarios over a scripted model capability.
//!
//! Exercises the mediator operations end to end without touching the
//! network: each test scripts the capability replies and inspects both the
//! boundary result and the request the dispatcher actually sent.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ai_mediator::agent::FALLBACK_REPLY;
use ai_mediator::mediator::SEARCH_FALLBACK;
use ai_mediator::{
    Citation, Error, GenerationRequest, GenerationResult, Mediator, ModelCapability, ModelTier,
    OutputConstraint, ProfileRecord, ProfileSummary, ToolInvocation,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

struct ScriptedCapability {
    replies: Mutex<VecDeque<ai_mediator::Result<GenerationResult>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl ScriptedCapability {
    fn new(replies: Vec<ai_mediator::Result<GenerationResult>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> GenerationRequest {
        self.last_request
            .lock()
            .unwrap()
            .clone()
            .expect("capability was never called")
    }
}

#[async_trait]
impl ModelCapability for ScriptedCapability {
    async fn generate(&self, request: &GenerationRequest) -> ai_mediator::Result<GenerationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted capability ran out of replies")
    }
}

fn mediator_with(replies: Vec<ai_mediator::Result<GenerationResult>>) -> (Mediator, Arc<ScriptedCapability>) {
    let capability = ScriptedCapability::new(replies);
    (Mediator::new(capability.clone()), capability)
}

#[tokio::test]
async fn geo_from_ip_returns_decoded_fields() {
    init_tracing();
    let (mediator, capability) = mediator_with(vec![Ok(GenerationResult::text(
        r#"{"timezone":"America/Los_Angeles","language":"en-US"}"#,
    ))]);

    let geo = mediator.geo_from_ip("8.8.8.8").await.unwrap();
    assert_eq!(geo.timezone, "America/Los_Angeles");
    assert_eq!(geo.language, "en-US");

    let request = capability.last_request();
    assert!(request.prompt.contains("8.8.8.8"));
    assert!(matches!(request.constraint, OutputConstraint::Schema(_)));
    assert_eq!(request.temperature, Some(0.2));
}

#[tokio::test]
async fn geo_from_ip_upstream_failure_yields_none() {
    let (mediator, _) = mediator_with(vec![Err(Error::Timeout)]);
    assert!(mediator.geo_from_ip("8.8.8.8").await.is_none());
}

#[tokio::test]
async fn geo_from_ip_schema_violation_yields_none() {
    let (mediator, _) = mediator_with(vec![Ok(GenerationResult::text(
        r#"{"timezone":"America/Los_Angeles"}"#,
    ))]);
    assert!(mediator.geo_from_ip("8.8.8.8").await.is_none());
}

#[tokio::test]
async fn parse_cookies_blank_input_short_circuits() {
    let (mediator, capability) = mediator_with(vec![]);

    assert_eq!(mediator.parse_cookies("").await.as_deref(), Some("[]"));
    assert_eq!(mediator.parse_cookies("  \n\t ").await.as_deref(), Some("[]"));
    assert_eq!(capability.call_count(), 0);
}

#[tokio::test]
async fn parse_cookies_reserializes_validated_array() -> anyhow::Result<()> {
    init_tracing();
    let reply = "```json\n[{\"name\":\"sid\",\"value\":\"abc123\",\"domain\":\".example.com\",\
                 \"path\":\"/\",\"expires\":\"session\",\"secure\":true}]\n```";
    let (mediator, _) = mediator_with(vec![Ok(GenerationResult::text(reply))]);

    let json = mediator
        .parse_cookies("sid=abc123; Domain=.example.com; Secure")
        .await
        .expect("cookie parse should succeed");
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(parsed[0]["name"], "sid");
    assert_eq!(parsed[0]["secure"], true);
    Ok(())
}

#[tokio::test]
async fn parse_cookies_nonconformant_reply_yields_none() {
    // "secure" as a string must not be coerced
    let reply = r#"[{"name":"sid","value":"abc","domain":".example.com","path":"/","expires":"session","secure":"true"}]"#;
    let (mediator, _) = mediator_with(vec![Ok(GenerationResult::text(reply))]);

    assert!(mediator.parse_cookies("sid=abc").await.is_none());
}

#[tokio::test]
async fn analyze_fingerprint_substitutes_na_for_missing_proxy() {
    let reply = r#"{"risk":"medium","report":[{"parameter":"macAddress","issue":"locally administered prefix","suggestion":"use a vendor prefix"}]}"#;
    let (mediator, capability) = mediator_with(vec![Ok(GenerationResult::text(reply))]);

    let profile = ProfileRecord {
        name: "Work".into(),
        proxy_ip: None,
        fingerprint: None,
    };
    let assessment = mediator.analyze_profile_fingerprint(&profile).await.unwrap();
    assert_eq!(assessment.report.len(), 1);

    let request = capability.last_request();
    assert!(request.prompt.contains("Proxy IP: N/A"));
    assert_eq!(request.tier, ModelTier::Deep);
}

#[tokio::test]
async fn search_web_appends_deduplicated_sources() {
    let (mediator, capability) = mediator_with(vec![Ok(GenerationResult {
        raw_text: "Rust 1.80 was released in July 2024.".into(),
        tool_invocation: None,
        citations: vec![
            Citation { title: "Rust Blog".into(), uri: "https://blog.rust-lang.org".into() },
            Citation { title: "Releases".into(), uri: "https://github.com/rust-lang/rust/releases".into() },
            Citation { title: "Rust Blog".into(), uri: "https://blog.rust-lang.org".into() },
        ],
    })]);

    let answer = mediator.search_web("when was rust 1.80 released").await;
    assert_eq!(
        answer,
        "Rust 1.80 was released in July 2024.\n\n\
         Sources:\n\
         - [Rust Blog](https://blog.rust-lang.org)\n\
         - [Releases](https://github.com/rust-lang/rust/releases)"
    );

    let request = capability.last_request();
    assert!(request.grounded);
}

#[tokio::test]
async fn search_web_failure_degrades_to_fallback_text() {
    let (mediator, _) = mediator_with(vec![Err(Error::UpstreamRejected {
        status: 503,
        message: "overloaded".into(),
    })]);
    assert_eq!(mediator.search_web("anything").await, SEARCH_FALLBACK);
}

#[tokio::test]
async fn agent_turn_supplies_catalog_and_placeholder_context() {
    let (mediator, capability) =
        mediator_with(vec![Ok(GenerationResult::text("You have no profiles yet."))]);

    let reply = mediator.agent_response("what profiles do I have?", &[]).await;
    assert_eq!(reply.text, "You have no profiles yet.");
    assert!(reply.tool_invocation.is_none());

    let request = capability.last_request();
    let system = request.system_instruction.as_deref().unwrap();
    assert!(system.contains("There are no browser profiles yet."));
    match &request.constraint {
        OutputConstraint::Tools(tools) => assert_eq!(tools.len(), 7),
        other => panic!("expected tool constraint, got {other:?}"),
    }
}

#[tokio::test]
async fn agent_turn_context_lists_profiles() {
    let (mediator, capability) = mediator_with(vec![Ok(GenerationResult::text("One is running."))]);

    let profiles = vec![ProfileSummary::new("Alpha", "running")];
    mediator.agent_response("status?", &profiles).await;

    let request = capability.last_request();
    assert!(request
        .system_instruction
        .as_deref()
        .unwrap()
        .contains("\"Alpha\" (Status: running)"));
}

#[tokio::test]
async fn agent_turn_surfaces_tool_invocation_verbatim() {
    let mut arguments = serde_json::Map::new();
    arguments.insert("profile_name".into(), "Work".into());
    let (mediator, _) = mediator_with(vec![Ok(GenerationResult {
        raw_text: "Launching the Work profile.".into(),
        tool_invocation: Some(ToolInvocation {
            name: "launch_profile".into(),
            arguments,
        }),
        citations: vec![],
    })]);

    let reply = mediator.agent_response("launch work", &[]).await;
    let call = reply.tool_invocation.unwrap();
    assert_eq!(call.name, "launch_profile");
    assert_eq!(call.arguments["profile_name"], "Work");
    // accompanying text is kept alongside the invocation
    assert_eq!(reply.text, "Launching the Work profile.");
}

#[tokio::test]
async fn agent_turn_failure_degrades_to_apologetic_text() {
    let (mediator, _) = mediator_with(vec![Err(Error::Transport("connection refused".into()))]);

    let reply = mediator.agent_response("launch work", &[]).await;
    assert_eq!(reply.text, FALLBACK_REPLY);
    assert!(reply.tool_invocation.is_none());
}

#[tokio::test]
async fn generate_user_agent_returns_cleaned_line() {
    let (mediator, _) = mediator_with(vec![Ok(GenerationResult::text(
        "\"Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36\"\n",
    ))]);
    assert_eq!(
        mediator.generate_user_agent().await.as_deref(),
        Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
    );
}

#[tokio::test]
async fn generate_mac_address_discards_malformed_replies() {
    let (mediator, _) = mediator_with(vec![Ok(GenerationResult::text(
        "Sure! A good MAC would be 0A:1B:2C:3D:4E:5F.",
    ))]);
    assert!(mediator.generate_mac_address().await.is_none());

    let (mediator, _) = mediator_with(vec![Ok(GenerationResult::text("3C:52:82:1B:9E:4D"))]);
    assert_eq!(
        mediator.generate_mac_address().await.as_deref(),
        Some("3C:52:82:1B:9E:4D")
    );
}

#[tokio::test]
async fn fingerprint_generation_decodes_all_fields() {
    let reply = r#"{
        "userAgent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
        "screenResolution": "2560x1440",
        "webGLVendor": "Google Inc. (NVIDIA)",
        "webGLRenderer": "ANGLE (NVIDIA, NVIDIA GeForce RTX 4070)",
        "macAddress": "3C:52:82:1B:9E:4D",
        "deviceName": "DESKTOP-7G4K2P",
        "cpuCores": 12,
        "memory": 32
    }"#;
    let (mediator, _) = mediator_with(vec![Ok(GenerationResult::text(reply))]);

    let fingerprint = mediator.generate_full_fingerprint("Work").await.unwrap();
    assert_eq!(fingerprint.cpu_cores, 12);
    assert_eq!(fingerprint.device_name, "DESKTOP-7G4K2P");
}
