//! Conversational turn resolution.
//!
//! A turn pairs the user's input with the tool catalog and a summary of the
//! current profiles, then resolves the model's reply into either a text
//! answer or exactly one tool invocation.

use tracing::warn;

use crate::catalog::ToolCatalog;
use crate::dispatch::Dispatcher;
use crate::schema::UseCase;
use crate::types::{GenerationRequest, ProfileSummary, ToolInvocation};

/// Context line used when no profiles exist yet.
pub const NO_PROFILES_PLACEHOLDER: &str = "There are no browser profiles yet.";

/// Terminal, user-visible degradation on any dispatcher failure.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't process that request right now. Please try again.";

const AGENT_PERSONA: &str = "You are the assistant of a browser profile manager. \
You help the user manage browser profiles and answer questions. \
When an action is needed, call one of the available tools instead of describing it.";

/// Resolved outcome of one conversational turn.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub text: String,
    /// Present when the model chose a machine-actionable call; surfaced
    /// verbatim regardless of accompanying text.
    pub tool_invocation: Option<ToolInvocation>,
}

/// One context line per profile, `"<name>" (Status: <status>)`.
pub fn profile_context(profiles: &[ProfileSummary]) -> String {
    if profiles.is_empty() {
        return NO_PROFILES_PLACEHOLDER.to_string();
    }
    profiles
        .iter()
        .map(|p| format!("\"{}\" (Status: {})", p.name, p.status))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn resolve_turn(
    dispatcher: &Dispatcher,
    catalog: &ToolCatalog,
    user_input: &str,
    profiles: &[ProfileSummary],
) -> AgentReply {
    let system = format!(
        "{}\n\nCurrent profiles:\n{}",
        AGENT_PERSONA,
        profile_context(profiles)
    );
    let request = GenerationRequest::for_use_case(UseCase::AgentTurn, user_input)
        .system(system)
        .tools(catalog.tools().to_vec());

    match dispatcher.dispatch(&request).await {
        Ok(result) => AgentReply {
            text: result.raw_text,
            tool_invocation: result.tool_invocation,
        },
        Err(err) => {
            warn!(error = %err, "agent turn degraded to fallback reply");
            AgentReply {
                text: FALLBACK_REPLY.to_string(),
                tool_invocation: None,
            }
        }
    }
}
