use serde::{Deserialize, Serialize};

/// Identifying fields for one session, recomputed on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub agent_id: String,
    pub session_id: String,
    pub session_key: Option<String>,
    pub channel: Option<String>,
    pub cwd: Option<String>,
}

impl SessionMeta {
    pub fn new(
        agent_id: impl Into<String>,
        session_id: impl Into<String>,
        session_key: Option<String>,
        cwd: Option<String>,
    ) -> Self {
        let agent_id = agent_id.into();
        let channel = session_key
            .as_deref()
            .and_then(|key| parse_channel(key, &agent_id))
            .map(str::to_string);

        Self {
            agent_id,
            session_id: session_id.into(),
            session_key,
            channel,
            cwd,
        }
    }
}

/// Extract the channel segment from `agent:<agentId>:<channel>[:<scope>...]`.
///
/// Returns `None` when the key belongs to another agent or has no channel.
pub fn parse_channel<'a>(session_key: &'a str, agent_id: &str) -> Option<&'a str> {
    let rest = session_key
        .strip_prefix("agent:")?
        .strip_prefix(agent_id)?
        .strip_prefix(':')?;

    let channel = rest.split(':').next().unwrap_or(rest);
    if channel.is_empty() {
        None
    } else {
        Some(channel)
    }
}
