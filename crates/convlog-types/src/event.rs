//! Lifecycle events delivered by the runtime's hook mechanism.

use serde::Deserialize;

/// A hook invocation. The runtime sends more fields than are modelled here;
/// they are dropped at deserialisation time.
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub context: LifecycleContext,
}

/// The subset of the event context this crate is allowed to read.
///
/// The runtime's context bag also carries the agent config, including
/// provider credentials. Those keys have no field here and never leave the
/// deserialiser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleContext {
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub session_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// `agent:bootstrap`: a session was opened.
    Bootstrap,
    /// `command:new`: the user asked for a fresh session.
    NewSession,
    /// `message:sent`: a reply went out and the journal has grown.
    MessageSent,
    Other,
}

impl LifecycleEvent {
    /// Classify the event. Accepts both `{type, action}` pairs and a combined
    /// `type: "kind:action"` with no separate action.
    pub fn trigger(&self) -> TriggerKind {
        let (kind, action) = match self.action.as_deref() {
            Some(action) => (self.event_type.as_str(), action),
            None => self
                .event_type
                .split_once(':')
                .unwrap_or((self.event_type.as_str(), "")),
        };

        match (kind, action) {
            ("agent", "bootstrap") => TriggerKind::Bootstrap,
            ("command", "new") => TriggerKind::NewSession,
            ("message", "sent") => TriggerKind::MessageSent,
            _ => TriggerKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trigger_classification() {
        let event: LifecycleEvent =
            serde_json::from_value(json!({"type": "agent", "action": "bootstrap"})).unwrap();
        assert_eq!(event.trigger(), TriggerKind::Bootstrap);

        let event: LifecycleEvent =
            serde_json::from_value(json!({"type": "message:sent"})).unwrap();
        assert_eq!(event.trigger(), TriggerKind::MessageSent);

        let event: LifecycleEvent =
            serde_json::from_value(json!({"type": "command", "action": "reset"})).unwrap();
        assert_eq!(event.trigger(), TriggerKind::Other);
    }

    #[test]
    fn test_context_ignores_config() {
        let event: LifecycleEvent = serde_json::from_value(json!({
            "type": "command",
            "action": "new",
            "context": {
                "agentId": "main",
                "sessionId": "s-1",
                "sessionKey": "agent:main:matrix",
                "cfg": {"providers": {"anthropic": {"apiKey": "sk-secret"}}}
            }
        }))
        .unwrap();

        assert_eq!(event.trigger(), TriggerKind::NewSession);
        assert_eq!(event.context.agent_id.as_deref(), Some("main"));
        assert_eq!(event.context.session_id.as_deref(), Some("s-1"));
        assert!(!format!("{:?}", event).contains("sk-secret"));
    }
}
