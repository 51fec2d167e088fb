//! Inbound hook payloads.
//!
//! These mirror what the agent runtime hands to its plugins: lifecycle events
//! and the two tool-execution boundaries. [`HookMessage`] is the tagged wire
//! form used when events arrive as JSON lines.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

// ============================================================================
// Lifecycle Events
// ============================================================================

/// Lifecycle event kinds the hooks react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A new session began.
    #[serde(rename = "session.start")]
    SessionStart,
    /// The agent finished its turn and is waiting.
    #[serde(rename = "session.idle")]
    SessionIdle,
    /// The session hit an error.
    #[serde(rename = "session.error")]
    SessionError,
    /// A tool call needs user approval.
    #[serde(rename = "approval.required")]
    ApprovalRequired,
    /// The user approved a tool call.
    #[serde(rename = "approval.granted")]
    ApprovalGranted,
    /// The user denied a tool call.
    #[serde(rename = "approval.denied")]
    ApprovalDenied,
    /// Any event type the hooks do not handle.
    #[serde(other)]
    Unknown,
}

impl EventKind {
    /// Returns the wire name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionStart => "session.start",
            Self::SessionIdle => "session.idle",
            Self::SessionError => "session.error",
            Self::ApprovalRequired => "approval.required",
            Self::ApprovalGranted => "approval.granted",
            Self::ApprovalDenied => "approval.denied",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle event from the agent runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl LifecycleEvent {
    /// Creates an event of the given kind.
    pub fn new(kind: EventKind) -> Self {
        Self { kind }
    }
}

// ============================================================================
// Tool Execution
// ============================================================================

/// Context attached to a tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContext {
    /// Model identifier, e.g. `anthropic/claude-sonnet-4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// A tool invocation, seen at both execution boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool name (`edit`, `write`, `bash`, ...).
    pub tool: String,
    /// Optional invocation context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ToolContext>,
}

impl ToolInvocation {
    /// Creates an invocation without context.
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            context: None,
        }
    }

    /// Attaches a model to the invocation context.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.context = Some(ToolContext {
            model: Some(model.into()),
        });
        self
    }

    /// Returns the model from the context, if present.
    pub fn model(&self) -> Option<&str> {
        self.context.as_ref()?.model.as_deref()
    }

    /// Returns true for tools that modify files.
    pub fn is_file_edit(&self) -> bool {
        matches!(self.tool.as_str(), "edit" | "write")
    }

    /// Returns true for shell command execution.
    pub fn is_shell(&self) -> bool {
        self.tool == "bash"
    }
}

/// Result metadata reported after a tool finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Execution time in milliseconds. The runtime reports a plain number,
    /// which may be fractional; anything that is not a number reads as absent.
    #[serde(
        default,
        deserialize_with = "lenient_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<f64>,
}

impl ToolOutput {
    /// Creates an output with the given duration.
    pub fn with_duration(duration_ms: f64) -> Self {
        Self {
            duration: Some(duration_ms),
        }
    }
}

fn lenient_duration<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64))
}

// ============================================================================
// Hook Message
// ============================================================================

/// One callback from the agent runtime, in its JSON-lines wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hook")]
pub enum HookMessage {
    /// A lifecycle event.
    #[serde(rename = "event")]
    Event {
        /// The event.
        event: LifecycleEvent,
    },
    /// A tool is about to run.
    #[serde(rename = "tool.execute.before")]
    ToolBefore {
        /// The invocation.
        input: ToolInvocation,
    },
    /// A tool finished running.
    #[serde(rename = "tool.execute.after")]
    ToolAfter {
        /// The invocation.
        input: ToolInvocation,
        /// Execution metadata.
        #[serde(default)]
        output: ToolOutput,
    },
}

impl HookMessage {
    /// Decodes one message from its JSON wire form. Surrounding whitespace is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyMessage`] for blank input and
    /// [`CoreError::InvalidMessage`] for anything that is not a hook message.
    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CoreError::EmptyMessage);
        }
        Ok(serde_json::from_str(input)?)
    }

    /// Builds a lifecycle event message.
    pub fn event(kind: EventKind) -> Self {
        Self::Event {
            event: LifecycleEvent::new(kind),
        }
    }

    /// Returns the hook name of this message.
    pub fn hook_name(&self) -> &'static str {
        match self {
            Self::Event { .. } => "event",
            Self::ToolBefore { .. } => "tool.execute.before",
            Self::ToolAfter { .. } => "tool.execute.after",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lifecycle_event() {
        let msg: HookMessage =
            serde_json::from_str(r#"{"hook":"event","event":{"type":"session.idle"}}"#).unwrap();
        assert_eq!(msg, HookMessage::event(EventKind::SessionIdle));
    }

    #[test]
    fn test_unknown_event_type() {
        let msg: HookMessage =
            serde_json::from_str(r#"{"hook":"event","event":{"type":"file.edited"}}"#).unwrap();
        assert_eq!(msg, HookMessage::event(EventKind::Unknown));
    }

    #[test]
    fn test_parse_tool_before_with_model() {
        let msg: HookMessage = serde_json::from_str(
            r#"{"hook":"tool.execute.before","input":{"tool":"edit","context":{"model":"anthropic/claude"}}}"#,
        )
        .unwrap();
        let HookMessage::ToolBefore { input } = msg else {
            panic!("expected tool.execute.before");
        };
        assert_eq!(input.tool, "edit");
        assert_eq!(input.model(), Some("anthropic/claude"));
        assert!(input.is_file_edit());
    }

    #[test]
    fn test_parse_tool_after_without_output() {
        let msg: HookMessage =
            serde_json::from_str(r#"{"hook":"tool.execute.after","input":{"tool":"bash"}}"#)
                .unwrap();
        let HookMessage::ToolAfter { input, output } = msg else {
            panic!("expected tool.execute.after");
        };
        assert!(input.is_shell());
        assert_eq!(output.duration, None);
    }

    #[test]
    fn test_parse_tool_after_with_duration() {
        let msg: HookMessage = serde_json::from_str(
            r#"{"hook":"tool.execute.after","input":{"tool":"bash"},"output":{"duration":6000}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            HookMessage::ToolAfter {
                input: ToolInvocation::new("bash"),
                output: ToolOutput::with_duration(6000.0),
            }
        );
    }

    #[test]
    fn test_fractional_and_negative_durations_decode() {
        let after = |output: &str| {
            let line = format!(
                r#"{{"hook":"tool.execute.after","input":{{"tool":"bash"}},"output":{output}}}"#
            );
            match HookMessage::from_json(&line).unwrap() {
                HookMessage::ToolAfter { output, .. } => output.duration,
                other => panic!("expected tool.execute.after, got {other:?}"),
            }
        };

        assert_eq!(after(r#"{"duration":6000.5}"#), Some(6000.5));
        assert_eq!(after(r#"{"duration":-3}"#), Some(-3.0));
        assert_eq!(after(r#"{"duration":"slow"}"#), None);
        assert_eq!(after(r#"{"duration":null}"#), None);
        assert_eq!(after("{}"), None);
    }

    #[test]
    fn test_unknown_hook_is_rejected() {
        let result: Result<HookMessage, _> =
            serde_json::from_str(r#"{"hook":"chat.message","input":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_trims_and_rejects_blank() {
        let msg =
            HookMessage::from_json("  {\"hook\":\"event\",\"event\":{\"type\":\"session.start\"}}\n")
                .unwrap();
        assert_eq!(msg, HookMessage::event(EventKind::SessionStart));

        assert!(matches!(
            HookMessage::from_json(" \n"),
            Err(CoreError::EmptyMessage)
        ));
        assert!(matches!(
            HookMessage::from_json("not json"),
            Err(CoreError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_invocation_without_context_has_no_model() {
        let invocation = ToolInvocation::new("read");
        assert_eq!(invocation.model(), None);
        assert!(!invocation.is_file_edit());
        assert!(!invocation.is_shell());
    }
}
