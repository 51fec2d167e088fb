//! Integration tests for session state and status rendering.

use chrono::{TimeZone, Utc};
use hookbar_core::{SessionState, StatusLine, UsageSnapshot};

#[test]
fn test_session_lifecycle_renders_expected_lines() {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let mut state = SessionState::new(start);

    state.record_tool_start(Some("openai/gpt-4o"));
    state.record_tool_start(None);
    state.record_tool_start(None);
    state.apply_snapshot(UsageSnapshot::new(0.042, 3));
    assert_eq!(
        StatusLine::from_state(&state).render(),
        "📊 openai | openai/gpt-4o | Requests: 3 | Tokens: 3 | Cost: $0.0420"
    );

    state.reset(start);
    assert_eq!(
        StatusLine::from_state(&state).render(),
        "📊 Unknown | Unknown | Requests: 0 | Tokens: 0 | Cost: $0.0000"
    );
}

#[test]
fn test_session_state_serialization_roundtrip() {
    let mut state = SessionState::new(Utc::now());
    state.record_tool_start(Some("anthropic/claude-opus-4"));
    let json = serde_json::to_string(&state).unwrap();
    let parsed: SessionState = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, state);
    assert_eq!(parsed.provider(), Some("anthropic"));
}
