//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose roadmap session operations to Dart via FRB.
//! - Keep sessions alive between UI events in a process-wide registry.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Views cross the boundary as JSON strings inside response envelopes.
//! - Each call locks the registry for one synchronous operation only.

use log::info;
use roadmap_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    RoadmapSession,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

static SESSIONS: OnceLock<Mutex<HashMap<Uuid, RoadmapSession>>> = OnceLock::new();

/// Encoded payload plus success message, or a failure message.
type SessionCallResult = Result<(Result<String, String>, &'static str), String>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Response envelope shared by all roadmap calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Session id the call addressed (or created).
    pub session_id: Option<String>,
    /// JSON payload: a view, the canonical record, or empty.
    pub payload: String,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl RoadmapResponse {
    fn success(session_id: Uuid, payload: String, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            session_id: Some(session_id.to_string()),
            payload,
            message: message.into(),
        }
    }

    fn failure(session_id: Option<Uuid>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            session_id: session_id.map(|id| id.to_string()),
            payload: String::new(),
            message: message.into(),
        }
    }
}

/// Opens a session from a parse-contract JSON payload.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Returns the new session id and the accepted canonical record as JSON.
/// - Schema/upstream failures return `ok=false` and register nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_open(payload: String) -> RoadmapResponse {
    let mut session = RoadmapSession::new();
    let session_id = session.id();
    let record = match session
        .load_json(payload.as_str())
        .map_err(|err| format!("roadmap_open failed: {err}"))
        .and_then(to_json)
    {
        Ok(record) => record,
        Err(message) => return RoadmapResponse::failure(None, message),
    };

    match with_sessions(|sessions| {
        sessions.insert(session_id, session);
        sessions.len()
    }) {
        Ok(open_sessions) => {
            info!(
                "event=session_open module=ffi status=ok session={} open_sessions={}",
                session_id, open_sessions
            );
            RoadmapResponse::success(session_id, record, "Roadmap loaded.")
        }
        Err(message) => RoadmapResponse::failure(None, message),
    }
}

/// Inline task edit callback.
///
/// Negative indexes behave like any other out-of-range index: the write is
/// dropped. Returns the updated canonical record.
///
/// # FFI contract
/// - Never panics.
/// - Dropped writes still report `ok=true`; `message` says the edit was dropped.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_edit_task(
    session_id: String,
    timeframe_id: String,
    pillar_id: String,
    task_index: i64,
    new_text: String,
) -> RoadmapResponse {
    let task_index = usize::try_from(task_index).unwrap_or(usize::MAX);
    with_session(&session_id, |session| {
        let outcome = session.on_edit(&timeframe_id, &pillar_id, task_index, &new_text);
        let message = if outcome.is_applied() {
            "Edit applied."
        } else {
            "Edit dropped: address no longer matches the roadmap."
        };
        session
            .current()
            .map(|data| (to_json(data), message))
            .ok_or_else(|| "session has no roadmap".to_string())
    })
}

/// Pillar-major view of a session as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_pillar_view(session_id: String) -> RoadmapResponse {
    with_session(&session_id, |session| {
        session
            .pillar_view()
            .map(|view| (to_json(&view), "Pillar view ready."))
            .ok_or_else(|| "session has no roadmap".to_string())
    })
}

/// Timeframe-major view of a session as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_timeline_view(session_id: String) -> RoadmapResponse {
    with_session(&session_id, |session| {
        session
            .timeline_view()
            .map(|view| (to_json(&view), "Timeline view ready."))
            .ok_or_else(|| "session has no roadmap".to_string())
    })
}

/// Image-generation prompt for a session, returned verbatim in `payload`.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_image_prompt(session_id: String) -> RoadmapResponse {
    with_session(&session_id, |session| {
        session
            .image_prompt()
            .map(|prompt| (Ok(prompt), "Prompt ready."))
            .ok_or_else(|| "session has no roadmap".to_string())
    })
}

/// Drops a session. Unknown ids are reported, not treated as fatal.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_close(session_id: String) -> RoadmapResponse {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(message) => return RoadmapResponse::failure(None, message),
    };
    match with_sessions(|sessions| sessions.remove(&id)) {
        Ok(Some(_)) => {
            info!("event=session_close module=ffi status=ok session={}", id);
            RoadmapResponse::success(id, String::new(), "Session closed.")
        }
        Ok(None) => RoadmapResponse::failure(Some(id), format!("session not found: {id}")),
        Err(message) => RoadmapResponse::failure(Some(id), message),
    }
}

fn with_sessions<T>(
    f: impl FnOnce(&mut HashMap<Uuid, RoadmapSession>) -> T,
) -> Result<T, String> {
    let registry = SESSIONS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut sessions = registry
        .lock()
        .map_err(|_| "session registry is poisoned".to_string())?;
    Ok(f(&mut sessions))
}

fn with_session(
    session_id: &str,
    f: impl FnOnce(&mut RoadmapSession) -> SessionCallResult,
) -> RoadmapResponse {
    let id = match parse_session_id(session_id) {
        Ok(id) => id,
        Err(message) => return RoadmapResponse::failure(None, message),
    };
    let result = with_sessions(|sessions| match sessions.get_mut(&id) {
        Some(session) => f(session),
        None => Err(format!("session not found: {id}")),
    });
    match result {
        Ok(Ok((Ok(payload), message))) => RoadmapResponse::success(id, payload, message),
        Ok(Ok((Err(message), _))) | Ok(Err(message)) | Err(message) => {
            RoadmapResponse::failure(Some(id), message)
        }
    }
}

fn parse_session_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid session id `{raw}`: {err}"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| format!("failed to encode payload: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, roadmap_close, roadmap_edit_task, roadmap_image_prompt,
        roadmap_open, roadmap_pillar_view, roadmap_timeline_view,
    };
    use serde_json::Value;

    const PAYLOAD: &str = r#"{
      "title": "Roadmap", "subtitle": "FY25",
      "pillars": [{"id": "p1", "name": "Growth"}, {"id": "p2", "name": "Platform"}],
      "timeframes": [{"id": "t1", "date": "2025 - Q1", "name": "Start",
                      "deliverables": [{"pillarId": "p1", "tasks": ["A", "B"]}]}]
    }"#;

    fn open_session() -> String {
        let response = roadmap_open(PAYLOAD.to_string());
        assert!(response.ok, "{}", response.message);
        response.session_id.expect("open should return session id")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn open_rejects_schema_violation() {
        let response = roadmap_open(r#"{"pillars": []}"#.to_string());
        assert!(!response.ok);
        assert!(response.session_id.is_none());
        assert!(response.message.contains("timeframes"));
    }

    #[test]
    fn open_returns_canonical_record() {
        let response = roadmap_open(PAYLOAD.to_string());
        let record: Value = serde_json::from_str(&response.payload).expect("record json");
        assert_eq!(record["timeframes"][0]["deliverables"][0]["pillarId"], "p1");
    }

    #[test]
    fn edit_updates_both_views() {
        let session_id = open_session();
        let edited = roadmap_edit_task(
            session_id.clone(),
            "t1".to_string(),
            "p1".to_string(),
            0,
            "A (done)".to_string(),
        );
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.message, "Edit applied.");

        let pillars: Value =
            serde_json::from_str(&roadmap_pillar_view(session_id.clone()).payload).unwrap();
        assert_eq!(pillars["lanes"][0]["blocks"][0]["tasks"][0], "A (done)");
        assert_eq!(pillars["lanes"][0]["color"]["hex"], "#3B82F6");

        let timeline: Value =
            serde_json::from_str(&roadmap_timeline_view(session_id.clone()).payload).unwrap();
        assert_eq!(timeline["columns"][0]["entries"][0]["tasks"][0], "A (done)");
        assert_eq!(timeline["layout"]["column_count"], 1);

        let prompt = roadmap_image_prompt(session_id);
        assert!(prompt.payload.contains("  - A (done)"));
    }

    #[test]
    fn negative_index_is_dropped() {
        let session_id = open_session();
        let response = roadmap_edit_task(
            session_id,
            "t1".to_string(),
            "p1".to_string(),
            -1,
            "x".to_string(),
        );
        assert!(response.ok);
        assert!(response.message.starts_with("Edit dropped"));
        assert!(!response.payload.contains("\"x\""));
    }

    #[test]
    fn unknown_and_invalid_sessions_fail_softly() {
        let invalid = roadmap_pillar_view("not-a-uuid".to_string());
        assert!(!invalid.ok);
        assert!(invalid.message.contains("invalid session id"));

        let unknown = roadmap_timeline_view(uuid::Uuid::new_v4().to_string());
        assert!(!unknown.ok);
        assert!(unknown.message.contains("session not found"));
    }

    #[test]
    fn close_removes_session() {
        let session_id = open_session();
        assert!(roadmap_close(session_id.clone()).ok);
        assert!(!roadmap_close(session_id.clone()).ok);
        assert!(!roadmap_pillar_view(session_id).ok);
    }
}
