//! SQLite Event Logger
//!
//! Sessions and their events go to one SQLite database so a shooting session
//! can be analyzed with plain SQL afterwards.

use bevy::prelude::*;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Mutex;

use super::bus::EventBus;
use super::format::serialize_event;
use super::types::GameEvent;
use crate::scoring::Score;
use crate::tuning::ShotTuning;

/// Resource for logging events to SQLite
///
/// The database connection is wrapped in a Mutex so the resource stays `Sync`.
#[derive(Resource)]
pub struct SqliteEventLogger {
    /// `None` when the logger was created disabled
    conn: Option<Mutex<Connection>>,
    session_id: String,
    created_at: String,
    enabled: bool,
}

impl SqliteEventLogger {
    /// Open (or create) the database at `db_path` and start a session
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `session_type` - Type of session (e.g., "game", "simulation")
    /// * `tuning` - Tuning snapshot stored with the session
    pub fn new(
        db_path: &Path,
        session_type: &str,
        tuning: &ShotTuning,
    ) -> Result<Self, rusqlite::Error> {
        if let Some(dir) = db_path.parent() {
            if !dir.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(dir);
            }
        }
        let conn = Connection::open(db_path)?;

        // WAL so analysis queries can read while a session writes
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        Self::from_connection(conn, session_type, tuning)
    }

    fn from_connection(
        conn: Connection,
        session_type: &str,
        tuning: &ShotTuning,
    ) -> Result<Self, rusqlite::Error> {
        init_schema(&conn)?;
        let (session_id, created_at) = create_session(&conn, session_type, tuning)?;
        Ok(Self {
            conn: Some(Mutex::new(conn)),
            session_id,
            created_at,
            enabled: true,
        })
    }

    /// Create a disabled logger (no-op, for testing)
    pub fn disabled() -> Self {
        Self {
            conn: None,
            session_id: String::new(),
            created_at: String::new(),
            enabled: false,
        }
    }

    /// The `SessionStart` event describing this logger's session
    pub fn session_event(&self) -> GameEvent {
        GameEvent::SessionStart {
            session_id: self.session_id.clone(),
            timestamp: self.created_at.clone(),
        }
    }

    /// Log a single event
    pub fn log_event(&self, time_ms: u32, event: &GameEvent) {
        self.log_events(&[(time_ms, event.clone())]);
    }

    /// Log multiple events in one transaction
    pub fn log_events(&self, events: &[(u32, GameEvent)]) {
        if !self.enabled || events.is_empty() {
            return;
        }
        let Some(conn) = self.conn.as_ref().and_then(|c| c.lock().ok()) else {
            return;
        };

        if conn.execute("BEGIN TRANSACTION", []).is_err() {
            return;
        }

        for (time_ms, event) in events {
            let data = serialize_event(*time_ms, event);
            let event_type = event.type_code();

            if let Err(e) = conn.execute(
                "INSERT INTO events (session_id, time_ms, event_type, data) VALUES (?1, ?2, ?3, ?4)",
                params![self.session_id, time_ms, event_type, data],
            ) {
                warn!("Failed to log event: {}", e);
                let _ = conn.execute("ROLLBACK", []);
                return;
            }
        }

        let _ = conn.execute("COMMIT", []);
    }

    /// Record the final per-side totals on the session row
    pub fn finish_session(&self, score: &Score) {
        if !self.enabled {
            return;
        }
        let Some(conn) = self.conn.as_ref().and_then(|c| c.lock().ok()) else {
            return;
        };

        let ended_at = chrono::Utc::now().to_rfc3339();
        let result = conn.execute(
            r#"UPDATE sessions
               SET ended_at = ?1, left_points = ?2, right_points = ?3,
                   left_made = ?4, left_attempted = ?5, right_made = ?6, right_attempted = ?7
               WHERE id = ?8"#,
            params![
                ended_at,
                score.left.points,
                score.right.points,
                score.left.field_goals_made,
                score.left.field_goals_attempted,
                score.right.field_goals_made,
                score.right.field_goals_attempted,
                self.session_id,
            ],
        );

        match result {
            Ok(_) => info!(
                "Ended session {} (points L {} / R {})",
                self.session_id, score.left.points, score.right.points
            ),
            Err(e) => warn!("Failed to finish session: {}", e),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled && self.conn.is_some();
    }

    /// Number of events stored for this session
    pub fn event_count(&self) -> Option<u64> {
        let conn = self.conn.as_ref()?.lock().ok()?;
        conn.query_row(
            "SELECT COUNT(*) FROM events WHERE session_id = ?1",
            params![self.session_id],
            |row| row.get(0),
        )
        .ok()
    }
}

/// Initialize the database schema
fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            session_type TEXT NOT NULL,
            config_json TEXT,
            ended_at TEXT,
            left_points INTEGER NOT NULL DEFAULT 0,
            right_points INTEGER NOT NULL DEFAULT 0,
            left_made INTEGER NOT NULL DEFAULT 0,
            left_attempted INTEGER NOT NULL DEFAULT 0,
            right_made INTEGER NOT NULL DEFAULT 0,
            right_attempted INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY,
            session_id TEXT REFERENCES sessions(id),
            time_ms INTEGER NOT NULL,
            event_type TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_events_session ON events(session_id);
        CREATE INDEX IF NOT EXISTS idx_events_type ON events(event_type);
        "#,
    )?;
    Ok(())
}

/// Create a new session and return its ID and creation timestamp
fn create_session(
    conn: &Connection,
    session_type: &str,
    tuning: &ShotTuning,
) -> Result<(String, String), rusqlite::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = chrono::Utc::now().to_rfc3339();
    let config_json = serde_json::to_string(tuning).ok();

    conn.execute(
        "INSERT INTO sessions (id, created_at, session_type, config_json) VALUES (?1, ?2, ?3, ?4)",
        params![id, created_at, session_type, config_json],
    )?;

    Ok((id, created_at))
}

/// System to flush EventBus events to SQLite.
///
/// Runs after the HUD has read the frame's events; processed events are
/// persisted and then cleared.
pub fn flush_events_to_sqlite(
    mut event_bus: ResMut<EventBus>,
    logger: Option<Res<SqliteEventLogger>>,
) {
    let Some(logger) = logger else {
        event_bus.clear_processed();
        return;
    };

    let events: Vec<(u32, GameEvent)> = event_bus
        .processed()
        .iter()
        .map(|e| (e.time_ms, e.event.clone()))
        .collect();
    logger.log_events(&events);
    event_bus.clear_processed();
}
