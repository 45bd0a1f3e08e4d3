//! Game event logging system
//!
//! Provides the event bus the shot engine reports into, a compact text
//! format for events, and SQLite persistence for sessions.

mod bus;
mod format;
mod sqlite_logger;
mod types;

pub use bus::{BusEvent, EventBus, trace_bus_events, update_event_bus_time};
pub use format::{parse_event, serialize_event};
pub use sqlite_logger::{SqliteEventLogger, flush_events_to_sqlite};
pub use types::GameEvent;
