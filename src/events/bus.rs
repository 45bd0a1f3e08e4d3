//! Event Bus - where the shot engine reports what happened
//!
//! The game controller emits events while it applies commands and steps the
//! ball; the HUD, the SQLite logger and the scenario runner consume them.

use bevy::prelude::*;

use super::format::serialize_event;
use super::types::GameEvent;

/// Timestamped event for the event bus
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Time in milliseconds since session start
    pub time_ms: u32,
    /// The event data
    pub event: GameEvent,
}

/// Central event bus
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted this frame, waiting to be consumed
    pending: Vec<BusEvent>,

    /// Events that have been consumed (for logging)
    processed: Vec<BusEvent>,

    /// Current elapsed time in milliseconds (for timestamping)
    elapsed_ms: u32,

    /// Whether the bus is enabled (for simulation sweeps)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.clone());
        events
    }

    /// Get all processed events (for logging)
    pub fn processed(&self) -> &[BusEvent] {
        &self.processed
    }

    /// Clear processed events (after logging to DB)
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

/// Consume the frame's events, writing each as a compact log line.
/// They stay in `processed` until the SQLite flush clears them.
pub fn trace_bus_events(mut bus: ResMut<EventBus>) {
    for bus_event in bus.drain() {
        debug!("{}", serialize_event(bus_event.time_ms, &bus_event.event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Basket;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.update_time(1.5);

        bus.emit(GameEvent::ShotAttempted {
            side: Basket::Right,
            power: 55,
            three_point: false,
        });

        assert_eq!(bus.pending_count(), 1);
        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_ms, 1500);
        assert_eq!(bus.pending_count(), 0);
        assert_eq!(bus.processed().len(), 1);

        bus.clear_processed();
        assert!(bus.processed().is_empty());
    }

    #[test]
    fn test_disabled_bus() {
        let mut bus = EventBus::disabled();
        bus.emit(GameEvent::BallReset);
        assert_eq!(bus.pending_count(), 0);
        assert!(!bus.is_enabled());
    }

    #[test]
    fn test_peek_keeps_emission_order() {
        let mut bus = EventBus::new();
        bus.emit(GameEvent::PowerChanged { power: 55 });
        bus.emit(GameEvent::ShotMissed);
        let codes: Vec<_> = bus.peek().iter().map(|e| e.event.type_code()).collect();
        assert_eq!(codes, vec!["PW", "SX"]);
        assert_eq!(bus.pending_count(), 2);
    }
}
