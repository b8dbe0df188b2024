//! Level lifecycle notifications
//!
//! The generator announces what it is doing; subscribers decide what to do
//! with it (message log, analytics, tests).

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::world::Theme;

/// Something that happened while building a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LevelEvent {
    /// Generation began for a level
    GenerationStarted {
        level: u32,
        seed: u64,
    },
    /// A hand-authored boss layout was adopted
    BossLayoutAdopted {
        level: u32,
        boss: Option<String>,
    },
    /// The boss layout could not be used; the level was generated procedurally
    BossLayoutFallback {
        level: u32,
        reason: String,
    },
    /// Extra corridors were forced so every room is reachable from the entrance
    ConnectivityRepaired {
        level: u32,
        forced_connections: usize,
    },
    /// The level is complete and about to be handed to the caller
    LevelGenerated {
        level: u32,
        theme: Theme,
        rooms: usize,
        monsters: usize,
        items: usize,
    },
}

/// Receives level lifecycle events
pub trait LevelObserver: Send + Sync {
    fn on_event(&self, event: &LevelEvent);
}

/// Observer that records every event it sees
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<LevelEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<LevelEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<LevelEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl LevelObserver for EventLog {
    fn on_event(&self, event: &LevelEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Observer that forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LevelObserver for LogObserver {
    fn on_event(&self, event: &LevelEvent) {
        match event {
            LevelEvent::BossLayoutFallback { level, reason } => {
                log::warn!("Level {}: boss layout unavailable ({})", level, reason)
            }
            LevelEvent::LevelGenerated { level, theme, rooms, monsters, items } => log::info!(
                "Level {} ({}) ready: {} rooms, {} monsters, {} items",
                level,
                theme.name(),
                rooms,
                monsters,
                items
            ),
            other => log::debug!("{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_records_and_drains() {
        let log = EventLog::new();
        assert!(log.is_empty());

        log.on_event(&LevelEvent::GenerationStarted { level: 3, seed: 9 });
        log.on_event(&LevelEvent::ConnectivityRepaired { level: 3, forced_connections: 1 });
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0], LevelEvent::GenerationStarted { level: 3, seed: 9 });

        let drained = log.take();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }
}
