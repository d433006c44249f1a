//! Tasten-Entprellung
//!
//! Wandelt rohe Interrupt-Flanken in entprellte logische Events um.
//! Pro Taste existiert genau ein `EdgeLatch`: Single-Producer
//! (Flanken-Kontext) / Single-Consumer (Control-Loop), ohne Lock.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::types::{ButtonEvent, ButtonSource};

/// Ruhe-Fenster nach der letzten Flanke, bevor ein Event auftaucht
pub const DEBOUNCE_MS: u32 = 200;

/// Atomarer Flanken-Speicher einer einzelnen Taste
///
/// `record_edge` darf aus Interrupt-Kontext aufgerufen werden: nur zwei
/// atomare Stores, kein Blockieren, keine Allokation, kein Zugriff auf
/// Tabelle, Netzwerk oder Render-Puffer. `poll` läuft ausschließlich im
/// Control-Loop.
///
/// Es ist höchstens ein Event pro Taste anhängig: Flanken innerhalb des
/// Ruhe-Fensters frischen nur den Zeitstempel auf, es entsteht keine
/// Warteschlange.
pub struct EdgeLatch {
    pending: AtomicBool,
    last_edge_ms: AtomicU32,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            last_edge_ms: AtomicU32::new(0),
        }
    }

    /// Registriert eine rohe Flanke (Interrupt-Kontext-sicher)
    pub fn record_edge(&self, now_ms: u32) {
        self.last_edge_ms.store(now_ms, Ordering::Relaxed);
        self.pending.store(true, Ordering::Release);
    }

    /// Liefert `Some(zeitstempel)` sobald seit der letzten Flanke
    /// mindestens [`DEBOUNCE_MS`] Ruhe herrschte
    ///
    /// Das Pending-Flag wird erst gelöscht, wenn das Event tatsächlich
    /// ausgeliefert wird. Trifft zwischen Prüfung und Löschen eine neue
    /// Flanke ein (erkennbar am geänderten Zeitstempel), wird das Flag
    /// wieder gesetzt und nichts ausgeliefert - die Flanke geht nicht
    /// verloren, ihr Fenster läuft neu an.
    pub fn poll(&self, now_ms: u32) -> Option<u32> {
        if !self.pending.load(Ordering::Acquire) {
            return None;
        }
        let edge_ms = self.last_edge_ms.load(Ordering::Acquire);
        if now_ms.wrapping_sub(edge_ms) < DEBOUNCE_MS {
            return None;
        }
        self.pending.store(false, Ordering::Release);
        if self.last_edge_ms.load(Ordering::Acquire) != edge_ms {
            self.pending.store(true, Ordering::Release);
            return None;
        }
        Some(edge_ms)
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Die beiden unabhängig entprellten Tasten des Geräts
pub struct ButtonLatches {
    pub color: EdgeLatch,
    pub pattern: EdgeLatch,
}

impl ButtonLatches {
    pub const fn new() -> Self {
        Self {
            color: EdgeLatch::new(),
            pattern: EdgeLatch::new(),
        }
    }

    /// Holt höchstens ein fälliges Event ab (Color vor Pattern)
    pub fn poll_pending(&self, now_ms: u32) -> Option<ButtonEvent> {
        if let Some(timestamp_ms) = self.color.poll(now_ms) {
            return Some(ButtonEvent {
                source: ButtonSource::Color,
                timestamp_ms,
            });
        }
        if let Some(timestamp_ms) = self.pattern.poll(now_ms) {
            return Some(ButtonEvent {
                source: ButtonSource::Pattern,
                timestamp_ms,
            });
        }
        None
    }
}

impl Default for ButtonLatches {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_only_after_quiescence() {
        let latch = EdgeLatch::new();
        latch.record_edge(0);
        assert_eq!(latch.poll(100), None);
        assert_eq!(latch.poll(199), None);
        assert_eq!(latch.poll(200), Some(0));
    }

    #[test]
    fn test_edge_inside_window_refreshes_timestamp() {
        let latch = EdgeLatch::new();
        latch.record_edge(0);
        latch.record_edge(150);
        assert_eq!(latch.poll(300), None);
        assert_eq!(latch.poll(350), Some(150));
    }

    #[test]
    fn test_single_pending_event() {
        let latch = EdgeLatch::new();
        latch.record_edge(0);
        assert_eq!(latch.poll(250), Some(0));
        assert_eq!(latch.poll(260), None);
    }

    #[test]
    fn test_wrapping_timestamps() {
        let latch = EdgeLatch::new();
        latch.record_edge(u32::MAX - 50);
        assert_eq!(latch.poll(u32::MAX), None);
        assert_eq!(latch.poll(150), Some(u32::MAX - 50));
    }

    #[test]
    fn test_sources_are_independent() {
        let latches = ButtonLatches::new();
        latches.color.record_edge(0);
        latches.pattern.record_edge(100);
        let first = latches.poll_pending(300).unwrap();
        assert_eq!(first.source, ButtonSource::Color);
        let second = latches.poll_pending(300).unwrap();
        assert_eq!(second.source, ButtonSource::Pattern);
        assert_eq!(latches.poll_pending(300), None);
    }
}
