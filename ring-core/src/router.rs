//! Message Router
//!
//! Übersetzt eingehende Topic/Payload-Paare in Tabellen-Updates.
//! Der Router meldet nie einen Fehler: unbrauchbare Adressen laufen in
//! den Sink-Slot, unbrauchbare Payloads werden ignoriert.

use crate::types::{DirtyFlags, LogicalState, RoutedUpdate, StateTable};

/// Parst die Ziel-Position aus dem letzten `/`-Segment des Topics
///
/// Abonniert wird ein Wildcard-Topic wie `some/thing/#`; die konkrete
/// Nachricht kommt dann auf `some/thing/<position>` an.
fn parse_position(topic: &str) -> Option<usize> {
    topic.rsplit('/').next()?.parse().ok()
}

/// Pure Routing-Funktion: Topic/Payload → (Position, Zustand)
///
/// - Letztes Topic-Segment nicht numerisch oder fehlend → Position 0
/// - Position über dem Outbound-Slot (N/2+1) → auf 0 geklemmt
/// - Payload außerhalb des Sieben-Wort-Vokabulars → `state: None`
pub fn route<const N: usize>(topic: &str, payload: &str) -> RoutedUpdate {
    let mut position = parse_position(topic).unwrap_or(0);
    if position > StateTable::<N>::outbound_slot() {
        position = 0;
    }
    RoutedUpdate {
        position,
        state: LogicalState::parse(payload),
    }
}

/// Wendet geroutete Updates auf die Zustands-Tabelle an
///
/// Hält den einmaligen Restore-Pfad: das allererste Update, das nach
/// dem Boot auf dem Outbound-Slot landet, ist der zurückgespiegelte
/// zuletzt gesendete Zustand (Retain-Schleife des Brokers) und markiert
/// nur die Outbound-Hälfte. Jedes spätere Outbound-Slot-Update ist ein
/// normales Remote-Update und markiert beide Hälften.
pub struct Router {
    restore_pending: bool,
}

impl Router {
    pub const fn new() -> Self {
        Self {
            restore_pending: true,
        }
    }

    /// Mutiert Tabelle und Dirty-Flags gemäß Update
    ///
    /// Gibt `true` zurück wenn ein Zustand übernommen wurde.
    pub fn apply<const N: usize>(
        &mut self,
        table: &mut StateTable<N>,
        flags: &mut DirtyFlags,
        update: RoutedUpdate,
    ) -> bool {
        let Some(state) = update.state else {
            return false;
        };
        table.set(update.position, state);
        if update.position == StateTable::<N>::outbound_slot() {
            if self.restore_pending {
                self.restore_pending = false;
                flags.outbound = true;
            } else {
                flags.inbound = true;
                flags.outbound = true;
            }
        } else {
            flags.inbound = true;
        }
        true
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_comes_from_last_segment() {
        assert_eq!(route::<12>("home/lights/3", "red").position, 3);
        assert_eq!(route::<12>("a/b/c/5", "red").position, 5);
        assert_eq!(route::<12>("7", "red").position, 7);
    }

    #[test]
    fn test_unparseable_topics_hit_the_sink() {
        assert_eq!(route::<12>("home/lights/abc", "red").position, 0);
        assert_eq!(route::<12>("", "red").position, 0);
        assert_eq!(route::<12>("home/lights/", "red").position, 0);
    }

    #[test]
    fn test_positions_past_the_outbound_slot_are_clamped() {
        assert_eq!(route::<12>("home/lights/8", "red").position, 0);
        assert_eq!(route::<12>("home/lights/9999", "red").position, 0);
        assert_eq!(route::<12>("home/lights/7", "red").position, 7);
    }

    #[test]
    fn test_unknown_payload_routes_no_state() {
        assert_eq!(route::<12>("home/lights/3", "pink").state, None);
        assert_eq!(route::<12>("home/lights/3", "RED").state, None);
        assert_eq!(route::<12>("home/lights/3", "").state, None);
    }
}
