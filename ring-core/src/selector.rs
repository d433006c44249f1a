//! Lokale Farbauswahl
//!
//! Verarbeitet entprellte Tasten-Events auf dem Outbound-Slot.

use crate::types::{DirtyFlags, StateTable};

/// Farbwahl-Taste: schaltet den Outbound-Slot zyklisch weiter
/// (Off → Green → Red → Yellow → Purple → Blue → White → Off)
pub fn on_color_event<const N: usize>(table: &mut StateTable<N>, flags: &mut DirtyFlags) {
    table.set_outbound(table.outbound_state().next());
    flags.outbound = true;
}

/// Muster-Taste: sendet den aktuell gewählten Zustand erneut
///
/// Kein Zustandswechsel, nur das Outbound-Dirty-Flag wird gesetzt.
pub fn on_pattern_event(flags: &mut DirtyFlags) {
    flags.outbound = true;
}
