// Protokoll-Definitionen des HTTP Portals
// Definiert den JSON-Payload des /status Endpoints

use serde::Serialize;

/// Status-Report des Geräts
///
/// Spiegelt die Kompilier-Zeit-Konfiguration plus die aktuell wirksamen
/// Laufzeit-Einstellungen. Das Portal zeigt diese Werte auf der
/// Status-Seite an.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub device: &'static str,
    pub broker: &'static str,
    pub client_id: &'static str,
    pub topic_send: &'static str,
    pub topic_receive: &'static str,
    pub ring_len: u8,
    pub offset: u8,
    pub brightness: u8,
}
