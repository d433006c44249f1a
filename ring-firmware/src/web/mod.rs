// Web-Modul für das HTTP Portal
// Organisiert Status-Seite und Protokoll-Strukturen

pub mod protocol;

// HTML-Datei zur Compile-Zeit einbinden
// Die Datei wird direkt ins Binary eingebettet
pub const INDEX_HTML: &str = include_str!("index.html");
