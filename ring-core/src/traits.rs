//! Hardware Abstraction Traits
//!
//! Schnittstelle zum Pixel-Strip ohne konkrete Implementierung.

use rgb::RGB8;

/// Fehler-Typ für Strip-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedError::WriteFailed => defmt::write!(fmt, "write failed"),
        }
    }
}

/// Trait für den Frame-Push auf den Pixel-Strip
///
/// Ein Aufruf überträgt immer den kompletten Frame in einem Stück;
/// Teil-Frames gibt es nicht. Die Helligkeit wird erst an dieser Naht
/// angewendet, der Puffer selbst bleibt ungedimmt.
///
/// # Implementierungen
/// - **Production:** RmtRingWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockRingWriter (in-memory Mock)
pub trait RingWriter: Send {
    /// Überträgt den Frame auf die Hardware
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn der Hardware-Zugriff
    /// fehlschlägt.
    fn write_frame(&mut self, frame: &[RGB8], brightness: u8) -> Result<(), LedError>;
}
