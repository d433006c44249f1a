//! Renderer
//!
//! Bildet die Zustands-Tabelle auf physikalische Pixel ab. Der Puffer
//! ist persistent: jede Neuzeichnung betrifft nur ihre Hälfte, gepusht
//! wird immer der komplette Frame.

use rgb::RGB8;

use crate::types::LogicalState;

/// Rotations-Offset anwenden: logischer 0-basierter Index → Pixel-Index
///
/// `physical = (logical + offset) mod N`. Der Offset kommt aus der
/// Konfiguration und liegt in 0..N-1.
pub fn map_physical<const N: usize>(logical: usize, offset: u8) -> usize {
    (logical + offset as usize) % N
}

/// Persistenter Frame-Puffer des Rings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer<const N: usize> {
    pixels: [RGB8; N],
}

impl<const N: usize> FrameBuffer<N> {
    pub const fn new() -> Self {
        Self {
            pixels: [RGB8 { r: 0, g: 0, b: 0 }; N],
        }
    }

    /// Kompletter Frame für den Hardware-Push
    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    /// Zeichnet die Inbound-Hälfte neu (logische Positionen 1..N/2)
    ///
    /// Alle Inbound-Pixel zeigen einheitlich den Zustand von logischer
    /// Position 1 - die Hälfte spiegelt den zuletzt auf Position 1
    /// empfangenen Status, einzeln durch den Offset rotiert.
    pub fn paint_inbound(&mut self, state: LogicalState, offset: u8) {
        let rgb = state.rgb();
        for logical in 0..N / 2 {
            self.pixels[map_physical::<N>(logical, offset)] = rgb;
        }
    }

    /// Zeichnet die Outbound-Hälfte neu (logische Positionen N/2+1..N)
    pub fn paint_outbound(&mut self, state: LogicalState, offset: u8) {
        let rgb = state.rgb();
        for logical in N / 2..N {
            self.pixels[map_physical::<N>(logical, offset)] = rgb;
        }
    }

    /// Kalibrier-Anzeige zum Prüfen des Offsets
    ///
    /// Alle Pixel blau, das physikalische Pixel 0 rot, das durch den
    /// Offset rotierte Pixel 0 grün. Das grüne Pixel muss dort sitzen,
    /// wo der Betrachter "Position 1" erwartet; bei Offset 0 gewinnt
    /// grün über rot (Zeichen-Reihenfolge).
    pub fn paint_calibration(&mut self, offset: u8) {
        let blue = LogicalState::Blue.rgb();
        for pixel in self.pixels.iter_mut() {
            *pixel = blue;
        }
        self.pixels[0] = LogicalState::Red.rgb();
        self.pixels[map_physical::<N>(0, offset)] = LogicalState::Green.rgb();
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
