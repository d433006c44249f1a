//! Core Types für den Signal-Ring
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

/// Logischer Anzeige-Zustand eines Slots
///
/// Geschlossenes Vokabular: die sieben Wire-Wörter des Protokolls.
/// Die Reihenfolge der Varianten definiert die Zyklus-Ordnung der
/// lokalen Farbauswahl (Off → Green → ... → White → Off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogicalState {
    #[default]
    Off,
    Green,
    Red,
    Yellow,
    Purple,
    Blue,
    White,
}

impl LogicalState {
    /// Parst ein Payload-Wort (case-sensitiv, ASCII)
    ///
    /// Alles außerhalb des Sieben-Wort-Vokabulars ergibt `None` -
    /// der Aufrufer verwirft solche Payloads kommentarlos.
    pub fn parse(payload: &str) -> Option<Self> {
        match payload {
            "off" => Some(Self::Off),
            "green" => Some(Self::Green),
            "red" => Some(Self::Red),
            "yellow" => Some(Self::Yellow),
            "purple" => Some(Self::Purple),
            "blue" => Some(Self::Blue),
            "white" => Some(Self::White),
            _ => None,
        }
    }

    /// Wire-Wort dieses Zustands (identisch zum Parse-Vokabular)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Green => "green",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::White => "white",
        }
    }

    /// Feste RGB-Zuordnung des Zustands
    pub const fn rgb(self) -> RGB8 {
        match self {
            Self::Off => RGB8 { r: 0, g: 0, b: 0 },
            Self::Green => RGB8 { r: 0, g: 255, b: 0 },
            Self::Red => RGB8 { r: 255, g: 0, b: 0 },
            Self::Yellow => RGB8 { r: 128, g: 128, b: 0 },
            Self::Purple => RGB8 { r: 128, g: 0, b: 128 },
            Self::Blue => RGB8 { r: 0, g: 0, b: 255 },
            Self::White => RGB8 { r: 200, g: 200, b: 200 },
        }
    }

    /// Nächster Zustand in Zyklus-Ordnung (White springt zurück auf Off)
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Green,
            Self::Green => Self::Red,
            Self::Red => Self::Yellow,
            Self::Yellow => Self::Purple,
            Self::Purple => Self::Blue,
            Self::Blue => Self::White,
            Self::White => Self::Off,
        }
    }
}

/// Quelle eines Tastendrucks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSource {
    /// Farbwahl-Taste (zyklisch weiterschalten)
    Color,
    /// Muster-Taste (erneut senden ohne Zustandswechsel)
    Pattern,
}

/// Entprelltes logisches Tasten-Event
///
/// Transient: wird von der Entprellung erzeugt, genau einmal vom
/// Dispatcher konsumiert und dann verworfen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub source: ButtonSource,
    /// Zeitstempel der letzten Flanke in Millisekunden (wrapping)
    pub timestamp_ms: u32,
}

/// Dirty-Marker für die beiden Display-Hälften
///
/// `inbound` deckt die logischen Positionen 1..N/2 ab, `outbound` die
/// Positionen N/2+1..N. Beide Hälften können unabhängig dirty sein.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags {
    pub inbound: bool,
    pub outbound: bool,
}

impl DirtyFlags {
    pub const fn new() -> Self {
        Self {
            inbound: false,
            outbound: false,
        }
    }

    pub fn any(self) -> bool {
        self.inbound || self.outbound
    }

    pub fn clear(&mut self) {
        self.inbound = false;
        self.outbound = false;
    }
}

/// Ergebnis des Topic-Routings: Ziel-Position plus geparster Zustand
///
/// `state == None` heißt: Payload außerhalb des Vokabulars, es wird
/// nichts mutiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutedUpdate {
    pub position: usize,
    pub state: Option<LogicalState>,
}

/// Zustands-Tabelle des Rings: logische Position → LogicalState
///
/// Layout (N = physikalische Pixel-Anzahl, gerade):
/// - Position 0 ist der Verwurf-Slot ("Sink"): unparsbare oder
///   außerhalb liegende Adressen landen hier und werden nie gerendert
/// - Positionen 1..N/2 sind die Inbound-Hälfte (remote-gesteuert)
/// - Position N/2+1 ist der einzige Outbound-Slot (lokal gewählt,
///   dient nach einem Neustart auch als Restore-Ziel)
/// - Positionen darüber sind reserviert
///
/// Die Tabelle lebt ausschließlich im RAM und wird nur vom Control-Loop
/// mutiert; alle Slots starten mit `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTable<const N: usize> {
    slots: [LogicalState; N],
    sink: LogicalState,
}

impl<const N: usize> StateTable<N> {
    /// Index des Outbound-Slots (bei N=12: Position 7)
    pub const fn outbound_slot() -> usize {
        N / 2 + 1
    }

    pub const fn new() -> Self {
        Self {
            slots: [LogicalState::Off; N],
            sink: LogicalState::Off,
        }
    }

    /// Liest den Zustand einer logischen Position
    ///
    /// Position 0 und alles außerhalb 1..=N liest den Sink-Slot.
    pub fn get(&self, position: usize) -> LogicalState {
        if position == 0 || position > N {
            self.sink
        } else {
            self.slots[position - 1]
        }
    }

    /// Schreibt den Zustand einer logischen Position
    ///
    /// Position 0 und alles außerhalb 1..=N schreibt den Sink-Slot.
    pub fn set(&mut self, position: usize, state: LogicalState) {
        if position == 0 || position > N {
            self.sink = state;
        } else {
            self.slots[position - 1] = state;
        }
    }

    /// Zustand der Inbound-Anzeige: die gesamte Hälfte spiegelt
    /// Position 1 (gewollte Vereinfachung, siehe Renderer)
    pub fn inbound_state(&self) -> LogicalState {
        self.get(1)
    }

    /// Aktuell gewählter Outbound-Zustand
    pub fn outbound_state(&self) -> LogicalState {
        self.get(Self::outbound_slot())
    }

    pub fn set_outbound(&mut self, state: LogicalState) {
        self.set(Self::outbound_slot(), state);
    }
}

impl<const N: usize> Default for StateTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for LogicalState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ButtonSource {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ButtonSource::Color => defmt::write!(fmt, "color"),
            ButtonSource::Pattern => defmt::write!(fmt, "pattern"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ButtonEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ButtonEvent {{ {} @ {}ms }}", self.source, self.timestamp_ms)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RoutedUpdate {
    fn format(&self, fmt: defmt::Formatter) {
        match self.state {
            Some(state) => defmt::write!(fmt, "pos {} -> {}", self.position, state),
            None => defmt::write!(fmt, "pos {} -> <ignored>", self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(LogicalState::parse("green"), Some(LogicalState::Green));
        assert_eq!(LogicalState::parse("Green"), None);
        assert_eq!(LogicalState::parse("GREEN"), None);
    }

    #[test]
    fn test_parse_round_trips_through_as_str() {
        for state in [
            LogicalState::Off,
            LogicalState::Green,
            LogicalState::Red,
            LogicalState::Yellow,
            LogicalState::Purple,
            LogicalState::Blue,
            LogicalState::White,
        ] {
            assert_eq!(LogicalState::parse(state.as_str()), Some(state));
        }
    }

    #[test]
    fn test_table_boots_all_off() {
        let table = StateTable::<12>::new();
        for position in 0..=12 {
            assert_eq!(table.get(position), LogicalState::Off);
        }
    }

    #[test]
    fn test_out_of_range_positions_share_the_sink() {
        let mut table = StateTable::<12>::new();
        table.set(0, LogicalState::Red);
        assert_eq!(table.get(0), LogicalState::Red);
        assert_eq!(table.get(13), LogicalState::Red);
        assert_eq!(table.get(1), LogicalState::Off);
    }

    #[test]
    fn test_outbound_slot_index() {
        assert_eq!(StateTable::<12>::outbound_slot(), 7);
        assert_eq!(StateTable::<8>::outbound_slot(), 5);
    }
}
