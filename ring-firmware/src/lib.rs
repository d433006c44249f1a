// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Heap Allocator (picoserve Response-Bodies nutzen alloc-Strings)
extern crate alloc;

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von ring-core
pub use ring_core::{
    ButtonEvent, ButtonLatches, ButtonSource, DirtyFlags, FrameBuffer, LedError, LogicalState,
    RingWriter, RoutedUpdate, Router, StateTable,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

use crate::config::{RING_BRIGHTNESS_DEFAULT, RING_OFFSET_DEFAULT};

/// Laufzeit-Einstellungen des Rings
///
/// Offset und Helligkeit starten mit den Defaults aus `config.rs` und
/// werden nach einem Konfigurations-Event vom Portal neu gelesen.
/// Dauerhafte Speicherung liegt bei der externen Konfigurations-Schicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct RingSettings {
    /// Rotations-Offset in 0..RING_LEN-1
    pub offset: u8,
    /// Helligkeit in 5..=200
    pub brightness: u8,
}

impl RingSettings {
    pub const fn defaults() -> Self {
        Self {
            offset: RING_OFFSET_DEFAULT,
            brightness: RING_BRIGHTNESS_DEFAULT,
        }
    }
}

impl Default for RingSettings {
    fn default() -> Self {
        Self::defaults()
    }
}

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Diese Type-Aliase vereinfachen die Lesbarkeit der Funktionssignaturen.
// Statt:  Receiver<'static, NoopRawMutex, RoutedUpdate, 8>
// Nutze:  InboundReceiver

/// Channel für geroutete Inbound-Updates (Link → Control-Loop)
/// - 8: Nachrichten-Kapazität (Broker-Bursts nach dem Subscribe)
pub type InboundChannel = Channel<NoopRawMutex, RoutedUpdate, 8>;

/// Sender für Inbound-Updates (Link-Task schreibt)
pub type InboundSender = Sender<'static, NoopRawMutex, RoutedUpdate, 8>;

/// Receiver für Inbound-Updates (Control-Loop liest non-blocking)
pub type InboundReceiver = Receiver<'static, NoopRawMutex, RoutedUpdate, 8>;

/// PubSubChannel für Outbound-Meldungen (Control-Loop → Link)
///
/// `publish_immediate` verdrängt bei vollem Queue die älteste Meldung:
/// während eines Link-Ausfalls überlebt nur der letzte gewählte
/// Zustand und geht nach dem Reconnect genau einmal raus.
/// - 2: Nachrichten-Kapazität im Queue
/// - 2: Maximale Anzahl Subscribers (Link + Reserve)
/// - 1: Publisher (nur der Control-Loop)
pub type OutboundChannel = PubSubChannel<NoopRawMutex, LogicalState, 2, 2, 1>;

/// Publisher für Outbound-Meldungen
pub type OutboundPublisher = Publisher<'static, NoopRawMutex, LogicalState, 2, 2, 1>;

/// Subscriber für Outbound-Meldungen
pub type OutboundSubscriber = Subscriber<'static, NoopRawMutex, LogicalState, 2, 2, 1>;

/// Channel für Konfigurations-Events (Portal → Control-Loop)
/// - 1: Nachrichten-Kapazität (ein Save löst ohnehin einen Neustart aus)
pub type SettingsChannel = Channel<NoopRawMutex, RingSettings, 1>;

/// Sender für Konfigurations-Events
pub type SettingsSender = Sender<'static, NoopRawMutex, RingSettings, 1>;

/// Receiver für Konfigurations-Events
pub type SettingsReceiver = Receiver<'static, NoopRawMutex, RingSettings, 1>;
