// RingWriter-Implementierung für das ESP32 RMT Peripheral
//
// Treibt den WS2812-Ring über den SmartLED-Adapter. Die Helligkeit wird
// erst hier beim Push angewendet; der Frame-Puffer bleibt ungedimmt.

use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use smart_leds::brightness;
use smart_leds_trait::SmartLedsWrite;

use ring_core::{LedError, RingWriter};

use crate::config::RING_LEN;

/// Puffer-Größe für RING_LEN Pixel (24 Bits pro Pixel + 1 Reset)
pub const RING_BUFFER_SIZE: usize = RING_LEN * 24 + 1;

/// Real Hardware Ring Writer
///
/// Nutzt das ESP32 RMT Peripheral um den WS2812-Ring anzusteuern.
///
/// Hinweis: Der Puffer muss den Task überleben, daher wird er im Task
/// erstellt und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtRingWriter<'a> {
    led: SmartLedsAdapter<'a, RING_BUFFER_SIZE>,
}

impl<'a> RmtRingWriter<'a> {
    /// Erstellt einen neuen RmtRingWriter
    ///
    /// # Parameter
    /// - `data_pin`: GPIO Peripheral für die Datenleitung des Rings
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Puffer für LED-Daten (erstellt mit `smart_led_buffer!`)
    pub fn new(
        data_pin: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; RING_BUFFER_SIZE],
    ) -> Self {
        // RMT initialisieren
        let rmt: Rmt<'a, Blocking> =
            Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz)).unwrap();

        // SmartLED Adapter erstellen
        let led = SmartLedsAdapter::new(rmt.channel0, data_pin, buffer);

        Self { led }
    }
}

impl RingWriter for RmtRingWriter<'_> {
    fn write_frame(&mut self, frame: &[RGB8], level: u8) -> Result<(), LedError> {
        self.led
            .write(brightness(frame.iter().copied(), level))
            .map_err(|_| LedError::WriteFailed)
    }
}
