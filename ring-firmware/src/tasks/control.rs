// Control Task - Der Haupt-Loop des Geräts
//
// Einziger Besitzer von Zustands-Tabelle, Dirty-Flags und Frame-Puffer.
// Alles was den Zustand mutiert läuft hier: Tasten-Events, geroutete
// Inbound-Updates und Konfigurations-Events. Dadurch braucht nichts
// davon ein Lock.
use defmt::{error, info};
use embassy_time::{Duration, Instant, Timer};
use esp_hal_smartled::smart_led_buffer;

use ring_core::selector::{on_color_event, on_pattern_event};
use ring_core::{ButtonLatches, ButtonSource, DirtyFlags, FrameBuffer, RingWriter, Router, StateTable};

use crate::config::{CALIBRATION_SETTLE_SECS, LOOP_TICK_MS, RING_LEN, RMT_CLOCK_MHZ};
use crate::hal::RmtRingWriter;
use crate::{InboundReceiver, OutboundPublisher, RingSettings, SettingsReceiver};

/// Control Task - Embassy Task für den Haupt-Loop
///
/// Initialisiert die Ring-Hardware und ruft dann den eigentlichen
/// Loop auf.
///
/// # Parameter
/// - `data_pin`: GPIO Peripheral für die Datenleitung des Rings
/// - `rmt_peripheral`: RMT Peripheral für das WS2812-Timing
/// - `latches`: Edge-Latches der beiden Tasten
/// - `inbound_receiver`: geroutete Updates vom Link-Task
/// - `settings_receiver`: Konfigurations-Events vom Portal
/// - `outbound_publisher`: Outbound-Meldungen an den Link-Task
#[embassy_executor::task]
pub async fn control_task(
    data_pin: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    latches: &'static ButtonLatches,
    inbound_receiver: InboundReceiver,
    settings_receiver: SettingsReceiver,
    outbound_publisher: OutboundPublisher,
) {
    // Puffer für SmartLED Daten erstellen (RING_LEN Pixel)
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(RING_LEN);

    // Hardware initialisieren: RmtRingWriter kapselt RMT + SmartLED
    let writer = RmtRingWriter::new(data_pin, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer);

    control_loop(
        writer,
        latches,
        inbound_receiver,
        settings_receiver,
        outbound_publisher,
    )
    .await;
}

/// Der Haupt-Loop, generisch über den RingWriter
///
/// Ablauf pro Tick:
/// 1. Entprellte Tasten-Events abholen und auf den Outbound-Slot anwenden
/// 2. Geroutete Inbound-Updates in die Tabelle übernehmen
/// 3. Dirty-Hälften neu zeichnen, kompletten Frame pushen, bei
///    Outbound-Änderung genau eine Meldung für den Link einreihen
/// 4. Konfigurations-Event: Einstellungen neu lesen, Kalibrier-Anzeige
///    zeigen, nach der Haltezeit den verzögerten Neustart auslösen
///
/// Das Konfigurations-Event kommt bewusst NACH dem Render/Publish-Block:
/// ein noch offenes Outbound-Dirty-Flag wird so vor dem Neustart noch
/// eingereiht, und die Haltezeit gibt dem Link-Task Zeit es zu senden.
async fn control_loop<W: RingWriter>(
    mut writer: W,
    latches: &'static ButtonLatches,
    inbound_receiver: InboundReceiver,
    settings_receiver: SettingsReceiver,
    outbound_publisher: OutboundPublisher,
) {
    let mut table = StateTable::<RING_LEN>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();
    let mut frame = FrameBuffer::<RING_LEN>::new();
    let mut settings = RingSettings::defaults();

    info!("CTRL: Task started (offset {}, brightness {})", settings.offset, settings.brightness);

    // Boot-Kalibrierung: Offset-Anzeige zeigen, dann beide Hälften
    // frisch aus der (noch leeren) Tabelle zeichnen
    show_calibration(&mut writer, &mut frame, settings).await;
    flags.inbound = true;
    flags.outbound = true;

    loop {
        // 1. Tasten-Events (höchstens eins pro Taste anhängig)
        let now_ms = Instant::now().as_millis() as u32;
        while let Some(event) = latches.poll_pending(now_ms) {
            info!("CTRL: {}", event);
            match event.source {
                ButtonSource::Color => on_color_event(&mut table, &mut flags),
                ButtonSource::Pattern => on_pattern_event(&mut flags),
            }
        }

        // 2. Inbound-Updates vom Link (non-blocking abräumen)
        while let Ok(update) = inbound_receiver.try_receive() {
            if router.apply(&mut table, &mut flags, update) {
                info!("CTRL: Applied {}", update);
            }
        }

        // 3. Rendern und Outbound melden
        if flags.inbound {
            frame.paint_inbound(table.inbound_state(), settings.offset);
        }
        if flags.outbound {
            frame.paint_outbound(table.outbound_state(), settings.offset);
        }
        if flags.any() {
            // Immer der komplette Frame: die jeweils andere Hälfte
            // bleibt dabei unverändert im Puffer erhalten
            if let Err(e) = writer.write_frame(frame.pixels(), settings.brightness) {
                error!("CTRL: Frame push failed: {}", e);
            }
        }
        if flags.outbound {
            let state = table.outbound_state();
            outbound_publisher.publish_immediate(state);
            info!("CTRL: Outbound '{}' queued for publish", state);
        }
        flags.clear();

        // 4. Konfigurations-Event vom Portal
        if let Ok(new_settings) = settings_receiver.try_receive() {
            info!("CTRL: Settings saved: {}", new_settings);
            settings = new_settings;
            show_calibration(&mut writer, &mut frame, settings).await;
            info!("CTRL: Restarting to apply configuration");
            esp_hal::system::software_reset();
        }

        Timer::after(Duration::from_millis(LOOP_TICK_MS)).await;
    }
}

/// Zeigt die Kalibrier-Anzeige und hält sie für die Settle-Zeit
///
/// Alle Pixel blau, das physikalische Pixel 0 rot, das Offset-Pixel
/// grün - so lässt sich prüfen, ob der konfigurierte Offset stimmt.
async fn show_calibration<W: RingWriter>(
    writer: &mut W,
    frame: &mut FrameBuffer<RING_LEN>,
    settings: RingSettings,
) {
    info!("CTRL: Calibration display (offset {})", settings.offset);
    frame.paint_calibration(settings.offset);
    if let Err(e) = writer.write_frame(frame.pixels(), settings.brightness) {
        error!("CTRL: Frame push failed: {}", e);
    }
    Timer::after(Duration::from_secs(CALIBRATION_SETTLE_SECS)).await;
}
