// Input Task - Reicht rohe Tasten-Flanken an die Edge-Latches weiter
use defmt::info;
use embassy_futures::select::{Either, select};
use embassy_time::Instant;
use esp_hal::gpio::Input;

use ring_core::ButtonLatches;

/// Input Task - wartet auf Flanken der beiden Tasten
///
/// Beide Tasten sind active-low verdrahtet (interner Pull-Up). Der Task
/// macht bewusst keine Entprellung: er registriert jede Flanke nur mit
/// Zeitstempel im zugehörigen `EdgeLatch`, analog zu einer ISR, die ein
/// volatiles Flag setzt. Das 200-ms-Ruhe-Fenster wertet der
/// Control-Loop beim Pollen aus.
///
/// # Parameter
/// - `color_button`: Farbwahl-Taste (zyklisch weiterschalten)
/// - `pattern_button`: Muster-Taste (erneut senden)
/// - `latches`: geteilte Edge-Latches (SPSC: dieser Task schreibt,
///   der Control-Loop liest)
#[embassy_executor::task]
pub async fn input_task(
    mut color_button: Input<'static>,
    mut pattern_button: Input<'static>,
    latches: &'static ButtonLatches,
) {
    info!("INPUT: Task started");

    loop {
        // Beide Flanken-Futures gleichzeitig; wer zuerst feuert, dessen
        // Latch bekommt den Zeitstempel. Prellende Kontakte feuern hier
        // mehrfach und frischen dabei nur den Zeitstempel auf.
        match select(
            color_button.wait_for_any_edge(),
            pattern_button.wait_for_any_edge(),
        )
        .await
        {
            Either::First(()) => latches.color.record_edge(now_ms()),
            Either::Second(()) => latches.pattern.record_edge(now_ms()),
        }
    }
}

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}
