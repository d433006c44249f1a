// Portal Task - HTTP Status-Seite und Konfigurations-Endpoint
//
// Ersetzt das Konfigurations-Portal des Geräts: zeigt die wirksame
// Konfiguration an und nimmt Offset/Helligkeit entgegen. Ein
// gespeicherter Wert geht als Konfigurations-Event an den Control-Loop,
// der daraufhin die Kalibrier-Anzeige zeigt und neu startet.
use alloc::string::String;

use defmt::info;
use embassy_net::Stack;
use embassy_time::Duration;
use picoserve::response::{IntoResponse, Response, StatusCode};
use picoserve::routing::{get, parse_path_segment};

use crate::config::*;
use crate::web::{INDEX_HTML, protocol::StatusReport};
use crate::{RingSettings, SettingsSender};

/// Portal Task - läuft parallel zu anderen Tasks
///
/// Routen:
/// - `GET /` - eingebettete Status-/Konfigurations-Seite
/// - `GET /status` - wirksame Konfiguration als JSON
/// - `GET /config/<offset>/<brightness>` - validiert, meldet das
///   Konfigurations-Event und bestätigt; das Gerät startet nach der
///   Kalibrier-Anzeige neu
///
/// **Task Pool:** Diese Task wird 2x gespawnt, damit die Seite und ihr
/// /status-Fetch gleichzeitig bedient werden können.
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz (0..1)
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `settings_sender`: Channel Sender für Konfigurations-Events
#[embassy_executor::task(pool_size = 2)]
pub async fn portal_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    settings_sender: SettingsSender,
) {
    info!("HTTP: Portal task {} starting on port 80...", task_id);

    // Router-Konfiguration
    let app = picoserve::Router::new()
        .route("/", get(serve_index))
        .route("/status", get(serve_status))
        .route(
            ("/config", parse_path_segment::<u8>(), parse_path_segment::<u8>()),
            get(move |(offset, brightness): (u8, u8)| async move {
                save_config(offset, brightness, settings_sender).await
            }),
        );

    // Server-Konfiguration
    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    // HTTP-Buffer für Requests/Responses
    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];

    // TCP-Buffers für Socket
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    // Server erstellen und starten (lauscht auf Port 80)
    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    let _ = server
        .listen_and_serve(task_id, *stack, 80, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Portal task {} ended", task_id);
}

/// Serviert die eingebettete HTML-Seite
async fn serve_index() -> impl IntoResponse {
    Response::new(StatusCode::OK, INDEX_HTML)
        .with_header("Content-Type", "text/html; charset=utf-8")
}

/// Serviert die wirksame Konfiguration als JSON
async fn serve_status() -> impl IntoResponse {
    let defaults = RingSettings::defaults();
    let status = StatusReport {
        device: "esp-pixel-ring",
        broker: MQTT_BROKER,
        client_id: MQTT_CLIENT_ID,
        topic_send: MQTT_TOPIC_SEND,
        topic_receive: MQTT_TOPIC_RECEIVE,
        ring_len: RING_LEN as u8,
        offset: defaults.offset,
        brightness: defaults.brightness,
    };

    let mut json_buffer = [0u8; JSON_STATUS_BUFFER_SIZE];
    match serde_json_core::to_slice(&status, &mut json_buffer) {
        Ok(len) => {
            let body = String::from(core::str::from_utf8(&json_buffer[..len]).unwrap_or("{}"));
            Response::new(StatusCode::OK, body).with_header("Content-Type", "application/json")
        }
        Err(_) => Response::new(StatusCode::new(500), String::from("serialization error"))
            .with_header("Content-Type", "text/plain"),
    }
}

/// Validiert und meldet neue Einstellungen an den Control-Loop
async fn save_config(
    offset: u8,
    brightness: u8,
    settings_sender: SettingsSender,
) -> impl IntoResponse {
    if usize::from(offset) >= RING_LEN {
        return Response::new(StatusCode::new(422), "offset ausserhalb 0..11");
    }
    if !(RING_BRIGHTNESS_MIN..=RING_BRIGHTNESS_MAX).contains(&brightness) {
        return Response::new(StatusCode::new(422), "brightness ausserhalb 5..=200");
    }

    info!("HTTP: Config saved: offset={} brightness={}", offset, brightness);
    settings_sender.send(RingSettings { offset, brightness }).await;

    Response::new(
        StatusCode::OK,
        "OK - Kalibrier-Anzeige laeuft, danach Neustart",
    )
}
