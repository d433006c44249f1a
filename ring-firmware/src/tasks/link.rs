// Link Task - Hält die MQTT-Session und koppelt sie an den Control-Loop
//
// Zustände: DISCONNECTED → CONNECTING → CONNECTED. Verbunden wird nur,
// wenn der Netzwerk-Stack online meldet; jeder Fehler reißt die Session
// ab und nach flachen 5 Sekunden beginnt der nächste Versuch,
// unbegrenzt oft. Der Render-Pfad läuft davon unberührt weiter.
use defmt::{error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer, with_timeout};

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use ring_core::{LogicalState, RoutedUpdate, route};

use crate::config::*;
use crate::{InboundSender, OutboundSubscriber};

/// Link Task - läuft parallel zu anderen Tasks
///
/// Übernimmt den kompletten MQTT-Lebenszyklus:
/// - Wartet auf Netzwerk-Verbindung (Link + DHCP)
/// - Verbindet sich mit dem Broker und abonniert das Empfangs-Topic
/// - Routet eingehende Nachrichten und reicht sie an den Control-Loop
/// - Published Outbound-Meldungen genau einmal pro Zustandswechsel
/// - Automatisches Reconnect bei Fehlern (flaches 5s-Intervall)
///
/// # Parameter
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `inbound_sender`: Channel Sender für geroutete Inbound-Updates
/// - `outbound_subscriber`: Subscriber für Outbound-Meldungen
#[embassy_executor::task]
pub async fn link_task(
    stack: &'static Stack<'static>,
    inbound_sender: InboundSender,
    mut outbound_subscriber: OutboundSubscriber,
) {
    info!("LINK: Task started, waiting for network...");

    loop {
        // CONNECTING nur solange die Netzwerk-Schicht online meldet
        wait_for_network(stack).await;

        match connect_and_run(stack, &inbound_sender, &mut outbound_subscriber).await {
            Ok(()) => warn!("LINK: Connection closed normally"),
            Err(e) => error!("LINK: Error: {}", e),
        }
        info!("LINK: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Wartet bis Netzwerk-Verbindung verfügbar ist
///
/// Prüft kontinuierlich Link-Status und DHCP-Konfiguration.
async fn wait_for_network(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() && stack.config_v4().is_some() {
            return;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}

/// Aufbereitetes Session-Ereignis
///
/// Die von `receive_message` gelieferten Referenzen zeigen in den
/// Empfangs-Puffer des Clients; sie werden sofort in dieses owned Enum
/// kopiert, damit der Client danach wieder frei ist (Publish braucht
/// ihn mutable).
enum SessionEvent {
    Publish(LogicalState),
    Inbound(RoutedUpdate),
    PayloadIgnored,
    KeepAlive,
}

/// Verbindet mit dem Broker und fährt die Session bis zum ersten Fehler
///
/// Kompletter Lifecycle:
/// 1. DNS-Auflösung des Broker-Hostnames
/// 2. TCP-Verbindung aufbauen
/// 3. MQTT CONNECT senden (mit Credentials falls konfiguriert)
/// 4. Empfangs-Topic abonnieren
/// 5. Publish/Receive-Loop mit Keep-Alive-Pings
///
/// Bei jedem Fehler kehrt die Funktion zurück und der Haupt-Loop
/// startet nach dem Reconnect-Delay den nächsten Versuch. Eine Meldung,
/// deren Publish mitten im Verbindungsabriss scheitert, wird nicht
/// wiederholt - erst der nächste Zustandswechsel sendet wieder.
async fn connect_and_run(
    stack: &'static Stack<'static>,
    inbound_sender: &InboundSender,
    outbound_subscriber: &mut OutboundSubscriber,
) -> Result<(), LinkError> {
    // DNS Lookup
    info!("LINK: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;

    // TCP Connect
    let mut rx_buffer = [0u8; 4096];
    let mut tx_buffer = [0u8; 4096];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(10)));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| LinkError::ConnectionFailed)?;
    info!("LINK: TCP connected");

    // MQTT Client Configuration
    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;
    if !MQTT_USERNAME.is_empty() {
        config.add_username(MQTT_USERNAME);
        config.add_password(MQTT_PASSWORD);
    }

    // MQTT Buffer
    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    // MQTT Client erstellen
    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    // MQTT CONNECT + SUBSCRIBE
    client
        .connect_to_broker()
        .await
        .map_err(|_| LinkError::ProtocolError)?;
    info!("LINK: Connected to broker");

    client
        .subscribe_to_topic(MQTT_TOPIC_RECEIVE)
        .await
        .map_err(|_| LinkError::SubscribeFailed)?;
    info!("LINK: Subscribed to '{}'", MQTT_TOPIC_RECEIVE);

    // Session-Loop: gleichzeitig auf Outbound-Meldungen und eingehende
    // Publishes lauschen; bleibt der Empfang länger still, hält ein
    // Ping die Keep-Alive-Frist ein.
    loop {
        let event = {
            let receive = with_timeout(
                Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS / 2)),
                client.receive_message(),
            );
            match select(outbound_subscriber.next_message_pure(), receive).await {
                Either::First(state) => SessionEvent::Publish(state),
                Either::Second(Ok(Ok((topic, payload)))) => match core::str::from_utf8(payload) {
                    Ok(payload) => SessionEvent::Inbound(route::<RING_LEN>(topic, payload)),
                    Err(_) => SessionEvent::PayloadIgnored,
                },
                Either::Second(Ok(Err(_))) => return Err(LinkError::ReceiveFailed),
                Either::Second(Err(_)) => SessionEvent::KeepAlive,
            }
        };

        match event {
            SessionEvent::Publish(state) => {
                client
                    .send_message(
                        MQTT_TOPIC_SEND,
                        state.as_str().as_bytes(),
                        QualityOfService::QoS0,
                        false,
                    )
                    .await
                    .map_err(|_| LinkError::PublishFailed)?;
                info!("LINK: Published '{}'", state);
            }
            SessionEvent::Inbound(update) => {
                info!("LINK: Received {}", update);
                inbound_sender.send(update).await;
            }
            SessionEvent::PayloadIgnored => {
                warn!("LINK: Ignoring non-UTF-8 payload");
            }
            SessionEvent::KeepAlive => {
                client.send_ping().await.map_err(|_| LinkError::PingFailed)?;
            }
        }
    }
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, LinkError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => {
            for addr in addrs {
                if let IpAddress::Ipv4(ipv4) = addr {
                    return Ok(ipv4);
                }
            }
            Err(LinkError::DnsResolutionFailed)
        }
        Ok(Err(_)) => Err(LinkError::DnsResolutionFailed),
        Err(_) => Err(LinkError::DnsTimeout),
    }
}

/// Link Fehler-Typen
///
/// Alle möglichen Fehler die während einer MQTT-Session auftreten
/// können. Keiner davon ist fatal: jeder führt zurück in den
/// Reconnect-Loop.
#[derive(Debug)]
enum LinkError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    SubscribeFailed,
    PublishFailed,
    ReceiveFailed,
    PingFailed,
}

impl defmt::Format for LinkError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LinkError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            LinkError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            LinkError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            LinkError::ProtocolError => defmt::write!(fmt, "Protocol error"),
            LinkError::SubscribeFailed => defmt::write!(fmt, "Subscribe failed"),
            LinkError::PublishFailed => defmt::write!(fmt, "Publish failed"),
            LinkError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
            LinkError::PingFailed => defmt::write!(fmt, "Ping failed"),
        }
    }
}
