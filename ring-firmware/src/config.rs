// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// Ring Konfiguration
// ============================================================================

/// Anzahl der Pixel auf dem Ring
///
/// Muss gerade sein: die untere Hälfte zeigt empfangene Zustände, die
/// obere Hälfte den lokal gewählten. Position N/2+1 der Zustands-Tabelle
/// ist der Outbound-Slot.
pub const RING_LEN: usize = 12;

/// GPIO-Pin für die Datenleitung des Rings (WS2812/Neopixel)
pub const RING_GPIO_PIN: u8 = 8;

/// GPIO-Pin der Farbwahl-Taste (active-low, interner Pull-Up)
pub const BUTTON_COLOR_GPIO_PIN: u8 = 6;

/// GPIO-Pin der Muster-Taste (active-low, interner Pull-Up)
pub const BUTTON_PATTERN_GPIO_PIN: u8 = 7;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Default-Rotations-Offset (0..RING_LEN-1)
///
/// Wird vom Portal zur Laufzeit überschrieben; dauerhafte Speicherung
/// übernimmt die externe Konfigurations-Schicht.
pub const RING_OFFSET_DEFAULT: u8 = 0;

/// Default-Helligkeit (erlaubter Bereich 5..=200)
///
/// 255 wäre das Maximum, zieht aber bei weißem Vollring zu viel Strom
/// (12 Pixel x 3 Farben x 20 mA). Deshalb auf 200 gedeckelt.
pub const RING_BRIGHTNESS_DEFAULT: u8 = 60;

/// Minimal erlaubte Helligkeit
pub const RING_BRIGHTNESS_MIN: u8 = 5;

/// Maximal erlaubte Helligkeit
pub const RING_BRIGHTNESS_MAX: u8 = 200;

/// Tick des Control-Loops in Millisekunden
pub const LOOP_TICK_MS: u64 = 10;

/// Haltezeit der Kalibrier-Anzeige in Sekunden
///
/// So lange bleibt das grüne Offset-Pixel sichtbar, bevor die normale
/// Anzeige weiterläuft bzw. der Neustart ausgelöst wird.
pub const CALIBRATION_SETTLE_SECS: u64 = 5;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// Gesamt-Heap: ~100 KB für WiFi-Stack

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
/// Wird zur Build-Zeit aus der Environment Variable MQTT_BROKER geladen
/// Setze diese in .env file (siehe .env.example)
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt), 8883 (TLS)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
/// Muss auf dem Broker eindeutig sein, sonst werfen sich die Clients
/// gegenseitig raus
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Benutzername (leer = anonyme Verbindung)
pub const MQTT_USERNAME: &str = match option_env!("MQTT_USERNAME") {
    Some(username) => username,
    None => "",
};

/// MQTT Passwort (leer = anonyme Verbindung)
pub const MQTT_PASSWORD: &str = match option_env!("MQTT_PASSWORD") {
    Some(password) => password,
    None => "",
};

/// MQTT Sende-Topic
/// Flaches Topic; pro Outbound-Zustandswechsel geht genau eine
/// Nachricht mit dem Wire-Wort als Payload raus
pub const MQTT_TOPIC_SEND: &str = env!(
    "MQTT_TOPIC_SEND",
    "MQTT Topic Send nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Empfangs-Topic (Wildcard-Pattern wie `some/thing/#`)
/// Nachrichten kommen auf `some/thing/<position>` an; das letzte
/// Segment adressiert die logische Position in der Zustands-Tabelle
pub const MQTT_TOPIC_RECEIVE: &str = env!(
    "MQTT_TOPIC_RECEIVE",
    "MQTT Topic Receive nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Reconnect Delay in Sekunden
/// Flaches Intervall, unbegrenzte Versuche solange WiFi online meldet
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Keep-Alive in Sekunden
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// MQTT Buffer-Größe in Bytes
/// Muss groß genug für MQTT-Pakete sein
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// HTTP Portal Konfiguration
// ============================================================================

/// HTTP Buffer-Größe in Bytes
/// Für HTTP Request/Response Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// JSON Serialisierungs-Buffer für den /status Endpoint
pub const JSON_STATUS_BUFFER_SIZE: usize = 512;
