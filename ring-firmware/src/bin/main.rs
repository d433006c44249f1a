// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_pixel_ring::config::{EXTRA_HEAP_SIZE, WIFI_HEAP_SIZE};
use esp_pixel_ring::tasks::{
    connection_task, control_task, dhcp_task, input_task, link_task, net_task, portal_task,
};
use esp_pixel_ring::{ButtonLatches, InboundChannel, OutboundChannel, SettingsChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

// Edge-Latches der beiden Tasten
// Plain static: nur Atomics, SPSC zwischen Input-Task und Control-Loop
static BUTTON_LATCHES: ButtonLatches = ButtonLatches::new();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net
    // 8 Sockets: MQTT (1) + DNS (1) + 2 Portal-Listener + Reserve
    static RESOURCES: static_cell::StaticCell<StackResources<8>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Inbound-Channel (Link → Control-Loop, geroutete Updates)
    static INBOUND_CHANNEL: static_cell::StaticCell<InboundChannel> =
        static_cell::StaticCell::new();
    let inbound_channel = INBOUND_CHANNEL.init(InboundChannel::new());
    let inbound_sender = inbound_channel.sender();
    let inbound_receiver = inbound_channel.receiver();

    // Outbound-Channel (Control-Loop → Link, lossy-latest Broadcast)
    static OUTBOUND_CHANNEL: static_cell::StaticCell<OutboundChannel> =
        static_cell::StaticCell::new();
    let outbound_channel = &*OUTBOUND_CHANNEL.init(OutboundChannel::new());
    let outbound_publisher = outbound_channel.publisher().unwrap();
    let outbound_subscriber = outbound_channel.subscriber().unwrap();

    // Settings-Channel (Portal → Control-Loop, Konfigurations-Events)
    static SETTINGS_CHANNEL: static_cell::StaticCell<SettingsChannel> =
        static_cell::StaticCell::new();
    let settings_channel = SETTINGS_CHANNEL.init(SettingsChannel::new());
    let settings_sender = settings_channel.sender();
    let settings_receiver = settings_channel.receiver();

    // Tasten: active-low mit internem Pull-Up
    let color_button = Input::new(
        peripherals.GPIO6,
        InputConfig::default().with_pull(Pull::Up),
    );
    let pattern_button = Input::new(
        peripherals.GPIO7,
        InputConfig::default().with_pull(Pull::Up),
    );

    // Spawn Input Task (Flanken → Edge-Latches)
    spawner
        .spawn(input_task(color_button, pattern_button, &BUTTON_LATCHES))
        .unwrap();

    // Spawn Control Task (Zustands-Tabelle, Renderer, Kalibrierung)
    spawner
        .spawn(control_task(
            peripherals.GPIO8,
            peripherals.RMT,
            &BUTTON_LATCHES,
            inbound_receiver,
            settings_receiver,
            outbound_publisher,
        ))
        .unwrap();

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Spawn Link Task (MQTT Session + Routing)
    spawner
        .spawn(link_task(stack, inbound_sender, outbound_subscriber))
        .unwrap();

    // Spawn Portal Tasks (2x für concurrent connections)
    for task_id in 0..2 {
        spawner
            .spawn(portal_task(task_id, stack, settings_sender))
            .unwrap();
    }

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
