//! Integration Tests für die Ring-Logik
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockRingWriter

use rgb::RGB8;
use ring_core::{
    ButtonLatches, ButtonSource, DEBOUNCE_MS, DirtyFlags, FrameBuffer, LedError, LogicalState,
    RingWriter, Router, StateTable, map_physical, on_color_event, on_pattern_event, route,
};

/// Pixel-Anzahl des Test-Rings (wie die Hardware: 12)
const N: usize = 12;

/// Outbound-Slot bei N=12
const OUTBOUND: usize = 7;

// ============================================================================
// Mock Ring Writer
// ============================================================================

#[derive(Default)]
pub struct MockRingWriter {
    pub last_frame: Option<Vec<RGB8>>,
    pub last_brightness: Option<u8>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockRingWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RingWriter for MockRingWriter {
    fn write_frame(&mut self, frame: &[RGB8], brightness: u8) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.last_frame = Some(frame.to_vec());
        self.last_brightness = Some(brightness);
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Tests: MockRingWriter
// ============================================================================

#[test]
fn test_mock_ring_writer_write() {
    let mut mock = MockRingWriter::new();
    let frame = [RGB8 { r: 255, g: 0, b: 0 }; N];

    assert_eq!(mock.write_count, 0);
    assert_eq!(mock.last_frame, None);

    mock.write_frame(&frame, 60).unwrap();

    assert_eq!(mock.write_count, 1);
    assert_eq!(mock.last_frame.as_deref(), Some(&frame[..]));
    assert_eq!(mock.last_brightness, Some(60));
}

#[test]
fn test_mock_ring_writer_fail_and_recover() {
    let mut mock = MockRingWriter::new();
    mock.fail_next_write = true;

    let frame = [RGB8 { r: 0, g: 0, b: 255 }; N];
    assert_eq!(mock.write_frame(&frame, 60), Err(LedError::WriteFailed));
    assert_eq!(mock.write_count, 0);

    mock.write_frame(&frame, 60).unwrap();
    assert_eq!(mock.write_count, 1);
}

// ============================================================================
// Tests: route()
// ============================================================================

#[test]
fn test_route_takes_position_from_last_topic_segment() {
    let update = route::<N>("home/lights/3", "red");
    assert_eq!(update.position, 3);
    assert_eq!(update.state, Some(LogicalState::Red));
}

#[test]
fn test_route_sends_unparseable_topics_to_the_sink() {
    assert_eq!(route::<N>("home/lights/three", "red").position, 0);
    assert_eq!(route::<N>("", "red").position, 0);
    assert_eq!(route::<N>("nodigits", "red").position, 0);
}

#[test]
fn test_route_clamps_positions_past_the_outbound_slot() {
    assert_eq!(route::<N>("home/lights/8", "red").position, 0);
    assert_eq!(route::<N>("home/lights/13", "red").position, 0);
    // Der Outbound-Slot selbst ist adressierbar
    assert_eq!(route::<N>("home/lights/7", "red").position, OUTBOUND);
}

#[test]
fn test_route_rejects_payloads_outside_the_vocabulary() {
    assert_eq!(route::<N>("home/lights/3", "pink").state, None);
    assert_eq!(route::<N>("home/lights/3", "Red").state, None);
    assert_eq!(route::<N>("home/lights/3", "red ").state, None);
    assert_eq!(route::<N>("home/lights/3", "").state, None);
}

// ============================================================================
// Tests: Router::apply()
// ============================================================================

#[test]
fn test_apply_stores_state_and_marks_inbound() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();

    let applied = router.apply(&mut table, &mut flags, route::<N>("home/lights/3", "red"));

    assert!(applied);
    assert_eq!(table.get(3), LogicalState::Red);
    assert!(flags.inbound);
    assert!(!flags.outbound);
}

#[test]
fn test_apply_ignores_unknown_payloads_completely() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();

    let applied = router.apply(&mut table, &mut flags, route::<N>("home/lights/3", "pink"));

    assert!(!applied);
    assert_eq!(table, StateTable::<N>::new());
    assert_eq!(flags, DirtyFlags::new());
}

#[test]
fn test_sink_updates_never_touch_real_positions() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();

    router.apply(&mut table, &mut flags, route::<N>("home/lights/9999", "white"));
    router.apply(&mut table, &mut flags, route::<N>("home/lights/oops", "white"));

    for position in 1..=OUTBOUND {
        assert_eq!(table.get(position), LogicalState::Off);
    }
    // Der Sink selbst hält den letzten Wert, gerendert wird er nie
    assert_eq!(table.get(0), LogicalState::White);
    assert!(flags.inbound);
    assert!(!flags.outbound);
}

#[test]
fn test_first_outbound_slot_update_is_the_restore_path() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();

    router.apply(&mut table, &mut flags, route::<N>("home/lights/7", "purple"));

    assert_eq!(table.outbound_state(), LogicalState::Purple);
    assert!(flags.outbound);
    assert!(!flags.inbound);
}

#[test]
fn test_restore_path_fires_only_once_per_boot() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();

    router.apply(&mut table, &mut flags, route::<N>("home/lights/7", "purple"));
    flags.clear();

    // Zweites Update auf den Outbound-Slot ist ein normales Remote-Update
    router.apply(&mut table, &mut flags, route::<N>("home/lights/7", "blue"));

    assert_eq!(table.outbound_state(), LogicalState::Blue);
    assert!(flags.inbound);
    assert!(flags.outbound);
}

#[test]
fn test_restore_path_survives_earlier_inbound_updates() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();

    // Inbound-Updates verbrauchen den Restore-Pfad nicht
    router.apply(&mut table, &mut flags, route::<N>("home/lights/1", "green"));
    router.apply(&mut table, &mut flags, route::<N>("home/lights/4", "red"));
    flags.clear();

    router.apply(&mut table, &mut flags, route::<N>("home/lights/7", "yellow"));

    assert!(flags.outbound);
    assert!(!flags.inbound);
}

// ============================================================================
// Tests: Lokale Farbauswahl
// ============================================================================

#[test]
fn test_color_event_cycles_through_all_states() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();

    let expected = [
        LogicalState::Green,
        LogicalState::Red,
        LogicalState::Yellow,
        LogicalState::Purple,
        LogicalState::Blue,
        LogicalState::White,
        LogicalState::Off,
    ];
    for state in expected {
        on_color_event(&mut table, &mut flags);
        assert_eq!(table.outbound_state(), state);
    }
}

#[test]
fn test_seven_color_events_are_a_full_cycle() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();

    for _ in 0..7 {
        on_color_event(&mut table, &mut flags);
    }

    assert_eq!(table.outbound_state(), LogicalState::Off);
}

#[test]
fn test_pattern_event_retransmits_without_state_change() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    table.set_outbound(LogicalState::Yellow);

    on_pattern_event(&mut flags);
    assert!(flags.outbound);
    flags.clear();

    // Idempotent: zweites Pattern-Event ändert den Zustand nicht
    on_pattern_event(&mut flags);
    assert_eq!(table.outbound_state(), LogicalState::Yellow);
    assert!(flags.outbound);
    assert!(!flags.inbound);
}

// ============================================================================
// Tests: Entprellung
// ============================================================================

#[test]
fn test_two_close_edges_produce_at_most_one_event() {
    let latches = ButtonLatches::new();

    latches.color.record_edge(1000);
    latches.color.record_edge(1100); // < 200 ms später: nur Refresh

    assert_eq!(latches.poll_pending(1250), None); // Fenster läuft noch
    let event = latches.poll_pending(1300).unwrap();
    assert_eq!(event.source, ButtonSource::Color);
    assert_eq!(event.timestamp_ms, 1100);
    assert_eq!(latches.poll_pending(1400), None);
}

#[test]
fn test_two_distant_edges_produce_two_events() {
    let latches = ButtonLatches::new();

    latches.color.record_edge(0);
    assert!(latches.poll_pending(DEBOUNCE_MS).is_some());

    latches.color.record_edge(500);
    assert!(latches.poll_pending(500 + DEBOUNCE_MS).is_some());
}

#[test]
fn test_sources_debounce_independently() {
    let latches = ButtonLatches::new();

    latches.color.record_edge(0);
    latches.pattern.record_edge(50);

    let first = latches.poll_pending(400).unwrap();
    let second = latches.poll_pending(400).unwrap();
    assert_eq!(first.source, ButtonSource::Color);
    assert_eq!(second.source, ButtonSource::Pattern);
    assert_eq!(latches.poll_pending(400), None);
}

// ============================================================================
// Tests: Offset-Mapping
// ============================================================================

#[test]
fn test_offset_round_trip_for_all_positions() {
    for offset in 0..N as u8 {
        for logical in 0..N {
            let physical = map_physical::<N>(logical, offset);
            assert_eq!((physical + N - offset as usize) % N, logical);
        }
    }
}

#[test]
fn test_offset_wraps_around_the_ring() {
    assert_eq!(map_physical::<N>(10, 5), 3);
    assert_eq!(map_physical::<N>(0, 0), 0);
    assert_eq!(map_physical::<N>(11, 1), 0);
}

// ============================================================================
// Tests: Renderer
// ============================================================================

#[test]
fn test_inbound_half_mirrors_position_one() {
    let mut table = StateTable::<N>::new();
    let mut flags = DirtyFlags::new();
    let mut router = Router::new();
    let mut frame = FrameBuffer::<N>::new();

    // Update auf Position 3 wird gespeichert ...
    router.apply(&mut table, &mut flags, route::<N>("home/lights/3", "red"));
    assert_eq!(table.get(3), LogicalState::Red);
    assert!(flags.inbound);

    // ... aber die Anzeige richtet sich weiter nach Position 1 (Off)
    frame.paint_inbound(table.inbound_state(), 0);
    let off = LogicalState::Off.rgb();
    assert!(frame.pixels()[..N / 2].iter().all(|&p| p == off));

    // Erst ein Update auf Position 1 färbt die Inbound-Hälfte
    flags.clear();
    router.apply(&mut table, &mut flags, route::<N>("home/lights/1", "red"));
    assert!(flags.inbound);
    frame.paint_inbound(table.inbound_state(), 0);
    let red = LogicalState::Red.rgb();
    assert!(frame.pixels()[..N / 2].iter().all(|&p| p == red));
}

#[test]
fn test_outbound_half_renders_with_offset() {
    let mut frame = FrameBuffer::<N>::new();
    frame.paint_outbound(LogicalState::Green, 3);

    let green = LogicalState::Green.rgb();
    // Logische Pixel-Indizes 6..12, rotiert um 3: physikalisch 9,10,11,0,1,2
    for physical in [9, 10, 11, 0, 1, 2] {
        assert_eq!(frame.pixels()[physical], green);
    }
    for physical in [3, 4, 5, 6, 7, 8] {
        assert_eq!(frame.pixels()[physical], LogicalState::Off.rgb());
    }
}

#[test]
fn test_repainting_one_half_preserves_the_other() {
    let mut frame = FrameBuffer::<N>::new();
    frame.paint_inbound(LogicalState::Red, 2);
    let before: Vec<RGB8> = frame.pixels().to_vec();

    frame.paint_outbound(LogicalState::Blue, 2);

    // Die Inbound-Pixel (logisch 0..6, rotiert um 2) blieben stehen
    for logical in 0..N / 2 {
        let physical = map_physical::<N>(logical, 2);
        assert_eq!(frame.pixels()[physical], before[physical]);
    }
}

#[test]
fn test_calibration_frame_marks_origin_and_offset() {
    let mut frame = FrameBuffer::<N>::new();
    frame.paint_calibration(5);

    let pixels = frame.pixels();
    assert_eq!(pixels[0], LogicalState::Red.rgb());
    assert_eq!(pixels[5], LogicalState::Green.rgb());
    for (physical, pixel) in pixels.iter().enumerate() {
        if physical != 0 && physical != 5 {
            assert_eq!(*pixel, LogicalState::Blue.rgb());
        }
    }
}

// ============================================================================
// Tests: Frame-Push über den RingWriter
// ============================================================================

#[test]
fn test_full_frame_reaches_the_writer() {
    let mut frame = FrameBuffer::<N>::new();
    let mut mock = MockRingWriter::new();

    frame.paint_inbound(LogicalState::Green, 0);
    frame.paint_outbound(LogicalState::White, 0);
    mock.write_frame(frame.pixels(), 60).unwrap();

    let pushed = mock.last_frame.unwrap();
    assert_eq!(pushed.len(), N);
    assert!(pushed[..N / 2].iter().all(|&p| p == LogicalState::Green.rgb()));
    assert!(pushed[N / 2..].iter().all(|&p| p == LogicalState::White.rgb()));
}

#[test]
fn test_brightness_travels_with_every_push() {
    let frame = FrameBuffer::<N>::new();
    let mut mock = MockRingWriter::new();

    mock.write_frame(frame.pixels(), 5).unwrap();
    assert_eq!(mock.last_brightness, Some(5));

    mock.write_frame(frame.pixels(), 200).unwrap();
    assert_eq!(mock.last_brightness, Some(200));
}
