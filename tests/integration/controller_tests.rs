//! Integration tests for the button → controller → LED / notifier pipeline.
//!
//! These run on the host and drive [`DoorbellController`] through full
//! button handlers against the recording mocks.

use std::time::Duration;

use crate::mock_hw::{
    HwCall, MemoryStore, MockHardware, RecordingNotifier, RecordingSink, Sent, board_config,
    face,
};

use doorbell::app::commands::AppCommand;
use doorbell::app::events::AppEvent;
use doorbell::app::notify::ALARM_TEXT;
use doorbell::app::service::DoorbellController;
use doorbell::error::{CaptureError, EnrollError, Error, StoreError, TransportError};
use doorbell::face::classifier::ClassificationOutcome;
use doorbell::mode::channels::{ButtonId, LedChannel};
use doorbell::storage::ListId;
use tempfile::TempDir;

type App = DoorbellController<MemoryStore, RecordingNotifier>;

struct Rig {
    app: App,
    hw: MockHardware,
    sink: RecordingSink,
    _dir: TempDir,
}

fn rig_with(store: MemoryStore, chat: Option<i64>) -> Rig {
    let dir = tempfile::tempdir().unwrap();
    let cfg = board_config(dir.path());
    let mut app = DoorbellController::new(&cfg, store, RecordingNotifier::new(chat)).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    Rig {
        app,
        hw,
        sink,
        _dir: dir,
    }
}

fn rig(store: MemoryStore) -> Rig {
    rig_with(store, Some(4242))
}

const DISPLAY: Duration = Duration::from_secs(10);

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_emits_started_and_leaves_leds_dark() {
    let r = rig(MemoryStore::new());
    assert_eq!(r.sink.events, vec![AppEvent::Started]);
    assert!(r.hw.led_calls().is_empty(), "all-zero state has nothing to push");
    assert_eq!(r.app.register().current(), &[0; 7]);
}

// ── Mode buttons ──────────────────────────────────────────────

#[test]
fn red_press_toggles_mode_and_flashes_red() {
    let mut r = rig(MemoryStore::new());
    r.app.handle_button(ButtonId::Red, &mut r.hw, &mut r.sink);

    assert_eq!(r.app.register().get(0), Some(1));
    assert_eq!(
        r.hw.calls,
        vec![
            HwCall::SetLed(LedChannel::Red, 1),
            HwCall::Hold(Duration::from_millis(2500)),
            HwCall::SetLed(LedChannel::Red, 0),
        ]
    );

    r.app.handle_button(ButtonId::Red, &mut r.hw, &mut r.sink);
    assert_eq!(r.app.register().get(0), Some(0), "second press toggles back");
}

#[test]
fn green_press_flashes_green_only() {
    let mut r = rig(MemoryStore::new());
    r.app.handle_command(AppCommand::Press(ButtonId::Green), &mut r.hw, &mut r.sink);

    assert_eq!(r.app.register().get(2), Some(1));
    assert_eq!(
        r.hw.led_calls(),
        vec![(LedChannel::Green, 1), (LedChannel::Green, 0)]
    );
    assert!(r.sink.contains(&AppEvent::ButtonPressed(ButtonId::Green)));
}

// ── Bell path ─────────────────────────────────────────────────

#[test]
fn allowlisted_visitor_shows_green_without_notification() {
    let mut r = rig(MemoryStore::new().with(ListId::Allowlist, vec![face(0.1)]));
    r.hw.script_frame(vec![face(0.1)]);

    let outcome = r.app.ring(&mut r.hw, &mut r.sink).unwrap();

    assert_eq!(outcome, ClassificationOutcome::AllowMatch);
    assert_eq!(
        r.hw.led_calls(),
        vec![(LedChannel::Green, 1), (LedChannel::Green, 0)]
    );
    assert_eq!(r.hw.holds(), vec![DISPLAY]);
    assert!(r.app.notifier().sent.is_empty());
}

#[test]
fn denylisted_visitor_shows_red_and_notifies() {
    let mut r = rig(MemoryStore::new().with(ListId::Denylist, vec![face(0.9)]));
    r.hw.script_frame(vec![face(0.9)]);

    r.app.handle_button(ButtonId::Bell, &mut r.hw, &mut r.sink);

    assert_eq!(
        r.hw.led_calls(),
        vec![(LedChannel::Red, 1), (LedChannel::Red, 0)]
    );
    let sent = &r.app.notifier().sent;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], Sent::Text(4242, ALARM_TEXT.to_owned()));
    match &sent[1] {
        Sent::Photo(chat, path, caption) => {
            assert_eq!(*chat, 4242);
            assert!(path.ends_with(format!("{}.jpeg", r.hw.now - 10)));
            assert!(caption.starts_with("\u{1F53A} - "), "{caption}");
        }
        other => panic!("expected photo, got {other:?}"),
    }
    assert!(r.sink.contains(&AppEvent::Notified { photos: 1 }));
}

#[test]
fn visitor_on_both_lists_blinks_yellow() {
    let store = MemoryStore::new()
        .with(ListId::Allowlist, vec![face(0.4)])
        .with(ListId::Denylist, vec![face(0.4)]);
    let mut r = rig(store);
    r.hw.script_frame(vec![face(0.4)]);

    let outcome = r.app.ring(&mut r.hw, &mut r.sink).unwrap();

    assert_eq!(outcome, ClassificationOutcome::BothMatch);
    assert_eq!(
        r.hw.led_calls(),
        vec![(LedChannel::Yellow, 3), (LedChannel::Yellow, 0)]
    );
    match &r.app.notifier().sent[1] {
        Sent::Photo(_, _, caption) => assert!(caption.starts_with("\u{25FE} - ")),
        other => panic!("expected photo, got {other:?}"),
    }
}

#[test]
fn unknown_visitor_shows_yellow_and_notifies() {
    let mut r = rig(MemoryStore::new().with(ListId::Allowlist, vec![face(0.1)]));
    r.hw.script_frame(vec![face(0.7)]);

    let outcome = r.app.ring(&mut r.hw, &mut r.sink).unwrap();

    assert_eq!(outcome, ClassificationOutcome::NoMatch);
    assert_eq!(
        r.hw.led_calls(),
        vec![(LedChannel::Yellow, 1), (LedChannel::Yellow, 0)]
    );
    assert_eq!(r.app.notifier().photos().len(), 1);
}

#[test]
fn bell_retries_until_a_face_appears() {
    let mut r = rig(MemoryStore::new());
    r.hw.script_frame(vec![])
        .script_frame(vec![])
        .script_frame(vec![face(0.7)]);

    r.app.ring(&mut r.hw, &mut r.sink).unwrap();

    assert_eq!(r.hw.captures(), 3);
    assert!(r.sink.contains(&AppEvent::Classified {
        outcome: ClassificationOutcome::NoMatch,
        faces: 1,
        attempts: 3,
    }));
    // All three attempts sit inside the 30 s window, oldest first.
    let photos = r.app.notifier().photos();
    assert_eq!(photos.len(), 3);
    let names: Vec<_> = photos
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn bell_gives_up_after_configured_attempts() {
    let mut r = rig(MemoryStore::new());

    let err = r.app.ring(&mut r.hw, &mut r.sink).unwrap_err();

    assert_eq!(err, Error::Capture(CaptureError::NoFaceWithinAttempts(5)));
    assert_eq!(r.hw.captures(), 5);
    assert!(r.hw.led_calls().is_empty());
    assert!(r.sink.contains(&AppEvent::RingAborted(err)));
    assert!(r.app.notifier().sent.is_empty());
}

#[test]
fn camera_failure_aborts_the_ring() {
    let mut r = rig(MemoryStore::new());
    r.hw.camera_fails = true;

    let err = r.app.ring(&mut r.hw, &mut r.sink).unwrap_err();

    assert_eq!(err, Error::Capture(CaptureError::CameraFailed));
    assert_eq!(r.hw.captures(), 1);
}

#[test]
fn unreadable_reference_list_aborts_before_display() {
    let mut store = MemoryStore::new();
    store.fail_loads = true;
    let mut r = rig(store);
    r.hw.script_frame(vec![face(0.1)]);

    let err = r.app.ring(&mut r.hw, &mut r.sink).unwrap_err();

    assert_eq!(err, Error::Store(StoreError::Io));
    assert!(r.hw.holds().is_empty());
}

#[test]
fn ring_clears_leds_left_on_by_a_mode() {
    let mut r = rig(MemoryStore::new().with(ListId::Allowlist, vec![face(0.1)]));
    r.app
        .set_mode(&[3], doorbell::mode::ModeOp::Set(1))
        .unwrap();
    r.app.push_led_states(&mut r.hw);
    r.hw.clear();
    r.hw.script_frame(vec![face(0.1)]);

    r.app.ring(&mut r.hw, &mut r.sink).unwrap();

    assert_eq!(r.hw.calls[0], HwCall::SetLed(LedChannel::Red, 0));
    assert_eq!(r.hw.led_level(LedChannel::Red), 0);
    assert_eq!(r.hw.led_level(LedChannel::Green), 0);
}

// ── Notification failures ─────────────────────────────────────

#[test]
fn missing_chat_target_is_reported_but_not_fatal() {
    let mut r = rig_with(MemoryStore::new(), None);
    r.hw.script_frame(vec![face(0.7)]);

    let outcome = r.app.ring(&mut r.hw, &mut r.sink);

    assert_eq!(outcome, Ok(ClassificationOutcome::NoMatch));
    assert!(r.sink.contains(&AppEvent::NotificationFailed(Error::Transport(
        TransportError::NoChatTarget
    ))));
    assert_eq!(r.hw.led_level(LedChannel::Yellow), 0, "LEDs still cleared");
}

#[test]
fn transport_failure_stops_remaining_photos() {
    let mut r = rig(MemoryStore::new());
    r.app.notifier_mut().fail_after = Some(1);
    r.hw.script_frame(vec![]).script_frame(vec![face(0.7)]);

    r.app.ring(&mut r.hw, &mut r.sink).unwrap();

    assert_eq!(r.app.notifier().sent.len(), 1, "only the alarm text went out");
    assert!(r.sink.contains(&AppEvent::NotificationFailed(Error::Transport(
        TransportError::Rejected
    ))));
}

// ── Direct commands ───────────────────────────────────────────

#[test]
fn ring_command_runs_the_bell_path() {
    let mut r = rig(MemoryStore::new().with(ListId::Allowlist, vec![face(0.1)]));
    r.hw.script_frame(vec![face(0.1)]);

    r.app.handle_command(AppCommand::Ring, &mut r.hw, &mut r.sink);

    assert!(r.sink.contains(&AppEvent::Classified {
        outcome: ClassificationOutcome::AllowMatch,
        faces: 1,
        attempts: 1,
    }));
    assert!(
        !r.sink.contains(&AppEvent::ButtonPressed(ButtonId::Bell)),
        "no button edge involved"
    );
    assert_eq!(r.hw.led_level(LedChannel::Green), 0);
}

#[test]
fn ring_command_failure_is_reported_through_the_sink() {
    let mut r = rig(MemoryStore::new());
    r.hw.camera_fails = true;

    r.app.handle_command(AppCommand::Ring, &mut r.hw, &mut r.sink);

    assert!(r.sink.contains(&AppEvent::RingAborted(Error::Capture(
        CaptureError::CameraFailed
    ))));
}

#[test]
fn enroll_command_bypasses_the_mode_menu() {
    let mut r = rig(MemoryStore::new());
    // Red + green is a sub-menu for the yellow button, but not for a direct command.
    r.app.handle_button(ButtonId::Red, &mut r.hw, &mut r.sink);
    r.app.handle_button(ButtonId::Green, &mut r.hw, &mut r.sink);
    r.hw.script_frame(vec![face(0.3)]);

    r.app
        .handle_command(AppCommand::Enroll(ListId::Denylist), &mut r.hw, &mut r.sink);

    assert_eq!(r.app.store().rows(ListId::Denylist), 1);
    assert!(r.sink.contains(&AppEvent::Enrolled(ListId::Denylist)));
}

#[test]
fn enroll_command_rejection_is_reported_through_the_sink() {
    let mut r = rig(MemoryStore::new());
    r.hw.script_frame(vec![]);

    r.app
        .handle_command(AppCommand::Enroll(ListId::Allowlist), &mut r.hw, &mut r.sink);

    assert_eq!(r.app.store().rows(ListId::Allowlist), 0);
    assert!(r.sink.contains(&AppEvent::EnrollmentRejected(Error::Enroll(
        EnrollError::NoFace
    ))));
}
