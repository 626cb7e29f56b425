//! Doorbell: Main Entry Point
//!
//! Hexagonal architecture with a single polled event loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioBoard          LogEventSink   CsvReferenceStore           │
//! │  (LED+Time+Camera   (EventSink)    (ReferenceStorePort)        │
//! │   +FaceEngine)      LogNotifier (NotifierPort)                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          DoorbellController (pure logic)               │    │
//! │  │  ModeRegister · LedArbiter · Classifier · Notify       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use doorbell::adapters::board::GpioBoard;
use doorbell::adapters::log_sink::LogEventSink;
use doorbell::adapters::sim::{LogNotifier, NullFaceEngine, SimCamera, SimPin};
use doorbell::app::commands::AppCommand;
use doorbell::app::events::AppEvent;
use doorbell::app::ports::EventSink;
use doorbell::app::service::DoorbellController;
use doorbell::config::DoorbellConfig;
use doorbell::drivers::button::ButtonDriver;
use doorbell::drivers::led::LedDriver;
use doorbell::events::{Event, EventQueue};
use doorbell::mode::channels::{ButtonId, Channel, LedChannel};
use doorbell::storage::reference_list::CsvReferenceStore;

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Doorbell v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = DoorbellConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let channels = config
        .validate()
        .with_context(|| format!("validating {}", config_path.display()))?;

    for channel in Channel::ALL {
        info!(
            "{:<13} pin={:<3} slot={}",
            channel.name(),
            channels.pin(channel),
            channels.slot(channel)
        );
    }

    // ── 3. Board ──────────────────────────────────────────────
    let buttons = ButtonId::ALL.map(|id| {
        let debounce = match id {
            ButtonId::Bell => config.bell_debounce_ms,
            _ => config.mode_debounce_ms,
        };
        ButtonDriver::new(id, SimPin::input(), debounce)
    });
    let leds = LedChannel::ALL.map(|ch| LedDriver::new(ch, SimPin::output()));
    let poll_interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    let mut board = GpioBoard::new(buttons, leds, SimCamera::new(), NullFaceEngine, poll_interval);

    // ── 4. Controller ─────────────────────────────────────────
    let store = CsvReferenceStore::new(&config.lists_dir);
    let notifier = LogNotifier::new(config.chat_id);
    let mut app = DoorbellController::new(&config, store, notifier)
        .context("building controller")?;
    let mut sink = LogEventSink::new();
    let mut queue = EventQueue::new();

    app.start(&mut board, &mut sink);

    // ── 5. Event loop ─────────────────────────────────────────
    let heartbeat_every = config.heartbeat_every.max(1);
    let mut iterations: u32 = 0;
    let mut heartbeats: u64 = 0;

    loop {
        std::thread::sleep(poll_interval);
        board.tick_leds();
        board.poll_buttons(&mut queue);

        iterations += 1;
        if iterations >= heartbeat_every {
            iterations = 0;
            queue.push(Event::HeartbeatTick);
        }

        queue.drain(|event| match event {
            Event::Button(button) => {
                app.handle_command(AppCommand::Press(button), &mut board, &mut sink);
            }
            Event::HeartbeatTick => {
                heartbeats += 1;
                sink.emit(&AppEvent::Heartbeat(heartbeats));
            }
        });
    }
}
