//! pet-runner: headless driver for the pixel pet core.
//!
//! Usage:
//!   pet-runner --db pet.db --seconds 120
//!   pet-runner --db pet.db --ipc-mode
//!   pet-runner widget --db pet.db --count 20
//!
//! `widget` plays the part of the separate timeline-rendering process:
//! it reads the shared store once and prints a timeline.

use anyhow::Result;
use pixelpet_core::{
    command::PetCommand,
    config::PetConfig,
    engine::PetEngine,
    event::PetEvent,
    overlay::{DismissalPolicy, OverlayAttributes, OverlayContent, OverlayError, OverlayHost, OverlayState},
    sprites,
    store::SnapshotStore,
    timeline::TimelinePresenter,
    types::Millis,
    variant::PetVariant,
};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};
use uuid::Uuid;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Advance { ms: Millis },
    Command(PetCommand),
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    now_ms:    Millis,
    name:      String,
    variant:   PetVariant,
    icon:      &'static str,
    hunger:    f64,
    happiness: f64,
    energy:    f64,
    frame:     u64,
    animating: bool,
    overlay:   OverlayState,
    events:    Vec<PetEvent>,
}

/// Overlay host for headless runs: always permitted, every call logged.
#[derive(Default)]
struct LogOverlayHost {
    pushes: u64,
}

impl OverlayHost for LogOverlayHost {
    fn overlays_enabled(&self) -> bool {
        true
    }

    fn request(
        &mut self,
        session_id: Uuid,
        attributes: &OverlayAttributes,
        content: &OverlayContent,
    ) -> Result<(), OverlayError> {
        log::info!(
            "overlay request {session_id}: {} ({})",
            attributes.pet_display_name,
            content.variant_tag
        );
        Ok(())
    }

    fn update(&mut self, session_id: Uuid, content: &OverlayContent) -> Result<(), OverlayError> {
        self.pushes += 1;
        log::debug!(
            "overlay push {session_id}: frame={} hunger={:.2} happiness={:.2} energy={:.2}",
            content.frame,
            content.hunger,
            content.happiness,
            content.energy
        );
        Ok(())
    }

    fn end(
        &mut self,
        session_id: Uuid,
        _content: &OverlayContent,
        dismissal: DismissalPolicy,
    ) -> Result<(), OverlayError> {
        log::info!("overlay end {session_id} ({dismissal:?}) after {} pushes", self.pushes);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => PetConfig::load(path)?,
        None => PetConfig::default(),
    };
    if let Some(db) = flag_value(&args, "--db") {
        config.store.db_path = db.to_string();
    }

    if args.get(1).map(String::as_str) == Some("widget") {
        return run_widget(&config, parse_arg(&args, "--count", config.timeline.entry_count));
    }

    let store = SnapshotStore::open_or_detached(&config.store.db_path, &config.store.suite);
    let mut engine = PetEngine::build(&config, store, LogOverlayHost::default());

    if args.iter().any(|a| a == "--ipc-mode") {
        run_ipc_loop(&mut engine)?;
    } else {
        let seconds = parse_arg(&args, "--seconds", 120u64);
        run_demo(&mut engine, &config, seconds)?;
    }
    engine.shutdown();
    Ok(())
}

fn run_widget(config: &PetConfig, count: usize) -> Result<()> {
    let store = SnapshotStore::open_or_detached(&config.store.db_path, &config.store.suite);
    let mut timeline_config = config.timeline.clone();
    timeline_config.entry_count = count;
    let presenter = TimelinePresenter::new(timeline_config);
    let timeline = presenter.timeline(&store, chrono::Utc::now());
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}

fn run_ipc_loop(engine: &mut PetEngine<LogOverlayHost>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let events = match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => Vec::new(),
            IpcRequest::Advance { ms } => engine.advance_by(ms),
            IpcRequest::Command(command) => match engine.apply(command) {
                Ok(events) => events,
                Err(e) => {
                    writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                    stdout.flush()?;
                    continue;
                }
            },
        };
        let state = build_ui_state(engine, events);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_demo(engine: &mut PetEngine<LogOverlayHost>, config: &PetConfig, seconds: u64) -> Result<()> {
    println!("Pixel Pet pet-runner");
    println!("  db:       {}", config.store.db_path);
    println!("  suite:    {}", config.store.suite);
    println!("  seconds:  {seconds}");
    println!();

    // (at ms, command)
    let script: [(Millis, PetCommand); 5] = [
        (0, PetCommand::StartOverlay),
        (5_000, PetCommand::Feed),
        (10_000, PetCommand::Pet),
        (20_000, PetCommand::Sleep),
        (40_000, PetCommand::ChangeVariant { variant: PetVariant::Ghost }),
    ];

    let end = seconds.saturating_mul(1_000);
    let mut tally: BTreeMap<&'static str, u64> = BTreeMap::new();
    for (at, command) in script.into_iter().filter(|(at, _)| *at <= end) {
        record(&mut tally, &engine.advance_to(at));
        record(&mut tally, &engine.apply(command)?);
    }
    record(&mut tally, &engine.advance_to(end));
    record(&mut tally, &engine.shutdown());

    print_summary(engine, &tally);
    Ok(())
}

fn record(tally: &mut BTreeMap<&'static str, u64>, events: &[PetEvent]) {
    for e in events {
        *tally.entry(e.type_name()).or_default() += 1;
    }
}

fn build_ui_state(engine: &PetEngine<LogOverlayHost>, events: Vec<PetEvent>) -> UiState {
    let s = engine.state();
    UiState {
        now_ms:    engine.now(),
        name:      s.name.clone(),
        variant:   s.variant,
        icon:      s.variant.icon(),
        hunger:    s.hunger.value(),
        happiness: s.happiness.value(),
        energy:    s.energy.value(),
        frame:     s.display_frame(),
        animating: s.animating,
        overlay:   engine.overlay().state(),
        events,
    }
}

fn print_summary(engine: &PetEngine<LogOverlayHost>, tally: &BTreeMap<&'static str, u64>) {
    let s = engine.state();
    println!("=== RUN SUMMARY ===");
    println!("  virtual time:   {} ms", engine.now());
    println!("  pet:            {} {} ({})", s.variant.icon(), s.name, s.variant.display_name());
    println!("  hunger:         {:.2}", s.hunger.value());
    println!("  happiness:      {:.2}", s.happiness.value());
    println!("  energy:         {:.2}", s.energy.value());
    println!("  overlay pushes: {}", engine.overlay().host().pushes);
    println!();
    println!("=== EVENTS ===");
    for (name, n) in tally {
        println!("  {name:<20} {n}");
    }
    println!();
    for row in sprites::frame_rows(s.variant, s.frame_index) {
        println!("  {}", row.replace(sprites::TRANSPARENT, " "));
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
