//! `ledsim`: run the LED policy on the host against a scripted board.
//!
//! ```text
//! ┌──────────────┐  PowerSnapshot  ┌──────────────┐  colours  ┌─────────┐
//! │ script.json  │────────────────▶│  LedService  │──────────▶│ stdout  │
//! │ (SimBoard)   │   LedRequest    │              │           │         │
//! └──────────────┘────────────────▶└──────▲───────┘           └─────────┘
//!                                         │ hooks
//!                                   HookScheduler
//! ```
//!
//! The script is a JSON list of steps. Each step holds a power snapshot for
//! a number of hook ticks and may queue LED requests when it starts:
//!
//! ```json
//! [
//!   { "ticks": 10, "status": { "charge_state": "charge", "percent": 50,
//!                              "flags": 2, "chipset": "on" } },
//!   { "ticks": 20, "status": { "charge_state": "error", "percent": 50,
//!                              "flags": 0, "chipset": "on" },
//!     "requests": [ { "control": { "led": "power", "state": "off" } } ] }
//! ]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info};
use serde::Deserialize;

use ecled::adapters::log_sink::LogEventSink;
use ecled::app::commands::LedRequest;
use ecled::app::ports::{LedOutputPort, PowerStatusPort};
use ecled::app::service::{LedService, ServiceHooks};
use ecled::auto_control::{HostLedControl, LedShared};
use ecled::fsm::context::PowerSnapshot;
use ecled::fsm::{LedState, StateTable};
use ecled::led::{BrightnessArray, LED_COLOR_COUNT, LedColor, LedId};
use ecled::profile::BoardProfile;
use ecled::scheduler::{HookDelegate, HookKind, HookScheduler};

static SHARED: LedShared = LedShared::new();

// ── Command line ──────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Simulate the battery/power LED policy")]
struct Args {
    /// JSON script of power snapshots.
    #[arg(required_unless_present = "export")]
    script: Option<PathBuf>,

    /// Board profile: JSON, or postcard bytes when the file ends in
    /// `.bin`. Defaults to the built-in reference profile.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Write the loaded profile as postcard bytes to this path and exit.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Wall-clock milliseconds per hook tick.
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Stop after this many ticks instead of at the end of the script.
    #[arg(long)]
    ticks: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ── Scripted board ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Step {
    ticks: u64,
    status: PowerSnapshot,
    #[serde(default = "yes")]
    can_boot_ap: bool,
    #[serde(default)]
    requests: Vec<LedRequest>,
}

fn yes() -> bool {
    true
}

struct SimBoard {
    steps: Vec<Step>,
    index: usize,
    started: bool,
    left: u64,
    shown: [LedColor; LedId::COUNT],
    ranges: [BrightnessArray; LedId::COUNT],
}

impl SimBoard {
    fn new(steps: Vec<Step>, profile: &BoardProfile) -> Self {
        let mut ranges = [[0; LED_COLOR_COUNT]; LedId::COUNT];
        ranges[LedId::Battery as usize] = table_range(&profile.battery);
        ranges[LedId::Power as usize] = table_range(&profile.power);
        Self {
            steps,
            index: 0,
            started: false,
            left: 0,
            shown: [LedColor::Off; LedId::COUNT],
            ranges,
        }
    }

    /// Move to the next step when the current one has run out, queueing
    /// its requests. The last step holds once the script is exhausted.
    fn advance(&mut self, host: HostLedControl<'_>) {
        while self.left == 0 {
            let next = if self.started { self.index + 1 } else { 0 };
            let Some(step) = self.steps.get(next) else {
                break;
            };
            self.started = true;
            self.index = next;
            self.left = step.ticks;
            for req in &step.requests {
                if let Err(e) = host.submit(req.clone()) {
                    log::warn!("script request dropped: {}", e);
                }
            }
        }
        self.left = self.left.saturating_sub(1);
    }

    fn current(&self) -> Option<&Step> {
        self.steps.get(self.index)
    }
}

/// Every colour a table uses becomes an on/off channel.
fn table_range<S: LedState>(table: &StateTable<S>) -> BrightnessArray {
    let mut range = [0; LED_COLOR_COUNT];
    for &state in S::ALL {
        for d in table.phases(state) {
            if let Some(i) = d.color.channel() {
                range[i] = 1;
            }
        }
    }
    range
}

impl PowerStatusPort for SimBoard {
    fn read_status(&mut self) -> PowerSnapshot {
        self.current().map(|s| s.status).unwrap_or_default()
    }

    fn can_boot_ap(&mut self) -> bool {
        self.current().is_none_or(|s| s.can_boot_ap)
    }
}

impl LedOutputPort for SimBoard {
    fn set_color(&mut self, led: LedId, color: LedColor) -> ecled::error::Result<()> {
        self.shown[led as usize] = color;
        Ok(())
    }

    fn brightness_range(&self, led: LedId) -> BrightnessArray {
        self.ranges[led as usize]
    }

    fn set_brightness(&mut self, led: LedId, brightness: &BrightnessArray) -> ecled::error::Result<()> {
        let range = self.ranges[led as usize];
        self.shown[led as usize] = LedColor::CHANNELS
            .iter()
            .zip(brightness.iter().zip(range.iter()))
            .find(|(_, (b, r))| **b != 0 && **r != 0)
            .map_or(LedColor::Off, |(c, _)| *c);
        Ok(())
    }
}

// ── Hook delegate ─────────────────────────────────────────────

struct Sim<'s> {
    hooks: ServiceHooks<'s, 'static, ecled::app::policy::DefaultPolicy, SimBoard, LogEventSink>,
    tick: u64,
}

impl HookDelegate for Sim<'_> {
    fn on_hook(&mut self, kind: HookKind) {
        if kind == HookKind::Tick {
            self.hooks.hw.advance(SHARED.host());
        }
        self.hooks.on_hook(kind);
        if kind == HookKind::Tick {
            self.tick += 1;
            let shown = &self.hooks.hw.shown;
            println!(
                "{:>5}  battery={:<6} power={}",
                self.tick,
                shown[LedId::Battery as usize],
                shown[LedId::Power as usize]
            );
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn load_profile(path: &Path) -> Result<BoardProfile> {
    if path.extension().is_some_and(|ext| ext == "bin") {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading profile {}", path.display()))?;
        return BoardProfile::from_bytes(&bytes)
            .with_context(|| format!("decoding profile {}", path.display()));
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading profile {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing profile {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG still overrides the -v level.
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .parse_default_env()
        .init();

    let profile = match &args.profile {
        Some(path) => load_profile(path)?,
        None => BoardProfile::reference(),
    };

    if let Some(path) = &args.export {
        let bytes = profile.to_bytes().context("encoding profile")?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("writing profile {}", path.display()))?;
        info!("profile '{}' written, {} bytes", profile.name, bytes.len());
        return Ok(());
    }

    let Some(script) = &args.script else {
        bail!("no script given");
    };
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("reading script {}", script.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&text)
        .with_context(|| format!("parsing script {}", script.display()))?;
    if steps.is_empty() {
        bail!("script {} has no steps", script.display());
    }
    let total: u64 = steps.iter().map(|s| s.ticks).sum();

    let mut service =
        LedService::new(&profile, &SHARED).context("profile rejected")?;
    let mut board = SimBoard::new(steps, &profile);
    let mut sink = LogEventSink::new();
    service.init(&mut board, &mut sink);
    info!("profile '{}', {} ticks", profile.name, args.ticks.unwrap_or(total));

    let mut sim = Sim {
        hooks: ServiceHooks {
            service: &mut service,
            hw: &mut board,
            sink: &mut sink,
        },
        tick: 0,
    };
    let mut scheduler = HookScheduler::new().with_period(Duration::from_millis(args.interval_ms));
    futures_lite::future::block_on(scheduler.run(&mut sim, Some(args.ticks.unwrap_or(total))));

    Ok(())
}
