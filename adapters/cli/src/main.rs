#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! `lastlight` binary: runs a headless survivor run and persists progression.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use lastlight_cli::config::RunTuning;
use lastlight_cli::progression::{load_progression, save_progression, TomlProgressionStore};
use lastlight_cli::runner::Runner;
use lastlight_core::WELCOME_BANNER;

/// Movement speed of the scripted pilot before buffs, in units per second.
const PILOT_SPEED: f32 = 180.0;
/// How far beyond the zone edge the pilot hunts.
const HUNT_RANGE: f32 = 520.0;

#[derive(Debug, Parser)]
#[command(name = "lastlight", about = "Headless Lastlight run simulation")]
struct Args {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 7_200)]
    ticks: u64,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Seed for the deterministic spawn stream.
    #[arg(long, default_value_t = 0x1a57_11)]
    seed: u64,

    /// Optional TOML tuning file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML save file holding cross-run progression.
    #[arg(long, default_value = "lastlight-save.toml")]
    save: PathBuf,

    /// Print the HUD every this many ticks.
    #[arg(long, default_value_t = 250)]
    hud_every: u64,
}

/// Deterministic patrol: rest at the zone center, then hunt outside it.
struct Pilot {
    hunting: bool,
    timer: Duration,
    rest: Duration,
    hunt: Duration,
}

impl Pilot {
    fn new() -> Self {
        Self {
            hunting: true,
            timer: Duration::ZERO,
            rest: Duration::from_secs(6),
            hunt: Duration::from_secs(20),
        }
    }

    fn steer(&mut self, dt: Duration, position: Vec2, center: Vec2, radius: f32) -> Vec2 {
        self.timer = self.timer.saturating_add(dt);
        let phase = if self.hunting { self.hunt } else { self.rest };
        if self.timer >= phase {
            self.hunting = !self.hunting;
            self.timer = Duration::ZERO;
        }
        let target = if self.hunting {
            center + Vec2::X * (radius + HUNT_RANGE)
        } else {
            center
        };
        (target - position)
            .try_normalize()
            .map_or(Vec2::ZERO, |direction| direction * PILOT_SPEED)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    println!("{WELCOME_BANNER}");

    let tuning = RunTuning::load(args.config.as_deref())?;
    let mut store = TomlProgressionStore::open(args.save.clone())
        .with_context(|| format!("opening save file {}", args.save.display()))?;
    let progression = load_progression(&mut store).context("loading progression")?;
    tracing::info!(
        salvage = progression.salvage,
        best_wave = progression.best_wave,
        "progression loaded",
    );

    let dt = Duration::from_millis(args.tick_ms);
    let mut runner = Runner::new(tuning, progression, args.seed);
    let mut pilot = Pilot::new();

    for tick in 0..args.ticks {
        let velocity = pilot.steer(
            dt,
            runner.player_position(),
            runner.zone_center(),
            runner.zone_radius(),
        );
        let hud = runner.advance(dt, velocity);
        if args.hud_every > 0 && tick % args.hud_every == 0 {
            for line in hud.render_lines() {
                println!("{line}");
            }
        }
        if !runner.player_alive() {
            tracing::info!(tick, "player died, ending run");
            break;
        }
    }

    let summary = runner.summary();
    let final_progression = runner.final_progression();
    save_progression(&mut store, &final_progression).context("saving progression")?;
    tracing::info!(
        run_xp = summary.run_xp,
        kills = summary.kills,
        boss_kills = summary.boss_kills,
        best_wave = summary.best_wave,
        "run complete, progression saved",
    );
    Ok(())
}
