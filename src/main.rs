//! Headless runner
//!
//! Drives one run through the menus and the fixed-step host loop, then prints
//! a JSON summary. With the autopilot off the player never moves, which makes
//! it a quick way to watch difficulty ramp up until the first hit.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde::Serialize;

use obstacle_rush::autopilot;
use obstacle_rush::consts::SIM_DT;
use obstacle_rush::sim::{
    Character, EngineState, InputEvent, PowerupKind, SessionPhase, SimEvent, handle_input,
};
use obstacle_rush::{ConfigError, FixedStepper, Tuning, Variant};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Field variant: lanes or planar
    #[arg(long, default_value = "lanes")]
    variant: String,
    /// car, dino or cat
    #[arg(long, default_value = "car")]
    character: String,
    /// Stop after this many simulated seconds even if the run is still alive
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Host frame length in milliseconds
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,
    /// JSON tuning file; overrides the variant preset
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Disable the autopilot
    #[arg(long)]
    manual: bool,
    /// Print simulation events as JSON lines
    #[arg(long)]
    events: bool,
}

#[derive(Debug, Default, Serialize)]
struct EventCounts {
    shields_absorbed: u32,
    shields_collected: u32,
    pickups_spawned: u32,
    powerups_offered: u32,
    score_double: u32,
    half_speed: u32,
    invincible: u32,
    speed_ups: u32,
    spawn_rate_ups: u32,
}

impl EventCounts {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::ShieldAbsorbed { .. } => self.shields_absorbed += 1,
            SimEvent::ShieldCollected { .. } => self.shields_collected += 1,
            SimEvent::PickupSpawned { .. } => self.pickups_spawned += 1,
            SimEvent::PowerupOffered => self.powerups_offered += 1,
            SimEvent::PowerupActivated { kind } => match kind {
                PowerupKind::ScoreDouble => self.score_double += 1,
                PowerupKind::HalfSpeed => self.half_speed += 1,
                PowerupKind::Invincible => self.invincible += 1,
            },
            SimEvent::SpeedIncreased { .. } => self.speed_ups += 1,
            SimEvent::SpawnRateIncreased { .. } => self.spawn_rate_ups += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    variant: Variant,
    character: Character,
    autopilot: bool,
    outcome: &'static str,
    score: u64,
    elapsed: f32,
    shields: u8,
    base_speed: f32,
    spawn_interval: f32,
    ticks: u64,
    events: EventCounts,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    let cli = Cli::parse();

    let variant =
        Variant::from_str(&cli.variant).ok_or_else(|| ConfigError::UnknownVariant(cli.variant.clone()))?;
    let character = Character::from_str(&cli.character).unwrap_or_else(|| {
        log::warn!("Unknown character '{}', using car", cli.character);
        Character::Car
    });
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::for_variant(variant),
    };
    if tuning.variant() != variant {
        log::info!(
            "Tuning file sets a {} field, ignoring --variant {}",
            tuning.variant().as_str(),
            variant.as_str()
        );
    }

    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("Obstacle Rush (headless) starting, seed {}", seed);

    let mut state = EngineState::with_tuning(tuning, seed);
    let mut stepper = FixedStepper::default();
    let mut counts = EventCounts::default();

    handle_input(&mut state, InputEvent::SelectStart);
    handle_input(&mut state, InputEvent::SelectCharacter(character.id()));

    let frame_dt = (cli.frame_ms / 1000.0).max(SIM_DT);
    let use_autopilot = !cli.manual;
    let mut ticks = 0u64;

    while state.session.phase == SessionPhase::Playing && state.session.elapsed < cli.seconds {
        ticks += stepper.advance_with(&mut state, frame_dt, |state| {
            if use_autopilot {
                for input in autopilot::plan(state) {
                    handle_input(state, input);
                }
            }
        }) as u64;

        for event in state.drain_events() {
            counts.record(&event);
            if cli.events {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => log::warn!("Failed to serialize event: {}", e),
                }
            }
        }
    }

    let outcome = match state.session.phase {
        SessionPhase::GameOver => "game_over",
        _ => "time_limit",
    };
    let summary = RunSummary {
        seed,
        variant: state.tuning.variant(),
        character,
        autopilot: use_autopilot,
        outcome,
        score: state.session.score,
        elapsed: state.session.elapsed,
        shields: state.session.shields,
        base_speed: state.difficulty.base_speed,
        spawn_interval: state.difficulty.spawn_interval,
        ticks,
        events: counts,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    log::info!("Run finished: {} with score {}", outcome, summary.score);
    Ok(())
}
