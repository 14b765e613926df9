//! AsteraX headless runner.
//!
//! Runs the game core without a window: a simple autopilot flies the ship,
//! shoots at the nearest asteroid and restarts after game over. When the run
//! ends a JSON summary of the session is printed to stdout.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 3600 --seed 42
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use asterax::components::asteroid::Asteroid;
use asterax::components::mapposition::MapPosition;
use asterax::components::playership::PlayerShip;
use asterax::game::Game;
use asterax::resources::gameconfig::GameConfig;
use asterax::resources::gamestate::GameStates;
use asterax::resources::host::{Axis, Button, InputSource, LogHud};
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{error, info, warn};

/// AsteraX headless session runner
#[derive(Parser)]
#[command(version, about = "Runs an AsteraX session without a window and prints a JSON summary.")]
struct Cli {
    /// INI configuration file (default: ./asterax.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for asteroid placement and the autopilot.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

/// Controls decided by the runner for the next frame.
#[derive(Debug, Clone, Copy, Default)]
struct PilotFrame {
    movement: Vec2,
    fire: bool,
    restart: bool,
    pointer: Option<Vec2>,
}

/// Input source fed by the runner loop.
#[derive(Clone, Default)]
struct Autopilot {
    frame: Arc<Mutex<PilotFrame>>,
}

impl Autopilot {
    fn set(&self, next: PilotFrame) {
        match self.frame.lock() {
            Ok(mut frame) => *frame = next,
            Err(e) => error!("Autopilot state poisoned: {}", e),
        }
    }

    fn read(&self) -> PilotFrame {
        self.frame.lock().map(|f| *f).unwrap_or_default()
    }
}

impl InputSource for Autopilot {
    fn axis(&self, axis: Axis) -> f32 {
        let movement = self.read().movement;
        match axis {
            Axis::Horizontal => movement.x,
            Axis::Vertical => movement.y,
        }
    }

    fn button_down(&self, button: Button) -> bool {
        let frame = self.read();
        match button {
            Button::Fire => frame.fire,
            Button::Restart => frame.restart,
        }
    }

    fn pointer_world(&self) -> Option<Vec2> {
        self.read().pointer
    }
}

/// Decide the next frame's controls: flee from and shoot at the nearest asteroid.
fn steer(game: &mut Game, frame: u64, rng: &mut fastrand::Rng) -> PilotFrame {
    let world = game.world_mut();
    let ship = world
        .query_filtered::<&MapPosition, With<PlayerShip>>()
        .iter(world)
        .next()
        .map(|p| p.pos);
    let asteroids: Vec<Vec2> = world
        .query_filtered::<&MapPosition, With<Asteroid>>()
        .iter(world)
        .map(|p| p.pos)
        .collect();
    let state = game.state();

    let Some(ship) = ship else {
        return PilotFrame {
            restart: state == GameStates::GameOver && frame % 2 == 0,
            ..PilotFrame::default()
        };
    };
    let nearest = asteroids
        .iter()
        .copied()
        .min_by(|a, b| a.distance(ship).total_cmp(&b.distance(ship)));

    let jitter = Vec2::new(rng.f32() - 0.5, rng.f32() - 0.5) * 0.4;
    let movement = match nearest {
        Some(target) => (ship - target).normalize_or_zero() + jitter,
        None => jitter,
    };
    PilotFrame {
        movement,
        fire: frame % 10 < 5,
        restart: false,
        pointer: nearest,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.fps <= 0.0 {
        error!("--fps must be positive, got {}", cli.fps);
        std::process::exit(2);
    }

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if config.config_path.exists() {
        if let Err(e) = config.load_from_file() {
            warn!("Using default configuration: {}", e);
        }
    } else {
        info!(
            "{} not found, using default configuration",
            config.config_path.display()
        );
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let pilot = Autopilot::default();
    let mut game = match Game::new(config, Box::new(pilot.clone()), Box::new(LogHud), cli.seed) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to create the game: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed ^ 0x5eed),
        None => fastrand::Rng::new(),
    };
    let dt = 1.0 / cli.fps;

    game.start();
    for frame in 0..cli.frames {
        pilot.set(steer(&mut game, frame, &mut rng));
        game.tick(dt);
    }

    let summary = game.summary();
    info!(
        "Finished {} frames: {:?}, score {}",
        summary.frames, summary.state, summary.score
    );
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize the summary: {}", e);
            std::process::exit(1);
        }
    }
}
