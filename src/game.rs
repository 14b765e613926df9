//! Game setup, state enter hooks and the host-facing [`Game`] façade.
//!
//! A host drives the game with three calls:
//!
//! - [`Game::new`] builds the world, registers observers and hooks, and
//!   spawns the player ship. The game starts in `MainMenu`.
//! - [`Game::tick`] advances one frame.
//! - [`Game::on_collision`] reports a contact found by the host's physics.
//!
//! [`Game::start`] leaves the main menu and [`Game::restart`] reloads the
//! session.
//!
//! # Level flow
//!
//! ```text
//! MainMenu -start-> PreLevel -> Level -(no asteroids)-> PostLevel -(delay)-> PreLevel
//!                                  \-(no lives)-> GameOver -restart-> PreLevel
//! ```
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use glam::Vec2;
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::playership::{PlayerShip, ShipState};
use crate::components::rigidbody::RigidBody;
use crate::error::GameError;
use crate::events::collision::CollisionEvent;
use crate::events::gamestate::{
    ENTER_GAME_OVER, ENTER_LEVEL, ENTER_POST_LEVEL, ENTER_PRE_LEVEL, GameStateChangedEvent,
    observe_gamestate_change_event,
};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::host::{Hud, HudSink, InputDevice, InputSource};
use crate::resources::input::InputState;
use crate::resources::registry::EntityRegistry;
use crate::resources::rng::GameRng;
use crate::resources::screenbounds::ScreenBounds;
use crate::resources::session::Session;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::timerqueue::{TimerQueue, TimerSignal};
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{collision_detector, collision_observer};
use crate::systems::gamestate::{check_pending_state, state_is_level};
use crate::systems::hud::hud_sync_system;
use crate::systems::input::{RESTART_SYSTEM, input_action_observer, update_input_state};
use crate::systems::level::level_cleared_system;
use crate::systems::movement::{movement, screen_wrap_system};
use crate::systems::playercontroller::{fire_control, player_controller};
use crate::systems::spawner::{spawn_parent_asteroid, spawn_player_ship};
use crate::systems::time::update_world_time;
use crate::systems::timers::{timer_observer, update_timers};
use crate::systems::ttl::ttl_system;

/// Upper bound on chained transitions applied after one frame.
const MAX_CHAINED_TRANSITIONS: usize = 8;

/// Snapshot of a running game, printed by the headless runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub state: GameStates,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub ship: Option<ShipState>,
    pub asteroids: usize,
    pub bullets: usize,
    pub pending_timers: usize,
    pub frames: u64,
    pub elapsed: f32,
}

/// The game world plus its per-frame schedule.
pub struct Game {
    world: World,
    schedule: Schedule,
    hud_sync: SystemId,
}

impl Game {
    /// Build a new game in the `MainMenu` state.
    ///
    /// `seed` makes spawning and relocation reproducible.
    pub fn new(
        config: GameConfig,
        input: Box<dyn InputSource>,
        hud: Box<dyn HudSink>,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.insert_resource(InputState::default());
        world.insert_resource(EntityRegistry::default());
        world.insert_resource(TimerQueue::new());
        world.insert_resource(config.screen_bounds());
        world.insert_resource(match seed {
            Some(seed) => GameRng::with_seed(seed),
            None => GameRng::default(),
        });
        world.insert_resource(InputDevice(input));
        world.insert_resource(Hud(hud));
        Session::install(&mut world, config.starting_lives)?;

        world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
        world.spawn((Observer::new(collision_observer), Persistent));
        world.spawn((Observer::new(timer_observer), Persistent));
        world.spawn((Observer::new(input_action_observer), Persistent));

        // Registered systems are entities; Persistent keeps them alive across restarts.
        let mut systems_store = SystemsStore::new();
        let hooks: [(&str, SystemId); 5] = [
            (ENTER_PRE_LEVEL, world.register_system(enter_pre_level)),
            (ENTER_LEVEL, world.register_system(enter_level)),
            (ENTER_POST_LEVEL, world.register_system(enter_post_level)),
            (ENTER_GAME_OVER, world.register_system(enter_game_over)),
            (RESTART_SYSTEM, world.register_system(restart_system)),
        ];
        for (name, id) in hooks {
            world.entity_mut(id.entity()).insert(Persistent);
            systems_store.insert(name, id);
        }
        world.insert_resource(systems_store);

        let hud_sync = world.register_system(hud_sync_system);
        world.entity_mut(hud_sync.entity()).insert(Persistent);

        spawn_player_ship(&mut world, &config)?;
        world.insert_resource(config);
        world.flush();

        let mut game = Game {
            world,
            schedule: build_schedule(),
            hud_sync,
        };
        game.request_state(GameStates::MainMenu);
        game.apply_pending_state();
        game.refresh_hud();
        info!("Game created");
        Ok(game)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn state(&self) -> GameStates {
        self.world.resource::<GameState>().get()
    }

    pub fn session(&self) -> Result<&Session, GameError> {
        Session::read(&self.world)
    }

    /// The live player ship, if any.
    pub fn ship(&mut self) -> Option<Entity> {
        self.world
            .query_filtered::<Entity, With<PlayerShip>>()
            .iter(&self.world)
            .next()
    }

    pub fn ship_state(&mut self) -> Option<ShipState> {
        self.world
            .query::<&PlayerShip>()
            .iter(&self.world)
            .next()
            .map(|ship| ship.state)
    }

    /// Leave the main menu and start the first level.
    pub fn start(&mut self) {
        if self.state() != GameStates::MainMenu {
            warn!("Game::start called in {:?}, ignored", self.state());
            return;
        }
        self.request_state(GameStates::PreLevel);
        self.apply_pending_state();
        self.refresh_hud();
    }

    /// Advance the game by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.apply_pending_state();
        self.refresh_hud();
        self.world.clear_trackers();
    }

    /// Report a contact between two entities found outside the built-in
    /// detector.
    pub fn on_collision(&mut self, a: Entity, b: Entity) {
        self.world.trigger(CollisionEvent { a, b });
        self.world.flush();
        self.apply_pending_state();
        self.refresh_hud();
    }

    /// Reload the session: fresh score and lives, new ship, back to `PreLevel`.
    pub fn restart(&mut self) -> Result<(), GameError> {
        restart_session(&mut self.world)?;
        self.apply_pending_state();
        self.refresh_hud();
        Ok(())
    }

    pub fn summary(&mut self) -> SessionSummary {
        let ship = self.ship_state();
        let registry = self.world.resource::<EntityRegistry>();
        let (asteroids, bullets) = (registry.asteroid_count(), registry.bullet_count());
        let pending_timers = self.world.resource::<TimerQueue>().len();
        let time = *self.world.resource::<WorldTime>();
        let session = self.world.get_resource::<Session>();
        SessionSummary {
            state: self.state(),
            score: session.map_or(0, Session::score),
            lives: session.map_or(0, Session::lives),
            level: session.map_or(0, Session::level),
            ship,
            asteroids,
            bullets,
            pending_timers,
            frames: time.frame_count,
            elapsed: time.elapsed,
        }
    }

    fn request_state(&mut self, state: GameStates) {
        self.world.resource_mut::<NextGameState>().set(state);
    }

    /// Apply pending transitions, including those requested by enter hooks.
    fn apply_pending_state(&mut self) {
        for _ in 0..MAX_CHAINED_TRANSITIONS {
            if self.world.resource::<NextGameState>().get() == NextGameStates::Unchanged {
                return;
            }
            self.world.trigger(GameStateChangedEvent {});
            self.world.flush();
        }
        warn!(
            "More than {} chained state transitions in one frame, deferring the rest",
            MAX_CHAINED_TRANSITIONS
        );
    }

    fn refresh_hud(&mut self) {
        if let Err(e) = self.world.run_system(self.hud_sync) {
            let e = GameError::SystemFailed {
                name: "hud_sync".to_string(),
                reason: e.to_string(),
            };
            error!("{}", e);
        }
    }
}

fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(
        player_controller
            .after(update_input_state)
            .run_if(state_is_level),
    );
    update.add_systems(fire_control.after(update_input_state).run_if(state_is_level));
    update.add_systems(movement.after(player_controller));
    update.add_systems(screen_wrap_system.after(movement));
    update.add_systems(ttl_system.after(movement));
    update.add_systems(
        collision_detector
            .after(screen_wrap_system)
            .after(fire_control)
            .run_if(state_is_level),
    );
    update.add_systems(update_timers.after(collision_detector));
    update.add_systems(
        level_cleared_system
            .after(collision_detector)
            .after(ttl_system)
            .run_if(state_is_level),
    );
    update.add_systems(
        check_pending_state
            .after(level_cleared_system)
            .after(update_timers),
    );
    update
}

/// Enter hook for `PreLevel`: announce the level and start it.
pub fn enter_pre_level(session: Option<Res<Session>>, mut next_state: ResMut<NextGameState>) {
    match session {
        Some(session) => info!("Level {} starting", session.level()),
        None => error!("enter_pre_level - session not initialized"),
    }
    next_state.set(GameStates::Level);
}

/// Enter hook for `Level`: spawn the level's parent asteroids away from the ship.
pub fn enter_level(
    mut commands: Commands,
    session: Option<Res<Session>>,
    config: Res<GameConfig>,
    bounds: Res<ScreenBounds>,
    mut registry: ResMut<EntityRegistry>,
    mut rng: ResMut<GameRng>,
    ship: Query<&MapPosition, With<PlayerShip>>,
) {
    let level = session.map_or(1, |s| s.level());
    let count = config.asteroids_for_level(level);
    let ship_pos = ship.iter().next().map(|p| p.pos);
    for index in 0..count {
        spawn_parent_asteroid(
            index,
            &mut commands,
            &mut registry,
            &config,
            &bounds,
            ship_pos,
            &mut rng,
        );
    }
    info!("Level {}: {} asteroids spawned", level, count);
}

/// Stop the ship. The controller only runs in `Level`, so without this a ship
/// leaving `Level` would keep its last velocity.
fn halt_ship(ships: &mut Query<&mut RigidBody, With<PlayerShip>>) {
    for mut rigidbody in ships.iter_mut() {
        rigidbody.set_velocity(Vec2::ZERO);
    }
}

/// Enter hook for `PostLevel`: stop the ship, bump the level and schedule the
/// next one.
pub fn enter_post_level(
    session: Option<ResMut<Session>>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut timers: ResMut<TimerQueue>,
    mut ships: Query<&mut RigidBody, With<PlayerShip>>,
) {
    halt_ship(&mut ships);
    match session {
        Some(mut session) => {
            let level = session.next_level();
            debug!("Next level will be {}", level);
        }
        None => error!("enter_post_level - session not initialized"),
    }
    timers.schedule(
        time.elapsed,
        config.post_level_delay,
        None,
        TimerSignal::PostLevelDone,
    );
}

/// Enter hook for `GameOver`: show the panel and stop the level flow.
pub fn enter_game_over(
    hud: Option<ResMut<Hud>>,
    mut timers: ResMut<TimerQueue>,
    session: Option<Res<Session>>,
    mut ships: Query<&mut RigidBody, With<PlayerShip>>,
) {
    halt_ship(&mut ships);
    timers.cancel_signal(TimerSignal::PostLevelDone);
    match hud {
        Some(mut hud) => hud.0.set_game_over_visible(true),
        None => warn!("enter_game_over - no HUD to show the game over panel"),
    }
    if let Some(session) = session {
        info!("Game over, final score {}", session.score());
    }
}

/// Exclusive system wrapper around [`restart_session`].
pub fn restart_system(world: &mut World) {
    if let Err(e) = restart_session(world) {
        error!("Restart failed: {}", e);
    }
}

/// Reset the world to the start of a session.
///
/// Despawns every non-persistent game entity, resets the session, hides the
/// game over panel, spawns a new ship and requests `PreLevel`.
pub fn restart_session(world: &mut World) -> Result<(), GameError> {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, (With<Group>, Without<Persistent>)>()
        .iter(world)
        .collect();
    for entity in &doomed {
        world.despawn(*entity);
    }
    debug!("Restart despawned {} entities", doomed.len());

    world.resource_mut::<EntityRegistry>().clear();
    world.resource_mut::<TimerQueue>().clear();

    match world.get_resource_mut::<Session>() {
        Some(mut session) => session.reset(),
        None => {
            error!("restart_session - attempt to reset the session before it has been set.");
            return Err(GameError::NotInitialized("Session"));
        }
    }

    if let Some(mut hud) = world.get_resource_mut::<Hud>() {
        hud.0.set_game_over_visible(false);
    }

    let config = world
        .get_resource::<GameConfig>()
        .cloned()
        .ok_or(GameError::NotInitialized("GameConfig"))?;
    spawn_player_ship(world, &config)?;

    // From None so PreLevel is entered even if restart happens in PreLevel.
    world.resource_mut::<GameState>().set(GameStates::None);
    world.resource_mut::<NextGameState>().set(GameStates::PreLevel);
    info!("Session restarted");
    Ok(())
}
