//! Asteroid and ship spawning.
//!
//! - [`find_spawn_location`] picks a random on-screen point far enough from
//!   the ship. It tries at most `max_attempts` random points and then falls
//!   back to the screen corner farthest from the ship, so a pathological
//!   configuration cannot stall the frame.
//! - [`spawn_parent_asteroid`] places one level asteroid.
//! - [`split_velocities`] computes diverging child velocities when an
//!   asteroid breaks.
//! - [`spawn_player_ship`] creates the single player ship.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error, info, warn};
use smallvec::SmallVec;

use crate::components::asteroid::{Asteroid, AsteroidSize};
use crate::components::circlecollider::CircleCollider;
use crate::components::group::{ASTEROID, Group, SHIP};
use crate::components::inputcontrolled::{InputControlled, Shooter};
use crate::components::mapposition::MapPosition;
use crate::components::playership::PlayerShip;
use crate::components::rigidbody::RigidBody;
use crate::components::screenwrap::ScreenWrap;
use crate::error::GameError;
use crate::resources::gameconfig::GameConfig;
use crate::resources::registry::EntityRegistry;
use crate::resources::rng::GameRng;
use crate::resources::screenbounds::ScreenBounds;

/// Everything needed to create one asteroid entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: AsteroidSize,
}

/// Pick a random on-screen location at least `min_distance` from the ship.
///
/// `ship` is `None` when no ship exists yet; that is a lifecycle bug, so it is
/// logged and the origin is used instead.
pub fn find_spawn_location(
    bounds: &ScreenBounds,
    ship: Option<Vec2>,
    min_distance: f32,
    max_attempts: u32,
    rng: &mut GameRng,
) -> Vec2 {
    let ship_pos = ship.unwrap_or_else(|| {
        error!("find_spawn_location - ship position read before the ship was spawned");
        Vec2::ZERO
    });

    for _ in 0..max_attempts {
        let candidate = bounds.random_on_screen(&mut rng.0);
        if candidate.distance(ship_pos) >= min_distance {
            return candidate;
        }
    }

    let corner = bounds.farthest_corner(ship_pos);
    if corner.distance(ship_pos) < min_distance {
        warn!(
            "No on-screen point is {} away from the ship at {:?}; using corner {:?}",
            min_distance, ship_pos, corner
        );
    } else {
        debug!(
            "No spawn location found in {} attempts, using corner {:?}",
            max_attempts, corner
        );
    }
    corner
}

/// Random drift velocity with a speed in the configured range.
pub fn random_drift(config: &GameConfig, rng: &mut GameRng) -> Vec2 {
    let speed = rng.range_f32(config.asteroid_min_speed, config.asteroid_max_speed);
    Vec2::from_angle(rng.angle()) * speed
}

/// Create an asteroid entity and register it.
pub fn spawn_asteroid_entity(
    commands: &mut Commands,
    registry: &mut EntityRegistry,
    config: &GameConfig,
    spawn: AsteroidSpawn,
) -> Entity {
    let mut entity = commands.spawn((
        Asteroid::new(spawn.size),
        Group::new(ASTEROID),
        MapPosition::from_vec(spawn.position),
        RigidBody::with_velocity(spawn.velocity),
        CircleCollider::new(config.asteroid_radius(spawn.size)),
    ));
    if config.screen_wrap {
        entity.insert(ScreenWrap);
    }
    let id = entity.id();
    registry.add_asteroid(id);
    id
}

/// Place the `index`-th parent asteroid of a level.
///
/// The asteroid gets the configured initial tier, a random drift, and a
/// position at least `min_asteroid_dist_from_ship` from the ship.
pub fn spawn_parent_asteroid(
    index: u32,
    commands: &mut Commands,
    registry: &mut EntityRegistry,
    config: &GameConfig,
    bounds: &ScreenBounds,
    ship: Option<Vec2>,
    rng: &mut GameRng,
) -> Entity {
    let position = find_spawn_location(
        bounds,
        ship,
        config.min_asteroid_dist_from_ship,
        config.max_spawn_attempts,
        rng,
    );
    let velocity = random_drift(config, rng);
    let entity = spawn_asteroid_entity(
        commands,
        registry,
        config,
        AsteroidSpawn {
            position,
            velocity,
            size: config.initial_size,
        },
    );
    debug!(
        "Asteroid_{:02} ({}) spawned at {:?} as {:?}",
        index, config.initial_size, position, entity
    );
    entity
}

/// Velocities for `count` children of a broken asteroid.
///
/// Children fan out symmetrically around the parent's heading, spanning
/// `[-spread, +spread]` degrees, so two children always move apart. A parent
/// at rest gets a random heading. Each child speed is drawn from the
/// configured range but never slower than the parent.
pub fn split_velocities(
    parent_velocity: Vec2,
    count: u32,
    config: &GameConfig,
    rng: &mut GameRng,
) -> SmallVec<[Vec2; 4]> {
    let heading = parent_velocity
        .try_normalize()
        .unwrap_or_else(|| Vec2::from_angle(rng.angle()));
    let spread = config.split_spread_degrees.to_radians();

    (0..count)
        .map(|i| {
            let angle = if count > 1 {
                -spread + 2.0 * spread * i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            let speed = rng
                .range_f32(config.asteroid_min_speed, config.asteroid_max_speed)
                .max(parent_velocity.length());
            Vec2::from_angle(angle).rotate(heading) * speed
        })
        .collect()
}

/// Spawn the children of an asteroid of tier `size` that broke at `position`.
///
/// Returns the new entities; empty for the smallest tier.
pub fn split_asteroid(
    commands: &mut Commands,
    registry: &mut EntityRegistry,
    config: &GameConfig,
    rng: &mut GameRng,
    size: AsteroidSize,
    position: Vec2,
    velocity: Vec2,
) -> SmallVec<[Entity; 4]> {
    let Some(child_size) = size.smaller() else {
        return SmallVec::new();
    };
    split_velocities(velocity, config.split_children, config, rng)
        .into_iter()
        .map(|child_velocity| {
            spawn_asteroid_entity(
                commands,
                registry,
                config,
                AsteroidSpawn {
                    position,
                    velocity: child_velocity,
                    size: child_size,
                },
            )
        })
        .collect()
}

/// Spawn the player ship at the origin.
///
/// Exactly one ship may exist; a second call while one is alive logs an error
/// and returns [`GameError::AlreadyInitialized`].
pub fn spawn_player_ship(world: &mut World, config: &GameConfig) -> Result<Entity, GameError> {
    let existing = world
        .query_filtered::<Entity, With<PlayerShip>>()
        .iter(world)
        .next();
    if let Some(ship) = existing {
        error!(
            "spawn_player_ship - attempt to spawn a second PlayerShip while {:?} exists.",
            ship
        );
        return Err(GameError::AlreadyInitialized("PlayerShip"));
    }

    let mut entity = world.spawn((
        PlayerShip::new(),
        Group::new(SHIP),
        MapPosition::new(0.0, 0.0),
        RigidBody::new().with_max_speed(config.ship_speed),
        CircleCollider::new(config.ship_radius),
        InputControlled::new(config.ship_speed),
        Shooter::new(
            config.bullet_speed,
            config.bullet_lifetime,
            config.bullet_radius,
        ),
    ));
    if config.screen_wrap {
        entity.insert(ScreenWrap);
    }
    let id = entity.id();
    info!("PlayerShip spawned as {:?}", id);
    Ok(id)
}
