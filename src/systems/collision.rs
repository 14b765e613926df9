//! Collision detection and resolution.
//!
//! [`collision_detector`] tests every pair of circle colliders once per frame
//! and triggers a [`CollisionEvent`] for each overlapping pair whose groups
//! differ. Hosts with their own physics trigger the same event through
//! [`Game::on_collision`](crate::game::Game::on_collision).
//!
//! [`collision_observer`] resolves contacts:
//!
//! | contact | effect |
//! |---|---|
//! | ship + asteroid, ship vulnerable | lose a life, relocate ship, break asteroid |
//! | ship + asteroid, ship immune | nothing |
//! | bullet + asteroid | remove bullet, award tier score, break asteroid |
//! | anything else | nothing |
//!
//! Breaking an asteroid removes it and spawns smaller children unless it was
//! already the smallest tier. Liveness is decided by the
//! [`EntityRegistry`], so an entity named by several contacts in the same
//! frame is consumed only once.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec2;
use log::{debug, error, info};
use smallvec::SmallVec;

use crate::components::asteroid::{Asteroid, AsteroidSize};
use crate::components::circlecollider::CircleCollider;
use crate::components::group::{ASTEROID, BULLET, Group, SHIP};
use crate::components::mapposition::MapPosition;
use crate::components::playership::PlayerShip;
use crate::components::rigidbody::RigidBody;
use crate::events::collision::CollisionEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::registry::EntityRegistry;
use crate::resources::rng::GameRng;
use crate::resources::screenbounds::ScreenBounds;
use crate::resources::session::Session;
use crate::resources::timerqueue::{TimerQueue, TimerSignal};
use crate::resources::worldtime::WorldTime;
use crate::systems::spawner::split_asteroid;

/// Emit a [`CollisionEvent`] for every overlapping pair of colliders.
///
/// Pairs in the same group (asteroid/asteroid) are skipped.
pub fn collision_detector(
    query: Query<(
        Entity,
        &MapPosition,
        &CircleCollider,
        Option<&Group>,
    )>,
    mut commands: Commands,
) {
    let mut pairs: SmallVec<[(Entity, Entity); 8]> = SmallVec::new();

    for [(entity_a, pos_a, collider_a, group_a), (entity_b, pos_b, collider_b, group_b)] in
        query.iter_combinations()
    {
        if group_a.is_some() && group_a == group_b {
            continue;
        }
        if collider_a.overlaps(pos_a.pos, collider_b, pos_b.pos) {
            pairs.push((entity_a, entity_b));
        }
    }

    for (a, b) in pairs {
        debug!("Collision detected between {:?} and {:?}", a, b);
        commands.trigger(CollisionEvent { a, b });
    }
}

/// Queries and resources the resolver needs.
#[derive(SystemParam)]
pub struct CollisionContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub groups: Query<'w, 's, &'static Group>,
    pub ships: Query<
        'w,
        's,
        (
            &'static mut PlayerShip,
            &'static mut MapPosition,
            &'static mut RigidBody,
        ),
        Without<Asteroid>,
    >,
    pub asteroids: Query<
        'w,
        's,
        (&'static Asteroid, &'static MapPosition, &'static RigidBody),
        Without<PlayerShip>,
    >,
    pub session: Option<ResMut<'w, Session>>,
    pub registry: ResMut<'w, EntityRegistry>,
    pub timers: ResMut<'w, TimerQueue>,
    pub state: Res<'w, GameState>,
    pub next_state: ResMut<'w, NextGameState>,
    pub config: Res<'w, GameConfig>,
    pub bounds: Res<'w, ScreenBounds>,
    pub time: Res<'w, WorldTime>,
    pub rng: ResMut<'w, GameRng>,
}

/// Resolve a contact between two entities.
///
/// Contacts are only acted upon while the game is in the `Level` state.
pub fn collision_observer(trigger: On<CollisionEvent>, mut ctx: CollisionContext) {
    let event = *trigger.event();
    if ctx.state.get() != GameStates::Level {
        debug!("Ignoring contact outside of Level: {:?}", event);
        return;
    }

    let group_of = |e: Entity| ctx.groups.get(e).map(|g| g.name()).ok();
    let (Some(group_a), Some(group_b)) = (group_of(event.a), group_of(event.b)) else {
        return;
    };

    match (group_a, group_b) {
        (SHIP, ASTEROID) => ship_hit(&mut ctx, event.a, event.b),
        (ASTEROID, SHIP) => ship_hit(&mut ctx, event.b, event.a),
        (BULLET, ASTEROID) => bullet_hit(&mut ctx, event.a, event.b),
        (ASTEROID, BULLET) => bullet_hit(&mut ctx, event.b, event.a),
        _ => {}
    }
}

fn ship_hit(ctx: &mut CollisionContext, ship: Entity, asteroid: Entity) {
    if !ctx.registry.has_asteroid(asteroid) {
        return;
    }
    let Ok((mut player, mut position, mut rigidbody)) = ctx.ships.get_mut(ship) else {
        return;
    };
    if !player.is_vulnerable() {
        debug!("Ship {:?} is {:?}, contact ignored", ship, player.state);
        return;
    }
    let Some(session) = ctx.session.as_deref_mut() else {
        error!("ship_hit - session not initialized, contact dropped");
        return;
    };

    let lives = session.add_lives(-1);
    position.pos = ctx.bounds.random_on_screen(&mut ctx.rng.0);
    rigidbody.set_velocity(Vec2::ZERO);

    if lives > 0 {
        player.make_immune();
        ctx.timers.schedule(
            ctx.time.elapsed,
            ctx.config.immunity_seconds,
            Some(ship),
            TimerSignal::ImmunityExpired,
        );
        info!(
            "Ship hit, {} left, immune for {}s",
            session.lives_text(),
            ctx.config.immunity_seconds
        );
    } else {
        player.destroy();
        let cancelled = ctx.timers.cancel_owned_by(ship);
        debug!("Ship destroyed, {} timers cancelled", cancelled);
        ctx.commands.entity(ship).try_despawn();
        ctx.next_state.set(GameStates::GameOver);
        info!("Ship destroyed, game over");
    }

    break_asteroid(ctx, asteroid);
}

fn bullet_hit(ctx: &mut CollisionContext, bullet: Entity, asteroid: Entity) {
    if !ctx.registry.has_bullet(bullet) || !ctx.registry.has_asteroid(asteroid) {
        return;
    }
    ctx.registry.remove_bullet(bullet);
    ctx.commands.entity(bullet).try_despawn();

    let Some(size) = break_asteroid(ctx, asteroid) else {
        return;
    };
    let reward = ctx.config.asteroid_score(size);
    match ctx.session.as_deref_mut() {
        Some(session) => {
            let total = session.add_score(reward);
            debug!("{} asteroid destroyed, +{} = {}", size, reward, total);
        }
        None => error!("bullet_hit - session not initialized, {} points lost", reward),
    }
}

/// Remove an asteroid and spawn its children.
///
/// Returns the tier of the removed asteroid, or `None` if it was already gone.
fn break_asteroid(ctx: &mut CollisionContext, asteroid: Entity) -> Option<AsteroidSize> {
    if !ctx.registry.remove_asteroid(asteroid) {
        return None;
    }
    ctx.commands.entity(asteroid).try_despawn();

    let Ok((data, position, rigidbody)) = ctx.asteroids.get(asteroid) else {
        error!("break_asteroid - {:?} registered but has no Asteroid data", asteroid);
        return None;
    };
    let (size, pos, vel) = (data.size, position.pos, rigidbody.velocity);

    let children = split_asteroid(
        &mut ctx.commands,
        &mut ctx.registry,
        &ctx.config,
        &mut ctx.rng,
        size,
        pos,
        vel,
    );
    debug!(
        "{} asteroid {:?} broke into {} pieces",
        size,
        asteroid,
        children.len()
    );
    Some(size)
}
