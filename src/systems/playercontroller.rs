//! Player ship controller.
//!
//! Reads the shared [`InputState`](crate::resources::input::InputState):
//! - [`player_controller`] turns the two axes into ship velocity. The axis
//!   vector is clamped to unit length so diagonal movement is not faster.
//! - [`fire_control`] spawns a bullet toward the pointer on a fire press.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::bullet::Bullet;
use crate::components::circlecollider::CircleCollider;
use crate::components::group::{BULLET, Group};
use crate::components::inputcontrolled::{InputControlled, Shooter};
use crate::components::mapposition::MapPosition;
use crate::components::playership::{PlayerShip, ShipState};
use crate::components::rigidbody::RigidBody;
use crate::components::screenwrap::ScreenWrap;
use crate::components::ttl::Ttl;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::registry::EntityRegistry;

/// Update each controlled entity's `RigidBody` velocity based on input.
pub fn player_controller(
    mut query: Query<(&InputControlled, &mut RigidBody)>,
    input_state: Res<InputState>,
) {
    let axes = input_state.axis_vector();
    for (controlled, mut rigidbody) in query.iter_mut() {
        rigidbody.set_velocity(axes * controlled.max_speed);
    }
}

/// Fire one bullet per press from every shooter that is still alive.
///
/// Nothing is fired while the host reports no pointer position.
pub fn fire_control(
    query: Query<(&MapPosition, &Shooter, &PlayerShip)>,
    input_state: Res<InputState>,
    config: Res<GameConfig>,
    mut registry: ResMut<EntityRegistry>,
    mut commands: Commands,
) {
    if !input_state.fire.just_pressed {
        return;
    }
    let Some(target) = input_state.pointer else {
        debug!("Fire pressed without a pointer position, ignoring");
        return;
    };
    for (position, shooter, ship) in query.iter() {
        if ship.state == ShipState::Destroyed {
            continue;
        }
        spawn_bullet(
            &mut commands,
            &mut registry,
            position.pos,
            target,
            shooter,
            config.screen_wrap,
        );
    }
}

/// Spawn a bullet at `origin` travelling toward `target`.
///
/// When `target` coincides with `origin` the bullet travels straight up.
pub fn spawn_bullet(
    commands: &mut Commands,
    registry: &mut EntityRegistry,
    origin: Vec2,
    target: Vec2,
    shooter: &Shooter,
    wrap: bool,
) -> Entity {
    let direction = (target - origin).try_normalize().unwrap_or(Vec2::Y);
    let mut entity = commands.spawn((
        Bullet,
        Group::new(BULLET),
        MapPosition::from_vec(origin),
        RigidBody::with_velocity(direction * shooter.bullet_speed),
        CircleCollider::new(shooter.bullet_radius),
        Ttl::new(shooter.bullet_lifetime),
    ));
    if wrap {
        entity.insert(ScreenWrap);
    }
    let id = entity.id();
    registry.add_bullet(id);
    debug!("Bullet {:?} fired toward {:?}", id, target);
    id
}
