//! Tick integration tests for movement, TTL, collision detection, spawning,
//! the player controller and timers.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;

use asterax::components::bullet::Bullet;
use asterax::components::circlecollider::CircleCollider;
use asterax::components::group::{ASTEROID, BULLET, Group, SHIP};
use asterax::components::inputcontrolled::{InputControlled, Shooter};
use asterax::components::mapposition::MapPosition;
use asterax::components::playership::{PlayerShip, ShipState};
use asterax::components::rigidbody::RigidBody;
use asterax::components::screenwrap::ScreenWrap;
use asterax::components::ttl::Ttl;
use asterax::error::GameError;
use asterax::events::collision::CollisionEvent;
use asterax::events::timer::TimerEvent;
use asterax::resources::gameconfig::GameConfig;
use asterax::resources::input::InputState;
use asterax::resources::registry::EntityRegistry;
use asterax::resources::rng::GameRng;
use asterax::resources::screenbounds::ScreenBounds;
use asterax::resources::timerqueue::{TimerQueue, TimerSignal};
use asterax::resources::worldtime::WorldTime;
use asterax::systems::collision::collision_detector;
use asterax::systems::movement::{movement, screen_wrap_system};
use asterax::systems::playercontroller::{fire_control, player_controller};
use asterax::systems::spawner::{find_spawn_location, spawn_player_ship, split_velocities};
use asterax::systems::time::update_world_time;
use asterax::systems::timers::update_timers;
use asterax::systems::ttl::ttl_system;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(ScreenBounds::new(11.0, 8.0));
    world.insert_resource(EntityRegistry::default());
    world
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);
    schedule.run(world);
}

fn tick_screen_wrap(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(screen_wrap_system);
    schedule.run(world);
}

fn tick_ttl(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(ttl_system);
    schedule.run(world);
}

fn tick_collision_detector(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collision_detector);
    schedule.run(world);
}

fn tick_player_controller(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(player_controller);
    schedule.run(world);
}

fn tick_fire_control(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(fire_control);
    schedule.run(world);
}

fn tick_timers(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(update_timers);
    schedule.run(world);
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn movement_integrates_velocity_into_position() {
    let mut world = make_world(0.0);
    let entity = world
        .spawn((
            MapPosition::new(0.0, 0.0),
            RigidBody::with_velocity(Vec2::new(10.0, 0.0)),
        ))
        .id();

    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 5.0));
    assert!(approx_eq(pos.pos.y, 0.0));
}

#[test]
fn movement_leaves_bodies_at_rest_in_place() {
    let mut world = make_world(0.0);
    let entity = world
        .spawn((MapPosition::new(1.0, 1.0), RigidBody::new()))
        .id();

    update_world_time(&mut world, 1.0);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 1.0));
    assert!(approx_eq(pos.pos.y, 1.0));
}

#[test]
fn screen_wrap_moves_entity_to_opposite_edge() {
    let mut world = make_world(0.0);
    let wrapped = world.spawn((MapPosition::new(12.0, 0.0), ScreenWrap)).id();
    let unwrapped = world.spawn((MapPosition::new(12.0, 0.0),)).id();

    tick_screen_wrap(&mut world);

    let pos = world.get::<MapPosition>(wrapped).unwrap();
    assert!(approx_eq(pos.pos.x, -10.0));
    let pos = world.get::<MapPosition>(unwrapped).unwrap();
    assert!(approx_eq(pos.pos.x, 12.0));
}

// =============================================================================
// TTL
// =============================================================================

#[test]
fn ttl_decrements_and_despawns() {
    let mut world = make_world(0.5);
    let entity = world.spawn((Ttl::new(1.0),)).id();

    tick_ttl(&mut world);

    assert!(world.get_entity(entity).is_ok());
    let ttl = world.get::<Ttl>(entity).unwrap();
    assert!(approx_eq(ttl.remaining, 0.5));

    tick_ttl(&mut world);

    assert!(world.get_entity(entity).is_err());
}

#[test]
fn ttl_expiry_unregisters_bullet() {
    let mut world = make_world(1.0);
    let bullet = world.spawn((Bullet, Ttl::new(0.5))).id();
    world.resource_mut::<EntityRegistry>().add_bullet(bullet);

    tick_ttl(&mut world);

    assert!(world.get_entity(bullet).is_err());
    assert!(!world.resource::<EntityRegistry>().has_bullet(bullet));
}

// =============================================================================
// Collision detection
// =============================================================================

fn record_collisions(world: &mut World) -> Arc<Mutex<Vec<(Entity, Entity)>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    world.add_observer(move |trigger: On<CollisionEvent>| {
        let event = trigger.event();
        seen_clone.lock().unwrap().push((event.a, event.b));
    });
    world.flush();
    seen
}

#[test]
fn detector_reports_overlapping_circles_of_different_groups() {
    let mut world = make_world(0.0);
    let seen = record_collisions(&mut world);

    let ship = world
        .spawn((
            Group::new(SHIP),
            MapPosition::new(0.0, 0.0),
            CircleCollider::new(0.5),
        ))
        .id();
    let rock = world
        .spawn((
            Group::new(ASTEROID),
            MapPosition::new(1.0, 0.0),
            CircleCollider::new(0.6),
        ))
        .id();
    // Too far from both.
    world.spawn((
        Group::new(BULLET),
        MapPosition::new(5.0, 5.0),
        CircleCollider::new(0.1),
    ));

    tick_collision_detector(&mut world);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (a, b) = seen[0];
    assert!((a == ship && b == rock) || (a == rock && b == ship));
}

#[test]
fn detector_ignores_same_group_and_touching_circles() {
    let mut world = make_world(0.0);
    let seen = record_collisions(&mut world);

    world.spawn((
        Group::new(ASTEROID),
        MapPosition::new(0.0, 0.0),
        CircleCollider::new(1.0),
    ));
    world.spawn((
        Group::new(ASTEROID),
        MapPosition::new(0.5, 0.0),
        CircleCollider::new(1.0),
    ));
    // Exactly touching: distance 2.0 == radii sum.
    world.spawn((
        Group::new(BULLET),
        MapPosition::new(-2.0, 0.0),
        CircleCollider::new(1.0),
    ));

    tick_collision_detector(&mut world);

    assert!(seen.lock().unwrap().is_empty());
}

// =============================================================================
// Player controller
// =============================================================================

#[test]
fn controller_clamps_diagonal_to_ship_speed() {
    let mut world = make_world(0.0);
    world.insert_resource(InputState {
        horizontal: 1.0,
        vertical: 1.0,
        ..InputState::default()
    });
    let ship = world
        .spawn((InputControlled::new(10.0), RigidBody::new()))
        .id();

    tick_player_controller(&mut world);

    let rb = world.get::<RigidBody>(ship).unwrap();
    assert!(approx_eq(rb.velocity.length(), 10.0));
    assert!(approx_eq(rb.velocity.x, rb.velocity.y));
}

#[test]
fn controller_scales_partial_axis() {
    let mut world = make_world(0.0);
    world.insert_resource(InputState {
        horizontal: -0.5,
        vertical: 0.0,
        ..InputState::default()
    });
    let ship = world
        .spawn((InputControlled::new(10.0), RigidBody::new()))
        .id();

    tick_player_controller(&mut world);

    let rb = world.get::<RigidBody>(ship).unwrap();
    assert!(approx_eq(rb.velocity.x, -5.0));
    assert!(approx_eq(rb.velocity.y, 0.0));
}

fn make_shooter_world(pointer: Option<Vec2>) -> World {
    let mut world = make_world(0.0);
    world.insert_resource(GameConfig::new());
    let mut input = InputState {
        pointer,
        ..InputState::default()
    };
    input.fire.update(true);
    world.insert_resource(input);
    world.spawn((
        MapPosition::new(1.0, 1.0),
        Shooter::new(20.0, 2.0, 0.1),
        PlayerShip::new(),
    ));
    world
}

fn bullet_velocities(world: &mut World) -> Vec<Vec2> {
    world
        .query_filtered::<&RigidBody, With<Bullet>>()
        .iter(world)
        .map(|rb| rb.velocity)
        .collect()
}

#[test]
fn fire_spawns_bullet_toward_pointer() {
    let mut world = make_shooter_world(Some(Vec2::new(4.0, 5.0)));

    tick_fire_control(&mut world);

    let velocities = bullet_velocities(&mut world);
    assert_eq!(velocities.len(), 1);
    assert!(approx_eq(velocities[0].x, 12.0));
    assert!(approx_eq(velocities[0].y, 16.0));
    assert_eq!(world.resource::<EntityRegistry>().bullet_count(), 1);
}

#[test]
fn fire_at_own_position_goes_straight_up() {
    let mut world = make_shooter_world(Some(Vec2::new(1.0, 1.0)));

    tick_fire_control(&mut world);

    let velocities = bullet_velocities(&mut world);
    assert_eq!(velocities.len(), 1);
    assert!(approx_eq(velocities[0].x, 0.0));
    assert!(approx_eq(velocities[0].y, 20.0));
}

#[test]
fn fire_without_pointer_does_nothing() {
    let mut world = make_shooter_world(None);

    tick_fire_control(&mut world);

    assert!(bullet_velocities(&mut world).is_empty());
    assert_eq!(world.resource::<EntityRegistry>().bullet_count(), 0);
}

#[test]
fn fire_only_on_press_edge() {
    let mut world = make_shooter_world(Some(Vec2::new(4.0, 5.0)));
    tick_fire_control(&mut world);

    // Still held: no new edge.
    world.resource_mut::<InputState>().fire.update(true);
    tick_fire_control(&mut world);

    assert_eq!(bullet_velocities(&mut world).len(), 1);
}

// =============================================================================
// Spawner
// =============================================================================

#[test]
fn spawn_location_respects_minimum_distance() {
    let bounds = ScreenBounds::new(11.0, 8.0);
    let ship = Vec2::new(3.0, 2.0);
    for seed in 0..200 {
        let mut rng = GameRng::with_seed(seed);
        let pos = find_spawn_location(&bounds, Some(ship), 5.0, 64, &mut rng);
        assert!(pos.distance(ship) >= 5.0, "seed {seed}: {pos:?}");
        assert!(bounds.contains(pos));
    }
}

#[test]
fn spawn_location_falls_back_to_farthest_corner() {
    let bounds = ScreenBounds::new(11.0, 8.0);
    let ship = Vec2::new(3.0, 2.0);
    let mut rng = GameRng::with_seed(1);

    let pos = find_spawn_location(&bounds, Some(ship), 100.0, 16, &mut rng);

    assert_eq!(pos, Vec2::new(-11.0, -8.0));
}

#[test]
fn spawn_location_without_ship_measures_from_origin() {
    let bounds = ScreenBounds::new(11.0, 8.0);
    for seed in 0..50 {
        let mut rng = GameRng::with_seed(seed);
        let pos = find_spawn_location(&bounds, None, 5.0, 64, &mut rng);
        assert!(pos.length() >= 5.0);
    }
}

#[test]
fn split_children_diverge_symmetrically() {
    let config = GameConfig::new();
    let mut rng = GameRng::with_seed(9);
    let parent = Vec2::new(2.0, 0.0);

    let children = split_velocities(parent, 2, &config, &mut rng);

    assert_eq!(children.len(), 2);
    let spread = children[0].angle_to(children[1]).abs();
    assert!(approx_eq(spread, 60f32.to_radians()));
    for child in &children {
        assert!(child.length() >= parent.length() - EPSILON);
        assert!(approx_eq(
            parent.angle_to(*child).abs(),
            30f32.to_radians()
        ));
    }
}

#[test]
fn second_player_ship_is_rejected() {
    let mut world = make_world(0.0);
    let config = GameConfig::new();

    let first = spawn_player_ship(&mut world, &config);
    assert!(first.is_ok());

    let second = spawn_player_ship(&mut world, &config);
    assert_eq!(second, Err(GameError::AlreadyInitialized("PlayerShip")));

    let ships = world
        .query::<&PlayerShip>()
        .iter(&world)
        .filter(|s| s.state == ShipState::Normal)
        .count();
    assert_eq!(ships, 1);
}

// =============================================================================
// Timers
// =============================================================================

fn record_timers(world: &mut World) -> Arc<Mutex<Vec<TimerEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    world.add_observer(move |trigger: On<TimerEvent>| {
        seen_clone.lock().unwrap().push(*trigger.event());
    });
    world.flush();
    seen
}

#[test]
fn due_timers_fire_once() {
    let mut world = make_world(0.0);
    world.insert_resource(TimerQueue::new());
    let seen = record_timers(&mut world);
    let owner = world.spawn_empty().id();
    world
        .resource_mut::<TimerQueue>()
        .schedule(0.0, 1.0, Some(owner), TimerSignal::ImmunityExpired);

    update_world_time(&mut world, 0.5);
    tick_timers(&mut world);
    assert!(seen.lock().unwrap().is_empty());

    update_world_time(&mut world, 0.6);
    tick_timers(&mut world);
    update_world_time(&mut world, 1.0);
    tick_timers(&mut world);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].entity, Some(owner));
    assert_eq!(seen[0].signal, TimerSignal::ImmunityExpired);
}

#[test]
fn timers_of_despawned_owner_are_dropped() {
    let mut world = make_world(0.0);
    world.insert_resource(TimerQueue::new());
    let seen = record_timers(&mut world);
    let owner = world.spawn_empty().id();
    world
        .resource_mut::<TimerQueue>()
        .schedule(0.0, 0.5, Some(owner), TimerSignal::ImmunityExpired);
    world.despawn(owner);

    update_world_time(&mut world, 1.0);
    tick_timers(&mut world);

    assert!(seen.lock().unwrap().is_empty());
    assert!(world.resource::<TimerQueue>().is_empty());
}
