//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world.
//!
//! Submodules overview:
//! - [`asteroid`] – asteroid marker and size tiers
//! - [`bullet`] – projectile marker
//! - [`circlecollider`] – circular collider for overlap detection
//! - [`group`] – tag component naming the collision group of an entity
//! - [`inputcontrolled`] – axis-driven movement and firing
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`persistent`] – marker for entities that survive a restart
//! - [`playership`] – the player ship and its hit state machine
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`screenwrap`] – wrap around the screen edges
//! - [`ttl`] – time-to-live countdown

pub mod asteroid;
pub mod bullet;
pub mod circlecollider;
pub mod group;
pub mod inputcontrolled;
pub mod mapposition;
pub mod persistent;
pub mod playership;
pub mod rigidbody;
pub mod screenwrap;
pub mod ttl;
