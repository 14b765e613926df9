//! Game systems.
//!
//! This module groups all ECS systems and observers that advance the
//! simulation.
//!
//! Submodules overview
//! - [`collision`] – circle overlap detection and contact resolution
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`hud`] – push score and lives texts to the host HUD
//! - [`input`] – poll the host input source and update [`crate::resources::input::InputState`]
//! - [`level`] – detect a cleared level
//! - [`movement`] – integrate positions from rigid body velocities, wrap at screen edges
//! - [`playercontroller`] – translate input state into ship velocity and bullets
//! - [`spawner`] – asteroid placement, splitting, and the player ship
//! - [`time`] – update simulation time and delta
//! - [`timers`] – fire due timers, end immunity, leave the post-level pause
//! - [`ttl`] – despawn entities whose lifetime ran out

pub mod collision;
pub mod gamestate;
pub mod hud;
pub mod input;
pub mod level;
pub mod movement;
pub mod playercontroller;
pub mod spawner;
pub mod time;
pub mod timers;
pub mod ttl;
