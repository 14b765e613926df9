//! Event types and observers used by the game.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them.
//!
//! Submodules:
//! - [`collision`] – contact notifications from the detector or the host
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`input`] – button press/release edges
//! - [`timer`] – expiry of queued timers
pub mod collision;
pub mod gamestate;
pub mod input;
pub mod timer;
