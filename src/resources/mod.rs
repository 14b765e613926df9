//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `gameconfig` – tuning loaded from an INI file
//! - `gamestate` – authoritative and pending high-level game state
//! - `host` – injected input source and HUD sink
//! - `input` – per-frame axes, buttons and pointer
//! - `registry` – live asteroid and bullet handles
//! - `rng` – seedable random source
//! - `screenbounds` – the visible play area
//! - `session` – score, lives and level
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `timerqueue` – deferred timers keyed by wake time
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod gamestate;
pub mod host;
pub mod input;
pub mod registry;
pub mod rng;
pub mod screenbounds;
pub mod session;
pub mod systemsstore;
pub mod timerqueue;
pub mod worldtime;
