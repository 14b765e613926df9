//! Score, lives and level of the running session.
//!
//! [`Session`] is a world singleton. [`Session::install`] refuses to
//! overwrite an existing instance and [`Session::read`] refuses to hand out a
//! missing one; both log the mistake, since either means a lifecycle bug in
//! the host.
//!
//! Score only grows within a session. Lives saturate at zero. Both are reset by
//! [`Session::reset`], which the restart hook calls.

use bevy_ecs::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Running totals for one play-through.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    score: u32,
    lives: u32,
    starting_lives: u32,
    level: u32,
}

impl Session {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            starting_lives,
            level: 1,
        }
    }

    /// Insert the session into `world` unless one already exists.
    pub fn install(world: &mut World, starting_lives: u32) -> Result<(), GameError> {
        if world.contains_resource::<Session>() {
            error!("Session::install - attempt to set the session when it has already been set.");
            return Err(GameError::AlreadyInitialized("Session"));
        }
        world.insert_resource(Session::new(starting_lives));
        Ok(())
    }

    /// Borrow the session from `world`, failing loudly if it was never installed.
    pub fn read(world: &World) -> Result<&Session, GameError> {
        world.get_resource::<Session>().ok_or_else(|| {
            error!("Session::read - attempt to get the session before it has been set.");
            GameError::NotInitialized("Session")
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// True once the last life is gone. A level cannot be cleared from here.
    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    /// Add to the running score and return the new total.
    pub fn add_score(&mut self, delta: u32) -> u32 {
        self.score = self.score.saturating_add(delta);
        self.score
    }

    /// Add (or remove, with a negative delta) lives and return the new total.
    /// Lives never drop below zero.
    pub fn add_lives(&mut self, delta: i32) -> u32 {
        self.lives = self.lives.saturating_add_signed(delta);
        self.lives
    }

    pub fn next_level(&mut self) -> u32 {
        self.level += 1;
        self.level
    }

    /// Back to a fresh session: score zero, starting lives, level one.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.level = 1;
    }

    /// HUD text for the score counter.
    pub fn score_text(&self) -> String {
        self.score.to_string()
    }

    /// HUD text for the lives counter, singular for exactly one life.
    pub fn lives_text(&self) -> String {
        if self.lives == 1 {
            format!("Live : {}", self.lives)
        } else {
            format!("Lives : {}", self.lives)
        }
    }
}
