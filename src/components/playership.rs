//! Player ship component and its hit state machine.
//!
//! ```text
//! Normal --hit, lives > 1--> Immune --timer--> Normal
//! Normal --hit, lives == 1--> Destroyed
//! ```
//!
//! Hits while `Immune` are ignored. `Destroyed` is terminal for the session;
//! only a restart spawns a new ship.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Hit state of the player ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShipState {
    #[default]
    Normal,
    Immune,
    Destroyed,
}

/// The single player-controlled ship.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerShip {
    pub state: ShipState,
}

impl PlayerShip {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the ship is in a state that can take damage.
    pub fn is_vulnerable(&self) -> bool {
        self.state == ShipState::Normal
    }

    /// Enter the immunity window. Has no effect on a destroyed ship.
    pub fn make_immune(&mut self) {
        if self.state != ShipState::Destroyed {
            self.state = ShipState::Immune;
        }
    }

    /// Leave the immunity window. Has no effect on a destroyed ship.
    pub fn end_immunity(&mut self) {
        if self.state == ShipState::Immune {
            self.state = ShipState::Normal;
        }
    }

    pub fn destroy(&mut self) {
        self.state = ShipState::Destroyed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ship_is_vulnerable() {
        let ship = PlayerShip::new();
        assert!(ship.is_vulnerable());
        assert_eq!(ship.state, ShipState::Normal);
    }

    #[test]
    fn test_immunity_round_trip() {
        let mut ship = PlayerShip::new();
        ship.make_immune();
        assert_eq!(ship.state, ShipState::Immune);
        assert!(!ship.is_vulnerable());
        ship.end_immunity();
        assert!(ship.is_vulnerable());
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let mut ship = PlayerShip::new();
        ship.destroy();
        ship.make_immune();
        assert_eq!(ship.state, ShipState::Destroyed);
        ship.end_immunity();
        assert_eq!(ship.state, ShipState::Destroyed);
    }
}
