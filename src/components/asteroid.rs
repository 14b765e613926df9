//! Asteroid component and size tiers.
//!
//! Every asteroid carries an [`AsteroidSize`]. The tier controls its collider
//! radius, the score it is worth, and what it breaks into when destroyed:
//! `Large` splits into `Medium`, `Medium` into `Small`, and `Small` is removed
//! outright. Radii and scores live in
//! [`GameConfig`](crate::resources::gameconfig::GameConfig).

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Discrete asteroid size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Tier the children take after a split, or `None` for the smallest tier.
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AsteroidSize::Large => "large",
            AsteroidSize::Medium => "medium",
            AsteroidSize::Small => "small",
        }
    }
}

impl fmt::Display for AsteroidSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AsteroidSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" => Ok(AsteroidSize::Large),
            "medium" => Ok(AsteroidSize::Medium),
            "small" => Ok(AsteroidSize::Small),
            other => Err(format!("unknown asteroid size '{other}'")),
        }
    }
}

/// Marks an entity as an asteroid of the given tier.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asteroid {
    pub size: AsteroidSize,
}

impl Asteroid {
    pub fn new(size: AsteroidSize) -> Self {
        Self { size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_chain_ends_at_small() {
        assert_eq!(AsteroidSize::Large.smaller(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.smaller(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.smaller(), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Large ".parse::<AsteroidSize>(), Ok(AsteroidSize::Large));
        assert_eq!("SMALL".parse::<AsteroidSize>(), Ok(AsteroidSize::Small));
        assert!("huge".parse::<AsteroidSize>().is_err());
    }

    #[test]
    fn test_display_matches_config_spelling() {
        for size in [AsteroidSize::Large, AsteroidSize::Medium, AsteroidSize::Small] {
            assert_eq!(size.to_string().parse::<AsteroidSize>(), Ok(size));
        }
    }
}
