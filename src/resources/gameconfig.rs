//! Game configuration resource.
//!
//! Manages game tuning loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [screen]
//! half_width = 11.0
//! half_height = 8.0
//! wrap = true
//!
//! [ship]
//! speed = 10.0
//! radius = 0.5
//! starting_lives = 3
//! immunity_seconds = 1.0
//!
//! [bullet]
//! speed = 20.0
//! lifetime = 2.0
//! radius = 0.1
//!
//! [asteroids]
//! initial_count = 3
//! initial_size = large
//! min_distance_from_ship = 5.0
//! max_spawn_attempts = 64
//! min_speed = 1.0
//! max_speed = 3.0
//! split_children = 2
//! split_spread_degrees = 30.0
//! radius_large = 1.5
//! radius_medium = 0.9
//! radius_small = 0.5
//! score_large = 20
//! score_medium = 50
//! score_small = 100
//!
//! [level]
//! post_level_delay = 2.0
//! extra_asteroids_per_level = 1
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::asteroid::AsteroidSize;
use crate::error::GameError;
use crate::resources::screenbounds::ScreenBounds;

/// Default safe values for startup
const DEFAULT_HALF_WIDTH: f32 = 11.0;
const DEFAULT_HALF_HEIGHT: f32 = 8.0;
const DEFAULT_SCREEN_WRAP: bool = true;
const DEFAULT_SHIP_SPEED: f32 = 10.0;
const DEFAULT_SHIP_RADIUS: f32 = 0.5;
const DEFAULT_STARTING_LIVES: u32 = 3;
const DEFAULT_IMMUNITY_SECONDS: f32 = 1.0;
const DEFAULT_BULLET_SPEED: f32 = 20.0;
const DEFAULT_BULLET_LIFETIME: f32 = 2.0;
const DEFAULT_BULLET_RADIUS: f32 = 0.1;
const DEFAULT_INITIAL_ASTEROIDS: u32 = 3;
const DEFAULT_INITIAL_SIZE: AsteroidSize = AsteroidSize::Large;
const DEFAULT_MIN_ASTEROID_DIST_FROM_SHIP: f32 = 5.0;
const DEFAULT_MAX_SPAWN_ATTEMPTS: u32 = 64;
const DEFAULT_ASTEROID_MIN_SPEED: f32 = 1.0;
const DEFAULT_ASTEROID_MAX_SPEED: f32 = 3.0;
const DEFAULT_SPLIT_CHILDREN: u32 = 2;
const DEFAULT_SPLIT_SPREAD_DEGREES: f32 = 30.0;
const DEFAULT_RADIUS_LARGE: f32 = 1.5;
const DEFAULT_RADIUS_MEDIUM: f32 = 0.9;
const DEFAULT_RADIUS_SMALL: f32 = 0.5;
const DEFAULT_SCORE_LARGE: u32 = 20;
const DEFAULT_SCORE_MEDIUM: u32 = 50;
const DEFAULT_SCORE_SMALL: u32 = 100;
const DEFAULT_POST_LEVEL_DELAY: f32 = 2.0;
const DEFAULT_EXTRA_ASTEROIDS_PER_LEVEL: u32 = 1;
const DEFAULT_CONFIG_PATH: &str = "./asterax.ini";

/// Game configuration resource.
///
/// Stores the play area, ship, bullet, asteroid and level tuning. The values
/// are read when entities are spawned, so changes apply to entities spawned
/// afterwards.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Half of the visible play area width, in world units.
    pub half_width: f32,
    /// Half of the visible play area height, in world units.
    pub half_height: f32,
    /// Whether ship and asteroids wrap around the screen edges.
    pub screen_wrap: bool,
    /// Ship speed at full axis deflection.
    pub ship_speed: f32,
    pub ship_radius: f32,
    /// Lives at session start and after a restart.
    pub starting_lives: u32,
    /// Length of the post-hit immunity window in seconds.
    pub immunity_seconds: f32,
    pub bullet_speed: f32,
    /// Seconds before a bullet that hit nothing expires.
    pub bullet_lifetime: f32,
    pub bullet_radius: f32,
    /// Parent asteroids spawned on level 1.
    pub initial_asteroids: u32,
    /// Tier assigned to parent asteroids.
    pub initial_size: AsteroidSize,
    /// Minimum distance between a new parent asteroid and the ship.
    pub min_asteroid_dist_from_ship: f32,
    /// Random placements tried before falling back to the farthest corner.
    pub max_spawn_attempts: u32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    /// Children created when a non-smallest asteroid breaks.
    pub split_children: u32,
    /// Angle in degrees between each child velocity and the parent's.
    pub split_spread_degrees: f32,
    pub radius_large: f32,
    pub radius_medium: f32,
    pub radius_small: f32,
    pub score_large: u32,
    pub score_medium: u32,
    pub score_small: u32,
    /// Seconds spent in `PostLevel` before the next level starts.
    pub post_level_delay: f32,
    pub extra_asteroids_per_level: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            half_height: DEFAULT_HALF_HEIGHT,
            screen_wrap: DEFAULT_SCREEN_WRAP,
            ship_speed: DEFAULT_SHIP_SPEED,
            ship_radius: DEFAULT_SHIP_RADIUS,
            starting_lives: DEFAULT_STARTING_LIVES,
            immunity_seconds: DEFAULT_IMMUNITY_SECONDS,
            bullet_speed: DEFAULT_BULLET_SPEED,
            bullet_lifetime: DEFAULT_BULLET_LIFETIME,
            bullet_radius: DEFAULT_BULLET_RADIUS,
            initial_asteroids: DEFAULT_INITIAL_ASTEROIDS,
            initial_size: DEFAULT_INITIAL_SIZE,
            min_asteroid_dist_from_ship: DEFAULT_MIN_ASTEROID_DIST_FROM_SHIP,
            max_spawn_attempts: DEFAULT_MAX_SPAWN_ATTEMPTS,
            asteroid_min_speed: DEFAULT_ASTEROID_MIN_SPEED,
            asteroid_max_speed: DEFAULT_ASTEROID_MAX_SPEED,
            split_children: DEFAULT_SPLIT_CHILDREN,
            split_spread_degrees: DEFAULT_SPLIT_SPREAD_DEGREES,
            radius_large: DEFAULT_RADIUS_LARGE,
            radius_medium: DEFAULT_RADIUS_MEDIUM,
            radius_small: DEFAULT_RADIUS_SMALL,
            score_large: DEFAULT_SCORE_LARGE,
            score_medium: DEFAULT_SCORE_MEDIUM,
            score_small: DEFAULT_SCORE_SMALL,
            post_level_delay: DEFAULT_POST_LEVEL_DELAY,
            extra_asteroids_per_level: DEFAULT_EXTRA_ASTEROIDS_PER_LEVEL,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), GameError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| GameError::Config(format!("Failed to load config file: {}", e)))?;
        self.apply_ini(&config)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), GameError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| GameError::Config(format!("Failed to parse config: {}", e)))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), GameError> {
        // [screen] section
        read_f32(config, "screen", "half_width", &mut self.half_width)?;
        read_f32(config, "screen", "half_height", &mut self.half_height)?;
        read_bool(config, "screen", "wrap", &mut self.screen_wrap)?;

        // [ship] section
        read_f32(config, "ship", "speed", &mut self.ship_speed)?;
        read_f32(config, "ship", "radius", &mut self.ship_radius)?;
        read_u32(config, "ship", "starting_lives", &mut self.starting_lives)?;
        read_f32(config, "ship", "immunity_seconds", &mut self.immunity_seconds)?;

        // [bullet] section
        read_f32(config, "bullet", "speed", &mut self.bullet_speed)?;
        read_f32(config, "bullet", "lifetime", &mut self.bullet_lifetime)?;
        read_f32(config, "bullet", "radius", &mut self.bullet_radius)?;

        // [asteroids] section
        read_u32(config, "asteroids", "initial_count", &mut self.initial_asteroids)?;
        if let Some(size) = config.get("asteroids", "initial_size") {
            self.initial_size = size
                .parse()
                .map_err(|e| GameError::Config(format!("[asteroids] initial_size: {}", e)))?;
        }
        read_f32(
            config,
            "asteroids",
            "min_distance_from_ship",
            &mut self.min_asteroid_dist_from_ship,
        )?;
        read_u32(
            config,
            "asteroids",
            "max_spawn_attempts",
            &mut self.max_spawn_attempts,
        )?;
        read_f32(config, "asteroids", "min_speed", &mut self.asteroid_min_speed)?;
        read_f32(config, "asteroids", "max_speed", &mut self.asteroid_max_speed)?;
        read_u32(config, "asteroids", "split_children", &mut self.split_children)?;
        read_f32(
            config,
            "asteroids",
            "split_spread_degrees",
            &mut self.split_spread_degrees,
        )?;
        read_f32(config, "asteroids", "radius_large", &mut self.radius_large)?;
        read_f32(config, "asteroids", "radius_medium", &mut self.radius_medium)?;
        read_f32(config, "asteroids", "radius_small", &mut self.radius_small)?;
        read_u32(config, "asteroids", "score_large", &mut self.score_large)?;
        read_u32(config, "asteroids", "score_medium", &mut self.score_medium)?;
        read_u32(config, "asteroids", "score_small", &mut self.score_small)?;

        // [level] section
        read_f32(config, "level", "post_level_delay", &mut self.post_level_delay)?;
        read_u32(
            config,
            "level",
            "extra_asteroids_per_level",
            &mut self.extra_asteroids_per_level,
        )?;

        if self.asteroid_min_speed > self.asteroid_max_speed {
            std::mem::swap(&mut self.asteroid_min_speed, &mut self.asteroid_max_speed);
        }
        self.warn_unreachable_spawn_distance();

        info!(
            "Config: screen {}x{}, ship speed {}, lives {}, {} {} asteroids at >= {} from ship",
            self.half_width * 2.0,
            self.half_height * 2.0,
            self.ship_speed,
            self.starting_lives,
            self.initial_asteroids,
            self.initial_size,
            self.min_asteroid_dist_from_ship
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), GameError> {
        let mut config = Ini::new();

        config.set("screen", "half_width", Some(self.half_width.to_string()));
        config.set("screen", "half_height", Some(self.half_height.to_string()));
        config.set("screen", "wrap", Some(self.screen_wrap.to_string()));

        config.set("ship", "speed", Some(self.ship_speed.to_string()));
        config.set("ship", "radius", Some(self.ship_radius.to_string()));
        config.set("ship", "starting_lives", Some(self.starting_lives.to_string()));
        config.set(
            "ship",
            "immunity_seconds",
            Some(self.immunity_seconds.to_string()),
        );

        config.set("bullet", "speed", Some(self.bullet_speed.to_string()));
        config.set("bullet", "lifetime", Some(self.bullet_lifetime.to_string()));
        config.set("bullet", "radius", Some(self.bullet_radius.to_string()));

        config.set(
            "asteroids",
            "initial_count",
            Some(self.initial_asteroids.to_string()),
        );
        config.set("asteroids", "initial_size", Some(self.initial_size.to_string()));
        config.set(
            "asteroids",
            "min_distance_from_ship",
            Some(self.min_asteroid_dist_from_ship.to_string()),
        );
        config.set(
            "asteroids",
            "max_spawn_attempts",
            Some(self.max_spawn_attempts.to_string()),
        );
        config.set("asteroids", "min_speed", Some(self.asteroid_min_speed.to_string()));
        config.set("asteroids", "max_speed", Some(self.asteroid_max_speed.to_string()));
        config.set(
            "asteroids",
            "split_children",
            Some(self.split_children.to_string()),
        );
        config.set(
            "asteroids",
            "split_spread_degrees",
            Some(self.split_spread_degrees.to_string()),
        );
        config.set("asteroids", "radius_large", Some(self.radius_large.to_string()));
        config.set("asteroids", "radius_medium", Some(self.radius_medium.to_string()));
        config.set("asteroids", "radius_small", Some(self.radius_small.to_string()));
        config.set("asteroids", "score_large", Some(self.score_large.to_string()));
        config.set("asteroids", "score_medium", Some(self.score_medium.to_string()));
        config.set("asteroids", "score_small", Some(self.score_small.to_string()));

        config.set(
            "level",
            "post_level_delay",
            Some(self.post_level_delay.to_string()),
        );
        config.set(
            "level",
            "extra_asteroids_per_level",
            Some(self.extra_asteroids_per_level.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| GameError::Config(format!("Failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Play area described by this configuration.
    pub fn screen_bounds(&self) -> ScreenBounds {
        ScreenBounds::new(self.half_width, self.half_height)
    }

    /// Collider radius for an asteroid tier.
    pub fn asteroid_radius(&self, size: AsteroidSize) -> f32 {
        match size {
            AsteroidSize::Large => self.radius_large,
            AsteroidSize::Medium => self.radius_medium,
            AsteroidSize::Small => self.radius_small,
        }
    }

    /// Score awarded for shooting an asteroid of the given tier.
    pub fn asteroid_score(&self, size: AsteroidSize) -> u32 {
        match size {
            AsteroidSize::Large => self.score_large,
            AsteroidSize::Medium => self.score_medium,
            AsteroidSize::Small => self.score_small,
        }
    }

    /// Parent asteroids to spawn when `level` (1-based) starts.
    pub fn asteroids_for_level(&self, level: u32) -> u32 {
        self.initial_asteroids.saturating_add(
            level
                .saturating_sub(1)
                .saturating_mul(self.extra_asteroids_per_level),
        )
    }

    /// A minimum spawn distance larger than the screen diagonal can never be
    /// met by a random placement; every spawn then uses the corner fallback.
    fn warn_unreachable_spawn_distance(&self) {
        let diagonal = (self.half_width * 2.0).hypot(self.half_height * 2.0);
        if self.min_asteroid_dist_from_ship >= diagonal {
            warn!(
                "min_distance_from_ship {} >= screen diagonal {}; asteroids will spawn in the farthest corner",
                self.min_asteroid_dist_from_ship, diagonal
            );
        }
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) -> Result<(), GameError> {
    if let Some(value) = config
        .getfloat(section, key)
        .map_err(|e| GameError::Config(format!("[{}] {}: {}", section, key, e)))?
    {
        *target = value as f32;
    }
    Ok(())
}

fn read_u32(config: &Ini, section: &str, key: &str, target: &mut u32) -> Result<(), GameError> {
    if let Some(value) = config
        .getuint(section, key)
        .map_err(|e| GameError::Config(format!("[{}] {}: {}", section, key, e)))?
    {
        *target = u32::try_from(value)
            .map_err(|_| GameError::Config(format!("[{}] {}: {} is too large", section, key, value)))?;
    }
    Ok(())
}

fn read_bool(config: &Ini, section: &str, key: &str, target: &mut bool) -> Result<(), GameError> {
    if let Some(value) = config
        .getbool(section, key)
        .map_err(|e| GameError::Config(format!("[{}] {}: {}", section, key, e)))?
    {
        *target = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.initial_asteroids, 3);
        assert_eq!(config.initial_size, AsteroidSize::Large);
        assert_eq!(config.min_asteroid_dist_from_ship, 5.0);
        assert_eq!(config.immunity_seconds, 1.0);
        assert_eq!(config.screen_bounds(), ScreenBounds::new(11.0, 8.0));
    }

    #[test]
    fn test_load_from_str_overrides_only_present_keys() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[ship]\nstarting_lives = 5\n\n[asteroids]\ninitial_size = Medium\nmin_distance_from_ship = 3.5\n",
            )
            .unwrap();
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.initial_size, AsteroidSize::Medium);
        assert_eq!(config.min_asteroid_dist_from_ship, 3.5);
        assert_eq!(config.ship_speed, DEFAULT_SHIP_SPEED);
        assert_eq!(config.half_width, DEFAULT_HALF_WIDTH);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let mut config = GameConfig::new();
        assert!(matches!(
            config.load_from_str("[ship]\nstarting_lives = many\n"),
            Err(GameError::Config(_))
        ));
        assert!(matches!(
            config.load_from_str("[asteroids]\ninitial_size = gigantic\n"),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_swapped_speed_range_is_fixed() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[asteroids]\nmin_speed = 4.0\nmax_speed = 2.0\n")
            .unwrap();
        assert_eq!(config.asteroid_min_speed, 2.0);
        assert_eq!(config.asteroid_max_speed, 4.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/asterax/config.ini");
        assert!(config.load_from_file().is_err());
    }

    #[test]
    fn test_tier_tables() {
        let config = GameConfig::new();
        assert_eq!(config.asteroid_score(AsteroidSize::Large), 20);
        assert_eq!(config.asteroid_score(AsteroidSize::Medium), 50);
        assert_eq!(config.asteroid_score(AsteroidSize::Small), 100);
        assert!(
            config.asteroid_radius(AsteroidSize::Large)
                > config.asteroid_radius(AsteroidSize::Small)
        );
    }

    #[test]
    fn test_asteroids_for_level() {
        let config = GameConfig::new();
        assert_eq!(config.asteroids_for_level(1), 3);
        assert_eq!(config.asteroids_for_level(2), 4);
        assert_eq!(config.asteroids_for_level(0), 3);
    }

    #[test]
    fn test_asteroids_for_level_saturates() {
        let mut config = GameConfig::new();
        config
            .load_from_str(&format!("[level]\nextra_asteroids_per_level = {}\n", u32::MAX))
            .unwrap();
        assert_eq!(config.asteroids_for_level(1), 3);
        assert_eq!(config.asteroids_for_level(2), u32::MAX);
        assert_eq!(config.asteroids_for_level(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let path = std::env::temp_dir().join(format!("asterax-{}.ini", std::process::id()));
        let mut saved = GameConfig::with_path(&path);
        saved.starting_lives = 7;
        saved.initial_size = AsteroidSize::Small;
        saved.post_level_delay = 0.25;
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.starting_lives, 7);
        assert_eq!(loaded.initial_size, AsteroidSize::Small);
        assert_eq!(loaded.post_level_delay, 0.25);
        assert_eq!(loaded.ship_speed, DEFAULT_SHIP_SPEED);
    }
}
