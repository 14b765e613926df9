//! Host capabilities injected into the world.
//!
//! The game core does not own a window, input devices or UI. The host (an
//! engine, a test harness, or the headless runner) supplies:
//!
//! - an [`InputSource`] polled once per frame, stored in [`InputDevice`]
//! - a [`HudSink`] receiving score/lives text and the game-over panel
//!   visibility, stored in [`Hud`]
//!
//! Contact events and scene reloads go through
//! [`Game::on_collision`](crate::game::Game::on_collision) and
//! [`Game::restart`](crate::game::Game::restart).

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::info;

/// Analog input axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Digital input buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Fire,
    Restart,
}

/// Per-frame input polling supplied by the host.
pub trait InputSource: Send + Sync {
    /// Axis value, nominally in `[-1, 1]`.
    fn axis(&self, axis: Axis) -> f32;
    /// Whether the button is held this frame.
    fn button_down(&self, button: Button) -> bool;
    /// Pointer position projected into world space, if a camera exists.
    fn pointer_world(&self) -> Option<Vec2>;
}

/// Display surfaces for the HUD, supplied by the host.
pub trait HudSink: Send + Sync {
    fn set_score_text(&mut self, text: &str);
    fn set_lives_text(&mut self, text: &str);
    fn set_game_over_visible(&mut self, visible: bool);
}

/// Resource wrapping the host input source.
#[derive(Resource)]
pub struct InputDevice(pub Box<dyn InputSource>);

/// Resource wrapping the host HUD.
#[derive(Resource)]
pub struct Hud(pub Box<dyn HudSink>);

/// Input source with every axis at rest and nothing pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn axis(&self, _axis: Axis) -> f32 {
        0.0
    }
    fn button_down(&self, _button: Button) -> bool {
        false
    }
    fn pointer_world(&self) -> Option<Vec2> {
        None
    }
}

/// HUD that writes every update to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHud;

impl HudSink for LogHud {
    fn set_score_text(&mut self, text: &str) {
        info!("HUD score: {}", text);
    }
    fn set_lives_text(&mut self, text: &str) {
        info!("HUD lives: {}", text);
    }
    fn set_game_over_visible(&mut self, visible: bool) {
        info!("HUD game over panel visible: {}", visible);
    }
}
