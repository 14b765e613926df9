//! HUD synchronisation.
//!
//! Pushes the session's score and lives texts to the host [`Hud`] whenever
//! the [`Session`] changed since the last run.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::host::Hud;
use crate::resources::session::Session;

/// Refresh the HUD texts if the session changed.
pub fn hud_sync_system(session: Option<Res<Session>>, hud: Option<ResMut<Hud>>) {
    let (Some(session), Some(mut hud)) = (session, hud) else {
        return;
    };
    if !session.is_changed() {
        return;
    }
    debug!(
        "HUD refresh: score {}, lives {}",
        session.score(),
        session.lives()
    );
    hud.0.set_score_text(&session.score_text());
    hud.0.set_lives_text(&session.lives_text());
}
