//! Movement integration and screen wrapping.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::screenwrap::ScreenWrap;
use crate::resources::screenbounds::ScreenBounds;
use crate::resources::worldtime::WorldTime;

/// Integrate velocity into position.
pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        position.pos += rigidbody.velocity * time.delta;
    }
}

/// Bring entities that left the play area back in from the opposite edge.
pub fn screen_wrap_system(
    mut query: Query<&mut MapPosition, With<ScreenWrap>>,
    bounds: Res<ScreenBounds>,
) {
    for mut position in query.iter_mut() {
        if !bounds.contains(position.pos) {
            position.pos = bounds.wrap(position.pos);
        }
    }
}
