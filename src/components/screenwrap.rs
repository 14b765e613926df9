use bevy_ecs::prelude::Component;

/// Entities with this marker reappear on the opposite edge when they leave the screen.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ScreenWrap;
