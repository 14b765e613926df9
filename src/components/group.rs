use bevy_ecs::prelude::Component;

/// Collision group names used by the resolver.
pub const SHIP: &str = "ship";
pub const ASTEROID: &str = "asteroid";
pub const BULLET: &str = "bullet";

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Group(pub &'static str);

impl Group {
    pub fn new(name: &'static str) -> Self {
        Group(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}
