//! Sample components and the entity model the demo queries.

use std::fmt;

use ecs_component::{Component, EntityStore, entity_model};
use serde::{Deserialize, Serialize};

/// A 2D position in world units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.x, self.y)
    }
}

/// Displacement per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.dx, self.dy)
    }
}

/// Tag for entities not driven by a player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Npc;

impl Component for Npc {
    fn type_name() -> &'static str {
        "Npc"
    }
}

impl fmt::Display for Npc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Health {
    pub hp: i32,
}

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.hp)
    }
}

entity_model! {
    /// Every demo entity is built from this record.
    pub struct Character {
        position: Position,
        velocity: Velocity,
        npc: Npc,
        health: Health,
    }
}

/// Three npcs, each holding every component.
pub fn sample_store() -> EntityStore<Character> {
    [
        (1.0, 2.0, 0.1, 0.2, 100),
        (3.0, 4.0, 0.3, 0.4, 80),
        (5.0, 6.0, 0.5, 0.6, 60),
    ]
    .into_iter()
    .map(|(x, y, dx, dy, hp)| {
        Character::new(Position { x, y }, Velocity { dx, dy }, Npc, Health { hp })
    })
    .collect()
}
