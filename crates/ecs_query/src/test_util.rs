//! Shared fixtures for the query tests.

use ecs_component::{Component, EntityModel, EntityStore, entity_model};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Npc;

impl Component for Npc {
    fn type_name() -> &'static str {
        "Npc"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Health {
    pub hp: i32,
}

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

/// Not part of [`Character`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mana {
    pub points: i32,
}

impl Component for Mana {
    fn type_name() -> &'static str {
        "Mana"
    }
}

entity_model! {
    pub struct Character {
        position: Position,
        velocity: Velocity,
        npc: Npc,
        health: Health,
    }
}

pub fn character(x: f32, y: f32, dx: f32, dy: f32, hp: i32) -> Character {
    Character::new(Position { x, y }, Velocity { dx, dy }, Npc, Health { hp })
}

/// E1..E3: every entity holds every component.
pub fn full_store() -> EntityStore<Character> {
    [
        character(1.0, 2.0, 0.1, 0.2, 100),
        character(3.0, 4.0, 0.3, 0.4, 80),
        character(5.0, 6.0, 0.5, 0.6, 60),
    ]
    .into_iter()
    .collect()
}

/// Entities with varying component sets:
///
/// 1. Position, Velocity, Health (a player: no Npc tag)
/// 2. Position, Npc, Health (a stationary npc)
/// 3. Position, Velocity, Npc, Health
/// 4. Health only
pub fn mixed_store() -> EntityStore<Character> {
    [
        Character::default()
            .with(Position { x: 0.0, y: 0.0 })
            .with(Velocity { dx: 1.0, dy: 0.0 })
            .with(Health { hp: 90 }),
        Character::default()
            .with(Position { x: 10.0, y: 10.0 })
            .with(Npc)
            .with(Health { hp: 50 }),
        character(20.0, 20.0, 0.0, -1.0, 30),
        Character::default().with(Health { hp: 1 }),
    ]
    .into_iter()
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Armor(pub i32);

impl Component for Armor {
    fn type_name() -> &'static str {
        "Stat"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Speed(pub i32);

impl Component for Speed {
    fn type_name() -> &'static str {
        "Stat"
    }
}

entity_model! {
    /// Two component types declared under one name.
    pub struct Loadout {
        armor: Armor,
        speed: Speed,
    }
}
