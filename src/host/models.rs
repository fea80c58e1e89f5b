//! Core data models shared with the host
//!
//! This module defines the player identifiers, per-tick samples and the
//! presentation messages exchanged with the collaborators around the monitor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two fighters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Processing order; player 1 wins same-tick ties
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    pub fn other(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::P1 => write!(f, "P1"),
            Player::P2 => write!(f, "P2"),
        }
    }
}

/// A value held for each player, indexable by [`Player`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerPlayer<T>(pub [T; 2]);

impl<T> PerPlayer<T> {
    pub fn new(p1: T, p2: T) -> Self {
        Self([p1, p2])
    }

    pub fn from_fn(mut f: impl FnMut(Player) -> T) -> Self {
        Self([f(Player::P1), f(Player::P2)])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        &self.0[player.index()]
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        &mut self.0[player.index()]
    }
}

/// Raw per-player state read from the game each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Current animation (move) id
    pub animation_id: u16,

    /// Counts down to zero while a launched player cannot tech
    #[serde(default)]
    pub untech: u16,

    #[serde(default)]
    pub position_x: f32,

    /// Height above the floor; zero when grounded
    #[serde(default)]
    pub position_y: f32,

    #[serde(default)]
    pub velocity_y: f32,
}

impl Sample {
    pub fn new(animation_id: u16) -> Self {
        Self {
            animation_id,
            ..Self::default()
        }
    }

    pub fn with_untech(mut self, untech: u16) -> Self {
        self.untech = untech;
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position_x = x;
        self.position_y = y;
        self
    }

    pub fn is_airborne(&self) -> bool {
        self.position_y > 0.0
    }
}

/// Display color for presentation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Green,
    Red,
    Yellow,
    Cyan,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Cyan => "cyan",
        }
    }
}

/// How long a message stays visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifetime {
    /// Expires after the given number of ticks
    Ttl(u64),
    /// Stays until replaced by another message with the same id
    Permanent(u32),
}

/// Screen-space anchor for a message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A status message handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Color,
    pub position: Position,
    pub lifetime: Lifetime,
}

impl Message {
    pub fn new(
        text: impl Into<String>,
        color: Color,
        position: Position,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            text: text.into(),
            color,
            position,
            lifetime,
        }
    }
}
