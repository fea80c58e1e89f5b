//! Input frames, button sets and direction masks

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction bits written to the host
pub mod direction_bits {
    pub const UP: u8 = 0x01;
    pub const DOWN: u8 = 0x02;
    pub const LEFT: u8 = 0x04;
    pub const RIGHT: u8 = 0x08;
}

/// Attack button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    A,
    B,
    C,
    D,
}

impl Button {
    pub fn mask(self) -> u8 {
        match self {
            Button::A => 0x01,
            Button::B => 0x02,
            Button::C => 0x04,
            Button::D => 0x08,
        }
    }

    pub fn from_char(c: char) -> Option<Button> {
        match c.to_ascii_uppercase() {
            'A' => Some(Button::A),
            'B' => Some(Button::B),
            'C' => Some(Button::C),
            'D' => Some(Button::D),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Button::A => 'A',
            Button::B => 'B',
            Button::C => 'C',
            Button::D => 'D',
        }
    }
}

/// Set of held buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    /// A+B+C, used for techs
    pub const ATTACKS: Buttons = Buttons(0x07);

    pub fn with(self, button: Button) -> Buttons {
        Buttons(self.0 | button.mask())
    }

    pub fn mask(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Button> for Buttons {
    fn from(button: Button) -> Self {
        Buttons(button.mask())
    }
}

impl fmt::Display for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for button in [Button::A, Button::B, Button::C, Button::D] {
            if self.0 & button.mask() != 0 {
                write!(f, "{}", button.letter())?;
            }
        }
        Ok(())
    }
}

/// Which way a player faces; motions are authored facing right
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Face toward the opponent; ties face right
    pub fn toward(own_x: f32, opponent_x: f32) -> Facing {
        if own_x <= opponent_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// Numpad direction (5 = neutral, 6 = forward, 4 = back)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction(u8);

impl Direction {
    pub const NEUTRAL: Direction = Direction(5);
    pub const DOWN_BACK: Direction = Direction(1);
    pub const DOWN: Direction = Direction(2);
    pub const DOWN_FORWARD: Direction = Direction(3);
    pub const BACK: Direction = Direction(4);
    pub const FORWARD: Direction = Direction(6);
    pub const UP_BACK: Direction = Direction(7);
    pub const UP: Direction = Direction(8);
    pub const UP_FORWARD: Direction = Direction(9);

    pub fn from_numpad(n: u8) -> Option<Direction> {
        (1..=9).contains(&n).then_some(Direction(n))
    }

    pub fn numpad(self) -> u8 {
        self.0
    }

    /// Absolute direction bits for the given facing
    pub fn mask(self, facing: Facing) -> u8 {
        use direction_bits::*;

        let vertical = match self.0 {
            1..=3 => DOWN,
            7..=9 => UP,
            _ => 0,
        };
        let (forward, back) = match facing {
            Facing::Right => (RIGHT, LEFT),
            Facing::Left => (LEFT, RIGHT),
        };
        let horizontal = match self.0 % 3 {
            0 => forward,
            1 => back,
            _ => 0,
        };
        vertical | horizontal
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One held input for a number of ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub direction: Direction,
    pub buttons: Buttons,
    pub duration_ticks: u32,
}

impl InputFrame {
    pub fn new(direction: Direction, buttons: Buttons, duration_ticks: u32) -> Self {
        Self {
            direction,
            buttons,
            duration_ticks,
        }
    }

    pub fn hold(direction: Direction, duration_ticks: u32) -> Self {
        Self::new(direction, Buttons::NONE, duration_ticks)
    }

    pub fn release(duration_ticks: u32) -> Self {
        Self::hold(Direction::NEUTRAL, duration_ticks)
    }

    pub fn is_neutral(&self) -> bool {
        self.direction == Direction::NEUTRAL && self.buttons.is_empty()
    }

    pub fn to_mask(&self, facing: Facing) -> InputMask {
        InputMask {
            direction: self.direction.mask(facing),
            buttons: self.buttons.mask(),
        }
    }
}

/// Absolute input written to the host for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputMask {
    pub direction: u8,
    pub buttons: u8,
}

impl InputMask {
    pub const NEUTRAL: InputMask = InputMask {
        direction: 0,
        buttons: 0,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}
