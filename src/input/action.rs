//! Concrete actions the virtual controller can perform

use super::frame::Button;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Special-move motion families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SpecialMotion {
    /// Quarter circle forward (236)
    Qcf,
    /// Quarter circle back (214)
    Qcb,
    /// Dragon punch (623)
    Dp,
    /// Reverse dragon punch (421)
    Rdp,
    /// Half circle forward (41236)
    Hcf,
    /// Half circle back (63214)
    Hcb,
    /// Charge back, release forward ([4]6)
    ChargeBack,
    /// Charge down, release up ([2]8)
    ChargeDown,
}

impl SpecialMotion {
    pub const ALL: [SpecialMotion; 8] = [
        SpecialMotion::Qcf,
        SpecialMotion::Qcb,
        SpecialMotion::Dp,
        SpecialMotion::Rdp,
        SpecialMotion::Hcf,
        SpecialMotion::Hcb,
        SpecialMotion::ChargeBack,
        SpecialMotion::ChargeDown,
    ];

    /// Numpad notation without a button, e.g. `236` or `[4]6`
    pub fn notation(&self) -> &'static str {
        match self {
            SpecialMotion::Qcf => "236",
            SpecialMotion::Qcb => "214",
            SpecialMotion::Dp => "623",
            SpecialMotion::Rdp => "421",
            SpecialMotion::Hcf => "41236",
            SpecialMotion::Hcb => "63214",
            SpecialMotion::ChargeBack => "[4]6",
            SpecialMotion::ChargeDown => "[2]8",
        }
    }

    pub fn from_notation(notation: &str) -> Option<SpecialMotion> {
        Self::ALL.into_iter().find(|m| m.notation() == notation)
    }
}

/// Jump arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpDirection {
    Neutral,
    Forward,
    Back,
}

/// Direction held while teching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechDirection {
    #[default]
    Neutral,
    Forward,
    Back,
}

/// A fully resolved action, ready to be turned into input frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Attack { button: Button, crouching: bool },
    Jump { direction: JumpDirection },
    Block { crouching: bool },
    Special { motion: SpecialMotion, button: Button },
    Airtech { direction: TechDirection },
    Custom { id: u32, notation: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Attack {
                button,
                crouching: false,
            } => write!(f, "5{}", button.letter()),
            Action::Attack {
                button,
                crouching: true,
            } => write!(f, "2{}", button.letter()),
            Action::Jump { direction } => match direction {
                JumpDirection::Neutral => write!(f, "jump"),
                JumpDirection::Forward => write!(f, "forward jump"),
                JumpDirection::Back => write!(f, "back jump"),
            },
            Action::Block { crouching: false } => write!(f, "block"),
            Action::Block { crouching: true } => write!(f, "crouch block"),
            Action::Special { motion, button } => {
                write!(f, "{}{}", motion.notation(), button.letter())
            }
            Action::Airtech { direction } => match direction {
                TechDirection::Neutral => write!(f, "airtech"),
                TechDirection::Forward => write!(f, "forward airtech"),
                TechDirection::Back => write!(f, "back airtech"),
            },
            Action::Custom { id, notation } => write!(f, "custom #{} ({})", id, notation),
        }
    }
}
