//! Semantic categories and the set type the classifier produces

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a player's animation state.
///
/// Declaration order is precedence order: when a sample carries several
/// categories, the first one listed here is the primary category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    SpecialStun,
    Launched,
    Knockdown,
    Hitstun,
    Blockstun,
    RecoilGuard,
    Superflash,
    Attacking,
    Airtech,
    Groundtech,
    Dash,
    Landing,
    Airborne,
    Crouch,
    Walk,
    Idle,
}

impl Category {
    /// Every category, highest precedence first
    pub const ALL: [Category; 16] = [
        Category::SpecialStun,
        Category::Launched,
        Category::Knockdown,
        Category::Hitstun,
        Category::Blockstun,
        Category::RecoilGuard,
        Category::Superflash,
        Category::Attacking,
        Category::Airtech,
        Category::Groundtech,
        Category::Dash,
        Category::Landing,
        Category::Airborne,
        Category::Crouch,
        Category::Walk,
        Category::Idle,
    ];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::SpecialStun => "SpecialStun",
            Category::Launched => "Launched",
            Category::Knockdown => "Knockdown",
            Category::Hitstun => "Hitstun",
            Category::Blockstun => "Blockstun",
            Category::RecoilGuard => "RecoilGuard",
            Category::Superflash => "Superflash",
            Category::Attacking => "Attacking",
            Category::Airtech => "Airtech",
            Category::Groundtech => "Groundtech",
            Category::Dash => "Dash",
            Category::Landing => "Landing",
            Category::Airborne => "Airborne",
            Category::Crouch => "Crouch",
            Category::Walk => "Walk",
            Category::Idle => "Idle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit set of [`Category`] values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategorySet(u32);

impl CategorySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(categories: &[Category]) -> Self {
        let mut set = Self::empty();
        for &category in categories {
            set.insert(category);
        }
        set
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Highest-precedence member, `Idle` for an empty set
    pub fn primary(&self) -> Category {
        self.iter().next().unwrap_or(Category::Idle)
    }

    /// Members in precedence order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

/// Element of a special stun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StunElement {
    Fire,
    Electric,
    Frozen,
}

/// Stance a guard was made in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardHeight {
    Stand,
    Crouch,
    Air,
}

/// Recoil guard variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RgType {
    Stand,
    Crouch,
    Air,
}

impl RgType {
    /// Freeze after which the defender may cancel with an attack
    pub fn freeze_ticks(&self) -> u64 {
        match self {
            RgType::Stand => 60,
            RgType::Crouch => 60,
            RgType::Air => 48,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RgType::Stand => "standing",
            RgType::Crouch => "crouching",
            RgType::Air => "air",
        }
    }
}

/// Stun that follows the freeze when a recoil guard is not cancelled
pub const RG_FULL_STUN_TICKS: u64 = 48;

/// Kind of super activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuperflashKind {
    Super,
    Overdrive,
}

impl SuperflashKind {
    /// Length of the freeze accompanying the flash
    pub fn duration_ticks(&self) -> u64 {
        match self {
            SuperflashKind::Super => 96,
            SuperflashKind::Overdrive => 150,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SuperflashKind::Super => "super",
            SuperflashKind::Overdrive => "overdrive",
        }
    }
}
