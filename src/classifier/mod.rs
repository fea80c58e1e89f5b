//! Classifier module - Map raw samples to semantic categories
//!
//! Classification is a pure function of a single [`Sample`]; edges are
//! detected by comparing consecutive classifications (see [`Transition`]).

use crate::host::Sample;
use serde::{Deserialize, Serialize};

pub mod category;
pub mod tables;
pub mod transition;

// Re-export key types
pub use category::{
    Category, CategorySet, GuardHeight, RG_FULL_STUN_TICKS, RgType, StunElement, SuperflashKind,
};
pub use tables::{AnimationKind, ids};
pub use transition::Transition;

/// Result of classifying one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub primary: Category,
    pub categories: CategorySet,
    pub special_stun: Option<StunElement>,
    pub recoil_guard: Option<RgType>,
    pub superflash: Option<SuperflashKind>,
    pub guard_height: Option<GuardHeight>,
    pub untech: u16,
}

impl Default for Classification {
    fn default() -> Self {
        Self::from_set(CategorySet::of(&[Category::Idle]), 0)
    }
}

impl Classification {
    fn from_set(categories: CategorySet, untech: u16) -> Self {
        Self {
            primary: categories.primary(),
            categories,
            special_stun: None,
            recoil_guard: None,
            superflash: None,
            guard_height: None,
            untech,
        }
    }

    pub fn has(&self, category: Category) -> bool {
        self.categories.contains(category)
    }

    /// Free to start any action this tick
    pub fn is_actionable(&self) -> bool {
        matches!(
            self.primary,
            Category::Idle | Category::Walk | Category::Crouch | Category::Airborne
        )
    }

    pub fn is_blockstun(&self) -> bool {
        self.has(Category::Blockstun)
    }

    pub fn is_recoil_guard(&self) -> bool {
        self.has(Category::RecoilGuard)
    }

    /// Any hit reaction, including launches, knockdowns and special stuns
    pub fn is_hitstun(&self) -> bool {
        self.has(Category::Hitstun)
    }

    pub fn is_special_stun(&self) -> bool {
        self.has(Category::SpecialStun)
    }

    pub fn is_attacking(&self) -> bool {
        self.has(Category::Attacking)
    }

    pub fn is_superflash(&self) -> bool {
        self.has(Category::Superflash)
    }

    pub fn is_dashing(&self) -> bool {
        self.has(Category::Dash)
    }

    pub fn is_tech(&self) -> bool {
        self.has(Category::Airtech) || self.has(Category::Groundtech)
    }

    pub fn is_air_guard(&self) -> bool {
        self.guard_height == Some(GuardHeight::Air)
    }

    pub fn is_frozen(&self) -> bool {
        self.special_stun == Some(StunElement::Frozen)
    }

    /// Knocked down or rising from a knockdown
    pub fn is_downed(&self) -> bool {
        self.has(Category::Knockdown) || self.has(Category::Groundtech)
    }

    /// Launched, burned, shocked or air-blocking. Freezing overrides a launch.
    pub fn in_techable_state(&self) -> bool {
        if self.is_frozen() {
            return false;
        }
        self.has(Category::Launched)
            || matches!(
                self.special_stun,
                Some(StunElement::Fire) | Some(StunElement::Electric)
            )
            || self.is_air_guard()
    }

    /// In a techable state with the untech counter spent
    pub fn is_airtech_eligible(&self) -> bool {
        self.in_techable_state() && self.untech == 0
    }

    pub fn is_groundtech_eligible(&self) -> bool {
        self.has(Category::Knockdown) && self.untech == 0
    }
}

/// Classify a raw sample.
///
/// Total over the input domain: ids missing from the table classify as idle.
pub fn classify(sample: &Sample) -> Classification {
    let mut set = CategorySet::empty();
    let mut special_stun = None;
    let mut recoil_guard = None;
    let mut superflash = None;
    let mut guard_height = None;

    match tables::lookup(sample.animation_id) {
        None | Some(AnimationKind::Idle) => set.insert(Category::Idle),
        Some(AnimationKind::Walk) => set.insert(Category::Walk),
        Some(AnimationKind::Crouch) => set.insert(Category::Crouch),
        Some(AnimationKind::Jump) => set.insert(Category::Airborne),
        Some(AnimationKind::Landing) => set.insert(Category::Landing),
        Some(AnimationKind::Dash) => set.insert(Category::Dash),
        Some(AnimationKind::Hitstun) => {
            set.insert(Category::Hitstun);
            if sample.is_airborne() {
                set.insert(Category::Launched);
            }
        }
        Some(AnimationKind::Launched) => {
            set.insert(Category::Hitstun);
            set.insert(Category::Launched);
        }
        Some(AnimationKind::Knockdown) => {
            set.insert(Category::Hitstun);
            set.insert(Category::Knockdown);
        }
        Some(AnimationKind::Groundtech) => set.insert(Category::Groundtech),
        Some(AnimationKind::Blockstun(height)) => {
            set.insert(Category::Blockstun);
            guard_height = Some(height);
        }
        Some(AnimationKind::RecoilGuard(rg)) => {
            set.insert(Category::RecoilGuard);
            recoil_guard = Some(rg);
        }
        Some(AnimationKind::Airtech) => set.insert(Category::Airtech),
        Some(AnimationKind::SpecialStun(element)) => {
            set.insert(Category::SpecialStun);
            set.insert(Category::Hitstun);
            if sample.is_airborne() {
                set.insert(Category::Launched);
            }
            special_stun = Some(element);
        }
        Some(AnimationKind::Superflash(kind)) => {
            set.insert(Category::Superflash);
            set.insert(Category::Attacking);
            superflash = Some(kind);
        }
        Some(AnimationKind::Attack) => set.insert(Category::Attacking),
    }

    Classification {
        special_stun,
        recoil_guard,
        superflash,
        guard_height,
        ..Classification::from_set(set, sample.untech)
    }
}

pub fn is_actionable(sample: &Sample) -> bool {
    classify(sample).is_actionable()
}

pub fn is_blockstun(sample: &Sample) -> bool {
    classify(sample).is_blockstun()
}

pub fn is_hitstun(sample: &Sample) -> bool {
    classify(sample).is_hitstun()
}

pub fn is_airtech_eligible(sample: &Sample) -> bool {
    classify(sample).is_airtech_eligible()
}

pub fn is_groundtech_eligible(sample: &Sample) -> bool {
    classify(sample).is_groundtech_eligible()
}

pub fn is_dashing(sample: &Sample) -> bool {
    classify(sample).is_dashing()
}
