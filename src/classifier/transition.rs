//! Edge detection between consecutive classifications

use super::{Classification, RgType, SuperflashKind};
use serde::{Deserialize, Serialize};

/// A player's classification on the previous and current tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub prev: Classification,
    pub cur: Classification,
}

impl Transition {
    pub fn new(prev: Classification, cur: Classification) -> Self {
        Self { prev, cur }
    }

    /// No change; used when a tick's sample was unavailable
    pub fn steady(state: Classification) -> Self {
        Self::new(state, state)
    }

    pub fn entered(&self, pred: impl Fn(&Classification) -> bool) -> bool {
        !pred(&self.prev) && pred(&self.cur)
    }

    pub fn left(&self, pred: impl Fn(&Classification) -> bool) -> bool {
        pred(&self.prev) && !pred(&self.cur)
    }

    pub fn became_actionable(&self) -> bool {
        self.entered(Classification::is_actionable)
    }

    pub fn entered_blockstun(&self) -> bool {
        self.entered(Classification::is_blockstun)
    }

    pub fn entered_attack(&self) -> bool {
        self.entered(Classification::is_attacking)
    }

    pub fn entered_recoil_guard(&self) -> Option<RgType> {
        if self.entered(Classification::is_recoil_guard) {
            self.cur.recoil_guard
        } else {
            None
        }
    }

    pub fn entered_superflash(&self) -> Option<SuperflashKind> {
        if self.entered(Classification::is_superflash) {
            self.cur.superflash
        } else {
            None
        }
    }

    /// Eligible this tick. A counter that reaches zero on the same tick the
    /// launch animation ends still counts, unless the player hit the floor or
    /// froze on that tick.
    pub fn is_airtech_eligible(&self) -> bool {
        self.cur.is_airtech_eligible()
            || (self.prev.in_techable_state()
                && self.cur.untech == 0
                && !self.cur.is_downed()
                && !self.cur.is_frozen())
    }

    pub fn entered_airtech_eligibility(&self) -> bool {
        !self.prev.is_airtech_eligible() && self.is_airtech_eligible()
    }

    /// Left blockstun or recoil guard into something the player chose to do
    pub fn regained_control(&self) -> bool {
        let was_guarding = self.prev.is_blockstun() || self.prev.is_recoil_guard();
        let still_guarding = self.cur.is_blockstun() || self.cur.is_recoil_guard();
        was_guarding
            && !still_guarding
            && (self.cur.is_actionable()
                || self.cur.is_attacking()
                || self.cur.is_dashing()
                || self.cur.is_superflash())
    }
}
