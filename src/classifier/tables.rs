//! Canonical animation id table
//!
//! Every id the classifier understands is listed exactly once. Ranges are
//! inclusive, sorted and non-overlapping; ids outside every range are treated
//! as neutral.

use super::category::{GuardHeight, RgType, StunElement, SuperflashKind};

/// What a raw animation id represents before any sample context is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Idle,
    Walk,
    Crouch,
    Jump,
    Landing,
    Dash,
    Hitstun,
    Launched,
    Knockdown,
    Groundtech,
    Blockstun(GuardHeight),
    RecoilGuard(RgType),
    Airtech,
    SpecialStun(StunElement),
    Superflash(SuperflashKind),
    Attack,
}

#[derive(Debug, Clone, Copy)]
pub struct IdRange {
    pub first: u16,
    pub last: u16,
    pub kind: AnimationKind,
}

const fn range(first: u16, last: u16, kind: AnimationKind) -> IdRange {
    IdRange { first, last, kind }
}

pub const ANIMATION_TABLE: &[IdRange] = &[
    range(ids::IDLE, ids::IDLE, AnimationKind::Idle),
    range(ids::WALK_FORWARD, ids::WALK_BACK, AnimationKind::Walk),
    range(ids::CROUCH_ENTER, ids::CROUCH_LEAVE, AnimationKind::Crouch),
    range(ids::PREJUMP, ids::JUMP_BACK, AnimationKind::Jump),
    range(ids::LANDING, ids::LANDING, AnimationKind::Landing),
    range(ids::DASH_FORWARD, ids::BACKDASH, AnimationKind::Dash),
    range(ids::HITSTUN_STAND, 69, AnimationKind::Hitstun),
    range(ids::LAUNCHED, 79, AnimationKind::Launched),
    range(ids::KNOCKDOWN, 89, AnimationKind::Knockdown),
    range(ids::GROUNDTECH, 99, AnimationKind::Groundtech),
    range(ids::BLOCKSTUN_STAND, 157, AnimationKind::Blockstun(GuardHeight::Stand)),
    range(ids::BLOCKSTUN_CROUCH, 161, AnimationKind::Blockstun(GuardHeight::Crouch)),
    range(ids::BLOCKSTUN_AIR, 165, AnimationKind::Blockstun(GuardHeight::Air)),
    range(ids::RG_STAND, ids::RG_STAND, AnimationKind::RecoilGuard(RgType::Stand)),
    range(ids::RG_CROUCH, ids::RG_CROUCH, AnimationKind::RecoilGuard(RgType::Crouch)),
    range(ids::RG_AIR, ids::RG_AIR, AnimationKind::RecoilGuard(RgType::Air)),
    range(ids::AIRTECH_FORWARD, ids::AIRTECH_BACK, AnimationKind::Airtech),
    range(ids::STUN_FIRE, 182, AnimationKind::SpecialStun(StunElement::Fire)),
    range(ids::STUN_ELECTRIC, 185, AnimationKind::SpecialStun(StunElement::Electric)),
    range(ids::STUN_FROZEN, 189, AnimationKind::SpecialStun(StunElement::Frozen)),
    range(ids::ATTACK_FIRST, 299, AnimationKind::Attack),
    range(ids::SUPER_FLASH, 309, AnimationKind::Superflash(SuperflashKind::Super)),
    range(ids::OVERDRIVE_FLASH, 319, AnimationKind::Superflash(SuperflashKind::Overdrive)),
    range(ids::SUPER_BODY, 399, AnimationKind::Attack),
];

/// Look up the kind of a raw animation id
pub fn lookup(animation_id: u16) -> Option<AnimationKind> {
    let idx = ANIMATION_TABLE.partition_point(|r| r.last < animation_id);
    ANIMATION_TABLE
        .get(idx)
        .filter(|r| r.first <= animation_id)
        .map(|r| r.kind)
}

/// Named ids at the start of each table range
pub mod ids {
    pub const IDLE: u16 = 0;
    pub const WALK_FORWARD: u16 = 1;
    pub const WALK_BACK: u16 = 2;
    pub const CROUCH_ENTER: u16 = 3;
    pub const CROUCH: u16 = 4;
    pub const CROUCH_LEAVE: u16 = 5;
    pub const PREJUMP: u16 = 6;
    pub const JUMP_NEUTRAL: u16 = 7;
    pub const JUMP_FORWARD: u16 = 8;
    pub const JUMP_BACK: u16 = 9;
    pub const LANDING: u16 = 10;
    pub const DASH_FORWARD: u16 = 20;
    pub const BACKDASH: u16 = 22;
    pub const HITSTUN_STAND: u16 = 50;
    pub const HITSTUN_CROUCH: u16 = 60;
    pub const LAUNCHED: u16 = 70;
    pub const KNOCKDOWN: u16 = 80;
    pub const GROUNDTECH: u16 = 96;
    pub const BLOCKSTUN_STAND: u16 = 153;
    pub const BLOCKSTUN_CROUCH: u16 = 158;
    pub const BLOCKSTUN_AIR: u16 = 162;
    pub const RG_STAND: u16 = 166;
    pub const RG_CROUCH: u16 = 167;
    pub const RG_AIR: u16 = 168;
    pub const AIRTECH_FORWARD: u16 = 170;
    pub const AIRTECH_BACK: u16 = 171;
    pub const STUN_FIRE: u16 = 180;
    pub const STUN_ELECTRIC: u16 = 183;
    pub const STUN_FROZEN: u16 = 186;
    pub const ATTACK_FIRST: u16 = 200;
    pub const SUPER_FLASH: u16 = 300;
    pub const OVERDRIVE_FLASH: u16 = 310;
    pub const SUPER_BODY: u16 = 320;
}
