//! Fixed motion tables
//!
//! Every builder returns frames authored facing right and terminated by a
//! single release frame.

use super::action::{Action, JumpDirection, SpecialMotion, TechDirection};
use super::frame::{Button, Buttons, Direction, InputFrame};
use super::notation;
use crate::Result;

/// Each intermediate direction of a motion
pub const DIRECTION_STEP_TICKS: u32 = 3;
/// Final direction + button
pub const BUTTON_HOLD_TICKS: u32 = 4;
/// Trailing all-released frame
pub const RELEASE_TICKS: u32 = 2;
/// Time a charge direction must be held
pub const CHARGE_TICKS: u32 = 120;
pub const JUMP_HOLD_TICKS: u32 = 6;
pub const BLOCK_HOLD_TICKS: u32 = 60;
pub const TECH_HOLD_TICKS: u32 = 4;

/// Build the input frames for an action
pub fn build(action: &Action) -> Result<Vec<InputFrame>> {
    let frames = match action {
        Action::Attack {
            button,
            crouching: false,
        } => attack(*button),
        Action::Attack {
            button,
            crouching: true,
        } => crouching_attack(*button),
        Action::Jump { direction } => jump(*direction),
        Action::Block { crouching } => block(*crouching),
        Action::Special { motion, button } => special(*motion, *button),
        Action::Airtech { direction } => airtech(*direction),
        Action::Custom { notation, .. } => notation::parse(notation)?,
    };
    Ok(frames)
}

pub fn attack(button: Button) -> Vec<InputFrame> {
    vec![
        InputFrame::new(Direction::NEUTRAL, button.into(), BUTTON_HOLD_TICKS),
        InputFrame::release(RELEASE_TICKS),
    ]
}

pub fn crouching_attack(button: Button) -> Vec<InputFrame> {
    vec![
        InputFrame::hold(Direction::DOWN, DIRECTION_STEP_TICKS),
        InputFrame::new(Direction::DOWN, button.into(), BUTTON_HOLD_TICKS),
        InputFrame::release(RELEASE_TICKS),
    ]
}

pub fn jump(direction: JumpDirection) -> Vec<InputFrame> {
    let held = match direction {
        JumpDirection::Neutral => Direction::UP,
        JumpDirection::Forward => Direction::UP_FORWARD,
        JumpDirection::Back => Direction::UP_BACK,
    };
    vec![
        InputFrame::hold(held, JUMP_HOLD_TICKS),
        InputFrame::release(RELEASE_TICKS),
    ]
}

pub fn block(crouching: bool) -> Vec<InputFrame> {
    let held = if crouching {
        Direction::DOWN_BACK
    } else {
        Direction::BACK
    };
    vec![
        InputFrame::hold(held, BLOCK_HOLD_TICKS),
        InputFrame::release(RELEASE_TICKS),
    ]
}

pub fn airtech(direction: TechDirection) -> Vec<InputFrame> {
    let held = match direction {
        TechDirection::Neutral => Direction::NEUTRAL,
        TechDirection::Forward => Direction::FORWARD,
        TechDirection::Back => Direction::BACK,
    };
    vec![
        InputFrame::new(held, Buttons::ATTACKS, TECH_HOLD_TICKS),
        InputFrame::release(RELEASE_TICKS),
    ]
}

pub fn special(motion: SpecialMotion, button: Button) -> Vec<InputFrame> {
    use Direction as D;

    let step = |d: Direction| InputFrame::hold(d, DIRECTION_STEP_TICKS);
    let press = |d: Direction| InputFrame::new(d, button.into(), BUTTON_HOLD_TICKS);

    let mut frames = match motion {
        SpecialMotion::Qcf => vec![
            step(D::DOWN),
            step(D::DOWN_FORWARD),
            step(D::FORWARD),
            press(D::FORWARD),
        ],
        SpecialMotion::Qcb => vec![
            step(D::DOWN),
            step(D::DOWN_BACK),
            step(D::BACK),
            press(D::BACK),
        ],
        SpecialMotion::Dp => vec![step(D::FORWARD), step(D::DOWN), press(D::DOWN_FORWARD)],
        SpecialMotion::Rdp => vec![step(D::BACK), step(D::DOWN), press(D::DOWN_BACK)],
        SpecialMotion::Hcf => vec![
            step(D::BACK),
            step(D::DOWN_BACK),
            step(D::DOWN),
            step(D::DOWN_FORWARD),
            step(D::FORWARD),
            press(D::FORWARD),
        ],
        SpecialMotion::Hcb => vec![
            step(D::FORWARD),
            step(D::DOWN_FORWARD),
            step(D::DOWN),
            step(D::DOWN_BACK),
            step(D::BACK),
            press(D::BACK),
        ],
        SpecialMotion::ChargeBack => {
            vec![InputFrame::hold(D::BACK, CHARGE_TICKS), press(D::FORWARD)]
        }
        SpecialMotion::ChargeDown => vec![InputFrame::hold(D::DOWN, CHARGE_TICKS), press(D::UP)],
    };
    frames.push(InputFrame::release(RELEASE_TICKS));
    frames
}

/// Sum of all frame durations
pub fn total_ticks(frames: &[InputFrame]) -> u32 {
    frames.iter().map(|f| f.duration_ticks).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_single_trailing_release(frames: &[InputFrame]) {
        let (last, rest) = frames.split_last().expect("motion has frames");
        assert!(last.is_neutral());
        assert_eq!(last.duration_ticks, RELEASE_TICKS);
        if let Some(prev) = rest.last() {
            assert!(!prev.is_neutral());
        }
    }

    #[test]
    fn test_special_motion_durations() {
        let expected = [
            (SpecialMotion::Qcf, 15),
            (SpecialMotion::Qcb, 15),
            (SpecialMotion::Dp, 12),
            (SpecialMotion::Rdp, 12),
            (SpecialMotion::Hcf, 21),
            (SpecialMotion::Hcb, 21),
            (SpecialMotion::ChargeBack, 126),
            (SpecialMotion::ChargeDown, 126),
        ];
        for (motion, ticks) in expected {
            let frames = special(motion, Button::C);
            assert_eq!(total_ticks(&frames), ticks, "{:?}", motion);
            assert_single_trailing_release(&frames);
        }
    }

    #[test]
    fn test_quarter_circle_progression() {
        let frames = special(SpecialMotion::Qcf, Button::B);
        let dirs: Vec<u8> = frames.iter().map(|f| f.direction.numpad()).collect();
        assert_eq!(dirs, vec![2, 3, 6, 6, 5]);
        assert_eq!(frames[3].buttons, Button::B.into());
        assert!(frames[..3].iter().all(|f| f.buttons.is_empty()));
    }

    #[test]
    fn test_dragon_punch_progression() {
        let frames = special(SpecialMotion::Dp, Button::C);
        let dirs: Vec<u8> = frames.iter().map(|f| f.direction.numpad()).collect();
        assert_eq!(dirs, vec![6, 2, 3, 5]);
        assert_eq!(frames[2].buttons, Button::C.into());
    }

    #[test]
    fn test_simple_actions() {
        let cases = [
            (Action::Attack { button: Button::A, crouching: false }, 6),
            (Action::Attack { button: Button::A, crouching: true }, 9),
            (Action::Jump { direction: JumpDirection::Forward }, 8),
            (Action::Block { crouching: true }, 62),
            (Action::Airtech { direction: TechDirection::Back }, 6),
        ];
        for (action, ticks) in cases {
            let frames = build(&action).unwrap();
            assert_eq!(total_ticks(&frames), ticks, "{}", action);
            assert_single_trailing_release(&frames);
        }
    }

    #[test]
    fn test_crouching_attack_prepends_down() {
        let frames = crouching_attack(Button::C);
        assert_eq!(frames[0], InputFrame::hold(Direction::DOWN, DIRECTION_STEP_TICKS));
        assert_eq!(frames[1].direction, Direction::DOWN);
        assert_eq!(frames[1].buttons, Button::C.into());
    }

    #[test]
    fn test_build_custom_uses_notation() {
        let action = Action::Custom {
            id: 1,
            notation: "236C".to_string(),
        };
        assert_eq!(build(&action).unwrap(), special(SpecialMotion::Qcf, Button::C));

        let bad = Action::Custom {
            id: 2,
            notation: "23X".to_string(),
        };
        assert!(build(&bad).is_err());
    }
}
