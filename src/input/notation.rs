//! Numpad notation parser for custom motions
//!
//! A notation is one or more whitespace/comma separated groups such as `236C`,
//! `2B`, `[4]6A` or `9`. Groups that spell a known special motion with a single
//! button use the fixed motion table; anything else is built step by step with
//! the same timing constants.

use super::action::SpecialMotion;
use super::frame::{Button, Buttons, Direction, InputFrame};
use super::motion::{
    self, BUTTON_HOLD_TICKS, CHARGE_TICKS, DIRECTION_STEP_TICKS, JUMP_HOLD_TICKS, RELEASE_TICKS,
};
use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\[(?P<charge>[1-9])\])?(?P<dirs>[1-9]*)(?P<buttons>[A-Da-d]*)$")
            .expect("static notation pattern is valid")
    })
}

/// Parse a notation into frames ending with a single release frame
pub fn parse(notation: &str) -> Result<Vec<InputFrame>> {
    let groups: Vec<&str> = notation
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|g| !g.is_empty())
        .collect();
    if groups.is_empty() {
        return Err(Error::notation(notation, "empty notation"));
    }

    let mut frames = Vec::new();
    for group in groups {
        frames.extend(parse_group(notation, group)?);
        frames.push(InputFrame::release(RELEASE_TICKS));
    }
    Ok(frames)
}

fn parse_group(notation: &str, group: &str) -> Result<Vec<InputFrame>> {
    let caps = group_pattern()
        .captures(group)
        .ok_or_else(|| Error::notation(notation, format!("cannot parse group {:?}", group)))?;

    let charge = caps.name("charge").map(|m| m.as_str()).unwrap_or("");
    let dirs = caps.name("dirs").map(|m| m.as_str()).unwrap_or("");
    let buttons: Vec<Button> = caps
        .name("buttons")
        .map(|m| m.as_str().chars().filter_map(Button::from_char).collect())
        .unwrap_or_default();

    if dirs.is_empty() && buttons.is_empty() {
        return Err(Error::notation(
            notation,
            format!("group {:?} has no direction or button", group),
        ));
    }

    // Known motions with one button come straight from the table
    let motion_part = &group[..group.len() - buttons.len()];
    if let [button] = buttons.as_slice()
        && let Some(special) = SpecialMotion::from_notation(motion_part)
    {
        let mut frames = motion::special(special, *button);
        frames.pop();
        return Ok(frames);
    }

    let mut frames = Vec::new();
    if let Some(d) = charge.bytes().next().and_then(numpad) {
        frames.push(InputFrame::hold(d, CHARGE_TICKS));
    }

    let directions: Vec<Direction> = if dirs == "5" {
        Vec::new()
    } else {
        dirs.bytes().filter_map(numpad).collect()
    };

    if buttons.is_empty() {
        if let Some((last, steps)) = directions.split_last() {
            frames.extend(steps.iter().map(|d| InputFrame::hold(*d, DIRECTION_STEP_TICKS)));
            frames.push(InputFrame::hold(*last, JUMP_HOLD_TICKS));
        }
        return Ok(frames);
    }

    let held = buttons
        .iter()
        .fold(Buttons::NONE, |acc, b| acc.with(*b));
    frames.extend(directions.iter().map(|d| InputFrame::hold(*d, DIRECTION_STEP_TICKS)));
    let final_direction = directions.last().copied().unwrap_or(Direction::NEUTRAL);
    frames.push(InputFrame::new(final_direction, held, BUTTON_HOLD_TICKS));
    Ok(frames)
}

fn numpad(b: u8) -> Option<Direction> {
    Direction::from_numpad(b - b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::motion::{crouching_attack, jump, special, total_ticks};
    use crate::input::action::JumpDirection;

    #[test]
    fn test_known_motions_match_tables() {
        assert_eq!(parse("236C").unwrap(), special(SpecialMotion::Qcf, Button::C));
        assert_eq!(parse("623b").unwrap(), special(SpecialMotion::Dp, Button::B));
        assert_eq!(parse("[4]6A").unwrap(), special(SpecialMotion::ChargeBack, Button::A));
        assert_eq!(total_ticks(&parse("41236C").unwrap()), 21);
    }

    #[test]
    fn test_simple_groups() {
        assert_eq!(parse("2C").unwrap(), crouching_attack(Button::C));
        assert_eq!(parse("9").unwrap(), jump(JumpDirection::Forward));
        assert_eq!(total_ticks(&parse("5A").unwrap()), 6);
        assert_eq!(total_ticks(&parse("A").unwrap()), 6);
    }

    #[test]
    fn test_multiple_buttons_use_generic_path() {
        let frames = parse("236AB").unwrap();
        let press = frames[frames.len() - 2];
        assert_eq!(press.direction, Direction::FORWARD);
        assert_eq!(press.buttons, Buttons::from(Button::A).with(Button::B));
        // 2, 3, 6 steps, then 6+AB, then release
        assert_eq!(frames.len(), 5);
    }

    #[test]
    fn test_groups_are_released_between() {
        let frames = parse("2A, 2B").unwrap();
        assert_eq!(frames.len(), 6);
        assert!(frames[2].is_neutral());
        assert!(frames[5].is_neutral());
        assert!(!frames[4].is_neutral());
    }

    #[test]
    fn test_invalid_notation() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("23X").is_err());
        assert!(parse("0A").is_err());
        assert!(parse("[4]").is_err());
        assert!(parse("A2").is_err());
    }
}
