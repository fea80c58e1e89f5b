//! Resolution of configured action choices into concrete actions

use super::TriggerKind;
use crate::config::{CustomMotion, TriggerSetting};
use crate::input::{Action, Button, JumpDirection, SpecialMotion};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// What a trigger should do, as written in the configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionChoice {
    #[default]
    Attack,
    CrouchAttack,
    Jump,
    ForwardJump,
    BackJump,
    Block,
    CrouchBlock,
    Qcf,
    Qcb,
    Dp,
    Rdp,
    Hcf,
    Hcb,
    ChargeBack,
    ChargeDown,
    Custom,
}

impl ActionChoice {
    pub fn special_motion(&self) -> Option<SpecialMotion> {
        match self {
            ActionChoice::Qcf => Some(SpecialMotion::Qcf),
            ActionChoice::Qcb => Some(SpecialMotion::Qcb),
            ActionChoice::Dp => Some(SpecialMotion::Dp),
            ActionChoice::Rdp => Some(SpecialMotion::Rdp),
            ActionChoice::Hcf => Some(SpecialMotion::Hcf),
            ActionChoice::Hcb => Some(SpecialMotion::Hcb),
            ActionChoice::ChargeBack => Some(SpecialMotion::ChargeBack),
            ActionChoice::ChargeDown => Some(SpecialMotion::ChargeDown),
            _ => None,
        }
    }
}

/// Resolve a trigger's configured choice into an action.
///
/// Buttons not named in the setting come from the trigger's default strength.
pub fn resolve(
    kind: TriggerKind,
    setting: &TriggerSetting,
    motions: &[CustomMotion],
) -> Result<Action> {
    let button = setting.button.unwrap_or_else(|| kind.default_strength());

    let action = match setting.action {
        ActionChoice::Attack => Action::Attack {
            button,
            crouching: false,
        },
        ActionChoice::CrouchAttack => Action::Attack {
            button,
            crouching: true,
        },
        ActionChoice::Jump => Action::Jump {
            direction: JumpDirection::Neutral,
        },
        ActionChoice::ForwardJump => Action::Jump {
            direction: JumpDirection::Forward,
        },
        ActionChoice::BackJump => Action::Jump {
            direction: JumpDirection::Back,
        },
        ActionChoice::Block => Action::Block { crouching: false },
        ActionChoice::CrouchBlock => Action::Block { crouching: true },
        ActionChoice::Custom => {
            let id = setting.custom_id.ok_or_else(|| {
                Error::unmappable(format!("{} uses a custom action without custom_id", kind))
            })?;
            let motion = motions.iter().find(|m| m.id == id).ok_or_else(|| {
                Error::unmappable(format!("{} references unknown custom motion #{}", kind, id))
            })?;
            Action::Custom {
                id,
                notation: motion.notation.clone(),
            }
        }
        choice => {
            let motion = choice
                .special_motion()
                .ok_or_else(|| Error::unmappable(format!("{:?} has no motion", choice)))?;
            Action::Special { motion, button }
        }
    };
    Ok(action)
}

/// Strongest button, for reversal-style triggers
pub const REVERSAL_STRENGTH: Button = Button::C;
/// Medium button, for combo continuation
pub const CONTINUATION_STRENGTH: Button = Button::B;

#[cfg(test)]
mod tests {
    use super::*;

    fn setting(action: ActionChoice) -> TriggerSetting {
        TriggerSetting {
            enabled: true,
            action,
            ..TriggerSetting::default()
        }
    }

    #[test]
    fn test_strength_depends_on_trigger() {
        let dp = setting(ActionChoice::Dp);
        assert_eq!(
            resolve(TriggerKind::OnWakeup, &dp, &[]).unwrap(),
            Action::Special {
                motion: SpecialMotion::Dp,
                button: Button::C
            }
        );
        assert_eq!(
            resolve(TriggerKind::AfterAirtech, &dp, &[]).unwrap(),
            Action::Special {
                motion: SpecialMotion::Dp,
                button: Button::B
            }
        );
    }

    #[test]
    fn test_explicit_button_wins() {
        let mut jab = setting(ActionChoice::CrouchAttack);
        jab.button = Some(Button::A);
        assert_eq!(
            resolve(TriggerKind::AfterBlock, &jab, &[]).unwrap(),
            Action::Attack {
                button: Button::A,
                crouching: true
            }
        );
    }

    #[test]
    fn test_custom_lookup() {
        let motions = vec![CustomMotion {
            id: 7,
            name: Some("charge".to_string()),
            notation: "[4]6C".to_string(),
        }];
        let mut custom = setting(ActionChoice::Custom);
        custom.custom_id = Some(7);
        assert_eq!(
            resolve(TriggerKind::AfterHitstun, &custom, &motions).unwrap(),
            Action::Custom {
                id: 7,
                notation: "[4]6C".to_string()
            }
        );

        custom.custom_id = Some(8);
        let err = resolve(TriggerKind::AfterHitstun, &custom, &motions).unwrap_err();
        assert!(matches!(err, Error::UnmappableAction(_)));

        custom.custom_id = None;
        assert!(resolve(TriggerKind::AfterHitstun, &custom, &motions).is_err());
    }

    #[test]
    fn test_choice_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            action: ActionChoice,
        }
        let w: Wrapper = toml::from_str(r#"action = "charge_back""#).unwrap();
        assert_eq!(w.action, ActionChoice::ChargeBack);
        assert_eq!(w.action.special_motion(), Some(SpecialMotion::ChargeBack));
        assert_eq!(ActionChoice::Block.special_motion(), None);
    }
}
