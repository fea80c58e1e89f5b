//! Input module - Virtual controller playback
//!
//! Actions are expanded into timed [`InputFrame`]s and played back one mask
//! per tick. A player has at most one motion in flight.

use crate::host::{PerPlayer, Player};
use crate::{Error, Result};

pub mod action;
pub mod frame;
pub mod motion;
pub mod notation;

// Re-export key types
pub use action::{Action, JumpDirection, SpecialMotion, TechDirection};
pub use frame::{Button, Buttons, Direction, Facing, InputFrame, InputMask};

/// Frames being played back for one player
#[derive(Debug, Clone, PartialEq)]
pub struct InputQueue {
    action: Action,
    frames: Vec<InputFrame>,
    facing: Facing,
    cursor: usize,
    held_ticks: u32,
}

impl InputQueue {
    pub fn new(action: Action, frames: Vec<InputFrame>, facing: Facing) -> Self {
        Self {
            action,
            frames,
            facing,
            cursor: 0,
            held_ticks: 0,
        }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Mask to emit this tick; neutral once every frame has played
    pub fn current_mask(&self) -> InputMask {
        self.frames
            .get(self.cursor)
            .map(|f| f.to_mask(self.facing))
            .unwrap_or(InputMask::NEUTRAL)
    }

    /// Record one emitted tick. Returns false once the queue is exhausted.
    fn advance(&mut self) -> bool {
        let Some(frame) = self.frames.get(self.cursor) else {
            return false;
        };
        self.held_ticks += 1;
        if self.held_ticks >= frame.duration_ticks {
            self.cursor += 1;
            self.held_ticks = 0;
        }
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

/// Per-player playback of dispatched actions
#[derive(Debug, Default)]
pub struct InputSequencer {
    queues: PerPlayer<Option<InputQueue>>,
}

impl InputSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action for playback.
    ///
    /// Fails if the action has no motion or a motion is already active for the
    /// player; nothing is queued in either case.
    pub fn dispatch(&mut self, player: Player, action: &Action, facing: Facing) -> Result<()> {
        if self.queues[player].is_some() {
            return Err(Error::SequencerBusy(player));
        }
        let frames = motion::build(action)
            .map_err(|e| Error::unmappable(format!("{} for {}: {}", action, player, e)))?;
        if frames.is_empty() {
            return Err(Error::unmappable(format!("{} produced no frames", action)));
        }
        tracing::debug!(
            "{} dispatching {} ({} ticks, facing {:?})",
            player,
            action,
            motion::total_ticks(&frames),
            facing
        );
        self.queues[player] = Some(InputQueue::new(action.clone(), frames, facing));
        Ok(())
    }

    pub fn is_active(&self, player: Player) -> bool {
        self.queues[player].is_some()
    }

    /// Mask the player should emit this tick, if a motion is active
    pub fn pending_mask(&self, player: Player) -> Option<InputMask> {
        self.queues[player].as_ref().map(InputQueue::current_mask)
    }

    /// Confirm the pending mask was written; the queue moves on and is dropped
    /// after its trailing neutral emission.
    pub fn commit(&mut self, player: Player) {
        if let Some(queue) = self.queues[player].as_mut()
            && !queue.advance()
        {
            tracing::trace!("{} {} input sequence finished", player, queue.action());
            self.queues[player] = None;
        }
    }

    /// Emit and advance in one call; `write` reports whether the host accepted
    /// the mask. A rejected write repeats the same step next tick.
    pub fn step(
        &mut self,
        player: Player,
        write: impl FnOnce(InputMask) -> bool,
    ) -> Option<InputMask> {
        let mask = self.pending_mask(player)?;
        if write(mask) {
            self.commit(player);
        } else {
            tracing::warn!("{} input write failed, retrying next tick", player);
        }
        Some(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qcf() -> Action {
        Action::Special {
            motion: SpecialMotion::Qcf,
            button: Button::C,
        }
    }

    fn held(direction: Direction) -> InputMask {
        InputFrame::hold(direction, 1).to_mask(Facing::Right)
    }

    fn play_to_end(seq: &mut InputSequencer, player: Player) -> Vec<InputMask> {
        let mut out = Vec::new();
        while let Some(mask) = seq.step(player, |_| true) {
            out.push(mask);
            assert!(out.len() < 1000, "sequence never finished");
        }
        out
    }

    #[test]
    fn test_playback_emits_every_tick_then_neutral() {
        let mut seq = InputSequencer::new();
        seq.dispatch(Player::P2, &qcf(), Facing::Right).unwrap();
        let masks = play_to_end(&mut seq, Player::P2);

        // 15 ticks of motion plus the trailing neutral emission
        assert_eq!(masks.len(), 16);
        assert_eq!(masks[0], held(Direction::DOWN));
        assert_eq!(masks[3], held(Direction::DOWN_FORWARD));
        assert_eq!(masks[9].buttons, Button::C.mask());
        assert!(masks[13].is_neutral());
        assert!(masks[15].is_neutral());
        assert!(!seq.is_active(Player::P2));
    }

    #[test]
    fn test_facing_left_mirrors() {
        let mut seq = InputSequencer::new();
        seq.dispatch(Player::P1, &qcf(), Facing::Left).unwrap();
        let masks = play_to_end(&mut seq, Player::P1);
        assert_eq!(masks[6].direction, frame::direction_bits::LEFT);
    }

    #[test]
    fn test_second_dispatch_rejected_while_active() {
        let mut seq = InputSequencer::new();
        seq.dispatch(Player::P1, &qcf(), Facing::Right).unwrap();
        let jab = Action::Attack {
            button: Button::A,
            crouching: false,
        };
        let err = seq.dispatch(Player::P1, &jab, Facing::Right).unwrap_err();
        assert!(matches!(err, Error::SequencerBusy(Player::P1)));
        // the quarter circle keeps playing from its first step
        assert_eq!(seq.pending_mask(Player::P1), Some(held(Direction::DOWN)));

        // the other player is independent
        seq.dispatch(Player::P2, &jab, Facing::Right).unwrap();
    }

    #[test]
    fn test_unmappable_custom_action() {
        let mut seq = InputSequencer::new();
        let bad = Action::Custom {
            id: 9,
            notation: "??".to_string(),
        };
        let err = seq.dispatch(Player::P2, &bad, Facing::Right).unwrap_err();
        assert!(matches!(err, Error::UnmappableAction(_)));
        assert!(!seq.is_active(Player::P2));
    }

    #[test]
    fn test_failed_write_retries_same_step() {
        let mut seq = InputSequencer::new();
        let jab = Action::Attack {
            button: Button::A,
            crouching: false,
        };
        seq.dispatch(Player::P1, &jab, Facing::Right).unwrap();

        let first = seq.step(Player::P1, |_| false).unwrap();
        let retried = seq.step(Player::P1, |_| true).unwrap();
        assert_eq!(first, retried);

        // 6 ticks of motion + neutral, one of which was a retry
        let rest = play_to_end(&mut seq, Player::P1);
        assert_eq!(rest.len(), 6);
    }
}
