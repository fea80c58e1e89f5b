//! Per-player delay scheduling for armed triggers

use super::TriggerKind;
use crate::clock::Tick;
use crate::host::{PerPlayer, Player};
use crate::input::Action;

/// A trigger waiting out its configured delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTrigger {
    pub kind: TriggerKind,
    pub action: Action,
    pub armed_at: Tick,
    pub ticks_remaining: u64,
}

/// At most one pending trigger per player
#[derive(Debug, Default)]
pub struct DelayScheduler {
    pending: PerPlayer<Option<PendingTrigger>>,
}

impl DelayScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a delay. Refused while another delay is pending for the player.
    pub fn arm(&mut self, player: Player, pending: PendingTrigger) -> bool {
        if self.pending[player].is_some() {
            return false;
        }
        self.pending[player] = Some(pending);
        true
    }

    pub fn is_pending(&self, player: Player) -> bool {
        self.pending[player].is_some()
    }

    pub fn get(&self, player: Player) -> Option<&PendingTrigger> {
        self.pending[player].as_ref()
    }

    pub fn cancel(&mut self, player: Player) -> Option<PendingTrigger> {
        self.pending[player].take()
    }

    /// Count down one tick; yields the trigger once its delay has elapsed
    pub fn countdown(&mut self, player: Player) -> Option<PendingTrigger> {
        let pending = self.pending[player].as_mut()?;
        pending.ticks_remaining = pending.ticks_remaining.saturating_sub(1);
        if pending.ticks_remaining == 0 {
            self.pending[player].take()
        } else {
            None
        }
    }
}
