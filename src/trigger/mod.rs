//! Trigger module - Situational automatic actions
//!
//! Each tick, per player: pending delays are disqualified, then counted down,
//! then new trigger conditions are evaluated. A player has at most one
//! pending delay and is held in a cooldown after every dispatch attempt.

use crate::classifier::{Category, Classification, Transition};
use crate::clock::Tick;
use crate::config::Config;
use crate::host::{PerPlayer, Player};
use crate::input::{Action, Facing, InputSequencer};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod action;
pub mod delay;

// Re-export key types
pub use action::{ActionChoice, resolve};
pub use delay::{DelayScheduler, PendingTrigger};

/// Ticks after a dispatch attempt during which no trigger fires
pub const TRIGGER_COOLDOWN_TICKS: u64 = 20;

/// Situations that can fire an automatic action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    AutoAirtech,
    AfterAirtech,
    AfterBlock,
    AfterHitstun,
    OnWakeup,
}

impl TriggerKind {
    /// Configurable triggers in evaluation order
    pub const CONFIGURABLE: [TriggerKind; 4] = [
        TriggerKind::AfterAirtech,
        TriggerKind::AfterBlock,
        TriggerKind::AfterHitstun,
        TriggerKind::OnWakeup,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TriggerKind::AutoAirtech => "auto-airtech",
            TriggerKind::AfterAirtech => "after-airtech",
            TriggerKind::AfterBlock => "after-block",
            TriggerKind::AfterHitstun => "after-hitstun",
            TriggerKind::OnWakeup => "on-wakeup",
        }
    }

    /// Button used when the configured action names none
    pub fn default_strength(&self) -> crate::input::Button {
        match self {
            TriggerKind::AfterAirtech => action::CONTINUATION_STRENGTH,
            _ => action::REVERSAL_STRENGTH,
        }
    }

    /// Whether this tick's transition satisfies the trigger
    pub fn is_satisfied(&self, view: &Transition) -> bool {
        let freed = !view.prev.is_actionable() && view.cur.is_actionable();
        match self {
            TriggerKind::AutoAirtech => view.entered_airtech_eligibility(),
            TriggerKind::AfterAirtech => {
                view.prev.has(Category::Airtech) && view.cur.is_actionable()
            }
            TriggerKind::AfterBlock => freed && view.left(Classification::is_blockstun),
            TriggerKind::AfterHitstun => {
                freed && view.left(Classification::is_hitstun) && !view.prev.is_tech()
            }
            TriggerKind::OnWakeup => {
                view.prev.has(Category::Groundtech) && view.cur.is_actionable()
            }
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Something the engine did this tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TriggerEvent {
    Armed {
        player: Player,
        kind: TriggerKind,
        action: Action,
        delay_ticks: u64,
    },
    Dispatched {
        player: Player,
        kind: TriggerKind,
        action: Action,
    },
    Cancelled {
        player: Player,
        kind: TriggerKind,
    },
    Failed {
        player: Player,
        kind: TriggerKind,
        reason: String,
    },
}

/// Per-player trigger evaluation, delays and cooldowns
#[derive(Debug, Default)]
pub struct TriggerEngine {
    delays: DelayScheduler,
    cooldown_until: PerPlayer<Option<Tick>>,
}

impl TriggerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self, player: Player) -> Option<&PendingTrigger> {
        self.delays.get(player)
    }

    pub fn in_cooldown(&self, player: Player, tick: Tick) -> bool {
        self.cooldown_until[player].is_some_and(|until| tick < until)
    }

    /// Run one tick for one player
    pub fn update(
        &mut self,
        tick: Tick,
        player: Player,
        view: &Transition,
        facing: Facing,
        config: &Config,
        sequencer: &mut InputSequencer,
    ) -> Vec<TriggerEvent> {
        let mut events = Vec::new();

        if self.delays.get(player).is_some_and(|p| cancels(p.kind, &view.cur))
            && let Some(cancelled) = self.delays.cancel(player)
        {
            tracing::trace!(
                "{} {} delay cancelled at tick {} ({} ticks left)",
                player,
                cancelled.kind,
                tick,
                cancelled.ticks_remaining
            );
            events.push(TriggerEvent::Cancelled {
                player,
                kind: cancelled.kind,
            });
        }

        if let Some(ready) = self.delays.countdown(player) {
            tracing::trace!(
                "{} {} delay armed at tick {} elapsed",
                player,
                ready.kind,
                ready.armed_at
            );
            events.push(self.fire(tick, player, ready.kind, ready.action, facing, sequencer));
            return events;
        }

        if !config.monitor.target.includes(player)
            || self.delays.is_pending(player)
            || self.in_cooldown(player, tick)
            || sequencer.is_active(player)
        {
            return events;
        }

        let Some((kind, delay_ticks, resolved)) = detect(view, config) else {
            return events;
        };

        let action = match resolved {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("{} {} not dispatched: {}", player, kind, e);
                self.start_cooldown(player, tick);
                events.push(TriggerEvent::Failed {
                    player,
                    kind,
                    reason: e.to_string(),
                });
                return events;
            }
        };

        if delay_ticks == 0 {
            events.push(self.fire(tick, player, kind, action, facing, sequencer));
        } else {
            tracing::debug!(
                "{} {} armed at tick {}, {} ticks delay",
                player,
                kind,
                tick,
                delay_ticks
            );
            self.delays.arm(
                player,
                PendingTrigger {
                    kind,
                    action: action.clone(),
                    armed_at: tick,
                    ticks_remaining: delay_ticks,
                },
            );
            events.push(TriggerEvent::Armed {
                player,
                kind,
                action,
                delay_ticks,
            });
        }
        events
    }

    fn fire(
        &mut self,
        tick: Tick,
        player: Player,
        kind: TriggerKind,
        action: Action,
        facing: Facing,
        sequencer: &mut InputSequencer,
    ) -> TriggerEvent {
        self.start_cooldown(player, tick);
        match sequencer.dispatch(player, &action, facing) {
            Ok(()) => {
                tracing::info!("{} {} fired {} at tick {}", player, kind, action, tick);
                TriggerEvent::Dispatched { player, kind, action }
            }
            Err(e) => {
                tracing::warn!("{} {} dispatch failed: {}", player, kind, e);
                TriggerEvent::Failed {
                    player,
                    kind,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn start_cooldown(&mut self, player: Player, tick: Tick) {
        self.cooldown_until[player] = Some(tick + TRIGGER_COOLDOWN_TICKS);
    }
}

/// Whether the current state voids a pending trigger of `kind`
fn cancels(kind: TriggerKind, cur: &Classification) -> bool {
    match kind {
        // staying launched is fine while the counter stays spent
        TriggerKind::AutoAirtech => {
            cur.untech > 0
                || cur.is_tech()
                || cur.is_downed()
                || ((cur.is_hitstun() || cur.is_blockstun()) && !cur.in_techable_state())
        }
        _ => cur.is_blockstun() || cur.is_hitstun() || cur.is_special_stun(),
    }
}

/// First satisfied and enabled trigger with its delay and resolved action
fn detect(view: &Transition, config: &Config) -> Option<(TriggerKind, u64, crate::Result<Action>)> {
    let airtech = &config.auto_airtech;
    if airtech.enabled && TriggerKind::AutoAirtech.is_satisfied(view) {
        let action = Action::Airtech {
            direction: airtech.direction,
        };
        return Some((TriggerKind::AutoAirtech, airtech.delay_ticks, Ok(action)));
    }

    TriggerKind::CONFIGURABLE.into_iter().find_map(|kind| {
        let setting = config.triggers.get(kind)?;
        if !setting.enabled || !kind.is_satisfied(view) {
            return None;
        }
        Some((kind, setting.delay_ticks, resolve(kind, setting, &config.motions)))
    })
}
