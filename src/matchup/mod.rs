//! Matchup module - Frame advantage between attacker and defender
//!
//! A single state machine watches both players. Guard entries (blockstun or
//! recoil guard) start monitoring, the tick each side regains control is
//! recorded, and once both are known an [`AdvantageReport`] is produced.
//! Superflashes preempt everything.

use crate::classifier::Transition;
use crate::clock::{Tick, format_ticks};
use crate::host::PerPlayer;

pub mod report;
pub mod state;

// Re-export key types
pub use report::AdvantageReport;
pub use state::{
    GuardWatch, MATCHUP_TIMEOUT_TICKS, MatchupEvent, MatchupState, SuperflashWatch, transition,
};

/// Owner of the single matchup state
#[derive(Debug, Default)]
pub struct Matchup {
    state: MatchupState,
}

impl Matchup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MatchupState {
        &self.state
    }

    /// Feed one tick of observations
    pub fn update(&mut self, tick: Tick, views: &PerPlayer<Transition>) -> Vec<MatchupEvent> {
        let before = self.state.name();
        let (next, events) = transition(std::mem::take(&mut self.state), tick, views);
        if next.name() != before {
            tracing::trace!("matchup {} at tick {}", next.name(), tick);
        }
        self.state = next;

        for event in &events {
            log_event(event);
        }
        events
    }
}

fn log_event(event: &MatchupEvent) {
    match event {
        MatchupEvent::MonitoringStarted {
            defender,
            tick,
            rg_type,
        } => match rg_type {
            Some(rg) => tracing::debug!("{} {} recoil guard at tick {}", defender, rg.name(), tick),
            None => tracing::debug!("{} blockstun at tick {}", defender, tick),
        },
        MatchupEvent::RgFreezeElapsed { defender, tick, .. } => {
            tracing::debug!("{} recoil guard freeze over at tick {}", defender, tick)
        }
        MatchupEvent::Resolved(report) => tracing::info!(
            "{} (guard {} ticks, resolved at {})",
            report.describe(),
            report.defender_actionable - report.start,
            format_ticks(report.resolved_at)
        ),
        MatchupEvent::SuperflashStarted {
            initiator,
            kind,
            preempted,
            ..
        } => {
            if *preempted {
                tracing::debug!(
                    "{} {} flash discarded the running measurement",
                    initiator,
                    kind.name()
                );
            } else {
                tracing::debug!("{} {} flash", initiator, kind.name());
            }
        }
        MatchupEvent::SuperflashEnded { tick, .. } => {
            tracing::trace!("superflash over at tick {}", tick)
        }
        MatchupEvent::Aborted { defender, tick } => {
            tracing::debug!("{} hit out of guard at tick {}, no report", defender, tick)
        }
        MatchupEvent::TimedOut { defender, start, tick } => tracing::debug!(
            "{} guard from tick {} unresolved after {} ticks",
            defender,
            start,
            tick - start
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, ids};
    use crate::host::Sample;

    fn views(p1: (u16, u16), p2: (u16, u16)) -> PerPlayer<Transition> {
        let view = |(prev, cur): (u16, u16)| {
            Transition::new(classify(&Sample::new(prev)), classify(&Sample::new(cur)))
        };
        PerPlayer::new(view(p1), view(p2))
    }

    #[test]
    fn test_update_replaces_state() {
        let mut matchup = Matchup::new();
        assert!(matchup.state().is_idle());

        let guard = views((ids::IDLE, ids::BLOCKSTUN_AIR), (ids::ATTACK_FIRST, ids::ATTACK_FIRST));
        let events = matchup.update(5, &guard);
        assert_eq!(events.len(), 1);
        assert_eq!(matchup.state().name(), "monitoring");

        let flash = views((ids::IDLE, ids::IDLE), (ids::IDLE, ids::OVERDRIVE_FLASH));
        let events = matchup.update(6, &flash);
        assert!(matches!(
            events[0],
            MatchupEvent::SuperflashStarted { preempted: true, .. }
        ));
        assert_eq!(matchup.state().name(), "superflash");
    }
}
