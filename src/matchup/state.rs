//! Matchup states and the transition function

use super::report::AdvantageReport;
use crate::classifier::{RgType, SuperflashKind, Transition};
use crate::clock::Tick;
use crate::host::{PerPlayer, Player};
use serde::{Deserialize, Serialize};

/// Unresolved monitoring gives up after this many ticks
pub const MATCHUP_TIMEOUT_TICKS: u64 = 1500;

/// A blockstun or recoil guard being timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardWatch {
    pub defender: Player,
    pub attacker: Player,
    pub start: Tick,
    pub defender_actionable: Option<Tick>,
    pub attacker_actionable: Option<Tick>,
}

impl GuardWatch {
    fn begin(defender: Player, tick: Tick, views: &PerPlayer<Transition>) -> Self {
        let attacker = defender.other();
        // a blocked projectile leaves the attacker free from the start
        let attacker_actionable = views[attacker].cur.is_actionable().then_some(tick);
        Self {
            defender,
            attacker,
            start: tick,
            defender_actionable: None,
            attacker_actionable,
        }
    }

    fn report(&self, tick: Tick, rg_type: Option<RgType>) -> Option<AdvantageReport> {
        Some(AdvantageReport {
            attacker: self.attacker,
            defender: self.defender,
            start: self.start,
            resolved_at: tick,
            attacker_actionable: self.attacker_actionable?,
            defender_actionable: self.defender_actionable?,
            rg_type,
        })
    }
}

/// A superflash freezing the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperflashWatch {
    pub initiator: Player,
    pub kind: SuperflashKind,
    pub start: Tick,
}

impl SuperflashWatch {
    pub fn is_over(&self, tick: Tick) -> bool {
        tick.saturating_sub(self.start) >= self.kind.duration_ticks()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchupState {
    #[default]
    Idle,
    Monitoring(GuardWatch),
    RgMonitoring { watch: GuardWatch, rg_type: RgType },
    SuperflashMonitoring(SuperflashWatch),
}

impl MatchupState {
    pub fn name(&self) -> &'static str {
        match self {
            MatchupState::Idle => "idle",
            MatchupState::Monitoring(_) => "monitoring",
            MatchupState::RgMonitoring { .. } => "rg-monitoring",
            MatchupState::SuperflashMonitoring(_) => "superflash",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, MatchupState::Idle)
    }

    pub fn watch(&self) -> Option<&GuardWatch> {
        match self {
            MatchupState::Monitoring(watch) | MatchupState::RgMonitoring { watch, .. } => {
                Some(watch)
            }
            _ => None,
        }
    }
}

/// Observable outcome of a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchupEvent {
    MonitoringStarted {
        defender: Player,
        tick: Tick,
        rg_type: Option<RgType>,
    },
    /// Recoil guard freeze ran out with no action from the defender
    RgFreezeElapsed {
        defender: Player,
        rg_type: RgType,
        tick: Tick,
    },
    Resolved(AdvantageReport),
    SuperflashStarted {
        initiator: Player,
        kind: SuperflashKind,
        tick: Tick,
        preempted: bool,
    },
    SuperflashEnded {
        initiator: Player,
        tick: Tick,
    },
    /// The defender got hit; no report
    Aborted {
        defender: Player,
        tick: Tick,
    },
    TimedOut {
        defender: Player,
        start: Tick,
        tick: Tick,
    },
}

/// Advance the matchup by one tick.
///
/// Players are scanned in [`Player::ALL`] order, so player 1 wins ties
/// between simultaneous entry edges.
pub fn transition(
    state: MatchupState,
    tick: Tick,
    views: &PerPlayer<Transition>,
) -> (MatchupState, Vec<MatchupEvent>) {
    let flash = Player::ALL
        .into_iter()
        .find_map(|p| views[p].entered_superflash().map(|kind| (p, kind)));
    if let Some((initiator, kind)) = flash {
        let preempted = state.watch().is_some();
        let next = MatchupState::SuperflashMonitoring(SuperflashWatch {
            initiator,
            kind,
            start: tick,
        });
        let event = MatchupEvent::SuperflashStarted {
            initiator,
            kind,
            tick,
            preempted,
        };
        return (next, vec![event]);
    }

    match state {
        MatchupState::Idle => enter(tick, views),
        MatchupState::SuperflashMonitoring(flash) => {
            if flash.is_over(tick) {
                let ended = MatchupEvent::SuperflashEnded {
                    initiator: flash.initiator,
                    tick,
                };
                let (next, mut events) = enter(tick, views);
                events.insert(0, ended);
                (next, events)
            } else {
                (state, Vec::new())
            }
        }
        MatchupState::Monitoring(watch) => track(watch, None, tick, views),
        MatchupState::RgMonitoring { watch, rg_type } => track(watch, Some(rg_type), tick, views),
    }
}

/// Start monitoring on the first guard entry edge
fn enter(tick: Tick, views: &PerPlayer<Transition>) -> (MatchupState, Vec<MatchupEvent>) {
    for defender in Player::ALL {
        if let Some((next, event)) = guard_entry(defender, tick, views) {
            return (next, vec![event]);
        }
    }
    (MatchupState::Idle, Vec::new())
}

fn guard_entry(
    defender: Player,
    tick: Tick,
    views: &PerPlayer<Transition>,
) -> Option<(MatchupState, MatchupEvent)> {
    let view = &views[defender];
    let rg_type = view.entered_recoil_guard();
    if rg_type.is_none() && !view.entered_blockstun() {
        return None;
    }

    let watch = GuardWatch::begin(defender, tick, views);
    let next = match rg_type {
        Some(rg_type) => MatchupState::RgMonitoring { watch, rg_type },
        None => MatchupState::Monitoring(watch),
    };
    let event = MatchupEvent::MonitoringStarted {
        defender,
        tick,
        rg_type,
    };
    Some((next, event))
}

fn track(
    mut watch: GuardWatch,
    rg_type: Option<RgType>,
    tick: Tick,
    views: &PerPlayer<Transition>,
) -> (MatchupState, Vec<MatchupEvent>) {
    let defender = &views[watch.defender];
    let attacker = &views[watch.attacker];
    let mut events = Vec::new();

    if defender.cur.is_hitstun() {
        let event = MatchupEvent::Aborted {
            defender: watch.defender,
            tick,
        };
        return (MatchupState::Idle, vec![event]);
    }

    // the next hit of the string restarts the clock
    if let Some((next, event)) = guard_entry(watch.defender, tick, views) {
        return (next, vec![event]);
    }

    if watch.defender_actionable.is_none() {
        if defender.regained_control() {
            watch.defender_actionable = Some(tick);
        } else if let Some(rg) = rg_type
            && tick >= watch.start + rg.freeze_ticks()
        {
            watch.defender_actionable = Some(watch.start + rg.freeze_ticks());
            events.push(MatchupEvent::RgFreezeElapsed {
                defender: watch.defender,
                rg_type: rg,
                tick,
            });
        }
    }

    if attacker.entered_attack() && watch.defender_actionable.is_none() {
        watch.attacker_actionable = None;
    } else if watch.attacker_actionable.is_none() && attacker.became_actionable() {
        watch.attacker_actionable = Some(tick);
    }

    if let Some(report) = watch.report(tick, rg_type) {
        events.push(MatchupEvent::Resolved(report));
        return (MatchupState::Idle, events);
    }

    if tick - watch.start > MATCHUP_TIMEOUT_TICKS {
        events.push(MatchupEvent::TimedOut {
            defender: watch.defender,
            start: watch.start,
            tick,
        });
        return (MatchupState::Idle, events);
    }

    let next = match rg_type {
        Some(rg_type) => MatchupState::RgMonitoring { watch, rg_type },
        None => MatchupState::Monitoring(watch),
    };
    (next, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, ids};
    use crate::host::Sample;

    fn pair(p1: (u16, u16), p2: (u16, u16)) -> PerPlayer<Transition> {
        let view = |(prev, cur): (u16, u16)| {
            Transition::new(classify(&Sample::new(prev)), classify(&Sample::new(cur)))
        };
        PerPlayer::new(view(p1), view(p2))
    }

    fn still(p1: u16, p2: u16) -> PerPlayer<Transition> {
        pair((p1, p1), (p2, p2))
    }

    #[test]
    fn test_blockstun_entry_starts_monitoring() {
        let (state, events) = transition(
            MatchupState::Idle,
            100,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::BLOCKSTUN_STAND)),
        );
        let watch = state.watch().unwrap();
        assert_eq!(watch.defender, Player::P2);
        assert_eq!(watch.attacker, Player::P1);
        assert_eq!(watch.start, 100);
        assert_eq!(watch.attacker_actionable, None);
        assert_eq!(
            events,
            vec![MatchupEvent::MonitoringStarted {
                defender: Player::P2,
                tick: 100,
                rg_type: None
            }]
        );
    }

    #[test]
    fn test_projectile_block_marks_attacker_free() {
        let (state, _) = transition(
            MatchupState::Idle,
            40,
            &pair((ids::IDLE, ids::IDLE), (ids::IDLE, ids::BLOCKSTUN_CROUCH)),
        );
        assert_eq!(state.watch().unwrap().attacker_actionable, Some(40));
    }

    #[test]
    fn test_player_one_wins_ties() {
        let (state, _) = transition(
            MatchupState::Idle,
            7,
            &pair((ids::IDLE, ids::BLOCKSTUN_STAND), (ids::IDLE, ids::RG_STAND)),
        );
        assert_eq!(state.watch().unwrap().defender, Player::P1);
        assert!(matches!(state, MatchupState::Monitoring(_)));
    }

    #[test]
    fn test_scenario_a_resolves_negative_for_defender() {
        let (mut state, _) = transition(
            MatchupState::Idle,
            100,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::BLOCKSTUN_STAND)),
        );
        for tick in 101..130 {
            state = transition(state, tick, &still(ids::ATTACK_FIRST, ids::BLOCKSTUN_STAND)).0;
        }
        state = transition(
            state,
            130,
            &pair((ids::ATTACK_FIRST, ids::IDLE), (ids::BLOCKSTUN_STAND, ids::BLOCKSTUN_STAND)),
        )
        .0;
        assert_eq!(state.watch().unwrap().attacker_actionable, Some(130));
        for tick in 131..145 {
            state = transition(state, tick, &still(ids::IDLE, ids::BLOCKSTUN_STAND)).0;
        }
        let (state, events) = transition(
            state,
            145,
            &pair((ids::IDLE, ids::IDLE), (ids::BLOCKSTUN_STAND, ids::IDLE)),
        );
        assert!(state.is_idle());
        let MatchupEvent::Resolved(report) = &events[0] else {
            panic!("expected a report, got {:?}", events);
        };
        assert_eq!(report.defender_advantage(), -15);
        assert_eq!(report.advantage_for(Player::P1), 15);
    }

    #[test]
    fn test_scenario_b_rg_freeze_synthesized() {
        let (mut state, events) = transition(
            MatchupState::Idle,
            200,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::RG_STAND)),
        );
        assert_eq!(
            events[0],
            MatchupEvent::MonitoringStarted {
                defender: Player::P2,
                tick: 200,
                rg_type: Some(RgType::Stand)
            }
        );
        for tick in 201..260 {
            let (next, events) = transition(state, tick, &still(ids::ATTACK_FIRST, ids::RG_STAND));
            assert!(events.is_empty());
            state = next;
        }
        let (state, events) = transition(state, 260, &still(ids::ATTACK_FIRST, ids::RG_STAND));
        assert_eq!(
            events,
            vec![MatchupEvent::RgFreezeElapsed {
                defender: Player::P2,
                rg_type: RgType::Stand,
                tick: 260
            }]
        );
        assert_eq!(state.watch().unwrap().defender_actionable, Some(260));

        let (state, events) = transition(
            state,
            275,
            &pair((ids::ATTACK_FIRST, ids::IDLE), (ids::RG_STAND, ids::RG_STAND)),
        );
        assert!(state.is_idle());
        let MatchupEvent::Resolved(report) = &events[0] else {
            panic!("expected a report, got {:?}", events);
        };
        assert_eq!(report.defender_actionable, 260);
        assert_eq!(report.defender_advantage(), 15);
        assert_eq!(report.rg_full_stun_advantage(), Some(15 - 48));
    }

    #[test]
    fn test_scenario_c_superflash_preempts() {
        let (mut state, _) = transition(
            MatchupState::Idle,
            10,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::BLOCKSTUN_STAND)),
        );
        for tick in 11..50 {
            state = transition(state, tick, &still(ids::ATTACK_FIRST, ids::BLOCKSTUN_STAND)).0;
        }
        let (state, events) = transition(
            state,
            50,
            &pair(
                (ids::ATTACK_FIRST, ids::SUPER_FLASH),
                (ids::BLOCKSTUN_STAND, ids::BLOCKSTUN_STAND),
            ),
        );
        assert_eq!(
            events,
            vec![MatchupEvent::SuperflashStarted {
                initiator: Player::P1,
                kind: SuperflashKind::Super,
                tick: 50,
                preempted: true
            }]
        );

        // blockstun ends during the flash: nothing is reported
        let (state, events) = transition(
            state,
            60,
            &pair((ids::SUPER_FLASH, ids::SUPER_FLASH), (ids::BLOCKSTUN_STAND, ids::IDLE)),
        );
        assert!(events.is_empty());
        assert!(matches!(state, MatchupState::SuperflashMonitoring(_)));

        let (state, events) = transition(state, 146, &still(ids::SUPER_BODY, ids::IDLE));
        assert!(state.is_idle());
        assert_eq!(
            events,
            vec![MatchupEvent::SuperflashEnded {
                initiator: Player::P1,
                tick: 146
            }]
        );
    }

    #[test]
    fn test_defender_hit_aborts() {
        let (state, _) = transition(
            MatchupState::Idle,
            10,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::BLOCKSTUN_STAND)),
        );
        let (state, events) = transition(
            state,
            20,
            &pair(
                (ids::ATTACK_FIRST, ids::ATTACK_FIRST + 1),
                (ids::BLOCKSTUN_STAND, ids::HITSTUN_STAND),
            ),
        );
        assert!(state.is_idle());
        assert_eq!(
            events,
            vec![MatchupEvent::Aborted {
                defender: Player::P2,
                tick: 20
            }]
        );
    }

    #[test]
    fn test_string_continuation_clears_attacker() {
        let (state, _) = transition(
            MatchupState::Idle,
            10,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::BLOCKSTUN_STAND)),
        );
        let (state, _) = transition(
            state,
            20,
            &pair((ids::ATTACK_FIRST, ids::IDLE), (ids::BLOCKSTUN_STAND, ids::BLOCKSTUN_STAND)),
        );
        assert_eq!(state.watch().unwrap().attacker_actionable, Some(20));
        let (state, _) = transition(
            state,
            22,
            &pair((ids::IDLE, ids::ATTACK_FIRST), (ids::BLOCKSTUN_STAND, ids::BLOCKSTUN_STAND)),
        );
        assert_eq!(state.watch().unwrap().attacker_actionable, None);
    }

    #[test]
    fn test_rg_during_blockstring_switches_mode() {
        let (state, _) = transition(
            MatchupState::Idle,
            10,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::BLOCKSTUN_STAND)),
        );
        let (state, events) = transition(
            state,
            30,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::BLOCKSTUN_STAND, ids::RG_CROUCH)),
        );
        assert!(matches!(
            state,
            MatchupState::RgMonitoring {
                rg_type: RgType::Crouch,
                ..
            }
        ));
        assert_eq!(state.watch().unwrap().start, 30);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_timeout() {
        let (mut state, _) = transition(
            MatchupState::Idle,
            1,
            &pair((ids::ATTACK_FIRST, ids::ATTACK_FIRST), (ids::IDLE, ids::BLOCKSTUN_STAND)),
        );
        let stuck = still(ids::ATTACK_FIRST, ids::BLOCKSTUN_STAND);
        for tick in 2..=1501 {
            let (next, events) = transition(state, tick, &stuck);
            assert!(events.is_empty());
            state = next;
        }
        let (state, events) = transition(state, 1502, &stuck);
        assert!(state.is_idle());
        assert!(matches!(events[0], MatchupEvent::TimedOut { start: 1, .. }));
    }
}
