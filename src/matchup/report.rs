//! Frame advantage reports and their presentation

use super::state::MatchupEvent;
use crate::classifier::{RG_FULL_STUN_TICKS, RgType};
use crate::clock::{Tick, TickDelta, format_delta};
use crate::host::{Color, Lifetime, Message, Player, Position};
use serde::{Deserialize, Serialize};

/// Permanent slot for the latest advantage message
pub const ADVANTAGE_MESSAGE_ID: u32 = 1;
pub const ADVANTAGE_POSITION: Position = Position::new(24.0, 420.0);
pub const NOTICE_POSITION: Position = Position::new(24.0, 440.0);
/// How long transient notices stay up
pub const NOTICE_TTL_TICKS: u64 = 192;

/// A resolved blockstun or recoil guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvantageReport {
    pub attacker: Player,
    pub defender: Player,
    pub start: Tick,
    pub resolved_at: Tick,
    pub attacker_actionable: Tick,
    pub defender_actionable: Tick,
    pub rg_type: Option<RgType>,
}

impl AdvantageReport {
    /// Positive when the defender acts first
    pub fn defender_advantage(&self) -> TickDelta {
        self.attacker_actionable as TickDelta - self.defender_actionable as TickDelta
    }

    pub fn advantage_for(&self, player: Player) -> TickDelta {
        if player == self.defender {
            self.defender_advantage()
        } else {
            -self.defender_advantage()
        }
    }

    /// Defender advantage had the recoil guard not been cancelled
    pub fn rg_full_stun_advantage(&self) -> Option<TickDelta> {
        self.rg_type
            .map(|_| self.defender_advantage() - RG_FULL_STUN_TICKS as TickDelta)
    }

    pub fn color(&self) -> Color {
        match self.defender_advantage() {
            d if d > 0 => Color::Green,
            d if d < 0 => Color::Red,
            _ => Color::Yellow,
        }
    }

    /// Human readable summary, from the defender's side
    pub fn describe(&self) -> String {
        let defender = format_delta(self.defender_advantage());
        let attacker = format_delta(self.advantage_for(self.attacker));
        match (self.rg_type, self.rg_full_stun_advantage()) {
            (Some(rg), Some(full)) => format!(
                "{} {} after {} RG ({} {}, full stun {})",
                self.defender,
                defender,
                rg.name(),
                self.attacker,
                attacker,
                format_delta(full)
            ),
            _ => format!(
                "{} {} on block ({} {})",
                self.defender, defender, self.attacker, attacker
            ),
        }
    }

    pub fn to_message(&self) -> Message {
        Message::new(
            self.describe(),
            self.color(),
            ADVANTAGE_POSITION,
            Lifetime::Permanent(ADVANTAGE_MESSAGE_ID),
        )
    }
}

impl MatchupEvent {
    /// Message to show for this event, if any
    pub fn to_message(&self) -> Option<Message> {
        match self {
            MatchupEvent::Resolved(report) => Some(report.to_message()),
            MatchupEvent::RgFreezeElapsed {
                defender, rg_type, ..
            } => Some(Message::new(
                format!(
                    "{} {} RG: can attack immediately after freeze",
                    defender,
                    rg_type.name()
                ),
                Color::Yellow,
                NOTICE_POSITION,
                Lifetime::Ttl(NOTICE_TTL_TICKS),
            )),
            MatchupEvent::SuperflashStarted { initiator, kind, .. } => Some(Message::new(
                format!("{} {} flash", initiator, kind.name()),
                Color::Cyan,
                NOTICE_POSITION,
                Lifetime::Ttl(kind.duration_ticks()),
            )),
            _ => None,
        }
    }
}
