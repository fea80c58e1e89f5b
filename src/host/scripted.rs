//! In-memory sample timelines

use super::{PerPlayer, Player, Sample, SampleSource};
use crate::clock::Tick;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

/// Sample source built tick by tick in code.
///
/// A player's sample persists from the tick it is set until the next change,
/// so a script only lists the ticks where something happens.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    changes: PerPlayer<BTreeMap<Tick, Sample>>,
    unavailable: HashSet<(Tick, Player)>,
    failing: HashSet<(Tick, Player)>,
    end: Tick,
}

impl ScriptedSource {
    pub fn new(end: Tick) -> Self {
        Self {
            end,
            ..Self::default()
        }
    }

    /// Set the player's sample from `tick` on
    pub fn at(mut self, tick: Tick, player: Player, sample: Sample) -> Self {
        self.changes[player].insert(tick, sample);
        self
    }

    /// Set both players from `tick` on
    pub fn both(self, tick: Tick, p1: Sample, p2: Sample) -> Self {
        self.at(tick, Player::P1, p1).at(tick, Player::P2, p2)
    }

    /// Report the ticks in `ticks` as unavailable
    pub fn unavailable(mut self, ticks: RangeInclusive<Tick>, player: Player) -> Self {
        self.unavailable.extend(ticks.map(|t| (t, player)));
        self
    }

    /// Fail reads on one tick
    pub fn failing(mut self, tick: Tick, player: Player) -> Self {
        self.failing.insert((tick, player));
        self
    }

    /// Sample in effect at `tick`, ignoring unavailability
    pub fn sample_at(&self, tick: Tick, player: Player) -> Option<Sample> {
        self.changes[player]
            .range(..=tick)
            .next_back()
            .map(|(_, sample)| *sample)
    }
}

#[async_trait]
impl SampleSource for ScriptedSource {
    async fn read(&mut self, tick: Tick, player: Player) -> Result<Option<Sample>> {
        if self.failing.contains(&(tick, player)) {
            return Err(Error::sample_source(format!("{} read failed at tick {}", player, tick)));
        }
        if self.unavailable.contains(&(tick, player)) {
            return Ok(None);
        }
        Ok(self.sample_at(tick, player))
    }

    fn is_exhausted(&self, tick: Tick) -> bool {
        tick >= self.end
    }
}
