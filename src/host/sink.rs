//! Input sinks

use super::{InputSink, Player};
use crate::clock::Tick;
use crate::input::InputMask;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One accepted write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenMask {
    pub tick: Tick,
    pub player: Player,
    pub mask: InputMask,
}

/// Sink that keeps every accepted mask
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    written: Vec<WrittenMask>,
    rejecting: HashSet<(Tick, Player)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the write on one tick
    pub fn rejecting(mut self, tick: Tick, player: Player) -> Self {
        self.rejecting.insert((tick, player));
        self
    }

    pub fn written(&self) -> &[WrittenMask] {
        &self.written
    }

    /// Masks written for one player, in order
    pub fn masks_for(&self, player: Player) -> Vec<(Tick, InputMask)> {
        self.written
            .iter()
            .filter(|w| w.player == player)
            .map(|w| (w.tick, w.mask))
            .collect()
    }
}

#[async_trait]
impl InputSink for RecordingSink {
    async fn write(&mut self, tick: Tick, player: Player, mask: InputMask) -> Result<()> {
        if self.rejecting.contains(&(tick, player)) {
            return Err(Error::input_sink(format!("{} write rejected at tick {}", player, tick)));
        }
        self.written.push(WrittenMask { tick, player, mask });
        Ok(())
    }
}
