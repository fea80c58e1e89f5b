//! JSON-lines session recordings
//!
//! One line per tick, starting at tick 1:
//!
//! ```text
//! {"p1": {"animation_id": 200}, "p2": {"animation_id": 153}}
//! {"p1": null, "p2": {"animation_id": 153, "untech": 0}}
//! ```
//!
//! A `null` (or missing) player means the sample was unavailable that tick.

use super::{PerPlayer, Player, Sample, SampleSource};
use crate::clock::Tick;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayLine {
    #[serde(default)]
    pub p1: Option<Sample>,
    #[serde(default)]
    pub p2: Option<Sample>,
}

impl ReplayLine {
    pub fn get(&self, player: Player) -> Option<Sample> {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }
}

impl From<PerPlayer<Option<Sample>>> for ReplayLine {
    fn from(samples: PerPlayer<Option<Sample>>) -> Self {
        Self {
            p1: samples[Player::P1],
            p2: samples[Player::P2],
        }
    }
}

/// Sample source replaying a recording
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    lines: Vec<ReplayLine>,
}

impl ReplaySource {
    /// Read a recording from disk
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let source = Self::parse(&contents)?;
        tracing::info!("Loaded {} ticks from {:?}", source.len(), path);
        Ok(source)
    }

    /// Parse a recording; blank lines and `#` comments are skipped
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = Vec::new();
        for (index, raw) in contents.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let line: ReplayLine = serde_json::from_str(trimmed).map_err(|e| Error::Replay {
                line: index + 1,
                message: e.to_string(),
            })?;
            lines.push(line);
        }
        Ok(Self { lines })
    }

    pub fn from_lines(lines: Vec<ReplayLine>) -> Self {
        Self { lines }
    }

    /// Recorded ticks
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialize back to JSON lines
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&serde_json::to_string(line)?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[async_trait]
impl SampleSource for ReplaySource {
    async fn read(&mut self, tick: Tick, player: Player) -> Result<Option<Sample>> {
        let Some(index) = tick.checked_sub(1) else {
            return Ok(None);
        };
        Ok(self
            .lines
            .get(index as usize)
            .and_then(|line| line.get(player)))
    }

    fn is_exhausted(&self, tick: Tick) -> bool {
        tick >= self.lines.len() as Tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDING: &str = r#"
# attacker jab, defender blocks
{"p1": {"animation_id": 200}, "p2": {"animation_id": 0}}
{"p1": {"animation_id": 200}, "p2": {"animation_id": 153}}

{"p1": null, "p2": {"animation_id": 153, "untech": 0, "position_x": 120.5}}
{"p2": {"animation_id": 0}}
"#;

    #[tokio::test]
    async fn test_replay_reads_by_tick() {
        let mut source = ReplaySource::parse(RECORDING).unwrap();
        assert_eq!(source.len(), 4);

        assert_eq!(
            source.read(2, Player::P2).await.unwrap(),
            Some(Sample::new(153))
        );
        assert_eq!(source.read(3, Player::P1).await.unwrap(), None);
        assert_eq!(
            source.read(3, Player::P2).await.unwrap().unwrap().position_x,
            120.5
        );
        assert_eq!(source.read(4, Player::P1).await.unwrap(), None);
        assert_eq!(source.read(9, Player::P1).await.unwrap(), None);
        assert_eq!(source.read(0, Player::P1).await.unwrap(), None);

        assert!(!source.is_exhausted(3));
        assert!(source.is_exhausted(4));
    }

    #[test]
    fn test_replay_reports_bad_line() {
        let err = ReplaySource::parse("{\"p1\": null}\nnot json\n").unwrap_err();
        assert!(matches!(err, Error::Replay { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_open_recording_file() {
        let path = std::env::temp_dir()
            .join(format!("frame-monitor-replay-{}.jsonl", std::process::id()));
        let source = ReplaySource::from_lines(vec![
            ReplayLine::from(PerPlayer::new(Some(Sample::new(200)), Some(Sample::new(153)))),
            ReplayLine::default(),
        ]);
        tokio::fs::write(&path, source.to_json_lines().unwrap()).await.unwrap();

        let loaded = ReplaySource::open(&path).await.unwrap();
        assert_eq!(loaded.len(), 2);
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(ReplaySource::open(&path).await.is_err());
    }
}
