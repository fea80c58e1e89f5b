//! Monitor module - The per-tick polling loop
//!
//! [`MonitorContext`] owns every piece of mutable state and advances it one
//! tick at a time. [`Runner`] wires the context to the host collaborators:
//! it reads samples, writes controller masks and forwards messages, either as
//! fast as possible (replays, tests) or paced at the configured tick rate.

use crate::classifier::{Classification, Transition, classify};
use crate::clock::{Clock, Tick, tick_period};
use crate::config::Config;
use crate::host::{
    Color, InputSink, Lifetime, Message, PerPlayer, Player, Presentation, Sample, SampleSource,
};
use crate::input::{Action, Facing, InputMask, InputSequencer};
use crate::matchup::report::{NOTICE_POSITION, NOTICE_TTL_TICKS};
use crate::matchup::{AdvantageReport, Matchup, MatchupEvent};
use crate::trigger::{TriggerEngine, TriggerEvent, TriggerKind};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Last known state of one player
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerTracker {
    classification: Classification,
    sample: Option<Sample>,
}

impl PlayerTracker {
    /// Fold in this tick's sample. An unavailable sample keeps the previous
    /// classification, so no edges fire.
    pub fn observe(&mut self, sample: Option<Sample>) -> Transition {
        let Some(sample) = sample else {
            return Transition::steady(self.classification);
        };
        let prev = self.classification;
        self.classification = classify(&sample);
        self.sample = Some(sample);
        Transition::new(prev, self.classification)
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn sample(&self) -> Option<&Sample> {
        self.sample.as_ref()
    }
}

/// Everything that happened on one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub tick: Tick,
    pub matchup: Vec<MatchupEvent>,
    pub triggers: Vec<TriggerEvent>,
    pub written: PerPlayer<Option<InputMask>>,
}

/// All mutable monitor state
#[derive(Debug, Default)]
pub struct MonitorContext {
    clock: Clock,
    trackers: PerPlayer<PlayerTracker>,
    matchup: Matchup,
    triggers: TriggerEngine,
    sequencer: InputSequencer,
}

impl MonitorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn matchup(&self) -> &Matchup {
        &self.matchup
    }

    pub fn triggers(&self) -> &TriggerEngine {
        &self.triggers
    }

    pub fn tracker(&self, player: Player) -> &PlayerTracker {
        &self.trackers[player]
    }

    pub fn sequencer(&self) -> &InputSequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut InputSequencer {
        &mut self.sequencer
    }

    /// Start the next tick
    pub fn advance(&mut self) -> Tick {
        self.clock.tick()
    }

    /// Classify, update the matchup and run the triggers for `tick`
    pub fn update(
        &mut self,
        tick: Tick,
        samples: PerPlayer<Option<Sample>>,
        config: &Config,
    ) -> TickOutcome {
        let views = PerPlayer::from_fn(|p| self.trackers[p].observe(samples[p]));
        let matchup = self.matchup.update(tick, &views);

        let mut triggers = Vec::new();
        for player in Player::ALL {
            let facing = self.facing(player);
            triggers.extend(self.triggers.update(
                tick,
                player,
                &views[player],
                facing,
                config,
                &mut self.sequencer,
            ));
        }

        TickOutcome {
            tick,
            matchup,
            triggers,
            written: PerPlayer::default(),
        }
    }

    /// Face the opponent, using the last known positions
    pub fn facing(&self, player: Player) -> Facing {
        match (self.trackers[player].sample, self.trackers[player.other()].sample) {
            (Some(own), Some(opponent)) => Facing::toward(own.position_x, opponent.position_x),
            _ => Facing::default(),
        }
    }
}

/// An action handed to the sequencer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub tick: Tick,
    pub player: Player,
    pub kind: TriggerKind,
    pub action: Action,
}

/// Summary of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub ticks: Tick,
    pub advantages: Vec<AdvantageReport>,
    pub dispatches: Vec<DispatchRecord>,
    pub failed_dispatches: usize,
    pub cancelled_delays: usize,
    pub aborted: usize,
    pub timed_out: usize,
}

impl SessionLog {
    pub fn record(&mut self, outcome: &TickOutcome) {
        self.ticks = outcome.tick;
        for event in &outcome.matchup {
            match event {
                MatchupEvent::Resolved(report) => self.advantages.push(*report),
                MatchupEvent::Aborted { .. } => self.aborted += 1,
                MatchupEvent::TimedOut { .. } => self.timed_out += 1,
                _ => {}
            }
        }
        for event in &outcome.triggers {
            match event {
                TriggerEvent::Dispatched {
                    player,
                    kind,
                    action,
                } => self.dispatches.push(DispatchRecord {
                    tick: outcome.tick,
                    player: *player,
                    kind: *kind,
                    action: action.clone(),
                }),
                TriggerEvent::Failed { .. } => self.failed_dispatches += 1,
                TriggerEvent::Cancelled { .. } => self.cancelled_delays += 1,
                TriggerEvent::Armed { .. } => {}
            }
        }
    }
}

/// Drives a [`MonitorContext`] against host collaborators
pub struct Runner<S, K, P> {
    context: MonitorContext,
    source: S,
    sink: K,
    presenter: P,
    config: Config,
    log: SessionLog,
}

impl<S, K, P> Runner<S, K, P>
where
    S: SampleSource,
    K: InputSink,
    P: Presentation,
{
    pub fn new(source: S, sink: K, presenter: P, config: Config) -> Self {
        Self {
            context: MonitorContext::new(),
            source,
            sink,
            presenter,
            config,
            log: SessionLog::default(),
        }
    }

    pub fn context(&self) -> &MonitorContext {
        &self.context
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration; actions already resolved are unaffected
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn into_log(self) -> SessionLog {
        self.log
    }

    /// Advance exactly one tick
    pub async fn step(&mut self) -> Result<TickOutcome> {
        let tick = self.context.advance();

        let mut samples = PerPlayer::default();
        for player in Player::ALL {
            samples[player] = match self.source.read(tick, player).await {
                Ok(sample) => sample,
                Err(e) => {
                    tracing::debug!("{} sample unavailable at tick {}: {}", player, tick, e);
                    None
                }
            };
        }

        let mut outcome = self.context.update(tick, samples, &self.config);

        for player in Player::ALL {
            let Some(mask) = self.context.sequencer().pending_mask(player) else {
                continue;
            };
            match self.sink.write(tick, player, mask).await {
                Ok(()) => {
                    self.context.sequencer_mut().commit(player);
                    outcome.written[player] = Some(mask);
                }
                Err(e) => tracing::warn!(
                    "{} input write failed at tick {}, retrying: {}",
                    player,
                    tick,
                    e
                ),
            }
        }

        self.present(&outcome);
        self.log.record(&outcome);
        Ok(outcome)
    }

    fn present(&mut self, outcome: &TickOutcome) {
        if self.config.monitor.report_advantage {
            for message in outcome.matchup.iter().filter_map(MatchupEvent::to_message) {
                self.presenter.show_message(message);
            }
        }
        for event in &outcome.triggers {
            if let TriggerEvent::Dispatched { player, kind, action } = event {
                self.presenter.show_message(Message::new(
                    format!("{} {}: {}", player, kind, action),
                    Color::White,
                    NOTICE_POSITION,
                    Lifetime::Ttl(NOTICE_TTL_TICKS),
                ));
            }
        }
    }

    /// Step until the source runs dry
    pub async fn run_to_end(&mut self) -> Result<&SessionLog> {
        while !self.source.is_exhausted(self.context.clock().now()) {
            self.step().await?;
        }
        tracing::info!(
            "Run finished after {} ticks: {} reports, {} dispatches",
            self.log.ticks,
            self.log.advantages.len(),
            self.log.dispatches.len()
        );
        Ok(&self.log)
    }

    /// Step at the configured tick rate until the source runs dry
    pub async fn run_paced(&mut self) -> Result<&SessionLog> {
        let period = tick_period(self.config.monitor.tick_rate_hz);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);
        tracing::info!("Pacing at {} Hz", self.config.monitor.tick_rate_hz);

        while !self.source.is_exhausted(self.context.clock().now()) {
            interval.tick().await;
            self.step().await?;
        }
        Ok(&self.log)
    }
}
