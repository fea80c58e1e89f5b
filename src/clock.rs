//! Tick clock and frame/subframe conversions
//!
//! The monitor runs at a fixed internal rate three times the game's visual
//! frame rate. Every duration is kept in ticks and only converted to
//! `visual frame + fraction` when reported.

use std::time::Duration;

/// One polling cycle
pub type Tick = u64;

/// Signed difference between two ticks
pub type TickDelta = i64;

/// Ticks per visual frame
pub const TICKS_PER_FRAME: u64 = 3;

/// Default polling rate (64 visual frames per second)
pub const DEFAULT_TICK_RATE_HZ: u32 = 192;

/// Monotonic tick counter owned by the polling loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    now: Tick,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick and return the new tick
    pub fn tick(&mut self) -> Tick {
        self.now += 1;
        self.now
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn visual_frame(&self) -> u64 {
        visual_frame(self.now)
    }

    pub fn subframe_label(&self) -> &'static str {
        subframe_label(self.now)
    }
}

pub fn visual_frame(tick: Tick) -> u64 {
    tick / TICKS_PER_FRAME
}

/// `""`, `".33"` or `".66"` depending on `tick % 3`
pub fn subframe_label(tick: Tick) -> &'static str {
    match tick % TICKS_PER_FRAME {
        0 => "",
        1 => ".33",
        _ => ".66",
    }
}

/// Render a tick count as visual frames, e.g. `16` -> `"5.33"`
pub fn format_ticks(ticks: Tick) -> String {
    format!("{}{}", visual_frame(ticks), subframe_label(ticks))
}

/// Render a signed tick difference as visual frames, e.g. `-15` -> `"-5"`
pub fn format_delta(delta: TickDelta) -> String {
    let magnitude = format_ticks(delta.unsigned_abs());
    match delta.signum() {
        1 => format!("+{}", magnitude),
        -1 => format!("-{}", magnitude),
        _ => magnitude,
    }
}

/// Wall-clock period of one tick, used only to pace live runs
pub fn tick_period(rate_hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)))
}
