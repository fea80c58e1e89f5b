//! Host module - Collaborators around the monitor
//!
//! The monitor never touches the game directly. Samples come from a
//! [`SampleSource`], controller masks go to an [`InputSink`] and status text
//! goes to a [`Presentation`]. Implementations:
//! - `ReplaySource`: JSON-lines recording of a session
//! - `ScriptedSource`: in-memory timelines for tests and demos
//! - `RecordingSink`: keeps every written mask
//! - `ConsolePresenter` / `MessageLog`: log or collect messages

use crate::clock::Tick;
use crate::input::InputMask;
use crate::Result;
use async_trait::async_trait;

pub mod models;
pub mod presentation;
pub mod replay;
pub mod scripted;
pub mod sink;

// Re-export models
pub use models::{Color, Lifetime, Message, PerPlayer, Player, Position, Sample};
pub use presentation::{ConsolePresenter, MessageLog};
pub use replay::ReplaySource;
pub use scripted::ScriptedSource;
pub use sink::{RecordingSink, WrittenMask};

/// Per-tick game state provider
#[async_trait]
pub trait SampleSource: Send {
    /// Read one player's sample for the tick.
    ///
    /// `Ok(None)` and errors both mean the sample is unavailable this tick.
    async fn read(&mut self, tick: Tick, player: Player) -> Result<Option<Sample>>;

    /// True once a finite source has nothing left after `tick`
    fn is_exhausted(&self, tick: Tick) -> bool;
}

/// Virtual controller
#[async_trait]
pub trait InputSink: Send {
    /// Write one player's controller state; an error leaves the step to be
    /// retried next tick
    async fn write(&mut self, tick: Tick, player: Player, mask: InputMask) -> Result<()>;
}

/// Status message display
pub trait Presentation: Send {
    fn show_message(&mut self, message: Message);
}
