//! Timed step-by-step replay of a grid search.
//!
//! A finished [`Traversal`](gridwalk_paths::Traversal) becomes a [`Plan`];
//! the [`Sequencer`] replays it as one [`PlaybackEvent::Visit`] per step,
//! followed by a single [`PlaybackEvent::Path`] or
//! [`PlaybackEvent::Unreachable`]. Scheduling is left to the caller: an
//! event loop fires the returned ticks on its own timers, or [`Player`]
//! simply sleeps between them.

mod config;
mod event;
mod player;
mod sequencer;

pub use config::PlaybackConfig;
pub use event::{FnObserver, Observer, PlaybackEvent, observer_fn};
pub use player::{Context, PlayOutcome, Player};
pub use sequencer::{Interruption, Plan, PlaybackState, Scheduled, Sequencer, Tick};
