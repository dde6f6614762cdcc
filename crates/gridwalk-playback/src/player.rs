//! Blocking playback on the current thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::event::Observer;
use crate::sequencer::{Interruption, Plan, Sequencer};

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// How a [`Player::play`] call ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every step ran, path phase included.
    Completed,
    Interrupted(Interruption),
}

/// Drives a [`Sequencer`] by sleeping between steps.
///
/// The context is checked after each wait and before the step applies, so
/// a cancellation requested during a wait (or by the observer itself) stops
/// the run before anything else is emitted.
pub struct Player {
    sequencer: Sequencer,
    interval: Duration,
}

impl Player {
    pub fn new(interval: Duration) -> Self {
        Self {
            sequencer: Sequencer::new(),
            interval,
        }
    }

    /// The sequencer being driven.
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Replay `plan` into `observer` until it completes or `ctx` is
    /// cancelled.
    pub fn play<O: Observer + ?Sized>(
        &mut self,
        plan: Plan,
        observer: &mut O,
        ctx: &Context,
    ) -> PlayOutcome {
        let mut next = Some(self.sequencer.start(plan, self.interval));
        while let Some(s) = next {
            if !s.delay.is_zero() {
                std::thread::sleep(s.delay);
            }
            if ctx.is_done() {
                return match self.sequencer.cancel() {
                    Some(i) => PlayOutcome::Interrupted(i),
                    None => PlayOutcome::Completed,
                };
            }
            next = self.sequencer.step(s.tick, observer);
        }
        PlayOutcome::Completed
    }
}
