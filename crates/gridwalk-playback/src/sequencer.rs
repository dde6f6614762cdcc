//! The playback state machine.
//!
//! A [`Sequencer`] turns a finished search into a sequence of timed steps.
//! It never sleeps or owns a timer itself: [`start`](Sequencer::start) and
//! each [`step`](Sequencer::step) hand back a [`Scheduled`] tick that the
//! caller fires after its delay. Every run gets a fresh generation, and a
//! tick only applies while its generation is current, so a late tick from
//! a cancelled or replaced run is a no-op.

use std::time::Duration;

use gridwalk_core::Coord;
use gridwalk_paths::{PathOutcome, Traversal};

use crate::event::{Observer, PlaybackEvent};

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// What to replay: the visitation order and the reconstructed path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub start: Coord,
    pub goal: Coord,
    pub visited_order: Vec<Coord>,
    pub path: PathOutcome,
}

impl Plan {
    /// Build a plan from a finished traversal, reconstructing its path.
    pub fn new(traversal: &Traversal) -> Self {
        Self {
            start: traversal.start,
            goal: traversal.goal,
            visited_order: traversal.visited_order.clone(),
            path: traversal.path(),
        }
    }

    /// Number of steps a full run takes: one per non-marker visited cell
    /// plus the final path (or unreachable) step.
    pub fn steps(&self) -> usize {
        self.visited_order
            .iter()
            .filter(|&&p| !self.is_marker(p))
            .count()
            + 1
    }

    fn is_marker(&self, p: Coord) -> bool {
        p == self.start || p == self.goal
    }
}

impl From<Traversal> for Plan {
    fn from(t: Traversal) -> Self {
        let path = t.path();
        Self {
            start: t.start,
            goal: t.goal,
            visited_order: t.visited_order,
            path,
        }
    }
}

// ---------------------------------------------------------------------------
// Tick / Scheduled / state
// ---------------------------------------------------------------------------

/// Token for one scheduled step, tagged with the run it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tick {
    generation: u64,
}

impl Tick {
    /// Rebuild a tick from its generation, e.g. after it travelled through
    /// a message queue.
    pub fn from_generation(generation: u64) -> Self {
        Self { generation }
    }

    #[inline]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// A tick together with how long to wait before firing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub tick: Tick,
    pub delay: Duration,
}

/// Where the sequencer is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    /// `cursor` indexes the next entry of the visitation order.
    Running { cursor: usize, total: usize },
}

/// Record of a run that was cancelled before finishing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interruption {
    pub generation: u64,
    /// Visitation entries consumed before the cancel.
    pub cursor: usize,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Replays one [`Plan`] at a time as discrete steps.
///
/// `Idle -> Running -> Idle` on completion; `Running -> Idle` through
/// [`cancel`](Self::cancel), which skips the path phase.
#[derive(Debug)]
pub struct Sequencer {
    state: PlaybackState,
    generation: u64,
    interval: Duration,
    plan: Option<Plan>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            generation: 0,
            interval: Duration::ZERO,
            plan: None,
        }
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, PlaybackState::Running { .. })
    }

    /// Generation of the current (or most recent) run.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin replaying `plan`, one step every `interval`.
    ///
    /// An active run is cancelled first. The returned tick is due
    /// immediately.
    pub fn start(&mut self, plan: Plan, interval: Duration) -> Scheduled {
        if let Some(i) = self.cancel() {
            log::debug!(
                "playback {} replaced at {}/{}",
                i.generation,
                i.cursor,
                i.total
            );
        }
        self.generation = self.generation.wrapping_add(1);
        self.interval = interval;
        self.state = PlaybackState::Running {
            cursor: 0,
            total: plan.visited_order.len(),
        };
        log::debug!(
            "playback {} started: {} visits, path {}, every {:?}",
            self.generation,
            plan.visited_order.len(),
            if plan.path.is_found() { "found" } else { "unreachable" },
            interval,
        );
        self.plan = Some(plan);
        Scheduled {
            tick: Tick {
                generation: self.generation,
            },
            delay: Duration::ZERO,
        }
    }

    /// Fire a tick, emitting at most one event to `observer`.
    ///
    /// Visitation entries equal to start or goal produce no event and do
    /// not use up a tick: the tick emits the next non-marker entry instead.
    ///
    /// Returns the next tick to schedule, or `None` when the run finished or
    /// the tick is stale.
    pub fn step<O: Observer + ?Sized>(
        &mut self,
        tick: Tick,
        observer: &mut O,
    ) -> Option<Scheduled> {
        if tick.generation != self.generation {
            log::trace!(
                "stale tick {} ignored (current {})",
                tick.generation,
                self.generation
            );
            return None;
        }
        let PlaybackState::Running { mut cursor, total } = self.state else {
            log::trace!("tick {} after playback ended", tick.generation);
            return None;
        };
        let plan = self.plan.as_ref()?;

        while cursor < total && plan.is_marker(plan.visited_order[cursor]) {
            cursor += 1;
        }

        if cursor < total {
            observer.on_event(PlaybackEvent::Visit(plan.visited_order[cursor]));
            self.state = PlaybackState::Running {
                cursor: cursor + 1,
                total,
            };
            return Some(Scheduled {
                tick,
                delay: self.interval,
            });
        }

        let event = match &plan.path {
            PathOutcome::Found(path) => PlaybackEvent::Path(path.interior().to_vec()),
            PathOutcome::Unreachable => PlaybackEvent::Unreachable,
        };
        log::debug!("playback {} finished: {:?}", self.generation, event);
        self.state = PlaybackState::Idle;
        self.plan = None;
        observer.on_event(event);
        None
    }

    /// Stop the active run. Every outstanding tick becomes stale and the
    /// path phase is skipped. Returns `None` if nothing was running.
    pub fn cancel(&mut self) -> Option<Interruption> {
        let PlaybackState::Running { cursor, total } = self.state else {
            return None;
        };
        let interruption = Interruption {
            generation: self.generation,
            cursor,
            total,
        };
        // Bump so ticks of the cancelled run can never match again.
        self.generation = self.generation.wrapping_add(1);
        self.state = PlaybackState::Idle;
        self.plan = None;
        log::debug!(
            "playback {} interrupted at {}/{}",
            interruption.generation,
            cursor,
            total
        );
        Some(interruption)
    }
}
