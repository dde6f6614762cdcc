//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! Everything runs on one thread. Timers requested through
//! [`Effect::After`] are kept by the loop and delivered as ordinary messages
//! once due; the driver's input poll is bounded by the nearest deadline so a
//! timer never waits on user input.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use gridwalk_playback::Context;

use crate::messages::Msg;
use crate::screen::{Frame, Screen, compute_frame};

/// Longest a single input poll may block when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg` back to the model after the delay.
    After(Duration, Msg),
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `screen`.
    fn draw(&self, screen: &mut Screen);
}

/// Back-end driver.
pub trait Driver {
    /// Initialise the back-end and report the screen size.
    fn init(&mut self) -> Result<(i32, i32), Box<dyn std::error::Error>>;

    /// Wait at most `timeout` for input, sending whatever arrived through
    /// `tx`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Paint the changed cells.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the terminal. Called on every exit path.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
}

struct Timer {
    due: Instant,
    msg: Msg,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    timers: Vec<Timer>,
    prev: Screen,
    curr: Screen,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            timers: Vec::new(),
            prev: Screen::new(0, 0),
            curr: Screen::new(0, 0),
        }
    }

    /// The model, e.g. to inspect it after the loop ended.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the loop until the model returns [`Effect::End`].
    ///
    /// The driver is closed whether the loop ends normally or with an error.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (width, height) = match self.driver.init() {
            Ok(size) => size,
            Err(e) => {
                self.driver.close();
                return Err(e);
            }
        };
        self.prev = Screen::new(width, height);
        self.curr = Screen::new(width, height);

        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();
        self.process_pending(&rx, &ctx)?;

        while !ctx.is_done() {
            let timeout = self
                .next_due()
                .map_or(IDLE_POLL, |due| due.saturating_duration_since(Instant::now()));
            self.driver.poll_msgs(&ctx, &tx, timeout.min(IDLE_POLL))?;
            self.fire_due(&tx);
            self.process_pending(&rx, &ctx)?;
        }
        Ok(())
    }

    fn next_due(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Move every due timer into the queue, earliest first.
    fn fire_due(&mut self, tx: &Sender<Msg>) {
        let now = Instant::now();
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            std::mem::take(&mut self.timers)
                .into_iter()
                .partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.due);
        for t in due {
            tx.send(t.msg).ok();
        }
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height } = msg {
                self.prev = Screen::new(width, height);
                self.curr = Screen::new(width, height);
            }
            if let Some(effect) = self.model.update(msg) {
                if self.handle_effect(effect, ctx) {
                    return Ok(());
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(&mut self.curr);
            let frame = compute_frame(&self.prev, &self.curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            self.prev.clone_from(&self.curr);
        }
        Ok(())
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(&mut self, effect: Effect, ctx: &Context) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::After(delay, msg) => {
                self.timers.push(Timer {
                    due: Instant::now() + delay,
                    msg,
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted input, one batch per poll.
    struct Scripted {
        input: VecDeque<Vec<Msg>>,
        flushed: usize,
        closed: bool,
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(i32, i32), Box<dyn std::error::Error>> {
            Ok((10, 2))
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: &Sender<Msg>,
            _timeout: Duration,
        ) -> Result<(), Box<dyn std::error::Error>> {
            match self.input.pop_front() {
                Some(batch) => {
                    for m in batch {
                        tx.send(m).ok();
                    }
                    Ok(())
                }
                None => Err("script exhausted".into()),
            }
        }

        fn flush(&mut self, _frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.flushed += 1;
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    /// Counts ticks; ticks re-arm themselves until `q`.
    #[derive(Default)]
    struct Counter {
        ticks: u32,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Init => Some(Effect::After(Duration::ZERO, Msg::Tick(0))),
                Msg::Tick(_) => {
                    self.ticks += 1;
                    Some(Effect::After(Duration::ZERO, Msg::Tick(0)))
                }
                Msg::KeyDown(_) => Some(Effect::End),
                _ => None,
            }
        }

        fn draw(&self, screen: &mut Screen) {
            screen.text(0, 0, &self.ticks.to_string(), Default::default());
        }
    }

    fn scripted(input: Vec<Vec<Msg>>) -> Scripted {
        Scripted {
            input: input.into(),
            flushed: 0,
            closed: false,
        }
    }

    #[test]
    fn timers_fire_between_polls() {
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver: scripted(vec![vec![], vec![], vec![Msg::ch('q')]]),
        });
        app.run().unwrap();
        // One tick per poll before the key arrived; the key ends the loop
        // before the third tick is handled.
        assert_eq!(app.model().ticks, 2);
        assert!(app.driver.closed);
        assert!(app.driver.flushed >= 1);
    }

    #[test]
    fn driver_error_still_closes() {
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver: scripted(vec![]),
        });
        assert!(app.run().is_err());
        assert!(app.driver.closed);
    }
}
