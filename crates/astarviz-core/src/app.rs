//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! Besides input, the loop owns frame pacing: a model that wants to animate
//! returns [`Effect::RequestFrame`] and receives one [`Msg::Frame`] once the
//! configured frame interval has elapsed. Requests made within the same frame
//! coalesce, so a model never sees more than one frame message per interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::grid::{compute_frame, Frame, Grid};
use crate::messages::Msg;

/// Default frame interval, roughly 60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How long a driver may wait for input when no frame is pending.
pub const IDLE_POLL_TIMEOUT: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
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
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug)]
pub enum Effect {
    /// Ask for a [`Msg::Frame`] at the next frame boundary.
    RequestFrame,
    /// Multiple effects batched together.
    Batch(Vec<Effect>),
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (terminal, test harness, ...).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input, sending messages through `tx`. Implementations wait
    /// at most `timeout` for the first event, so that a pending frame is not
    /// delayed, and return early once `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up and restore the screen.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// Frame pacing
// ---------------------------------------------------------------------------

/// Tracks whether the model asked for a frame and when the last one fired.
#[derive(Debug)]
struct FramePacer {
    interval: Duration,
    requested: bool,
    last: Instant,
}

impl FramePacer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            requested: false,
            last: Instant::now(),
        }
    }

    /// Consume the pending request if its frame is due at `now`.
    fn take_due(&mut self, now: Instant) -> bool {
        if !self.requested || now.duration_since(self.last) < self.interval {
            return false;
        }
        self.requested = false;
        self.last = now;
        true
    }

    /// How long input polling may block at `now`: until the pending frame is
    /// due, or [`IDLE_POLL_TIMEOUT`] when none is requested.
    fn timeout(&self, now: Instant) -> Duration {
        if !self.requested {
            return IDLE_POLL_TIMEOUT;
        }
        self.interval
            .saturating_sub(now.duration_since(self.last))
            .min(IDLE_POLL_TIMEOUT)
    }
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
    /// Minimum time between two [`Msg::Frame`] deliveries.
    pub frame_interval: Duration,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    prev_grid: Grid,
    curr_grid: Grid,
    pacer: FramePacer,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            prev_grid: Grid::new(config.width, config.height),
            curr_grid: Grid::new(config.width, config.height),
            pacer: FramePacer::new(config.frame_interval),
        }
    }

    /// Borrow the model, e.g. to inspect it after [`run`](Self::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`] or the driver fails.
    ///
    /// Each iteration drains queued messages through the model, redraws and
    /// flushes the diff, polls the driver for input, then emits a
    /// [`Msg::Frame`] if one was requested and is due.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        log::debug!(
            "app started ({}x{}, frame interval {:?})",
            self.curr_grid.width(),
            self.curr_grid.height(),
            self.pacer.interval
        );

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let result = self.event_loop(&ctx, &tx, &rx);
        self.driver.close();
        log::debug!("app stopped");
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            self.process_pending(rx, ctx)?;
            if ctx.is_done() {
                return Ok(());
            }

            let timeout = self.pacer.timeout(Instant::now());
            if let Err(e) = self.driver.poll_msgs(ctx, tx.clone(), timeout) {
                ctx.cancel();
                return Err(e);
            }

            if self.pacer.take_due(Instant::now()) {
                tx.send(Msg::frame()).ok();
            }
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
            if let Msg::Screen { width, height, .. } = msg {
                self.curr_grid.resize(width, height);
            }
            if let Some(effect) = self.model.update(msg) {
                self.handle_effect(effect, ctx);
            }
            needs_draw = true;
            if ctx.is_done() {
                return Ok(());
            }
        }

        if needs_draw {
            self.model.draw(&mut self.curr_grid);
            let frame = compute_frame(&self.prev_grid, &self.curr_grid);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            self.prev_grid.clone_from(&self.curr_grid);
        }

        Ok(())
    }

    fn handle_effect(&mut self, effect: Effect, ctx: &Context) {
        match effect {
            Effect::End => ctx.cancel(),
            Effect::RequestFrame => self.pacer.requested = true,
            Effect::Batch(effects) => {
                for e in effects {
                    self.handle_effect(e, ctx);
                    if ctx.is_done() {
                        return;
                    }
                }
            }
        }
    }
}
