//! Time source used by every bounded wait.
//!
//! Workflows never read the wall clock directly: they take a `&mut dyn Clock`
//! so tests can drive timeouts with `MockClock`, which advances only when
//! slept on.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// Real monotonic clock backed by `Instant` and `thread::sleep`.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now: Rc<Cell<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Point in time after which a wait gives up. `None` timeout never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Duration>,
}

impl Deadline {
    pub fn after(clock: &dyn Clock, timeout: Option<Duration>) -> Self {
        Self {
            at: timeout.map(|t| clock.now() + t),
        }
    }

    pub fn never() -> Self {
        Self { at: None }
    }

    pub fn expired(&self, clock: &dyn Clock) -> bool {
        match self.at {
            Some(at) => clock.now() >= at,
            None => false,
        }
    }
}
