//! Fault injection for resilience testing
//!
//! Both services expose endpoints that fail at random or answer slowly so
//! callers can exercise their retry and timeout handling. None of this
//! touches the color history.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Draws below this value (out of 100) produce a failure.
pub const FAILURE_THRESHOLD: u32 = 50;

/// Body returned when a random fault fires.
pub const RANDOM_FAILURE_MESSAGE: &str = "call failed, randomly returned failure";

/// Body returned when a random fault does not fire.
pub const RANDOM_SUCCESS_MESSAGE: &str = "call succeeded, randomly returned success";

/// Body returned by the delayed ping. Fixed text, whatever the configured delay.
pub const DELAYED_PING_MESSAGE: &str = "call succeeded, returned after a delay";

/// Result of a single fault roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOutcome {
    Success,
    Failure,
}

impl FaultOutcome {
    /// Maps a draw in `[0, 100)` to an outcome.
    pub fn from_draw(draw: u32) -> Self {
        if draw < FAILURE_THRESHOLD {
            FaultOutcome::Failure
        } else {
            FaultOutcome::Success
        }
    }
}

/// Random source for fault endpoints.
///
/// Seeded once per process; every request draws from the same generator so
/// consecutive calls are independent.
#[derive(Debug)]
pub struct FaultInjector {
    rng: Mutex<StdRng>,
}

impl FaultInjector {
    /// Creates an injector seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates an injector with a fixed seed for reproducible sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draws a uniform integer in `[0, 100)`.
    pub fn draw(&self) -> u32 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..100)
    }

    pub fn roll(&self) -> FaultOutcome {
        FaultOutcome::from_draw(self.draw())
    }
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::new()
    }
}
