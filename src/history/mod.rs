//! Rolling color history and frequency statistics
//!
//! Keeps the most recent colors returned by the color teller in a fixed-size
//! ring buffer and derives per-color ratios from its current contents.
//!
//! Every operation takes the same lock, so a request that appends a color and
//! then reads the ratios (see [`ColorHistory::record`]) always observes its own
//! write and never a half-updated buffer.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of colors retained by the gateway.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Color label → fraction of the current history, rounded to 2 decimals.
pub type ColorRatios = BTreeMap<String, f64>;

/// Fixed-capacity circular buffer of color labels.
#[derive(Debug)]
pub struct ColorHistory {
    ring: Mutex<Ring>,
}

#[derive(Debug)]
struct Ring {
    /// `None` marks a slot that has never been written since the last clear.
    slots: Vec<Option<String>>,
    /// Next slot to overwrite.
    cursor: usize,
    /// Valid entries, saturating at `slots.len()`.
    count: usize,
}

impl Ring {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            cursor: 0,
            count: 0,
        }
    }

    fn push(&mut self, color: &str) {
        let capacity = self.slots.len();
        self.slots[self.cursor] = Some(color.to_string());
        self.cursor = (self.cursor + 1) % capacity;
        if self.count < capacity {
            self.count += 1;
        }
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cursor = 0;
        self.count = 0;
    }

    fn ratios(&self) -> ColorRatios {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total = 0usize;

        for color in self.slots.iter().flatten() {
            *counts.entry(color.as_str()).or_default() += 1;
            total += 1;
        }

        if total == 0 {
            return ColorRatios::new();
        }

        counts
            .into_iter()
            .map(|(color, n)| (color.to_string(), round_ratio(n, total)))
            .collect()
    }

    fn snapshot(&self) -> Vec<String> {
        let capacity = self.slots.len();
        // Oldest entry sits at the cursor once the buffer has wrapped.
        let start = if self.count < capacity { 0 } else { self.cursor };
        (0..self.count)
            .filter_map(|offset| self.slots[(start + offset) % capacity].clone())
            .collect()
    }
}

/// Rounds `count / total` to two decimal places, half away from zero.
///
/// `1/3` → `0.33`, `2/3` → `0.67`, `1/8` → `0.13`.
pub fn round_ratio(count: usize, total: usize) -> f64 {
    let ratio = count as f64 / total as f64;
    (ratio * 100.0).round() / 100.0
}

impl ColorHistory {
    /// Creates an empty history holding at most `capacity` colors.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "color history capacity must be non-zero");
        Self {
            ring: Mutex::new(Ring::with_capacity(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ring> {
        // The ring is left consistent after every statement, so a poisoned
        // lock still guards valid data.
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes `color` over the oldest slot once the history is full.
    pub fn append(&self, color: &str) {
        self.lock().push(color);
    }

    /// Drops every recorded color.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Computes the ratio of each color over the current contents.
    ///
    /// Returns an empty mapping when nothing has been recorded.
    pub fn ratios(&self) -> ColorRatios {
        self.lock().ratios()
    }

    /// Appends `color` and returns the resulting ratios under a single lock.
    pub fn record(&self, color: &str) -> ColorRatios {
        let mut ring = self.lock();
        ring.push(color);
        ring.ratios()
    }

    /// Number of valid entries (at most [`capacity`](Self::capacity)).
    pub fn len(&self) -> usize {
        self.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().slots.len()
    }

    /// Returns the recorded colors, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().snapshot()
    }
}

impl Default for ColorHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
