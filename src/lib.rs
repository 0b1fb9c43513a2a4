//! colorapp - color gateway and color teller demo services
//!
//! The gateway asks a color teller for a color, keeps the last colors it saw
//! in a bounded history and answers with per-color ratios. Both services also
//! expose fault-injection endpoints for exercising caller resilience.

pub mod api;
pub mod cli;
pub mod config;
pub mod downstream;
pub mod faults;
pub mod history;
pub mod logging;
pub mod teller;
