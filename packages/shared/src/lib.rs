//! Shared utilities for the Rostrum session hub.
//!
//! Cross-cutting helpers used by the server binary and its tests: logging
//! setup and time handling with a clock abstraction.

pub mod logger;
pub mod time;
