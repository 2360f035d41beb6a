//! Core carousel logic – geometry, fade/centering math, timers, and the
//! controller state machine.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod carousel;
pub mod clip;
pub mod geometry;
pub mod metrics;
pub mod timer;
