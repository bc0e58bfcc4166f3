//! edbv - front ends for the bindings viewer.
//!
//! The model lives in `edbv-core`; this crate adds settings, logging, the
//! update check and the terminal and desktop user interfaces.

pub mod cli;
pub mod config;
pub mod logging;
pub mod startup;
pub mod update;

#[cfg(any(feature = "tui", feature = "gui"))]
pub mod clipboard;

#[cfg(feature = "gui")]
pub mod gui;
#[cfg(feature = "tui")]
pub mod tui;
