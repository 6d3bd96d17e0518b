//! Incidents TUI library.
//!
//! This module exposes the internal modules for testing.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod screens;
pub mod ui;
pub mod util;
