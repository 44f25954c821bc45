//! reel - offline downloads browser for the terminal
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod downloads;
pub mod error;
pub mod logging;
pub mod models;
pub mod table;
pub mod traits;
pub mod ui;
