// ABOUTME: Library root for podremote - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod resolve;
pub mod runtime;
pub mod session;
pub mod types;
