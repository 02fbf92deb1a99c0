//! Colloquy TUI library exports.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod favorites;
pub mod gateway;
pub mod keys;
pub mod nav;
pub mod notifications;
pub mod persistence;
pub mod session;
pub mod state;
pub mod theme;
pub mod transcript;
pub mod views;
