//! Command implementations for fungi-cli

pub mod classify;

pub use classify::classify;
