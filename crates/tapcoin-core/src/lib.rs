//! Core orchestration for the Tapcoin game backend.
//!
//! Sits on top of the data layer and provides the three pieces bot
//! handlers and the mini-app API need:
//!
//! - [`config`] -- YAML configuration with env overrides
//! - [`progression`] -- the balance-to-level ladder
//! - [`game`] -- the [`Game`] facade bundling pool and rewards

pub mod config;
pub mod game;
pub mod progression;

// Re-export primary types for convenience.
pub use config::{ConfigError, DatabaseConfig, GameConfig, LoggingConfig, RewardsConfig};
pub use game::{Game, GameError};
