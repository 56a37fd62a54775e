//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timer or rendering
//! dependencies. Hosts drive it by calling `step` and `tick_clock` on their own
//! schedule.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, MAX_BOARD_SIZE};
pub use engine::{GameEngine, StepResult};
pub use state::{Cell, CollisionType, GameState, Phase, Position, Snake};
