//! Snake TUI - a terminal Snake game
//!
//! This library provides:
//! - Core game logic, free of I/O and timers (game module)
//! - The movement and clock triggers that drive a session (timing module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - The interactive host loop (modes module)

pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod timing;
