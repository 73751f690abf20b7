//! Core module - pure game logic with no terminal or I/O dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It is fully deterministic: the only inputs are the RNG seed, symbolic
//! commands, and driver-fed millisecond timestamps.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision queries and line clearing
//! - [`game_state`]: Complete game state - pieces, phases, scoring, gravity
//! - [`pieces`]: Shape catalog with mask-based clockwise rotation
//! - [`rng`]: Small deterministic generator for piece selection
//! - [`scoring`]: Line scores, level progression, and drop speed
//! - [`snapshot`]: Copy-out view of the state for presentation layers

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use game_state::{is_valid_position, GameState, Piece};
pub use pieces::{ShapeDef, ShapeMask};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, PieceView};
