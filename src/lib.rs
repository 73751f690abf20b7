//! Blockfall: a terminal falling-block puzzle game.
//!
//! The crate splits into a deterministic [`core`] engine (board, piece
//! catalog, scoring, game state), a [`term`] rendering layer built on a
//! character framebuffer, and an [`input`] layer that maps key events to
//! game commands. The binary in `main.rs` wires them together; everything
//! else is free of I/O and unit-testable.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
