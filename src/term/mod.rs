//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: the game state is painted into a
//! plain framebuffer of styled character cells, which a diffing renderer
//! flushes to the terminal. Rendering stays pure and testable; only the
//! renderer touches stdout.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
