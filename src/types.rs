//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Frame cadence of the driver loop (milliseconds)
pub const TICK_MS: u64 = 16;

/// Gravity timing (milliseconds): the drop interval starts at
/// `BASE_DROP_MS` and shrinks by `DROP_STEP_MS` per level, never
/// going below `MIN_DROP_MS`.
pub const BASE_DROP_MS: u64 = 1000;
pub const DROP_STEP_MS: u64 = 100;
pub const MIN_DROP_MS: u64 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

/// Semantic cell colors, one per piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

/// Cell on the board (None = empty, Some = filled with a color)
pub type Cell = Option<Color>;

/// Symbolic commands accepted by the engine; raw key codes never
/// cross this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    PauseToggle,
    Start,
    Restart,
}

/// Game lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Line clear scoring (classic rules, multiplied by level)
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];
