use crate::core::game_state::Piece;
use crate::core::pieces::ShapeMask;
use crate::types::{Cell, Color, GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceView {
    pub kind: PieceKind,
    pub color: Color,
    pub mask: ShapeMask,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceView {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            mask: value.mask,
            x: value.x,
            y: value.y,
        }
    }
}

/// Copy-out view of everything the presentation layer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<PieceView>,
    pub next: Option<PieceView>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: GamePhase,
    pub paused: bool,
    pub game_over: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: None,
            score: 0,
            level: 1,
            lines: 0,
            phase: GamePhase::Ready,
            paused: false,
            game_over: false,
        }
    }
}
