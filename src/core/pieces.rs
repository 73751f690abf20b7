//! Shape catalog - static piece definitions and mask rotation
//!
//! Each of the seven kinds is stored as one canonical orientation in a
//! square bounding box (I is 4x4, O is 2x2, the rest 3x3). Rotated
//! orientations are computed from the mask with a single formula, never
//! pre-tabulated, so the rotation path has no per-kind casing.

use crate::core::rng::SimpleRng;
use crate::types::{Color, PieceKind, BOARD_WIDTH};

/// Largest bounding box in the catalog (the I piece)
pub const MAX_MASK_SIZE: usize = 4;

/// A square occupancy grid for one piece orientation.
///
/// Cells are 0/1 bytes in a fixed 4x4 array with an explicit edge size;
/// smaller masks occupy the top-left corner and the padding stays zero.
/// Masks are immutable values: rotation produces a new mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMask {
    size: usize,
    grid: [[u8; MAX_MASK_SIZE]; MAX_MASK_SIZE],
}

impl ShapeMask {
    /// Edge length of the bounding box (2, 3, or 4)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at (row, col) is occupied.
    /// Reads outside the bounding box hit zero padding and answer false.
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.grid[row][col] != 0
    }

    /// Clockwise quarter turn: `rotated[i][j] = original[n-1-j][i]`.
    pub fn rotated_cw(&self) -> ShapeMask {
        let n = self.size;
        let mut grid = [[0u8; MAX_MASK_SIZE]; MAX_MASK_SIZE];
        for i in 0..n {
            for j in 0..n {
                grid[i][j] = self.grid[n - 1 - j][i];
            }
        }
        ShapeMask { size: n, grid }
    }

    /// Iterate the occupied cells as (row, col) pairs
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let mask = *self;
        (0..mask.size).flat_map(move |r| {
            (0..mask.size)
                .filter_map(move |c| if mask.grid[r][c] != 0 { Some((r, c)) } else { None })
        })
    }
}

const fn mask2(rows: [[u8; 2]; 2]) -> ShapeMask {
    let mut grid = [[0u8; MAX_MASK_SIZE]; MAX_MASK_SIZE];
    let mut r = 0;
    while r < 2 {
        let mut c = 0;
        while c < 2 {
            grid[r][c] = rows[r][c];
            c += 1;
        }
        r += 1;
    }
    ShapeMask { size: 2, grid }
}

const fn mask3(rows: [[u8; 3]; 3]) -> ShapeMask {
    let mut grid = [[0u8; MAX_MASK_SIZE]; MAX_MASK_SIZE];
    let mut r = 0;
    while r < 3 {
        let mut c = 0;
        while c < 3 {
            grid[r][c] = rows[r][c];
            c += 1;
        }
        r += 1;
    }
    ShapeMask { size: 3, grid }
}

const fn mask4(rows: [[u8; 4]; 4]) -> ShapeMask {
    ShapeMask { size: 4, grid: rows }
}

/// One catalog entry: identity, color, and the canonical resting mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub kind: PieceKind,
    pub color: Color,
    pub mask: ShapeMask,
}

/// The seven definitions in catalog order; index matches `PieceKind as usize`
static SHAPES: [ShapeDef; 7] = [
    ShapeDef {
        kind: PieceKind::I,
        color: Color::Cyan,
        mask: mask4([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    },
    ShapeDef {
        kind: PieceKind::J,
        color: Color::Blue,
        mask: mask3([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    },
    ShapeDef {
        kind: PieceKind::L,
        color: Color::Orange,
        mask: mask3([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    },
    ShapeDef {
        kind: PieceKind::O,
        color: Color::Yellow,
        mask: mask2([[1, 1], [1, 1]]),
    },
    ShapeDef {
        kind: PieceKind::S,
        color: Color::Green,
        mask: mask3([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    },
    ShapeDef {
        kind: PieceKind::T,
        color: Color::Purple,
        mask: mask3([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    },
    ShapeDef {
        kind: PieceKind::Z,
        color: Color::Red,
        mask: mask3([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    },
];

/// The full ordered catalog
pub fn kinds() -> &'static [ShapeDef; 7] {
    &SHAPES
}

/// Look up the definition for a kind
pub fn def_for(kind: PieceKind) -> &'static ShapeDef {
    &SHAPES[kind as usize]
}

/// Draw one definition uniformly at random. Each call is independent and
/// draws with replacement, so a kind may repeat immediately.
pub fn pick_random(rng: &mut SimpleRng) -> &'static ShapeDef {
    &SHAPES[rng.next_range(SHAPES.len() as u32) as usize]
}

/// Spawn column for a mask: centered on the board by bounding box width
pub fn spawn_x(mask: &ShapeMask) -> i8 {
    (BOARD_WIDTH as i8) / 2 - (mask.size() as i8) / 2
}
