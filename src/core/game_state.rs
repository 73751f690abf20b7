//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, shape catalog, RNG,
//! and scoring. It owns the current and next pieces, validates movement and
//! rotation, applies gravity from driver-fed timestamps, and handles locking,
//! line clears, and the game lifecycle.

use crate::core::pieces::{self, ShapeDef, ShapeMask};
use crate::core::rng::SimpleRng;
use crate::core::scoring;
use crate::core::snapshot::{GameSnapshot, PieceView};
use crate::core::Board;
use crate::types::*;

/// Horizontal wall-kick offsets, tried in order after the in-place candidate
const KICK_OFFSETS: [i8; 4] = [-1, 1, -2, 2];

/// Active falling piece: one catalog shape with its current orientation
/// mask and board position. (x, y) is the top-left of the mask's bounding
/// box; mask rows may sit above the board while y is negative or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub mask: ShapeMask,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece from a catalog definition at its spawn position
    pub fn spawn(def: &ShapeDef) -> Self {
        Self {
            kind: def.kind,
            color: def.color,
            mask: def.mask,
            x: pieces::spawn_x(&def.mask),
            y: 0,
        }
    }

    /// Check the piece's own placement against the board
    pub fn is_valid(&self, board: &Board) -> bool {
        is_valid_position(board, self.x, self.y, &self.mask)
    }
}

/// Placement rule: every set mask cell must stay inside the side and bottom
/// walls and must not overlap a locked cell. Cells that land above the top
/// row (board y < 0) are always permitted, so a piece may overhang the top
/// edge at spawn or mid-kick, but never the sides or the floor.
pub fn is_valid_position(board: &Board, x: i8, y: i8, mask: &ShapeMask) -> bool {
    mask.cells().all(|(r, c)| {
        let bx = x + c as i8;
        let by = y + r as i8;
        if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
            return false;
        }
        by < 0 || !board.is_occupied(bx, by)
    })
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    rng: SimpleRng,
    phase: GamePhase,
    score: u32,
    level: u32,
    lines: u32,
    /// Gravity threshold for the current level.
    drop_interval_ms: u64,
    /// Timestamp of the last gravity attempt; reset on every attempt,
    /// whether the piece fell or locked.
    last_drop_ms: u64,
}

impl GameState {
    /// Create a new game in the Ready phase with the given RNG seed.
    /// No pieces exist until `start`.
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            rng: SimpleRng::new(seed),
            phase: GamePhase::Ready,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: scoring::drop_interval_ms(1),
            last_drop_ms: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u64 {
        self.drop_interval_ms
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Start a round. Valid only from Ready or GameOver (an implicit
    /// reset+start); mid-round calls change nothing and report false.
    /// `now_ms` anchors the drop timer.
    pub fn start(&mut self, now_ms: u64) -> bool {
        match self.phase {
            GamePhase::Ready | GamePhase::GameOver => {
                self.begin_round(now_ms);
                true
            }
            GamePhase::Running | GamePhase::Paused => false,
        }
    }

    /// Reset and start a fresh round from any phase
    pub fn restart(&mut self, now_ms: u64) -> bool {
        self.begin_round(now_ms);
        true
    }

    fn begin_round(&mut self, now_ms: u64) {
        self.board.reset();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = scoring::drop_interval_ms(1);
        self.last_drop_ms = now_ms;
        self.current = Some(Piece::spawn(pieces::pick_random(&mut self.rng)));
        self.next = Some(Piece::spawn(pieces::pick_random(&mut self.rng)));
        self.phase = GamePhase::Running;
    }

    /// Gravity tick, driven from outside with a monotonic millisecond
    /// timestamp. Once the drop interval has elapsed the piece falls one
    /// row, or locks if it is resting; locking may clear lines, promotes
    /// the next piece, and can end the game. Returns whether this call
    /// advanced or locked the piece.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        if now_ms.saturating_sub(self.last_drop_ms) < self.drop_interval_ms {
            return false;
        }
        self.last_drop_ms = now_ms;

        if self.try_move(0, 1) {
            return true;
        }
        self.lock_current();
        true
    }

    /// Try to translate the current piece; applies only if the target
    /// placement is valid. The engine accepts movement while paused (the
    /// driver decides whether to forward input then); Ready and GameOver
    /// always refuse.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let (x, y) = (piece.x + dx, piece.y + dy);
        if !is_valid_position(&self.board, x, y, &piece.mask) {
            return false;
        }
        self.current = Some(Piece { x, y, ..piece });
        true
    }

    /// Rotate the current piece clockwise. The turned mask is tried at the
    /// unchanged position first, then nudged by the kick offsets in order;
    /// the first fit replaces mask and column atomically. If nothing fits
    /// the piece is unchanged.
    pub fn try_rotate(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let rotated = piece.mask.rotated_cw();
        if is_valid_position(&self.board, piece.x, piece.y, &rotated) {
            self.current = Some(Piece { mask: rotated, ..piece });
            return true;
        }
        for dx in KICK_OFFSETS {
            if is_valid_position(&self.board, piece.x + dx, piece.y, &rotated) {
                self.current = Some(Piece {
                    mask: rotated,
                    x: piece.x + dx,
                    ..piece
                });
                return true;
            }
        }
        false
    }

    /// Drop the current piece straight down to rest and lock it, then
    /// credit one point per fallen row. Only meaningful mid-fall, so the
    /// Running phase is required. The drop timer baseline is left alone.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let mut distance: u32 = 0;
        while is_valid_position(
            &self.board,
            piece.x,
            piece.y + distance as i8 + 1,
            &piece.mask,
        ) {
            distance += 1;
        }

        self.current = Some(Piece {
            y: piece.y + distance as i8,
            ..piece
        });
        self.lock_current();
        self.score += distance;
        true
    }

    /// Flip Running <-> Paused; Ready and GameOver refuse. The drop
    /// baseline is left alone, so a long pause may owe a gravity step
    /// right after resume.
    pub fn pause_toggle(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                true
            }
            GamePhase::Ready | GamePhase::GameOver => false,
        }
    }

    /// Dispatch a symbolic command from the driver. The timestamp anchors
    /// the drop timer for Start/Restart; the other commands ignore it.
    pub fn apply(&mut self, command: GameCommand, now_ms: u64) -> bool {
        match command {
            GameCommand::MoveLeft => self.try_move(-1, 0),
            GameCommand::MoveRight => self.try_move(1, 0),
            GameCommand::SoftDrop => self.try_move(0, 1),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::Rotate => self.try_rotate(),
            GameCommand::PauseToggle => self.pause_toggle(),
            GameCommand::Start => self.start(now_ms),
            GameCommand::Restart => self.restart(now_ms),
        }
    }

    /// Fill a caller-owned snapshot without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = self.current.map(PieceView::from);
        out.next = self.next.map(PieceView::from);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.phase = self.phase;
        out.paused = self.paused();
        out.game_over = self.game_over();
    }

    /// Convenience copy of the observable state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn accepts_input(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    /// Write the resting piece's visible cells into the board, resolve
    /// clears, then promote next -> current and draw a fresh next. A
    /// promoted piece with no valid spawn placement ends the game; it
    /// stays in place so the presentation layer can show the collision.
    fn lock_current(&mut self) {
        let Some(piece) = self.current else {
            return;
        };

        for (r, c) in piece.mask.cells() {
            let by = piece.y + r as i8;
            if by >= 0 {
                self.board.set(piece.x + c as i8, by, piece.color);
            }
        }

        self.resolve_clears();

        self.current = self.next.take();
        self.next = Some(Piece::spawn(pieces::pick_random(&mut self.rng)));

        if let Some(promoted) = self.current {
            if !promoted.is_valid(&self.board) {
                self.phase = GamePhase::GameOver;
            }
        }
    }

    /// Score, line total, level, and gravity interval update together in
    /// one lock event; the cleared rows vanish in the same step.
    fn resolve_clears(&mut self) {
        let rows = self.board.full_rows();
        if rows.is_empty() {
            return;
        }

        self.score += scoring::calculate_line_score(rows.len(), self.level);
        self.lines += rows.len() as u32;

        let new_level = scoring::calculate_level(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval_ms = scoring::drop_interval_ms(new_level);
        }

        self.board.clear_rows(&rows);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Install a specific piece as the current one, bypassing the RNG
    fn put_piece(state: &mut GameState, kind: PieceKind, x: i8, y: i8) {
        let def = pieces::def_for(kind);
        state.current = Some(Piece {
            kind: def.kind,
            color: def.color,
            mask: def.mask,
            x,
            y,
        });
    }

    fn fill_row_except(state: &mut GameState, y: i8, gap: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gap.contains(&x) {
                state.board.set(x, y, Color::Red);
            }
        }
    }

    // --- Piece and placement validity ---

    #[test]
    fn test_piece_spawn_position() {
        let i = Piece::spawn(pieces::def_for(PieceKind::I));
        assert_eq!((i.x, i.y), (3, 0));
        assert_eq!(i.kind, PieceKind::I);
        assert_eq!(i.color, Color::Cyan);

        let o = Piece::spawn(pieces::def_for(PieceKind::O));
        assert_eq!((o.x, o.y), (4, 0));

        let t = Piece::spawn(pieces::def_for(PieceKind::T));
        assert_eq!((t.x, t.y), (4, 0));
    }

    #[test]
    fn test_spawned_pieces_valid_on_empty_board() {
        let board = Board::new();
        for def in pieces::kinds() {
            assert!(Piece::spawn(def).is_valid(&board), "kind {:?}", def.kind);
        }
    }

    #[test]
    fn test_placement_rejected_outside_walls() {
        let board = Board::new();
        let t = pieces::def_for(PieceKind::T).mask;

        // column 0 of the T mask would land at x = -1
        assert!(!is_valid_position(&board, -1, 5, &t));
        // column 2 would land at x = 10
        assert!(!is_valid_position(&board, 8, 5, &t));
        // row 1 would land below the floor
        assert!(!is_valid_position(&board, 4, 19, &t));
        // resting exactly on the floor is fine
        assert!(is_valid_position(&board, 4, 18, &t));
    }

    #[test]
    fn test_placement_above_top_is_allowed() {
        let board = Board::new();
        let o = pieces::def_for(PieceKind::O).mask;

        // top mask row above the board, bottom row on row 0
        assert!(is_valid_position(&board, 4, -1, &o));
        // fully above would put row 1 at y = -1, still fine
        assert!(is_valid_position(&board, 4, -2, &o));
    }

    #[test]
    fn test_placement_overlap_asymmetry() {
        let mut board = Board::new();
        board.set(4, 0, Color::Green);

        let o = pieces::def_for(PieceKind::O).mask;
        // visible cell collides with the occupied cell
        assert!(!is_valid_position(&board, 4, -1, &o));
        // shifted clear of it, the above-board overhang is still permitted
        assert!(is_valid_position(&board, 5, -1, &o));
    }

    // --- Lifecycle ---

    #[test]
    fn test_new_game_is_ready() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), GamePhase::Ready);
        assert!(!state.paused());
        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.current().is_none());
        assert!(state.next().is_none());
    }

    #[test]
    fn test_start_spawns_and_runs() {
        let mut state = GameState::new(12345);
        assert!(state.start(0));

        assert_eq!(state.phase(), GamePhase::Running);
        assert!(state.current().is_some());
        assert!(state.next().is_some());
        assert_eq!(state.current().map(|p| p.y), Some(0));
    }

    #[test]
    fn test_start_mid_round_is_noop() {
        let mut state = GameState::new(12345);
        state.start(0);
        state.score = 70;
        let piece = state.current();

        assert!(!state.start(500));
        assert_eq!(state.score(), 70);
        assert_eq!(state.current(), piece);

        state.pause_toggle();
        assert!(!state.start(500));
        assert!(state.paused());
    }

    #[test]
    fn test_restart_is_unconditional() {
        let mut state = GameState::new(12345);
        state.start(0);
        state.score = 900;
        state.board.set(0, 19, Color::Blue);

        assert!(state.restart(100));
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let mut state = GameState::new(12345);
        state.start(0);
        force_game_over(&mut state);
        assert!(state.game_over());

        assert!(state.start(0));
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_pause_toggle_transitions() {
        let mut state = GameState::new(12345);
        assert!(!state.pause_toggle()); // Ready refuses

        state.start(0);
        assert!(state.pause_toggle());
        assert_eq!(state.phase(), GamePhase::Paused);
        assert!(state.pause_toggle());
        assert_eq!(state.phase(), GamePhase::Running);

        force_game_over(&mut state);
        assert!(!state.pause_toggle());
        assert!(state.game_over());
    }

    #[test]
    fn test_commands_noop_before_start() {
        let mut state = GameState::new(12345);

        assert!(!state.try_move(-1, 0));
        assert!(!state.try_rotate());
        assert!(!state.hard_drop());
        assert!(!state.tick(10_000));
        assert_eq!(state.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_move_and_rotate_allowed_while_paused() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::T, 4, 5);
        state.pause_toggle();

        // lateral movement and rotation are not gated by the engine
        assert!(state.try_move(-1, 0));
        assert!(state.try_rotate());
        // gravity and hard drop are
        assert!(!state.tick(10_000));
        assert!(!state.hard_drop());
    }

    // --- Gravity timing ---

    #[test]
    fn test_tick_drops_on_interval() {
        let mut state = GameState::new(12345);
        state.start(0);
        let y0 = state.current().map(|p| p.y);

        assert!(!state.tick(999));
        assert_eq!(state.current().map(|p| p.y), y0);

        assert!(state.tick(1000));
        assert_eq!(state.current().map(|p| p.y), y0.map(|y| y + 1));

        assert!(!state.tick(1500));
        assert!(state.tick(2000));
        assert_eq!(state.current().map(|p| p.y), y0.map(|y| y + 2));
    }

    #[test]
    fn test_tick_baseline_anchored_at_start() {
        let mut state = GameState::new(12345);
        state.start(5000);

        assert!(!state.tick(5999));
        assert!(state.tick(6000));
    }

    #[test]
    fn test_lock_resets_drop_baseline() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::O, 4, 18); // resting on the floor

        // this attempt fails to move down, locks, and re-anchors the timer
        assert!(state.tick(1000));
        assert!(!state.game_over());
        assert!(!state.tick(1999));
        assert!(state.tick(2000));
    }

    // --- Movement ---

    #[test]
    fn test_move_left_right_down() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::T, 4, 0);

        assert!(state.try_move(1, 0));
        assert_eq!(state.current().map(|p| p.x), Some(5));
        assert!(state.try_move(-1, 0));
        assert_eq!(state.current().map(|p| p.x), Some(4));
        assert!(state.try_move(0, 1));
        assert_eq!(state.current().map(|p| p.y), Some(1));
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::T, 4, 0);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        // T occupies all three mask columns, so it stops at x = 0
        assert_eq!(moved, 4);
        assert_eq!(state.current().map(|p| p.x), Some(0));
    }

    #[test]
    fn test_move_blocked_by_locked_cells() {
        let mut state = GameState::new(12345);
        state.start(0);
        state.board.set(3, 1, Color::Blue);
        put_piece(&mut state, PieceKind::T, 4, 0);

        // T's left column would land on the locked cell
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.current().map(|p| p.x), Some(4));
    }

    // --- Rotation and kicks ---

    #[test]
    fn test_rotate_in_place_when_room() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::T, 4, 5);

        assert!(state.try_rotate());
        let piece = state.current().expect("piece");
        assert_eq!(piece.x, 4); // zero offset wins when valid
        assert_eq!(piece.mask, pieces::def_for(PieceKind::T).mask.rotated_cw());
    }

    #[test]
    fn test_four_engine_rotations_restore_mask() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::S, 4, 5);

        for _ in 0..4 {
            assert!(state.try_rotate());
        }
        let piece = state.current().expect("piece");
        assert_eq!(piece.mask, pieces::def_for(PieceKind::S).mask);
        assert_eq!((piece.x, piece.y), (4, 5));
    }

    #[test]
    fn test_rotate_o_reports_true_in_place() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::O, 4, 5);

        assert!(state.try_rotate());
        let piece = state.current().expect("piece");
        assert_eq!((piece.x, piece.y), (4, 5));
        assert_eq!(piece.mask, pieces::def_for(PieceKind::O).mask);
    }

    #[test]
    fn test_kick_order_prefers_minus_one() {
        let mut state = GameState::new(12345);
        state.start(0);
        // block the in-place candidate only: rotating T at (4, 0) puts a
        // cell at board (5, 2)
        state.board.set(5, 2, Color::Green);
        put_piece(&mut state, PieceKind::T, 4, 0);

        assert!(state.try_rotate());
        let piece = state.current().expect("piece");
        assert_eq!(piece.x, 3); // -1 tried (and accepted) before +1
    }

    #[test]
    fn test_kick_falls_through_to_plus_one() {
        let mut state = GameState::new(12345);
        state.start(0);
        // vertical east T hugging the left wall
        put_piece(&mut state, PieceKind::T, 4, 0);
        assert!(state.try_rotate()); // now east at x = 4
        for _ in 0..5 {
            state.try_move(-1, 0);
        }
        assert_eq!(state.current().map(|p| p.x), Some(-1));

        // south T needs mask column 0: in-place and -1 hit the wall, +1 fits
        assert!(state.try_rotate());
        let piece = state.current().expect("piece");
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn test_kick_reaches_plus_two() {
        let mut state = GameState::new(12345);
        state.start(0);
        // vertical I pressed into the left wall: cells in board column 0
        put_piece(&mut state, PieceKind::I, 3, 2);
        assert!(state.try_rotate()); // vertical, mask column 2
        for _ in 0..10 {
            state.try_move(-1, 0);
        }
        assert_eq!(state.current().map(|p| p.x), Some(-2));

        // the horizontal result spans mask columns 0-3, so only +2 fits
        assert!(state.try_rotate());
        let piece = state.current().expect("piece");
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn test_rotation_rejected_when_nothing_fits() {
        let mut state = GameState::new(12345);
        state.start(0);
        // T resting on the floor: the turned mask needs a row below the floor
        put_piece(&mut state, PieceKind::T, 4, 18);
        let before = state.current();

        assert!(!state.try_rotate());
        assert_eq!(state.current(), before);
    }

    // --- Hard drop ---

    #[test]
    fn test_hard_drop_locks_at_floor() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::O, 4, 0);
        let score_before = state.score();

        assert!(state.hard_drop());

        // O fell from y=0 to y=18, one point per row
        assert_eq!(state.score(), score_before + 18);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(state.board().get(x, y), Some(Some(Color::Yellow)));
        }
        // next was promoted and a fresh piece drawn behind it
        assert!(state.current().is_some());
        assert!(state.next().is_some());
    }

    #[test]
    fn test_hard_drop_promotes_next_piece() {
        let mut state = GameState::new(12345);
        state.start(0);
        let next_kind = state.next().map(|p| p.kind);

        assert!(state.hard_drop());
        assert_eq!(state.current().map(|p| p.kind), next_kind);
    }

    #[test]
    fn test_hard_drop_zero_distance_still_locks() {
        let mut state = GameState::new(12345);
        state.start(0);
        put_piece(&mut state, PieceKind::O, 4, 18);
        let score_before = state.score();

        assert!(state.hard_drop());
        assert_eq!(state.score(), score_before);
        assert!(state.board().is_occupied(4, 19));
    }

    // --- Locking and line clears ---

    #[test]
    fn test_lock_writes_only_visible_cells() {
        let mut state = GameState::new(12345);
        state.start(0);
        // floor directly below, so the overhanging O locks at y = -1
        state.board.set(4, 1, Color::Blue);
        state.board.set(5, 1, Color::Blue);
        put_piece(&mut state, PieceKind::O, 4, -1);

        assert!(state.tick(1000));
        // only the bottom mask row was visible
        assert!(state.board().is_occupied(4, 0));
        assert!(state.board().is_occupied(5, 0));
        let placed = state.board().cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(placed, 4);
    }

    #[test]
    fn test_single_line_clear_updates_all_counters() {
        let mut state = GameState::new(12345);
        state.start(0);
        fill_row_except(&mut state, 19, &[4, 5]);
        put_piece(&mut state, PieceKind::O, 4, 17);

        assert!(state.hard_drop());

        // 40 x level plus one point for the single fallen row
        assert_eq!(state.score(), 41);
        assert_eq!(state.lines(), 1);
        assert_eq!(state.level(), 1);
        // the O's top half slid down into the bottom row
        assert_eq!(state.board().get(4, 19), Some(Some(Color::Yellow)));
        assert_eq!(state.board().get(5, 19), Some(Some(Color::Yellow)));
        let placed = state.board().cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(placed, 2);
    }

    #[test]
    fn test_double_clear_scores_100() {
        let mut state = GameState::new(12345);
        state.start(0);
        fill_row_except(&mut state, 18, &[4, 5]);
        fill_row_except(&mut state, 19, &[4, 5]);
        put_piece(&mut state, PieceKind::O, 4, 16);

        assert!(state.hard_drop());

        assert_eq!(state.score(), 100 + 2);
        assert_eq!(state.lines(), 2);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_quadruple_clear_scores_1200() {
        let mut state = GameState::new(12345);
        state.start(0);
        for y in 16..20 {
            fill_row_except(&mut state, y, &[4]);
        }
        // vertical I dropped into the single-column well
        put_piece(&mut state, PieceKind::I, 3, 2);
        assert!(state.try_rotate()); // mask column 2 -> board column 5
        assert!(state.try_move(-1, 0)); // board column 4

        assert!(state.hard_drop());

        assert_eq!(state.lines(), 4);
        // 1200 x level 1, plus 14 rows of drop (y 2 -> 16)
        assert_eq!(state.score(), 1200 + 14);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_level_up_crossing_ten_lines() {
        let mut state = GameState::new(12345);
        state.start(0);
        state.lines = 9;
        fill_row_except(&mut state, 19, &[4, 5]);
        put_piece(&mut state, PieceKind::O, 4, 17);

        assert!(state.hard_drop());

        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 2);
        assert_eq!(state.drop_interval_ms(), 900);
    }

    #[test]
    fn test_clear_preserves_survivor_rows() {
        let mut state = GameState::new(12345);
        state.start(0);
        // a marker two rows above the line being completed
        state.board.set(0, 17, Color::Cyan);
        state.board.set(0, 18, Color::Green);
        fill_row_except(&mut state, 19, &[4, 5]);
        put_piece(&mut state, PieceKind::O, 4, 17);

        assert!(state.hard_drop());

        // everything slid down one row, order intact
        assert_eq!(state.board().get(0, 18), Some(Some(Color::Cyan)));
        assert_eq!(state.board().get(0, 19), Some(Some(Color::Green)));
    }

    // --- Game over ---

    /// Stack the spawn area so the next promotion has no valid placement
    fn force_game_over(state: &mut GameState) {
        for y in 0..3 {
            for x in 2..8 {
                state.board.set(x, y, Color::Red);
            }
        }
        put_piece(state, PieceKind::O, 0, 18);
        state.hard_drop();
        assert!(state.game_over());
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut state = GameState::new(12345);
        state.start(0);
        force_game_over(&mut state);

        assert_eq!(state.phase(), GamePhase::GameOver);
        // the blocked piece stays visible for the renderer
        assert!(state.current().is_some());
    }

    #[test]
    fn test_game_over_rejects_all_piece_commands() {
        let mut state = GameState::new(12345);
        state.start(0);
        force_game_over(&mut state);
        let piece = state.current();
        let score = state.score();

        assert!(!state.try_move(-1, 0));
        assert!(!state.try_move(0, 1));
        assert!(!state.try_rotate());
        assert!(!state.hard_drop());
        assert!(!state.tick(1_000_000));
        assert_eq!(state.current(), piece);
        assert_eq!(state.score(), score);
        assert!(state.game_over());
    }

    // --- Commands and determinism ---

    #[test]
    fn test_apply_dispatches_commands() {
        let mut state = GameState::new(12345);
        assert!(state.apply(GameCommand::Start, 0));
        put_piece(&mut state, PieceKind::T, 4, 5);

        assert!(state.apply(GameCommand::MoveLeft, 0));
        assert_eq!(state.current().map(|p| p.x), Some(3));
        assert!(state.apply(GameCommand::MoveRight, 0));
        assert!(state.apply(GameCommand::SoftDrop, 0));
        assert_eq!(state.current().map(|p| p.y), Some(6));
        assert!(state.apply(GameCommand::Rotate, 0));
        assert!(state.apply(GameCommand::PauseToggle, 0));
        assert!(state.paused());
        assert!(state.apply(GameCommand::PauseToggle, 0));
        assert!(state.apply(GameCommand::HardDrop, 0));
        assert!(state.apply(GameCommand::Restart, 0));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_seeded_games_agree() {
        let mut a = GameState::new(7);
        let mut b = GameState::new(7);
        a.start(0);
        b.start(0);

        for _ in 0..5 {
            assert_eq!(
                a.current().map(|p| p.kind),
                b.current().map(|p| p.kind)
            );
            assert_eq!(a.next().map(|p| p.kind), b.next().map(|p| p.kind));
            a.hard_drop();
            b.hard_drop();
        }
        assert_eq!(a.score(), b.score());
    }
}
