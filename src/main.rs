//! Blockfall terminal runner (default binary).
//!
//! Wires the deterministic engine to crossterm input and the framebuffer
//! renderer. The engine never reads the clock itself; this loop feeds it
//! millisecond timestamps taken from a single `Instant` anchor.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameCommand, GamePhase, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1);
    let mut game = GameState::new(seed);

    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let poll_timeout = Duration::from_millis(TICK_MS);

    loop {
        // Render the current state.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        if allowed(game.phase(), command) {
                            game.apply(command, now_ms(clock));
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity; the engine decides from the timestamp whether anything
        // is due yet.
        game.tick(now_ms(clock));
    }
}

fn now_ms(clock: Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

/// Phase gating at the driver level: while paused only the pause key acts,
/// and outside a round only start/restart do. The engine enforces its own
/// contract on top of this, so the filter is about player-facing behavior,
/// not safety.
fn allowed(phase: GamePhase, command: GameCommand) -> bool {
    match phase {
        GamePhase::Running => true,
        GamePhase::Paused => command == GameCommand::PauseToggle,
        GamePhase::Ready | GamePhase::GameOver => {
            matches!(command, GameCommand::Start | GameCommand::Restart)
        }
    }
}
