//! Terminal Bitris runner (default binary).
//!
//! Reads settings from the environment, then runs the game loop: render,
//! poll input until the next gravity step, tick. After a game over the final
//! field stays on screen until the player quits.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use tui_bitris::core::{Game, Snapshot};
use tui_bitris::input::handle_key_event;
use tui_bitris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_bitris::types::{GameConfig, Intent};

/// Input poll interval once gravity has stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting game");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();

    let snap = result?;
    println!("{}", snap.composite()?);
    println!(
        "score {} lines {} level {} (seed {})",
        snap.score, snap.lines, snap.level, snap.seed
    );
    Ok(())
}

/// Logs go to a file only; stdout belongs to the game screen.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("opening log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, seed: u32) -> Result<Snapshot> {
    let mut game = Game::new(seed);
    let view = GameView::from_config(config);
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let mut gravity = Duration::from_millis(u64::from(game.speed_ms()));

    while !game.quit_requested() {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next gravity step.
        let timeout = if game.game_over() {
            IDLE_POLL
        } else {
            gravity.saturating_sub(last_tick.elapsed())
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(intent) = handle_key_event(key) {
                        game.apply_intent(intent);
                        if intent == Intent::Quit {
                            continue;
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        if !game.game_over() && last_tick.elapsed() >= gravity {
            last_tick = Instant::now();
            game.tick()?;
            // Level may have changed on lock.
            gravity = Duration::from_millis(u64::from(game.speed_ms()));
        }
    }

    Ok(game.snapshot())
}
