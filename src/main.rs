mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use skyfall::config::{Args, GameConfig};
use skyfall::input::Key;
use skyfall::session::Session;

use display::Screen;

// ── Logging ───────────────────────────────────────────────────────────────────

/// stderr is the game screen, so logs only go to an explicit file.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Runs until the player quits.  Every frame: drain pending key events
/// (non-blocking), let the session run its timers and one simulation step,
/// then redraw and sleep out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session<StdRng>,
    screen: &Screen,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    started: Instant,
) -> std::io::Result<()> {
    loop {
        let frame_start = Instant::now();

        loop {
            let ev = match rx.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            };
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                return Ok(());
            }
            let Some(key) = Key::from_code(code) else {
                continue;
            };
            let now = started.elapsed();
            match kind {
                KeyEventKind::Press => session.key_down(key, now),
                KeyEventKind::Repeat => session.key_repeat(key, now),
                KeyEventKind::Release => session.key_up(key),
            }
        }

        session.advance(started.elapsed());
        display::render(out, screen, session.state())?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = GameConfig::from(Args::parse());
    init_logging(config.log_file.as_deref())?;

    let seed = config.seed.unwrap_or_else(|| rand::random());
    log::info!("seed {}", seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back to
    // hold-window expiry.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        log::warn!("terminal does not report key releases; using hold-window expiry");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &config, &rx, seed, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    seed: u64,
    keyboard_enhanced: bool,
) -> anyhow::Result<()> {
    // The canvas is measured once; later resizes are ignored.
    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let screen = Screen {
        cols,
        rows,
        cell_width: config.cell_width,
        cell_height: config.cell_height,
    };
    let (width, height) = config.canvas_size(cols, rows);

    let started = Instant::now();
    let mut session = Session::new(
        width,
        height,
        keyboard_enhanced,
        StdRng::seed_from_u64(seed),
        started.elapsed(),
    );
    game_loop(out, &mut session, &screen, config, rx, started)?;

    log::info!("quit with score {}", session.state().score);
    Ok(())
}
