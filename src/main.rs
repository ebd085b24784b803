mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_shooter::compute::{frame, init_round, restart};
use arcade_shooter::entities::{GameEvent, InputState, RoundState};
use arcade_shooter::particles::ParticleSystem;
use arcade_shooter::textures::TextureSet;
use arcade_shooter::GameConfig;

#[derive(Parser, Debug)]
#[command(about = "Terminal arcade shooter: dodge the descending enemies, shoot them for points", version)]
struct Args {
    /// JSON file overriding any of the game constants.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy placement and explosions (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
    /// Where log output goes; the terminal itself is busy drawing the game.
    #[arg(long, default_value = "arcade_shooter.log")]
    log_file: PathBuf,
}

// ── Held-key sampling ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// at 60 FPS a window of 8 frames (≈128 ms) is refreshed by the OS key-repeat
/// before it expires.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn sample_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame));
    InputState {
        left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        fire: any(&[KeyCode::Char(' ')]),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs rounds until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and each frame the still-fresh keys are
/// sampled into an `InputState`.  This allows Space + A/D to be held at the
/// same time with no interference.  A left click (or R) after a game over
/// starts a new round.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut RoundState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<()> {
    let textures = TextureSet::generate();
    let mut particles = ParticleSystem::new(&state.config);
    let frame_len = Duration::from_millis(state.config.frame_ms);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame_no: u64 = 0;
    let clock = Instant::now();
    let mut last_ms = 0.0_f64;

    loop {
        let frame_start = Instant::now();
        frame_no += 1;
        let mut restart_requested = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame_no);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => restart_requested = true,
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame_no);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    ..
                }) => restart_requested = true,
                _ => {}
            }
        }

        // The pointer handler only exists while the round is over
        if restart_requested && state.is_game_over() {
            restart(state);
            particles.clear();
        }

        let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
        let input = sample_input(&key_frame, frame_no);
        frame(state, &input, now_ms, rng);

        for event in state.drain_events() {
            match event {
                GameEvent::Explosion { x, y } => particles.emit_at(x, y, rng),
                GameEvent::GameOver { score } => log::info!("Final score {}", score),
                other => log::trace!("{:?}", other),
            }
        }
        particles.update((now_ms - last_ms) as f32);
        last_ms = now_ms;

        display::render(out, state, &textures, &particles)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            std::thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    let config = load_config(args.config.as_deref())?;

    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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

    log::info!("Arcade shooter starting");
    let mut state = init_round(config);
    let result = game_loop(&mut out, &mut state, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Arcade shooter exiting with score {}", state.score);
    result
}
