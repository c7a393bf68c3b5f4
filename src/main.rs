use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};

use star_ship::compute::{tick, Flow};
use star_ship::display::{self, Viewport};
use star_ship::entities::{InputEvent, Key};
use star_ship::settings::Settings;
use star_ship::state::init_state;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A movement key counts as held if its last press/repeat event arrived within
/// this window.  Only used on terminals that never report releases; the
/// OS key-repeat rate (≥ 15 Hz) refreshes it well before it expires.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Enter => Some(Key::Start),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Turns raw terminal events into the game's discrete input events.
///
/// Left/right become key-down/key-up pairs.  Terminals with keyboard
/// enhancement report real releases; on classic terminals a key is released
/// once its repeats stop arriving for `HOLD_WINDOW`.
struct InputTranslator {
    held: HashMap<Key, Instant>,
    reports_release: bool,
}

impl InputTranslator {
    fn new(reports_release: bool) -> Self {
        Self { held: HashMap::new(), reports_release }
    }

    fn translate(&mut self, ev: Event, view: &Viewport, out: &mut Vec<InputEvent>) {
        match ev {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                let Some(key) = map_key(code, modifiers) else { return };
                let movement = matches!(key, Key::Left | Key::Right);
                match kind {
                    KeyEventKind::Press if movement => {
                        if self.held.insert(key, Instant::now()).is_none() {
                            out.push(InputEvent::KeyDown(key));
                        }
                    }
                    KeyEventKind::Press => out.push(InputEvent::KeyDown(key)),
                    KeyEventKind::Repeat if movement => {
                        self.held.insert(key, Instant::now());
                    }
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => {
                        if self.held.remove(&key).is_some() {
                            out.push(InputEvent::KeyUp(key));
                        }
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if let Some((x, y)) = view.cell_to_world(column, row) {
                    out.push(InputEvent::Click { x, y });
                }
            }
            _ => {}
        }
    }

    /// Release keys whose repeats have gone quiet.
    fn expire(&mut self, now: Instant, out: &mut Vec<InputEvent>) {
        if self.reports_release {
            return;
        }
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, last)| now.duration_since(**last) > HOLD_WINDOW)
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            self.held.remove(&key);
            out.push(InputEvent::KeyUp(key));
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    settings: Settings,
    rx: &mpsc::Receiver<Event>,
    reports_release: bool,
) -> std::io::Result<()> {
    let frame = settings.frame_duration();
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, settings.screen_width, settings.screen_height);
    let mut state = init_state(settings);
    let mut input = InputTranslator::new(reports_release);
    let mut events = Vec::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        events.clear();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                view.cols = cols;
                view.rows = rows;
                continue;
            }
            input.translate(ev, &view, &mut events);
        }
        input.expire(frame_start, &mut events);

        let (next, flow) = tick(&state, &events);
        state = next;
        if flow == Flow::Quit {
            info!("quit at frame {} (high score {})", state.frame, state.stats.high_score);
            return Ok(());
        }

        display::render(out, &state, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).map_err(std::io::Error::other)?,
        None => Settings::default(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release events; terminals without the kitty protocol
    // fall back to the hold-window heuristic.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases, using hold window");
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

    let result = game_loop(&mut out, settings, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
