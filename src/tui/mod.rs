//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into `core::Action` values, and
//! performs the I/O that `update()` asks for through `Effect`s.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! Two things run off the event loop, and both report back as `Action`s
//! over an `mpsc` channel drained once per iteration:
//!
//! - the submission round-trip (`spawn_submission`, a tokio task)
//! - clipboard writes (`spawn_copy`, a blocking task)
//!
//! ## Redraw Strategy
//!
//! - **Submitting**: polls every ~80ms so the reply shows up promptly.
//! - **Idle**: sleeps up to 500ms, or until the next copied indicator
//!   expires, whichever is sooner. Only redraws on events or state changes.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::responder::{EchoResponder, Responder, SubmitForm, handle_submission};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const SUBMITTING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate messages with arrow keys; `y`/`c` copy. Typing switches to Input.
    Cursor,
    /// Text editing in the input box. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
}

impl TuiState {
    pub fn new(placeholder: String) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(placeholder),
            input_mode: InputMode::Input, // User expects to type immediately
        }
    }
}

/// What the event loop should do after handling one terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Continue,
    /// Feed this action to `update()`.
    Action(Action),
    Quit,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the reply backend from config.
pub fn build_responder(config: &ResolvedConfig) -> Arc<dyn Responder> {
    Arc::new(EchoResponder::with_delay(Duration::from_millis(
        config.reply_delay_ms,
    )))
}

/// Route one terminal event, given the current mode and state.
///
/// Purely presentational changes (editing, scrolling, selection) are applied
/// to `tui` directly; anything that touches `App` comes back as an `Action`.
pub fn dispatch_event(
    event: TuiEvent,
    app: &App,
    tui: &mut TuiState,
    frame_area: ratatui::layout::Rect,
) -> Dispatch {
    match event {
        TuiEvent::Resize => return Dispatch::Continue,
        TuiEvent::ForceQuit => return Dispatch::Quit,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            return Dispatch::Continue;
        }
        TuiEvent::MouseMove(_col, row) => {
            tui.message_list.hovered_index = ui::hit_test_message(
                row,
                frame_area,
                tui.message_list.scroll_state.offset().y,
                &tui.message_list.layout,
            );
            return Dispatch::Continue;
        }
        TuiEvent::MouseClick(_col, row) => {
            let hit = ui::hit_test_message(
                row,
                frame_area,
                tui.message_list.scroll_state.offset().y,
                &tui.message_list.layout,
            );
            if let Some(idx) = hit {
                tui.message_list.selected_index = Some(idx);
                if let Some(message) = app.messages.get(idx)
                    && !message.is_user
                {
                    return Dispatch::Action(Action::Copy {
                        id: message.id.clone(),
                    });
                }
            }
            return Dispatch::Continue;
        }
        _ => {}
    }

    match tui.input_mode {
        InputMode::Input => match event {
            TuiEvent::Escape => {
                tui.input_mode = InputMode::Cursor;
                tui.message_list.selected_index = app.messages.len().checked_sub(1);
                Dispatch::Continue
            }
            // Single-line field: Up/Down scroll the history
            TuiEvent::CursorUp => {
                tui.message_list.handle_event(&TuiEvent::ScrollUp);
                Dispatch::Continue
            }
            TuiEvent::CursorDown => {
                tui.message_list.handle_event(&TuiEvent::ScrollDown);
                Dispatch::Continue
            }
            _ => match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => Dispatch::Action(Action::Submit(text)),
                Some(InputEvent::ContentChanged) | None => Dispatch::Continue,
            },
        },
        InputMode::Cursor => match event {
            TuiEvent::Escape => Dispatch::Continue,
            TuiEvent::InputChar('q') => Dispatch::Quit,
            TuiEvent::InputChar('y') | TuiEvent::InputChar('c') => {
                match tui
                    .message_list
                    .selected_index
                    .and_then(|i| app.messages.get(i))
                {
                    Some(message) => Dispatch::Action(Action::Copy {
                        id: message.id.clone(),
                    }),
                    None => Dispatch::Continue,
                }
            }
            TuiEvent::CursorUp => {
                tui.message_list.select_previous(app.messages.len());
                Dispatch::Continue
            }
            TuiEvent::CursorDown => {
                tui.message_list.select_next(app.messages.len());
                Dispatch::Continue
            }
            TuiEvent::Submit => {
                tui.input_mode = InputMode::Input;
                tui.message_list.selected_index = None;
                Dispatch::Continue
            }
            // Typing auto-switches to Input mode and forwards the event
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                tui.input_mode = InputMode::Input;
                tui.message_list.selected_index = None;
                tui.input_box.handle_event(&event);
                Dispatch::Continue
            }
            _ => Dispatch::Continue,
        },
    }
}

/// Perform the I/O an `Effect` asks for. Returns `true` on `Effect::Quit`.
pub fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    clipboard: &Arc<dyn ClipboardWriter>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None | Effect::Redraw => {}
        Effect::SpawnSubmission(form) => {
            spawn_submission(app.responder.clone(), form, tx.clone());
        }
        Effect::WriteClipboard { id, text } => {
            spawn_copy(clipboard.clone(), id, text, tx.clone());
        }
        Effect::MessagesAppended => {
            tui.input_box.clear();
            tui.message_list.pin_to_bottom();
        }
        Effect::Quit => return true,
    }
    false
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let responder = build_responder(&config);
    let clipboard: Arc<dyn ClipboardWriter> = Arc::new(SystemClipboard::new());
    let mut app = App::from_config(responder, &config);
    let mut tui = TuiState::new(config.placeholder.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync InputBox props with App/TUI state
        tui.input_box.submitting = app.is_submitting;
        tui.input_box.dimmed = matches!(tui.input_mode, InputMode::Cursor);

        if update(&mut app, Action::Tick(Instant::now())) == Effect::Redraw {
            needs_redraw = true;
        }

        if needs_redraw {
            let now = Instant::now();
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;
            needs_redraw = false;
        }

        let timeout = poll_timeout(&app, Instant::now());
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        let size = terminal.size()?;
        let frame_area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match dispatch_event(event, &app, &mut tui, frame_area) {
                Dispatch::Continue => {}
                Dispatch::Quit => should_quit = true,
                Dispatch::Action(action) => {
                    debug!("Dispatching {:?}", action);
                    let effect = update(&mut app, action);
                    should_quit |= apply_effect(effect, &app, &mut tui, &clipboard, &tx);
                }
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (replies, clipboard results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tui, &clipboard, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down ({} messages)", app.messages.len());
    ratatui::restore();
    Ok(())
}

/// How long to wait for terminal input before looping again.
fn poll_timeout(app: &App, now: Instant) -> Duration {
    let base = if app.is_submitting {
        SUBMITTING_POLL
    } else {
        IDLE_POLL
    };
    match app.next_copied_deadline() {
        Some(deadline) => base.min(deadline.saturating_duration_since(now)),
        None => base,
    }
}

fn spawn_submission(responder: Arc<dyn Responder>, form: SubmitForm, tx: mpsc::Sender<Action>) {
    info!("Spawning submission via {}", responder.name());
    tokio::spawn(async move {
        let action = match handle_submission(responder.as_ref(), &form).await {
            Ok(response) => Action::ReplyReceived(response),
            Err(e) => Action::ReplyFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver submission result: receiver dropped");
        }
    });
}

fn spawn_copy(
    clipboard: Arc<dyn ClipboardWriter>,
    id: String,
    text: String,
    tx: mpsc::Sender<Action>,
) {
    debug!("Spawning clipboard write for message {}", id);
    tokio::task::spawn_blocking(move || {
        let action = match clipboard.write_text(&text) {
            Ok(()) => Action::CopySucceeded {
                id,
                at: Instant::now(),
            },
            Err(e) => Action::CopyFailed {
                id,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver clipboard result: receiver dropped");
        }
    });
}
