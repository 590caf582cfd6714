//! # InputBox Component
//!
//! The single-line message field with its Send control.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter, unless the field is empty or a send is in flight
//! - Show `Send` / `Sending...` and the placeholder
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `submitting`, `placeholder`
//! and `dimmed` are props synced from the parent every frame.
//!
//! Submitting does not clear the buffer; the parent calls [`InputBox::clear`]
//! once the reply has arrived, so the text is still there if the send fails.

mod line;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use line::{
    CONTENT_OFFSET, column_at, flatten_newlines, inner_width, next_char_boundary,
    prev_char_boundary, visible_slice,
};

/// Rows taken by the input box: one line of text plus borders.
pub const INPUT_HEIGHT: u16 = 3;

pub const SEND_LABEL: &str = " Send ";
pub const SENDING_LABEL: &str = " Sending... ";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Shown while the buffer is empty (Prop)
    pub placeholder: String,
    /// A submission is in flight; Send is disabled (Prop)
    pub submitting: bool,
    /// Rendered dim when focus is on the message list (Prop)
    pub dimmed: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// First visible display column
    scroll: usize,
}

impl InputBox {
    pub fn new(placeholder: String) -> Self {
        Self {
            buffer: String::new(),
            placeholder,
            submitting: false,
            dimmed: false,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Reset the field (after a completed submission).
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Keep the cursor column inside the visible window.
    fn update_scroll(&mut self, width: usize) {
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let col = column_at(&self.buffer, self.cursor);
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + width {
            self.scroll = col + 1 - width;
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = usize::from(inner_width(area.width));
        self.update_scroll(width);

        let send_label = if self.submitting {
            Line::styled(SENDING_LABEL, Style::default().fg(Color::DarkGray))
        } else {
            Line::styled(
                SEND_LABEL,
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )
        };

        let mut border_style = Style::default();
        if self.dimmed {
            border_style = border_style.add_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title_top(Line::from(" Message "))
            .title_top(send_label.right_aligned());

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(visible_slice(&self.placeholder, 0, width))
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(visible_slice(&self.buffer, self.scroll, width))
        };

        frame.render_widget(paragraph.block(block), area);

        if !self.dimmed {
            let col = column_at(&self.buffer, self.cursor).saturating_sub(self.scroll);
            let x = area.x + CONTENT_OFFSET + u16::try_from(col).unwrap_or(u16::MAX);
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let c = if *c == '\n' { ' ' } else { *c };
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(&flatten_newlines(text));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.submitting || self.buffer.is_empty() {
                    None
                } else {
                    Some(InputEvent::Submit(self.buffer.clone()))
                }
            }
            _ => None,
        }
    }
}
