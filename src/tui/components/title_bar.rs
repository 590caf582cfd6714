//! # TitleBar Component
//!
//! Top header line: the chat title, the current status, and a "↓ New"
//! indicator when there is content below the scroll position.
//!
//! Stateless: all three values are props. The title comes from config,
//! the status from core `App`, and the indicator from the message list's
//! scroll state.
//!
//! The text degrades in this order:
//!
//! 1. **Unseen content**: `"AI Chatbot | Sending... | ↓ New"`
//! 2. **Status message**: `"AI Chatbot | Sending..."`
//! 3. **Default**: `"AI Chatbot"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub title: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(title: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            title,
            status_message,
            has_unseen_content,
        }
    }

    fn suffix(&self) -> String {
        match (self.status_message.is_empty(), self.has_unseen_content) {
            (true, false) => String::new(),
            (true, true) => " | ↓ New".to_string(),
            (false, false) => format!(" | {}", self.status_message),
            (false, true) => format!(" | {} | ↓ New", self.status_message),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                self.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.suffix()),
        ]);
        frame.render_widget(line, area);
    }
}
