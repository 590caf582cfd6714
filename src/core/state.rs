//! # Application State
//!
//! Core business state for the chat. No TUI types live here; presentation
//! state (scroll, input buffer, selection) is in the `tui` module.
//!
//! ```text
//! App
//! ├── responder: Arc<dyn Responder>    // reply backend
//! ├── messages: Vec<ChatMessage>       // append-only history
//! ├── ids: MessageIds                  // id generator
//! ├── copied: HashMap<id, Instant>     // copied-indicator deadlines
//! ├── copied_duration: Duration        // how long an indicator stays on
//! ├── is_submitting: bool              // idle → submitting → idle
//! ├── title: String                    // header text
//! └── status_message: String           // status text next to the title
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::config::ResolvedConfig;
use crate::core::message::{ChatMessage, MessageIds};
use crate::responder::Responder;

pub const DEFAULT_TITLE: &str = "AI Chatbot";
pub const DEFAULT_COPIED_DURATION: Duration = Duration::from_millis(2000);

pub struct App {
    pub responder: Arc<dyn Responder>,
    pub messages: Vec<ChatMessage>,
    pub ids: MessageIds,
    /// Message id → instant at which its copied indicator turns off.
    pub copied: HashMap<String, Instant>,
    pub copied_duration: Duration,
    pub is_submitting: bool,
    pub title: String,
    pub status_message: String,
}

impl App {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self {
            responder,
            messages: Vec::new(),
            ids: MessageIds::new(),
            copied: HashMap::new(),
            copied_duration: DEFAULT_COPIED_DURATION,
            is_submitting: false,
            title: DEFAULT_TITLE.to_string(),
            status_message: String::new(),
        }
    }

    pub fn from_config(responder: Arc<dyn Responder>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(responder);
        app.title = config.title.clone();
        app.copied_duration = Duration::from_millis(config.copied_indicator_ms);
        app
    }

    /// Whether the copied indicator of `id` is on at `now`.
    pub fn is_copied(&self, id: &str, now: Instant) -> bool {
        self.copied.get(id).is_some_and(|deadline| now < *deadline)
    }

    /// Ids whose copied indicator is on at `now`.
    pub fn copied_ids(&self, now: Instant) -> HashSet<&str> {
        self.copied
            .iter()
            .filter(|(_, deadline)| now < **deadline)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// The earliest pending indicator deadline, if any.
    pub fn next_copied_deadline(&self) -> Option<Instant> {
        self.copied.values().min().copied()
    }

    pub fn find_message(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }
}
