//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clipboard::{ClipboardError, ClipboardWriter};
use crate::responder::{EchoResponder, Responder, ResponderError};

/// A responder whose backend always fails.
pub struct FailingResponder;

#[async_trait]
impl Responder for FailingResponder {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate_reply(&self, _text: &str) -> Result<String, ResponderError> {
        Err(ResponderError::Backend("backend offline".to_string()))
    }
}

/// A clipboard that remembers every write.
#[derive(Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes
            .lock()
            .map_err(|_| ClipboardError::Write("poisoned".to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

/// A clipboard that refuses every write.
pub struct BrokenClipboard;

impl ClipboardWriter for BrokenClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".to_string()))
    }
}

/// Creates a test App with an instant `EchoResponder`.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(EchoResponder::new()))
}

/// Creates a test App with `count` user/assistant pairs already appended.
pub fn test_app_with_pairs(count: usize) -> crate::core::state::App {
    use crate::core::action::{Action, update};
    use crate::responder::SubmitResponse;

    let mut app = test_app();
    for i in 0..count {
        let text = format!("message {i}");
        update(&mut app, Action::Submit(text.clone()));
        update(
            &mut app,
            Action::ReplyReceived(SubmitResponse {
                ai_response: EchoResponder::reply_for(&text),
                user_message: text,
            }),
        );
    }
    app
}
