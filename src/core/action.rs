//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The reply arrives? That's `Action::ReplyReceived(response)`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Instant;

use log::{debug, error, info, warn};

use crate::core::message::ChatMessage;
use crate::core::state::App;
use crate::responder::{SubmitForm, SubmitResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user submitted the input field.
    Submit(String),
    /// The submission round-trip finished.
    ReplyReceived(SubmitResponse),
    /// The submission round-trip failed.
    ReplyFailed(String),
    /// The user asked to copy a message.
    Copy { id: String },
    /// The clipboard write for `id` finished at `at`.
    CopySucceeded { id: String, at: Instant },
    CopyFailed { id: String, error: String },
    /// Periodic clock update; expires copied indicators.
    Tick(Instant),
    Quit,
}

/// I/O the adapter should perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start the submission round-trip.
    SpawnSubmission(SubmitForm),
    /// Write `text` to the clipboard on behalf of message `id`.
    WriteClipboard { id: String, text: String },
    /// A user/assistant pair was appended: reset the input, scroll to bottom.
    MessagesAppended,
    /// State changed without new messages; redraw.
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if app.is_submitting {
                debug!("Submit ignored: a submission is already in flight");
                return Effect::None;
            }
            if text.is_empty() {
                debug!("Submit ignored: message is empty");
                return Effect::None;
            }
            app.is_submitting = true;
            app.status_message = String::from("Sending...");
            Effect::SpawnSubmission(SubmitForm::new(text))
        }
        Action::ReplyReceived(response) => {
            app.is_submitting = false;
            app.status_message.clear();

            let (user_id, assistant_id) = app.ids.next_pair();
            app.messages
                .push(ChatMessage::user(user_id, response.user_message));
            app.messages
                .push(ChatMessage::assistant(assistant_id, response.ai_response));
            info!("Appended message pair (total={})", app.messages.len());
            Effect::MessagesAppended
        }
        Action::ReplyFailed(err) => {
            warn!("Submission failed: {err}");
            app.is_submitting = false;
            app.status_message = format!("Send failed: {err}");
            Effect::Redraw
        }
        Action::Copy { id } => match app.find_message(&id) {
            Some(message) if !message.is_user => Effect::WriteClipboard {
                id,
                text: message.text.clone(),
            },
            Some(_) => {
                debug!("Copy ignored: message {id} is a user message");
                Effect::None
            }
            None => {
                debug!("Copy ignored: no message with id {id}");
                Effect::None
            }
        },
        Action::CopySucceeded { id, at } => {
            debug!("Copied message {id}");
            let deadline = at + app.copied_duration;
            app.copied.insert(id, deadline);
            Effect::Redraw
        }
        Action::CopyFailed { id, error } => {
            error!("Failed to copy: {error} (message {id})");
            Effect::None
        }
        Action::Tick(now) => {
            let before = app.copied.len();
            app.copied.retain(|_, deadline| now < *deadline);
            if app.copied.len() != before {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}
