use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while producing a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    /// The submitted form had no `message` field, or it was empty.
    MissingMessage,
    /// The reply backend failed to produce text.
    Backend(String),
}

impl fmt::Display for ResponderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponderError::MissingMessage => write!(f, "message is required"),
            ResponderError::Backend(msg) => write!(f, "responder error: {msg}"),
        }
    }
}

impl std::error::Error for ResponderError {}

/// Turns a user's message into the assistant's reply.
///
/// This is the only seam between the chat view and whatever generates
/// replies. Swapping in a real model means implementing this trait.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Returns the name of the responder.
    fn name(&self) -> &str;

    /// Produces the reply text for `text`.
    async fn generate_reply(&self, text: &str) -> Result<String, ResponderError>;
}
