//! # Chat Messages
//!
//! One `ChatMessage` per chat bubble. Messages are created in pairs
//! (user, then assistant) and never change after they are pushed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
}

impl ChatMessage {
    pub fn user(id: String, text: String) -> Self {
        Self {
            id,
            text,
            is_user: true,
        }
    }

    pub fn assistant(id: String, text: String) -> Self {
        Self {
            id,
            text,
            is_user: false,
        }
    }
}

/// Issues message ids from the wall-clock millisecond timestamp.
///
/// The assistant id of a pair is the user id + 1. Ids never repeat: if the
/// clock hasn't moved past the last issued id, the next one is bumped past it.
#[derive(Debug, Default)]
pub struct MessageIds {
    last: Option<i64>,
}

impl MessageIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(user_id, assistant_id)` for the next pair.
    pub fn next_pair(&mut self) -> (String, String) {
        self.next_pair_at(Utc::now().timestamp_millis())
    }

    pub fn next_pair_at(&mut self, now_ms: i64) -> (String, String) {
        let user = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        let assistant = user + 1;
        self.last = Some(assistant);
        (user.to_string(), assistant.to_string())
    }
}
