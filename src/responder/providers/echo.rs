use std::time::Duration;

use async_trait::async_trait;

use crate::responder::provider::{Responder, ResponderError};

/// Placeholder responder that echoes the user's text back in a fixed template.
pub struct EchoResponder {
    /// Simulated round-trip latency before the reply is returned.
    delay: Duration,
}

impl Default for EchoResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoResponder {
    pub fn new() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// The reply template.
    pub fn reply_for(text: &str) -> String {
        format!("You said: \"{text}\". As an AI, I'm here to help!")
    }
}

#[async_trait]
impl Responder for EchoResponder {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate_reply(&self, text: &str) -> Result<String, ResponderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::reply_for(text))
    }
}
