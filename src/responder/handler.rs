//! # Submission Handler
//!
//! Takes a submitted form, asks the [`Responder`] for a reply, and returns
//! both texts. A missing or empty `message` field is rejected before the
//! responder is called.

use log::debug;

use super::provider::{Responder, ResponderError};
use super::types::{SubmitForm, SubmitResponse};

pub async fn handle_submission(
    responder: &dyn Responder,
    form: &SubmitForm,
) -> Result<SubmitResponse, ResponderError> {
    let message = match form.message.as_deref() {
        Some(m) if !m.is_empty() => m,
        _ => return Err(ResponderError::MissingMessage),
    };

    debug!(
        "Handling submission via {} (len={})",
        responder.name(),
        message.len()
    );
    let ai_response = responder.generate_reply(message).await?;

    Ok(SubmitResponse {
        user_message: message.to_string(),
        ai_response,
    })
}
