pub mod handler;
pub mod provider;
pub mod providers;
pub mod types;

pub use handler::handle_submission;
pub use provider::{Responder, ResponderError};
pub use providers::EchoResponder;
pub use types::{SubmitForm, SubmitResponse};
