//! Chatbot library exports for testing

pub mod clipboard;
pub mod core;
pub mod responder;
pub mod tui;

#[cfg(test)]
pub mod test_support;
