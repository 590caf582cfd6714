//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: header line with title, status and "↓ New"
//! - `Message`: a single chat bubble
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line message field with the Send control
//! - `MessageList`: scrollable history with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props (struct fields), never by
//! reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TitleBar::new(app.title.clone(), app.status_message.clone(), unseen).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! title_bar.render(frame, area); // reads from App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Header line)
//! ├── message.rs       (Single bubble renderer)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Message field + Send)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
