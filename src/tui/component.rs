use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may hold internal
/// state, and render into a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so components can update caches (layout
/// heights) and presentation state (scroll offsets) during the render pass,
/// in line with ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Something that reacts to terminal input.
///
/// `InputBox` emits `InputEvent`s (submit, edit); `MessageListState` consumes
/// scroll events and emits nothing (`Event = ()`).
pub trait EventHandler {
    type Event;

    /// Returns `None` when the event was ignored or produced nothing to report.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
