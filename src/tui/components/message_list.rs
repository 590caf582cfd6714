//! # MessageList Component
//!
//! Scrollable view of the chat history.
//!
//! ## Responsibilities
//!
//! - Display the list of messages
//! - Keep the view pinned to the bottom after every append
//! - Hit testing for mouse interactions
//! - Cache message heights between frames
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the messages (props).

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Blank rows below each bubble.
const MESSAGE_GAP: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, the offset is forced to the bottom on the next render
    pub stick_to_bottom: bool,
    /// Message under the mouse pointer
    pub hovered_index: Option<usize>,
    /// Message selected by keyboard navigation or click
    pub selected_index: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            hovered_index: None,
            selected_index: None,
            viewport_height: 0,
        }
    }

    /// Total height of all laid-out messages.
    pub fn content_height(&self) -> u16 {
        self.layout.prefix_heights.last().copied().unwrap_or(0)
    }

    /// The largest valid scroll offset: content height minus viewport height.
    pub fn max_scroll(&self) -> u16 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    /// Re-attach to the bottom. Called after every list mutation.
    pub fn pin_to_bottom(&mut self) {
        self.stick_to_bottom = true;
    }

    /// Whether there is content below the current viewport.
    pub fn has_unseen_content(&self) -> bool {
        self.scroll_state.offset().y < self.max_scroll()
    }

    fn set_offset_y(&mut self, y: u16) {
        let x = self.scroll_state.offset().x;
        self.scroll_state.set_offset(Position { x, y });
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        if self.scroll_state.offset().y > max_y {
            self.set_offset_y(max_y);
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_scroll();
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
            self.set_offset_y(max_y);
        }
    }

    /// Scroll the viewport so the selected message is fully visible.
    /// If the message is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.layout.prefix_heights.len() {
            return;
        }

        let item_top = if idx == 0 {
            0
        } else {
            self.layout.prefix_heights[idx - 1]
        };
        let item_bottom = self.layout.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.set_offset_y(item_top);
            self.stick_to_bottom = false;
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.set_offset_y(new_y);
            self.stick_to_bottom = new_y >= self.max_scroll();
        }
    }

    /// Move the selection one message up; starts from the last message.
    pub fn select_previous(&mut self, message_count: usize) {
        if message_count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => i.saturating_sub(1),
            None => message_count - 1,
        });
        self.scroll_to_selected();
    }

    /// Move the selection one message down, stopping at the last message.
    pub fn select_next(&mut self, message_count: usize) {
        if let Some(i) = self.selected_index
            && i + 1 < message_count
        {
            self.selected_index = Some(i + 1);
            self.scroll_to_selected();
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
    /// Ids whose copied indicator is currently on
    pub copied: &'a HashSet<&'a str>,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [ChatMessage],
        copied: &'a HashSet<&'a str>,
    ) -> Self {
        Self {
            state,
            messages,
            copied,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let num_items = self.messages.len();

        // 1. Update layout cache. Messages are immutable, so only new ones
        //    (or a width change) need measuring.
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(num_items, content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(message, content_width).saturating_add(MESSAGE_GAP));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(num_items, content_width);

        // 2. Scroll position: pinned to the bottom, or clamped to the content.
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            let max_y = self.state.max_scroll();
            self.state.set_offset_y(max_y);
        } else {
            self.state.clamp_scroll();
        }

        let total_height = self.state.content_height();
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            // Past u16::MAX rows the content height saturates; nothing below fits
            if y_offset >= total_height {
                break;
            }
            let message = &self.messages[i];
            let height = self.state.layout.heights[i];
            let bubble_height = height.saturating_sub(MESSAGE_GAP);
            let rect = Rect::new(0, y_offset, content_width, bubble_height);

            let widget = Message::new(
                message,
                self.state.hovered_index == Some(i),
                self.state.selected_index == Some(i),
                self.copied.contains(message.id.as_str()),
            );
            scroll_view.render_widget(widget, rect);

            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on `MessageListState` rather than `MessageList`: the list is
/// rebuilt every frame, the state persists across the event loop.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    /// Row height of each message, gap included
    pub heights: Vec<u16>,
    /// Running totals of `heights`
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Indices of messages intersecting the viewport, padded by half a
    /// viewport on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }

    /// Which message occupies content row `content_y`, if any.
    pub fn index_at(&self, content_y: u16) -> Option<usize> {
        let idx = self.prefix_heights.partition_point(|&end| end <= content_y);
        (idx < self.prefix_heights.len()).then_some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app_with_pairs;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &mut MessageListState, messages: &[ChatMessage], width: u16, height: u16) {
        let copied = HashSet::new();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(state, messages, &copied).render(f, f.area());
            })
            .unwrap();
    }

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 5];
        cache.update_metadata(5, 80);

        // Same everything → all reusable
        assert_eq!(cache.reusable_count(5, 80), 5);
        // New messages appended → existing heights still valid
        assert_eq!(cache.reusable_count(7, 80), 5);
        // Width changed → nothing reusable
        assert_eq!(cache.reusable_count(5, 40), 0);
        // Fewer messages than cached → list was replaced
        assert_eq!(cache.reusable_count(3, 80), 0);
    }

    #[test]
    fn test_prefix_heights_and_index_at() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3, 5, 2];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.prefix_heights, vec![3, 8, 10]);

        assert_eq!(cache.index_at(0), Some(0));
        assert_eq!(cache.index_at(2), Some(0));
        assert_eq!(cache.index_at(3), Some(1));
        assert_eq!(cache.index_at(9), Some(2));
        assert_eq!(cache.index_at(10), None);
    }

    #[test]
    fn test_visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 10];
        cache.rebuild_prefix_heights();
        let range = cache.visible_range(20, 8);
        assert!(range.start <= 5);
        assert!(range.end >= 7);
    }

    #[test]
    fn scroll_is_at_max_after_render_when_pinned() {
        let app = test_app_with_pairs(10);
        let mut state = MessageListState::new();
        render(&mut state, &app.messages, 60, 12);

        assert!(state.content_height() > 12);
        assert_eq!(state.scroll_state.offset().y, state.max_scroll());
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn very_long_history_renders_without_overflow() {
        // Well past u16::MAX rows of content at this width
        let app = test_app_with_pairs(8000);
        let mut state = MessageListState::new();
        render(&mut state, &app.messages, 60, 12);

        assert_eq!(state.content_height(), u16::MAX);
        assert_eq!(state.scroll_state.offset().y, state.max_scroll());
    }

    #[test]
    fn append_after_scrolling_up_repins_to_bottom() {
        let mut app = test_app_with_pairs(10);
        let mut state = MessageListState::new();
        render(&mut state, &app.messages, 60, 12);

        state.handle_event(&TuiEvent::ScrollPageUp);
        render(&mut state, &app.messages, 60, 12);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content());

        let more = test_app_with_pairs(1);
        app.messages.extend(more.messages);
        state.pin_to_bottom();
        render(&mut state, &app.messages, 60, 12);

        assert_eq!(state.scroll_state.offset().y, state.max_scroll());
    }

    #[test]
    fn scroll_up_detaches_and_scroll_down_repins() {
        let app = test_app_with_pairs(10);
        let mut state = MessageListState::new();
        render(&mut state, &app.messages, 60, 12);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
        assert_eq!(state.scroll_state.offset().y, state.max_scroll());
    }

    #[test]
    fn short_history_has_zero_max_scroll() {
        let app = test_app_with_pairs(1);
        let mut state = MessageListState::new();
        render(&mut state, &app.messages, 80, 40);
        assert_eq!(state.max_scroll(), 0);
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut state = MessageListState::new();
        state.select_previous(4);
        assert_eq!(state.selected_index, Some(3));
        state.select_next(4);
        assert_eq!(state.selected_index, Some(3));
        state.select_previous(4);
        state.select_previous(4);
        state.select_previous(4);
        state.select_previous(4);
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn select_previous_on_empty_list_does_nothing() {
        let mut state = MessageListState::new();
        state.select_previous(0);
        assert_eq!(state.selected_index, None);
    }
}
