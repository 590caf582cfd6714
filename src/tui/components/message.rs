use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::message::ChatMessage;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// A bubble never takes more than this share of the row.
const BUBBLE_MAX_PERCENT: u32 = 70;
/// Narrowest bubble: room for the title and the copy label.
const MIN_BUBBLE_WIDTH: u16 = 16;

pub const COPY_LABEL: &str = " copy ";
pub const COPIED_LABEL: &str = " ✓ copied ";

/// A stateless component that renders one chat bubble.
///
/// User bubbles are right-aligned, assistant bubbles left-aligned, and both
/// shrink to fit short text. Assistant bubbles carry a copy label in the
/// bottom border that flips to "✓ copied" while the copied indicator is on.
///
/// Like the rest of the list, `Message` is created fresh each frame;
/// hover/selection/copied flags are passed in by `MessageList`.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub is_hovered: bool,
    pub is_selected: bool,
    pub is_copied: bool,
}

impl<'a> Message<'a> {
    pub fn new(
        message: &'a ChatMessage,
        is_hovered: bool,
        is_selected: bool,
        is_copied: bool,
    ) -> Self {
        Self {
            message,
            is_hovered,
            is_selected,
            is_copied,
        }
    }

    /// Width of the bubble for `message` in a row `row_width` wide.
    pub fn bubble_width(message: &ChatMessage, row_width: u16) -> u16 {
        let max = (u32::from(row_width) * BUBBLE_MAX_PERCENT / 100) as u16;
        let max = max.max(MIN_BUBBLE_WIDTH).min(row_width);

        let text_width = message
            .text
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let wanted = u16::try_from(text_width)
            .unwrap_or(u16::MAX)
            .saturating_add(HORIZONTAL_OVERHEAD)
            .max(MIN_BUBBLE_WIDTH);

        wanted.min(max)
    }

    /// Calculate the height required for this message in a row `row_width` wide.
    ///
    /// Uses `textwrap` with options matching ratatui's `Paragraph` wrapping so
    /// the list can lay out the scroll view without rendering first.
    pub fn calculate_height(message: &ChatMessage, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(message, row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = message.text.as_str();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    /// Screen rect of the bubble inside a row rect.
    pub fn bubble_rect(message: &ChatMessage, row: Rect) -> Rect {
        let width = Self::bubble_width(message, row.width);
        let x = if message.is_user {
            row.x + row.width.saturating_sub(width)
        } else {
            row.x
        };
        Rect::new(x, row.y, width, row.height)
    }
}

fn source_style(message: &ChatMessage) -> Style {
    if message.is_user {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Green)
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let bubble = Self::bubble_rect(self.message, area);
        let style = source_style(self.message);

        // Selection overrides hover: yellow border for selected, bright for hover, dim otherwise
        let border_style = if self.is_selected {
            Style::default().fg(Color::Yellow)
        } else if self.is_hovered {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        block = if self.message.is_user {
            block.title_top(Line::from("you 👤").right_aligned())
        } else {
            let label = if self.is_copied {
                Line::styled(
                    COPIED_LABEL,
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )
            } else {
                Line::styled(COPY_LABEL, Style::default().fg(Color::DarkGray))
            };
            block
                .title_top(Line::from("🤖 assistant"))
                .title_bottom(label.right_aligned())
        };

        let inner_area = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(self.message.text.as_str())
            .style(style)
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn user(text: &str) -> ChatMessage {
        ChatMessage::user("1".to_string(), text.to_string())
    }

    fn assistant(text: &str) -> ChatMessage {
        ChatMessage::assistant("2".to_string(), text.to_string())
    }

    fn render_to_text(message: &ChatMessage, is_copied: bool, width: u16) -> String {
        let height = Message::calculate_height(message, width);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let mut component = Message::new(message, false, false, is_copied);
                Component::render(&mut component, f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ==========================================================================
    // bubble_width
    // ==========================================================================

    #[test]
    fn short_text_gets_minimum_width() {
        assert_eq!(Message::bubble_width(&user("hi"), 80), MIN_BUBBLE_WIDTH);
    }

    #[test]
    fn long_text_is_capped_at_seventy_percent() {
        let msg = user(&"a".repeat(200));
        assert_eq!(Message::bubble_width(&msg, 100), 70);
    }

    #[test]
    fn medium_text_fits_exactly() {
        let msg = user(&"a".repeat(30));
        assert_eq!(Message::bubble_width(&msg, 100), 30 + HORIZONTAL_OVERHEAD);
    }

    #[test]
    fn narrow_row_never_exceeds_row_width() {
        assert_eq!(Message::bubble_width(&user("hello"), 10), 10);
    }

    // ==========================================================================
    // calculate_height
    // ==========================================================================

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        assert_eq!(Message::calculate_height(&user(""), 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_whitespace_only_takes_a_line() {
        assert_eq!(Message::calculate_height(&user("   "), 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_width_equals_overhead_returns_minimum() {
        assert_eq!(Message::calculate_height(&user("Hello world"), HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        assert_eq!(Message::calculate_height(&user("Hello"), 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_saturates_on_huge_text() {
        let msg = user(&"a\n".repeat(70_000));
        assert_eq!(Message::calculate_height(&msg, 80), u16::MAX);
    }

    #[test]
    fn calculate_height_wraps_inside_bubble() {
        // 100 chars in a 100-wide row: bubble is 70 wide, 66 inner → 2 lines
        let msg = user(&"word ".repeat(20));
        assert_eq!(Message::calculate_height(&msg, 100), 2 + VERTICAL_OVERHEAD);
    }

    // ==========================================================================
    // Placement and labels
    // ==========================================================================

    #[test]
    fn user_bubble_is_right_aligned() {
        let row = Rect::new(0, 0, 80, 3);
        let rect = Message::bubble_rect(&user("hi"), row);
        assert_eq!(rect.x + rect.width, 80);
    }

    #[test]
    fn assistant_bubble_is_left_aligned() {
        let row = Rect::new(0, 0, 80, 3);
        let rect = Message::bubble_rect(&assistant("hi"), row);
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn assistant_shows_copy_label() {
        let text = render_to_text(&assistant("hello there"), false, 60);
        assert!(text.contains("hello there"));
        assert!(text.contains("copy"));
        assert!(!text.contains("copied"));
    }

    #[test]
    fn assistant_shows_copied_label_when_copied() {
        let text = render_to_text(&assistant("hello there"), true, 60);
        assert!(text.contains("✓ copied"));
    }

    #[test]
    fn padded_text_renders_as_stored() {
        let text = render_to_text(&user("  spaced  out"), false, 60);
        assert!(text.contains("  spaced  out"));
    }

    #[test]
    fn user_has_no_copy_label() {
        let text = render_to_text(&user("hello there"), false, 60);
        assert!(text.contains("hello there"));
        assert!(!text.contains("copy"));
    }
}
