use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::message_list::LayoutCache;
use crate::tui::components::{INPUT_HEIGHT, MessageList, TitleBar};

/// Splits the screen into header, history, and input rows.
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: Instant) {
    let [title_area, main_area, input_area] = screen_layout(frame.area());

    // History first: the title bar needs the post-render scroll position
    let copied = app.copied_ids(now);
    MessageList::new(&mut tui.message_list, &app.messages, &copied).render(frame, main_area);

    let has_unseen_content = tui.message_list.has_unseen_content();
    TitleBar::new(
        app.title.clone(),
        app.status_message.clone(),
        has_unseen_content,
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);
}

/// Hit test: given a screen Y coordinate, find which message index (if any) is at that position
pub fn hit_test_message(
    screen_y: u16,
    frame_area: Rect,
    scroll_offset_y: u16,
    layout: &LayoutCache,
) -> Option<usize> {
    let [_title_area, main_area, _input_area] = screen_layout(frame_area);

    if screen_y < main_area.y || screen_y >= main_area.y + main_area.height {
        return None;
    }

    let content_y = (screen_y - main_area.y).saturating_add(scroll_offset_y);
    layout.index_at(content_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{test_app, test_app_with_pairs};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn draw_to_text(app: &App, tui: &mut TuiState, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui, now);
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

    #[test]
    fn test_draw_empty_ui() {
        let app = test_app();
        let mut tui = TuiState::new("Type your message...".to_string());
        let text = draw_to_text(&app, &mut tui, Instant::now());
        assert!(text.contains("AI Chatbot"));
        assert!(text.contains("Type your message..."));
        assert!(text.contains("Send"));
    }

    #[test]
    fn test_draw_hello_scenario() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));
        let text_during = {
            let mut tui = TuiState::new(String::new());
            tui.input_box.submitting = app.is_submitting;
            draw_to_text(&app, &mut tui, Instant::now())
        };
        assert!(text_during.contains("Sending..."));

        update(
            &mut app,
            Action::ReplyReceived(crate::responder::SubmitResponse {
                user_message: "hello".to_string(),
                ai_response: "You said: \"hello\". As an AI, I'm here to help!".to_string(),
            }),
        );
        let mut tui = TuiState::new(String::new());
        let text = draw_to_text(&app, &mut tui, Instant::now());
        assert!(text.contains("hello"));
        assert!(text.contains("You said: \"hello\"."));
    }

    #[test]
    fn test_copied_label_follows_clock() {
        let mut app = test_app_with_pairs(1);
        let id = app.messages[1].id.clone();
        let t0 = Instant::now();
        update(&mut app, Action::CopySucceeded { id, at: t0 });

        let mut tui = TuiState::new(String::new());
        assert!(draw_to_text(&app, &mut tui, t0).contains("✓ copied"));

        let later = t0 + Duration::from_millis(2000);
        assert!(!draw_to_text(&app, &mut tui, later).contains("✓ copied"));
    }

    #[test]
    fn test_hit_test_outside_history_is_none() {
        let area = Rect::new(0, 0, 80, 24);
        let mut layout = LayoutCache::new();
        layout.heights = vec![4, 5];
        layout.rebuild_prefix_heights();

        // Row 0 is the title bar, the last 3 rows are the input box
        assert_eq!(hit_test_message(0, area, 0, &layout), None);
        assert_eq!(hit_test_message(22, area, 0, &layout), None);
    }

    #[test]
    fn test_hit_test_accounts_for_scroll() {
        let area = Rect::new(0, 0, 80, 24);
        let mut layout = LayoutCache::new();
        layout.heights = vec![4, 5, 4];
        layout.rebuild_prefix_heights();

        // Screen row 1 is content row 0
        assert_eq!(hit_test_message(1, area, 0, &layout), Some(0));
        assert_eq!(hit_test_message(5, area, 0, &layout), Some(1));
        // Scrolled by 4: screen row 1 is content row 4
        assert_eq!(hit_test_message(1, area, 4, &layout), Some(1));
        // Below all content
        assert_eq!(hit_test_message(20, area, 0, &layout), None);
    }
}
