//! Single-line text helpers for the InputBox: char boundaries and
//! display-column slicing.

use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to content (border + padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

/// Inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Display column of byte offset `pos`.
pub(super) fn column_at(text: &str, pos: usize) -> usize {
    text[..pos].chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// The part of `text` visible in a window `width` columns wide, starting at
/// display column `scroll`. A wide char straddling either edge is dropped.
pub(super) fn visible_slice(text: &str, scroll: usize, width: usize) -> &str {
    let mut col = 0;
    let mut start = None;
    let mut end = text.len();
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if start.is_none() {
            if col >= scroll {
                start = Some(i);
            } else {
                col += w;
                continue;
            }
        }
        if col + w > scroll + width {
            end = i;
            break;
        }
        col += w;
    }
    match start {
        Some(s) => &text[s..end],
        None => "",
    }
}

/// Replace line breaks so pasted text stays on one line.
pub(super) fn flatten_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prev_char_boundary_multibyte() {
        // "café": 'é' starts at byte 3, len 2
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(prev_char_boundary(s, 3), 2);
        assert_eq!(prev_char_boundary(s, 1), 0);
    }

    #[test]
    fn next_char_boundary_emoji() {
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(next_char_boundary(s, 5), 6);
    }

    #[test]
    fn column_counts_wide_chars_twice() {
        assert_eq!(column_at("a🔥b", 5), 3);
        assert_eq!(column_at("abc", 2), 2);
    }

    #[test]
    fn visible_slice_scrolls_by_columns() {
        assert_eq!(visible_slice("hello world", 0, 5), "hello");
        assert_eq!(visible_slice("hello world", 6, 5), "world");
        assert_eq!(visible_slice("hello", 0, 80), "hello");
        assert_eq!(visible_slice("hello", 5, 80), "");
    }

    #[test]
    fn visible_slice_drops_straddling_wide_char() {
        // "ab🔥": the emoji occupies columns 2-3; a 3-wide window can't fit it
        assert_eq!(visible_slice("ab🔥", 0, 3), "ab");
    }

    #[test]
    fn flatten_newlines_joins_lines() {
        assert_eq!(flatten_newlines("a\nb\r\nc"), "a b c");
    }
}
