use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::ChatPanel;

/// Overlay in the reader's bottom-right corner: transcript on top, one
/// input row at the bottom.
pub fn draw(f: &mut Frame, panel: &ChatPanel, area: Rect) {
    let rect = overlay(area);
    if rect.width < 4 || rect.height < 3 {
        return;
    }
    f.render_widget(Clear, rect);

    let block = Block::default().borders(Borders::ALL).title("Assistant");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for message in panel.session.messages() {
        let (prefix, style) = if message.is_user() {
            ("> ", Style::default().add_modifier(Modifier::BOLD))
        } else {
            ("", Style::default())
        };
        for row in message_rows(&message.text, prefix, width) {
            lines.push(Line::from(row).style(style));
        }
    }
    if panel.session.is_thinking() {
        lines.push(Line::from("Thinking...").style(Style::default().add_modifier(Modifier::DIM)));
    }

    // Pin the newest line to the bottom once the transcript outgrows the box.
    let transcript_height = inner.height - 1;
    let scroll = lines.len().saturating_sub(transcript_height as usize) as u16;
    let transcript_area = Rect { height: transcript_height, ..inner };
    f.render_widget(Paragraph::new(Text::from(lines)).scroll((scroll, 0)), transcript_area);

    let input_area = Rect {
        y: inner.y + transcript_height,
        height: 1,
        ..inner
    };
    let input_line = if panel.input.is_empty() {
        Line::from("Ask about this article…").style(Style::default().add_modifier(Modifier::DIM))
    } else {
        Line::from(format!("> {}", panel.input))
    };
    f.render_widget(Paragraph::new(input_line), input_area);
}

fn overlay(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(52);
    let height = area.height.saturating_sub(2).min(18);
    Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}

/// Rows for one transcript entry. An empty reply still takes one row;
/// `lines()` yields nothing for it.
fn message_rows(text: &str, prefix: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for source_line in text.lines() {
        rows.extend(wrap(&format!("{}{}", prefix, source_line), width));
    }
    if rows.is_empty() {
        rows.push(prefix.to_string());
    }
    rows
}

/// Greedy word wrap by char count; oversized words are split hard. Wide
/// glyphs under-measure by a cell.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if row_len > 0 && row_len + 1 + word_len > width {
            rows.push(std::mem::take(&mut row));
            row_len = 0;
        }
        if word_len > width {
            for c in word.chars() {
                if row_len == width {
                    rows.push(std::mem::take(&mut row));
                    row_len = 0;
                }
                row.push(c);
                row_len += 1;
            }
            continue;
        }
        if row_len > 0 {
            row.push(' ');
            row_len += 1;
        }
        row.push_str(word);
        row_len += word_len;
    }
    if !row.is_empty() {
        rows.push(row);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_row() {
        assert_eq!(wrap("hello", 20), vec!["hello"]);
        assert_eq!(wrap("", 20), vec![""]);
    }

    #[test]
    fn an_empty_reply_still_takes_a_row() {
        assert_eq!(message_rows("", "", 40), vec![""]);
    }

    #[test]
    fn message_rows_wrap_each_source_line_with_the_prefix() {
        assert_eq!(message_rows("one\ntwo", "", 40), vec!["one", "two"]);
        assert_eq!(message_rows("hello", "> ", 40), vec!["> hello"]);
    }
}
