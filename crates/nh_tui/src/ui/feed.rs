use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{FeedState, FEED_EMPTY, FEED_ERROR};

pub fn draw(f: &mut Frame, feed: &FeedState, area: Rect) {
    if feed.articles.is_empty() {
        let pane = Paragraph::new(empty_state(feed))
            .block(Block::default().borders(Borders::ALL).title("Articles"))
            .wrap(Wrap { trim: false });
        f.render_widget(pane, area);
        return;
    }

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // Left: the feed, one line per card
    let items: Vec<ListItem> = feed
        .articles
        .iter()
        .enumerate()
        .map(|(pos, a)| {
            let prefix = if pos == feed.selected { "▶ " } else { "  " };
            let line = format!(
                "{}{:<12} {:<14} {}",
                prefix,
                column(&a.category, 12),
                column(&a.publisher_name, 14),
                a.title
            );
            ListItem::new(Line::from(line))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("Articles ({})", feed.articles.len())));
    f.render_widget(list, panes[0]);

    // Right: preview of the selection
    let body = if let Some(a) = feed.selected_article() {
        let mut text = Text::default();
        text.lines.push(Line::from(a.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)));
        text.lines.push(Line::from(format!(
            "{} · {} · {}",
            a.publisher_name,
            a.author_name,
            a.published_ago()
        )));
        text.lines.push(Line::from(format!("Category: {}", a.category)));
        text.lines.push(Line::from(""));
        text.lines.extend(Text::from(a.quick_summary.clone()).lines);
        text
    } else {
        Text::default()
    };

    let preview = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, panes[1]);
}

/// Copy for the left pane while there is nothing to list.
fn empty_state(feed: &FeedState) -> String {
    if feed.loading {
        "Loading articles…".to_string()
    } else if feed.failed {
        FEED_ERROR.to_string()
    } else {
        format!("{}\n\nRun `nh sync` to pull fresh stories.", FEED_EMPTY)
    }
}

fn column(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let cut: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}
