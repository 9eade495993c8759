use nh_core::Article;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{ReaderContent, ReaderState, READER_MISSING};

pub fn draw(f: &mut Frame, reader: &ReaderState, area: Rect) {
    let body = match &reader.content {
        ReaderContent::Loading => Text::from("Loading article…"),
        ReaderContent::Missing => Text::from(format!("{}\n\nPress Esc to go back.", READER_MISSING)),
        ReaderContent::Ready(article) => article_text(article),
    };

    let page = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title("Article"))
        .wrap(Wrap { trim: false })
        .scroll((reader.scroll, 0));
    f.render_widget(page, area);
}

fn article_text(article: &Article) -> Text<'static> {
    let mut text = Text::default();
    text.lines.push(Line::from(article.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)));
    text.lines.push(Line::from(format!(
        "{} · {} · {}",
        article.publisher_name,
        article.author_name,
        article.published_ago()
    )));
    text.lines.push(Line::from(format!("[{}]  {}", article.category, article.source_url)));
    text.lines.push(Line::from(""));

    for paragraph in article.summary().split("\n\n") {
        text.lines.extend(Text::from(paragraph.to_string()).lines);
        text.lines.push(Line::from(""));
    }

    if let Some(why) = &article.why_it_matters {
        text.lines.push(Line::from("Why it matters").style(Style::default().add_modifier(Modifier::BOLD)));
        text.lines.extend(Text::from(why.clone()).lines);
        text.lines.push(Line::from(""));
    }

    text
}
