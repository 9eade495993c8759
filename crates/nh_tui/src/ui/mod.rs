mod chat;
mod feed;
mod reader;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, View};
use crate::input::InputMode;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(f.size());

    f.render_widget(Paragraph::new(top_bar(app)), chunks[0]);

    match &app.view {
        View::Feed => feed::draw(f, &app.feed, chunks[1]),
        View::Reader(reader) => {
            reader::draw(f, reader, chunks[1]);
            if let Some(panel) = reader.chat.as_ref().filter(|p| p.open) {
                chat::draw(f, panel, chunks[1]);
            }
        }
    }

    f.render_widget(Paragraph::new(app.status.clone()), chunks[2]);
}

fn top_bar(app: &App) -> &'static str {
    if app.input_mode() == InputMode::Chat {
        return "chat — type your question  Enter:send  Esc:close";
    }
    match &app.view {
        View::Feed => "newshub — j/k:move  Enter:read  r:refresh  o:open  q:quit",
        View::Reader(_) => "newshub — j/k:scroll  c:chat  o:open  Esc:back  q:quit",
    }
}
