//! Terminal front end: the feed and reader views, the chat overlay, and the
//! event loop tying keystrokes to state transitions and state transitions to
//! spawned service calls.

pub mod app;
pub mod input;
pub mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use app::{App, AppEvent, Effect};
use nh_core::ArticleService;

/// Bring up the terminal, run the app until quit, restore the terminal even
/// when the loop errors out.
pub async fn run(service: Arc<dyn ArticleService>) -> nh_core::Result<()> {
    let mut terminal = setup_terminal()?;
    let res = event_loop(&mut terminal, service).await;
    restore_terminal(&mut terminal)?;
    res
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    service: Arc<dyn ArticleService>,
) -> nh_core::Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(16);
    let mut app = App::new();
    dispatch(Effect::LoadFeed, &service, &tx, &mut app);

    loop {
        // Land whatever background work finished since the last tick.
        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        let action = input::poll_action(app.input_mode())?;
        if let Some(effect) = app.handle_action(action) {
            dispatch(effect, &service, &tx, &mut app);
        }
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Turn an effect into a spawned service call reporting back over the
/// channel. Opening a URL is the one synchronous case.
fn dispatch(
    effect: Effect,
    service: &Arc<dyn ArticleService>,
    tx: &mpsc::Sender<AppEvent>,
    app: &mut App,
) {
    match effect {
        Effect::LoadFeed => {
            let service = service.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = service.list_articles().await;
                let _ = tx.send(AppEvent::FeedLoaded(outcome)).await;
            });
        }
        Effect::LoadArticle(id) => {
            let service = service.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = service.article(&id).await;
                let _ = tx.send(AppEvent::ArticleLoaded { id, outcome }).await;
            });
        }
        Effect::SendChat { session, prompt } => {
            let service = service.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = service.send_chat(&prompt).await;
                let _ = tx.send(AppEvent::ChatResolved { session, outcome }).await;
            });
        }
        Effect::OpenUrl(url) => match open::that(&url) {
            Ok(()) => app.status = "Opened in browser.".to_string(),
            Err(e) => app.status = format!("Could not open browser: {}", e),
        },
    }
}

fn setup_terminal() -> nh_core::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> nh_core::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
