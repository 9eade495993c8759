use nh_chat::ChatSession;
use nh_core::{Article, ChatPrompt};
use uuid::Uuid;

use crate::input::{Action, InputMode};

pub const FEED_ERROR: &str = "Failed to load articles. Is the backend running?";
pub const FEED_EMPTY: &str = "No articles yet.";
pub const READER_MISSING: &str = "Article not found.";

/// Async work requested by a state transition. The event loop owns the
/// service handle and turns these into spawned tasks.
#[derive(Debug)]
pub enum Effect {
    LoadFeed,
    LoadArticle(String),
    SendChat { session: Uuid, prompt: ChatPrompt },
    OpenUrl(String),
}

/// Completion of background work, fed back into `apply_event`. Article and
/// chat results carry the tag they were requested under so late arrivals for
/// a torn-down view can be recognized and dropped.
#[derive(Debug)]
pub enum AppEvent {
    FeedLoaded(nh_core::Result<Vec<Article>>),
    ArticleLoaded { id: String, outcome: nh_core::Result<Article> },
    ChatResolved { session: Uuid, outcome: nh_core::Result<String> },
}

#[derive(Debug)]
pub enum View {
    Feed,
    Reader(ReaderState),
}

#[derive(Debug)]
pub struct FeedState {
    pub articles: Vec<Article>,
    pub selected: usize,
    pub loading: bool,
    pub failed: bool,
}

impl FeedState {
    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected)
    }

    fn move_down(&mut self) {
        if self.articles.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.articles.len() - 1);
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug)]
pub enum ReaderContent {
    Loading,
    Missing,
    Ready(Box<Article>),
}

#[derive(Debug)]
pub struct ReaderState {
    pub article_id: String,
    pub content: ReaderContent,
    pub scroll: u16,
    pub chat: Option<ChatPanel>,
}

impl ReaderState {
    fn load(article_id: String) -> Self {
        Self {
            article_id,
            content: ReaderContent::Loading,
            scroll: 0,
            chat: None,
        }
    }

    pub fn article(&self) -> Option<&Article> {
        match &self.content {
            ReaderContent::Ready(article) => Some(article),
            _ => None,
        }
    }

    /// First toggle creates the session; later ones only flip visibility so
    /// the transcript survives closing the panel. No-op until the article is
    /// loaded, the greeting needs its title.
    fn toggle_chat(&mut self) {
        let ReaderContent::Ready(article) = &self.content else {
            return;
        };
        match self.chat.as_mut() {
            Some(panel) => panel.open = !panel.open,
            None => self.chat = Some(ChatPanel::new(ChatSession::for_article(article))),
        }
    }
}

#[derive(Debug)]
pub struct ChatPanel {
    pub open: bool,
    pub input: String,
    pub session: ChatSession,
}

impl ChatPanel {
    fn new(session: ChatSession) -> Self {
        Self {
            open: true,
            input: String::new(),
            session,
        }
    }
}

/// Whole-app state. `handle_action` and `apply_event` are pure state
/// transitions; everything async happens in the event loop.
#[derive(Debug)]
pub struct App {
    pub view: View,
    pub feed: FeedState,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::Feed,
            feed: FeedState {
                articles: Vec::new(),
                selected: 0,
                loading: true,
                failed: false,
            },
            status: "Loading articles…".to_string(),
            should_quit: false,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        match &self.view {
            View::Reader(reader) if reader.chat.as_ref().is_some_and(|p| p.open) => InputMode::Chat,
            _ => InputMode::Browse,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::None => None,

            Action::Quit => {
                self.should_quit = true;
                None
            }

            Action::Down => {
                match &mut self.view {
                    View::Feed => self.feed.move_down(),
                    View::Reader(reader) => reader.scroll = reader.scroll.saturating_add(1),
                }
                None
            }

            Action::Up => {
                match &mut self.view {
                    View::Feed => self.feed.move_up(),
                    View::Reader(reader) => reader.scroll = reader.scroll.saturating_sub(1),
                }
                None
            }

            Action::Select => match &self.view {
                View::Feed => {
                    let id = self.feed.selected_article()?.id.clone();
                    self.view = View::Reader(ReaderState::load(id.clone()));
                    Some(Effect::LoadArticle(id))
                }
                View::Reader(_) => None,
            },

            // Leaving the reader drops its state, chat session included.
            // The feed re-requests on entry, keeping whatever it has on
            // screen until the fresh list lands.
            Action::Back => match &self.view {
                View::Reader(_) => {
                    self.view = View::Feed;
                    self.feed.loading = true;
                    self.status = "Refreshing…".to_string();
                    Some(Effect::LoadFeed)
                }
                View::Feed => None,
            },

            Action::Refresh => match &self.view {
                View::Feed if !self.feed.loading => {
                    self.feed.loading = true;
                    self.status = "Refreshing…".to_string();
                    Some(Effect::LoadFeed)
                }
                _ => None,
            },

            Action::OpenInBrowser => {
                let url = match &self.view {
                    View::Feed => self.feed.selected_article().map(|a| a.source_url.clone()),
                    View::Reader(reader) => reader.article().map(|a| a.source_url.clone()),
                };
                url.map(Effect::OpenUrl)
            }

            Action::ToggleChat => {
                if let View::Reader(reader) = &mut self.view {
                    reader.toggle_chat();
                }
                None
            }

            Action::CloseChat => {
                if let Some(panel) = self.open_chat_mut() {
                    panel.open = false;
                }
                None
            }

            Action::ChatChar(c) => {
                if let Some(panel) = self.open_chat_mut() {
                    panel.input.push(c);
                }
                None
            }

            Action::ChatBackspace => {
                if let Some(panel) = self.open_chat_mut() {
                    panel.input.pop();
                }
                None
            }

            // The input is only cleared when the session accepts the turn;
            // a blank line or an outstanding request leaves it in place.
            Action::ChatSend => {
                let panel = self.open_chat_mut()?;
                let prompt = panel.session.compose(&panel.input)?;
                panel.input.clear();
                Some(Effect::SendChat {
                    session: panel.session.id(),
                    prompt,
                })
            }
        }
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FeedLoaded(outcome) => {
                self.feed.loading = false;
                match outcome {
                    Ok(articles) => {
                        self.feed.failed = false;
                        self.feed.articles = articles;
                        if self.feed.selected >= self.feed.articles.len() {
                            self.feed.selected = self.feed.articles.len().saturating_sub(1);
                        }
                        self.status = format!("Loaded {} articles", self.feed.articles.len());
                    }
                    Err(err) => {
                        tracing::warn!("Failed to load the feed: {}", err);
                        self.feed.failed = true;
                        self.status = FEED_ERROR.to_string();
                    }
                }
            }

            AppEvent::ArticleLoaded { id, outcome } => {
                let View::Reader(reader) = &mut self.view else {
                    return;
                };
                if reader.article_id != id {
                    tracing::debug!("Dropping stale article result for {}", id);
                    return;
                }
                match outcome {
                    Ok(article) => reader.content = ReaderContent::Ready(Box::new(article)),
                    Err(err) => {
                        tracing::warn!("Failed to load article {}: {}", id, err);
                        reader.content = ReaderContent::Missing;
                    }
                }
            }

            AppEvent::ChatResolved { session, outcome } => {
                let View::Reader(reader) = &mut self.view else {
                    return;
                };
                let Some(panel) = reader.chat.as_mut() else {
                    return;
                };
                if panel.session.id() != session {
                    tracing::debug!("Dropping stale chat reply for session {}", session);
                    return;
                }
                panel.session.resolve(outcome);
            }
        }
    }

    fn open_chat_mut(&mut self) -> Option<&mut ChatPanel> {
        match &mut self.view {
            View::Reader(reader) => reader.chat.as_mut().filter(|p| p.open),
            View::Feed => None,
        }
    }
}
