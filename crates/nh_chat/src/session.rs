use nh_core::{Article, Author, ChatHistoryEntry, ChatMessage, ChatPrompt};
use uuid::Uuid;

/// Shown in place of a reply when the backend call fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that. Please try again.";

/// Article fields a session keeps so every prompt can carry them without
/// holding on to the whole `Article`.
#[derive(Debug, Clone)]
pub struct ChatContext {
    pub article_id: String,
    pub article_title: String,
    pub article_summary: String,
    pub article_content: String,
}

impl ChatContext {
    pub fn for_article(article: &Article) -> Self {
        Self {
            article_id: article.id.clone(),
            article_title: article.title.clone(),
            article_summary: article.summary().to_string(),
            article_content: article.content().to_string(),
        }
    }
}

/// One conversation about one article. Sessions are never persisted and
/// never shared between articles; opening a detail view makes a fresh one.
///
/// The session does not perform requests itself. `compose` stages a turn and
/// returns the prompt to send; the caller reports the outcome via `resolve`.
/// At most one turn is outstanding at a time.
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    context: ChatContext,
    transcript: Vec<ChatMessage>,
    next_id: u64,
    in_flight: bool,
}

impl ChatSession {
    pub fn new(context: ChatContext) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            context,
            transcript: Vec::new(),
            next_id: 1,
            in_flight: false,
        };
        let greeting = format!(
            "Hi! I've read \"{}\". Ask me anything about it.",
            session.context.article_title
        );
        session.push(greeting, Author::Assistant, true);
        session
    }

    pub fn for_article(article: &Article) -> Self {
        Self::new(ChatContext::for_article(article))
    }

    /// Tag for in-flight requests; replies carrying another session's id
    /// must be discarded by the caller instead of resolved here.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_thinking(&self) -> bool {
        self.in_flight
    }

    /// Prior turns as the wire wants them. The seeded greeting is client-side
    /// only and never appears here.
    pub fn history(&self) -> Vec<ChatHistoryEntry> {
        self.transcript
            .iter()
            .filter(|message| !message.synthetic)
            .map(ChatMessage::to_history_entry)
            .collect()
    }

    /// Stage an outbound turn: trim the input, append it to the transcript
    /// and build the prompt to send. Returns `None` when the trimmed input is
    /// empty or a turn is already outstanding, leaving the session untouched.
    ///
    /// The history snapshot is taken before the append so the new message
    /// appears once, in the `message` field.
    pub fn compose(&mut self, input: &str) -> Option<ChatPrompt> {
        let message = input.trim();
        if message.is_empty() || self.in_flight {
            return None;
        }
        let history = self.history();
        let message = message.to_string();
        self.push(message.clone(), Author::User, false);
        self.in_flight = true;
        tracing::debug!("Staged chat turn {} for article {}", self.next_id - 1, self.context.article_id);
        Some(ChatPrompt {
            article_id: self.context.article_id.clone(),
            article_title: self.context.article_title.clone(),
            article_summary: self.context.article_summary.clone(),
            article_content: self.context.article_content.clone(),
            history,
            message,
        })
    }

    /// Land the outcome of the outstanding turn. Failures become the fallback
    /// reply; either way the session accepts input again afterwards.
    pub fn resolve(&mut self, outcome: nh_core::Result<String>) {
        let text = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                tracing::debug!("Chat request for article {} failed: {}", self.context.article_id, err);
                FALLBACK_REPLY.to_string()
            }
        };
        self.push(text, Author::Assistant, false);
        self.in_flight = false;
    }

    fn push(&mut self, text: String, author: Author, synthetic: bool) {
        let id = self.next_id;
        self.next_id += 1;
        self.transcript.push(ChatMessage {
            id,
            text,
            author,
            synthetic,
        });
    }
}
