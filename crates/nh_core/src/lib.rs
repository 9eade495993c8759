pub mod error;
pub mod service;
pub mod types;

pub use error::Error;
pub use service::ArticleService;
pub use types::{Article, Author, ChatHistoryEntry, ChatMessage, ChatPrompt, SyncReport};

pub type Result<T> = std::result::Result<T, Error>;
