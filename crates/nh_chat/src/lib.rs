//! Per-article chat sessions: transcript state, history projection and the
//! staging of outbound prompts. Nothing here talks to the network; callers
//! feed `compose` output to a service and hand the outcome back to `resolve`.

pub mod session;

pub use session::{ChatContext, ChatSession, FALLBACK_REPLY};
