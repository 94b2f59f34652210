//! Conversation with the persona model.
//!
//! The transcript is sent verbatim on every request; the gateway adds the
//! persona and returns exactly one assistant reply.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::warn;

mod gateway;

pub use gateway::Gateway;

/// Shown in place of a reply when the gateway fails
pub const FAILURE_REPLY: &str = "ERROR: Failed to process message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// What goes over the wire for one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// One message in the local transcript
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn turn(&self) -> Turn {
        Turn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("gateway returned no reply")]
    EmptyReply,
}

/// Anything that turns a transcript into the next assistant reply.
#[allow(async_fn_in_trait)]
pub trait ChatGateway {
    async fn reply(&self, turns: &[Turn]) -> Result<String, ChatError>;
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `text` with the whole prior transcript.
    ///
    /// Blank input is ignored. A failed request appends [`FAILURE_REPLY`]
    /// instead of returning an error.
    pub async fn send<G: ChatGateway>(&mut self, gateway: &G, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::new(Role::User, text));
        let turns: Vec<Turn> = self.messages.iter().map(ChatMessage::turn).collect();

        let reply = match gateway.reply(&turns).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                FAILURE_REPLY.to_string()
            }
        };

        self.messages.push(ChatMessage::new(Role::Assistant, reply));
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every request and answers with a canned reply
    struct Scripted {
        reply: Option<&'static str>,
        seen: Mutex<Vec<Vec<Turn>>>,
    }

    impl Scripted {
        fn new(reply: Option<&'static str>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatGateway for Scripted {
        async fn reply(&self, turns: &[Turn]) -> Result<String, ChatError> {
            self.seen.lock().unwrap().push(turns.to_vec());
            self.reply.map(str::to_string).ok_or(ChatError::EmptyReply)
        }
    }

    #[tokio::test]
    async fn sends_full_history_with_new_turn() {
        let gateway = Scripted::new(Some("ok lah"));
        let mut session = ChatSession::new();

        session.send(&gateway, "hello").await;
        let reply = session.send(&gateway, "again").await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "ok lah");

        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].len(), 1);
        let roles: Vec<Role> = seen[1].iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(seen[1][2].content, "again");
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn failure_becomes_synthetic_reply() {
        let gateway = Scripted::new(None);
        let mut session = ChatSession::new();

        let reply = session.send(&gateway, "hello").await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, FAILURE_REPLY);
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let gateway = Scripted::new(Some("unused"));
        let mut session = ChatSession::new();

        assert!(session.send(&gateway, "   ").await.is_none());
        assert!(session.messages().is_empty());
        assert!(gateway.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn turn_serializes_lowercase_role() {
        let turn = ChatMessage::new(Role::Assistant, "hi").turn();
        assert_eq!(
            serde_json::to_string(&turn).unwrap(),
            r#"{"role":"assistant","content":"hi"}"#
        );
    }
}
