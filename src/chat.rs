//! Registration chat transcript.
//!
//! The transcript is an append-only audit trail of the registration
//! attempt, not an editable document: messages are never mutated or
//! reordered after insertion.

use serde::{Deserialize, Serialize};

/// Opening bot message seeding every new transcript.
pub const GREETING: &str =
    "Hello. Please provide Patient Name, Gender, Age, and Phone to register.";

/// Bot reply when the action endpoint did not recognize the prompt.
pub const NOT_UNDERSTOOD: &str = "Could not register. Please try again.";

/// Bot reply when the action endpoint could not be reached.
pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Append-only ordered chat history, seeded with the greeting.
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Bot,
                text: GREETING.to_string(),
            }],
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.into(),
        });
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::Bot,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_log_starts_with_greeting() {
        let log = ChatLog::new();
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].role, ChatRole::Bot);
        assert_eq!(log.messages()[0].text, GREETING);
    }

    #[test]
    fn messages_keep_insertion_order() {
        let mut log = ChatLog::new();
        log.push_user("Register Musa, Male, 45");
        log.push_bot("Success! ID: 222.");
        log.push_user("thanks");

        let roles: Vec<ChatRole> = log.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::Bot, ChatRole::User, ChatRole::Bot, ChatRole::User]
        );
        assert_eq!(log.messages()[1].text, "Register Musa, Male, 45");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage {
            role: ChatRole::User,
            text: "hi".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));
    }
}
