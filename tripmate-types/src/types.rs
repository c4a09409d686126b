//! Chat and itinerary request types.

use serde::{Deserialize, Serialize};

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The traveller typing into the chat.
    User,
    /// The AI travel assistant.
    Assistant,
}

/// A single chat message as sent to the chat function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A message written by the user.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A message written by the assistant.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body of the chat function: `{"messages": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Full conversation history, oldest first.
    pub messages: &'a [ChatMessage],
}

/// An ordered chat history that grows as the assistant streams its reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Create an empty conversation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::user(content));
    }

    /// Extend the reply currently being streamed.
    ///
    /// Appends to the trailing assistant message, or starts a new one when the
    /// last message came from the user.
    pub fn append_assistant(&mut self, delta: &str) {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => last.content.push_str(delta),
            _ => self.messages.push(ChatMessage::assistant(delta)),
        }
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The trailing assistant message, if the conversation ends with one.
    #[must_use]
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .last()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<ChatMessage>> for Conversation {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

/// Trip parameters for the itinerary function.
///
/// All fields are free text, exactly as entered in the planning form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    /// Where the trip goes.
    pub destination: String,
    /// First day of the trip.
    pub start_date: String,
    /// Last day of the trip.
    pub end_date: String,
    /// Number of travellers.
    pub travelers: String,
    /// Budget description or amount.
    pub budget: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn chat_request_wraps_messages() {
        let messages = vec![ChatMessage::user("Goa in May?")];
        let json = serde_json::to_value(ChatRequest { messages: &messages }).unwrap();
        assert_eq!(json["messages"][0]["content"], "Goa in May?");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn append_assistant_starts_reply_after_user() {
        let mut convo = Conversation::new();
        convo.push_user("hello");
        convo.append_assistant("Hi");
        convo.append_assistant(" there");
        assert_eq!(convo.len(), 2);
        assert_eq!(convo.last_reply(), Some("Hi there"));
    }

    #[test]
    fn append_assistant_extends_existing_reply() {
        let mut convo = Conversation::from(vec![ChatMessage::assistant("Welcome")]);
        convo.append_assistant("!");
        assert_eq!(convo.len(), 1);
        assert_eq!(convo.last_reply(), Some("Welcome!"));
    }

    #[test]
    fn last_reply_none_when_user_spoke_last() {
        let mut convo = Conversation::new();
        convo.push_user("anyone?");
        assert_eq!(convo.last_reply(), None);
    }

    #[test]
    fn itinerary_request_uses_camel_case() {
        let req = ItineraryRequest {
            destination: "Jaipur".into(),
            start_date: "2026-11-01".into(),
            end_date: "2026-11-05".into(),
            travelers: "2".into(),
            budget: "50000".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["startDate"], "2026-11-01");
        assert_eq!(json["endDate"], "2026-11-05");
        assert!(json.get("start_date").is_none());
    }
}
