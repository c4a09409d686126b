//! The callback contract of a streamed chat exchange.

use std::fmt;

use crate::types::{ChatMessage, Conversation};

/// Receiver for a streamed assistant reply.
///
/// `on_delta` runs once per non-empty text fragment, in wire order. Afterwards
/// exactly one of `on_done` or `on_error` runs. Both take `self` by value, so
/// an implementation can never be handed a second terminal callback.
pub trait ChatSink {
    /// A new fragment of assistant text is available.
    fn on_delta(&mut self, text: &str);

    /// The stream finished, either at the `[DONE]` marker or at transport end.
    fn on_done(self);

    /// The exchange failed. Fragments already delivered are not retracted.
    fn on_error(self, message: String);
}

/// A [`ChatSink`] backed by three closures.
///
/// ```
/// use tripmate_types::{Callbacks, ChatSink};
///
/// let mut reply = String::new();
/// let mut sink = Callbacks::new(|t| reply.push_str(t), || {}, |_| {});
/// sink.on_delta("Hel");
/// sink.on_delta("lo");
/// sink.on_done();
/// assert_eq!(reply, "Hello");
/// ```
pub struct Callbacks<D, F, E> {
    on_delta: D,
    on_done: F,
    on_error: E,
}

impl<D, F, E> Callbacks<D, F, E>
where
    D: FnMut(&str),
    F: FnOnce(),
    E: FnOnce(String),
{
    /// Bundle the delta sink, completion notifier and error notifier.
    pub fn new(on_delta: D, on_done: F, on_error: E) -> Self {
        Self {
            on_delta,
            on_done,
            on_error,
        }
    }
}

impl<D, F, E> ChatSink for Callbacks<D, F, E>
where
    D: FnMut(&str),
    F: FnOnce(),
    E: FnOnce(String),
{
    fn on_delta(&mut self, text: &str) {
        (self.on_delta)(text);
    }

    fn on_done(self) {
        (self.on_done)();
    }

    fn on_error(self, message: String) {
        (self.on_error)(message);
    }
}

/// How a streamed exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Sentinel seen, or the transport closed cleanly.
    Done,
    /// Setup or transport failure, with a human-readable message.
    Failed(String),
}

impl StreamOutcome {
    /// Hand the outcome to `sink`, firing exactly one terminal callback.
    pub fn deliver<S: ChatSink>(self, sink: S) {
        match self {
            Self::Done => sink.on_done(),
            Self::Failed(message) => sink.on_error(message),
        }
    }

    /// Whether the exchange completed without error.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for StreamOutcome {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Done,
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Chat state behind a chat screen: history, in-flight flag and last error.
///
/// `&mut ChatSession` is a [`ChatSink`]: deltas extend the assistant reply and
/// either terminal callback clears the loading flag.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    conversation: Conversation,
    loading: bool,
    last_error: Option<String>,
}

impl ChatSession {
    /// A session seeded with an existing history (for example a greeting).
    #[must_use]
    pub fn new(conversation: Conversation) -> Self {
        Self {
            conversation,
            loading: false,
            last_error: None,
        }
    }

    /// Record a user message and return the history to send.
    ///
    /// Returns `None` without touching the session when `input` is blank or a
    /// reply is still streaming.
    pub fn submit(&mut self, input: &str) -> Option<Vec<ChatMessage>> {
        if input.trim().is_empty() || self.loading {
            return None;
        }
        self.conversation.push_user(input);
        self.loading = true;
        self.last_error = None;
        Some(self.conversation.messages().to_vec())
    }

    /// Whether a reply is currently streaming.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The message of the most recent failed exchange.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The conversation so far.
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}

impl ChatSink for &mut ChatSession {
    fn on_delta(&mut self, text: &str) {
        self.conversation.append_assistant(text);
    }

    fn on_done(self) {
        self.loading = false;
    }

    fn on_error(self, message: String) {
        self.loading = false;
        self.last_error = Some(message);
    }
}
