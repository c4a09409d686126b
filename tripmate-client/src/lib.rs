#![doc = include_str!("../README.md")]

pub mod chat;
pub mod client;
pub(crate) mod error;

pub use chat::DeltaStream;
pub use client::TripClient;

// Re-export tripmate-types for convenience
pub use tripmate_types::{ChatError, ChatMessage, ChatSink, ItineraryRequest, StreamOutcome};
