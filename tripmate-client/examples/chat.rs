//! Streaming chat example: prints the assistant's reply as it arrives.
//!
//! Set TRIPMATE_BACKEND_URL in your environment and run:
//!   cargo run --example chat -p tripmate-client -- "Plan a weekend in Pondicherry"
//!
//! Set RUST_LOG=tripmate_client=debug,tripmate_stream=trace to watch the exchange.

use std::io::Write;

use tripmate_client::TripClient;
use tripmate_types::{Callbacks, ChatMessage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let prompt = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let prompt = if prompt.trim().is_empty() {
        "Suggest a three-day itinerary for Hampi.".to_owned()
    } else {
        prompt
    };

    let client = TripClient::from_env()?;
    let messages = vec![ChatMessage::user(prompt)];

    let mut failure = None;
    client
        .stream_chat(
            &messages,
            Callbacks::new(
                |text| {
                    print!("{text}");
                    let _ = std::io::stdout().flush();
                },
                || println!(),
                |message| failure = Some(message),
            ),
        )
        .await;

    match failure {
        Some(message) => Err(message.into()),
        None => Ok(()),
    }
}
