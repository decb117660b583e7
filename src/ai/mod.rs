mod analyzer;
pub mod client;
pub mod conversation;
mod error;

pub use analyzer::SentimentClient;
pub use client::{CompletionBackend, OpenAiClient};
pub use error::{SentimentError, ServiceError};

#[cfg(test)]
pub(crate) use analyzer::tests::ScriptedBackend;
