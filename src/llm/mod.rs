mod client;
mod credential;
mod types;

pub use client::{LlmClient, OpenAiClient};
pub use credential::Credential;
pub use types::*;
