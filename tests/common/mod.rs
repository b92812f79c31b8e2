#![allow(dead_code)]

pub mod mocks;

use prompt_enhancer::{config::Config, enhance::Enhancer};
use std::sync::Arc;

pub use mocks::{MockLlmClient, text_response};

pub fn enhancer_with(client: &MockLlmClient) -> Enhancer {
    Enhancer::with_client(Arc::new(client.clone()), &Config::default())
}

pub fn enhancer_with_config(client: &MockLlmClient, config: &Config) -> Enhancer {
    Enhancer::with_client(Arc::new(client.clone()), config)
}
