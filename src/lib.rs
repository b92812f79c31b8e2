pub mod config;
pub mod enhance;
pub mod error;
pub mod llm;
pub mod server;

pub use error::{Error, Result, SubmissionError};
