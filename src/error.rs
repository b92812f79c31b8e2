use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },
}

impl Error {
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }
}

/// Reasons a single form submission ends without rendered output.
///
/// The `Display` text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please enter your OpenAI API key")]
    MissingCredential,

    #[error("Please fill all inputs")]
    IncompleteInput,

    #[error("Something went wrong: {0}")]
    UpstreamError(String),
}

impl SubmissionError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamError(msg.into())
    }

    /// Stable machine-readable tag used by the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::IncompleteInput => "incomplete_input",
            Self::UpstreamError(_) => "upstream_error",
        }
    }
}

impl From<Error> for SubmissionError {
    fn from(err: Error) -> Self {
        // Keep the provider's own wording, without our category prefix.
        let message = match err {
            Error::Llm(msg) => msg,
            Error::OpenAi(e) => e.to_string(),
            Error::Network(e) => e.to_string(),
            other => other.to_string(),
        };
        Self::UpstreamError(message)
    }
}
