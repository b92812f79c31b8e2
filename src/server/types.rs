use crate::{
    SubmissionError,
    enhance::{EnhancedPromptJson, RenderedOutput, UserInputs},
    llm::Credential,
};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of both the HTML form post and the JSON API. Absent fields are empty.
#[derive(Deserialize, Default)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub task: String,
}

impl EnhanceRequest {
    pub fn into_parts(self) -> (Credential, UserInputs) {
        (
            Credential::new(self.api_key),
            UserInputs::new(self.role, self.context, self.task),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub plain: String,
    pub xml: String,
    pub json: EnhancedPromptJson,
}

impl From<RenderedOutput> for EnhanceResponse {
    fn from(output: RenderedOutput) -> Self {
        Self {
            plain: output.plain,
            xml: output.xml,
            json: output.json,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&SubmissionError> for ErrorResponse {
    fn from(err: &SubmissionError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }
    }
}

pub fn status_for(err: &SubmissionError) -> StatusCode {
    match err {
        SubmissionError::MissingCredential | SubmissionError::IncompleteInput => {
            StatusCode::BAD_REQUEST
        }
        SubmissionError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
    }
}
