use super::{
    fsm::{SubmissionEvent, SubmissionMachine},
    render::{RenderedOutput, XmlMode, render},
    request::{EnhancementRequest, SYSTEM_PROMPT, UserInputs, build_request_with_instruction},
};
use crate::{
    Result, SubmissionError,
    config::Config,
    llm::{ChatCompletionRequest, Credential, LlmClient, OpenAiClient},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Runs submissions: validate, build, call the model, render.
///
/// Holds no per-user state; one instance is shared by every request.
pub struct Enhancer {
    llm_client: Arc<dyn LlmClient>,
    instruction: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    xml_mode: XmlMode,
}

impl Enhancer {
    pub fn new(config: &Config) -> Result<Self> {
        let llm_client = Arc::new(OpenAiClient::new(config.llm.clone())?);
        Ok(Self::with_client(llm_client, config))
    }

    pub fn with_client(llm_client: Arc<dyn LlmClient>, config: &Config) -> Self {
        Self {
            llm_client,
            instruction: config
                .llm
                .system_prompt
                .clone()
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            xml_mode: XmlMode::from_escape_flag(config.render.escape_xml),
        }
    }

    pub fn build_request(&self, inputs: &UserInputs) -> EnhancementRequest {
        build_request_with_instruction(inputs, &self.instruction)
    }

    pub async fn submit(
        &self,
        credential: &Credential,
        inputs: &UserInputs,
    ) -> std::result::Result<RenderedOutput, SubmissionError> {
        let submission_id = Uuid::new_v4();
        let mut fsm = SubmissionMachine::new();
        advance(&mut fsm, SubmissionEvent::Submit, submission_id);

        let outcome = self.run(submission_id, credential, inputs).await;

        match &outcome {
            Ok(_) => {
                advance(&mut fsm, SubmissionEvent::Completed, submission_id);
                info!(%submission_id, "Submission completed");
            }
            Err(e) => {
                advance(&mut fsm, SubmissionEvent::Failed, submission_id);
                warn!(%submission_id, kind = e.kind(), "Submission failed");
            }
        }

        outcome
    }

    async fn run(
        &self,
        submission_id: Uuid,
        credential: &Credential,
        inputs: &UserInputs,
    ) -> std::result::Result<RenderedOutput, SubmissionError> {
        if credential.is_empty() {
            return Err(SubmissionError::MissingCredential);
        }
        if !inputs.is_complete() {
            return Err(SubmissionError::IncompleteInput);
        }

        debug!(
            %submission_id,
            role_len = inputs.role.len(),
            context_len = inputs.context.len(),
            task_len = inputs.task.len(),
            "Building enhancement request"
        );
        let request = self.build_request(inputs);

        let chat_request = ChatCompletionRequest {
            messages: request.messages(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let llm_start = std::time::Instant::now();
        let response = match self
            .llm_client
            .create_chat_completion(credential, chat_request)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(%submission_id, "LLM call failed: {}", e);
                return Err(e.into());
            }
        };
        info!(
            %submission_id,
            "LLM responded with {} choices in {:?}",
            response.choices.len(),
            llm_start.elapsed()
        );

        let result = response
            .first_content()
            .ok_or_else(|| SubmissionError::upstream("model returned no choices"))?;

        Ok(render(inputs, result, self.xml_mode))
    }
}

/// The state machine is internal bookkeeping: a rejected transition is a bug
/// in this module, logged here and never reported to the user.
fn advance(fsm: &mut SubmissionMachine, event: SubmissionEvent, submission_id: Uuid) {
    if let Err(e) = fsm.transition(event) {
        error!(%submission_id, "Submission state machine rejected {:?}: {}", event, e);
    }
}
