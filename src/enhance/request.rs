use crate::llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// Fixed instruction sent as the system message of every submission.
pub const SYSTEM_PROMPT: &str = "You are an expert prompt engineer.
Your job is to improve the given prompt.
DO NOT answer the task.
The enhanced prompt must:
- Be clear and structured
- Explicitly instruct GPT to clarify assumptions before responding
- Ask clarifying questions if needed
- Be suitable for high-quality GPT output";

/// The three free-text fields of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInputs {
    pub role: String,
    pub context: String,
    pub task: String,
}

impl UserInputs {
    pub fn new(
        role: impl Into<String>,
        context: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            context: context.into(),
            task: task.into(),
        }
    }

    /// Only the empty string counts as missing; whitespace is kept as given.
    pub fn is_complete(&self) -> bool {
        !self.role.is_empty() && !self.context.is_empty() && !self.task.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementRequest {
    system: String,
    user: String,
}

impl EnhancementRequest {
    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }
}

pub fn build_request(inputs: &UserInputs) -> EnhancementRequest {
    build_request_with_instruction(inputs, SYSTEM_PROMPT)
}

pub fn build_request_with_instruction(
    inputs: &UserInputs,
    instruction: &str,
) -> EnhancementRequest {
    EnhancementRequest {
        system: instruction.to_string(),
        user: format!(
            "Role:\n{}\n\nContext:\n{}\n\nTask:\n{}",
            inputs.role, inputs.context, inputs.task
        ),
    }
}
