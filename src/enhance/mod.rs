pub mod fsm;
mod pipeline;
pub mod render;
mod request;

pub use fsm::{SubmissionEvent, SubmissionMachine, SubmissionState};
pub use pipeline::Enhancer;
pub use render::{EnhancedPromptJson, RenderedOutput, XmlMode, render, render_xml};
pub use request::{
    EnhancementRequest, SYSTEM_PROMPT, UserInputs, build_request, build_request_with_instruction,
};
