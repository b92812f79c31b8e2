use crate::{Error, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Completed,
    Failed,
}

/// Tracks one submission from the button press back to rest.
pub struct SubmissionMachine {
    state: SubmissionState,
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn current_state(&self) -> SubmissionState {
        self.state
    }

    pub fn transition(&mut self, event: SubmissionEvent) -> Result<()> {
        let new_state = match (self.state, event) {
            (SubmissionState::Idle, SubmissionEvent::Submit) => SubmissionState::Submitted,
            (SubmissionState::Submitted, SubmissionEvent::Completed) => SubmissionState::Idle,
            (SubmissionState::Submitted, SubmissionEvent::Failed) => SubmissionState::Idle,
            _ => {
                warn!(
                    "Invalid submission transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{:?}", event),
                });
            }
        };

        debug!(
            "Submission state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }

    pub fn is_idle(&self) -> bool {
        self.state == SubmissionState::Idle
    }
}

impl Default for SubmissionMachine {
    fn default() -> Self {
        Self::new()
    }
}
