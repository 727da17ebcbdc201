//! Per-request progress tracking for a generation run.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use ts_rs::TS;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GenerationPhase {
    Idle,
    ValidatingInput,
    InvokingGenerator,
    ProcessingResponse,
    Succeeded,
    Failed,
}

impl GenerationPhase {
    pub fn progress(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::ValidatingInput => 20,
            Self::InvokingGenerator => 40,
            Self::ProcessingResponse => 80,
            Self::Succeeded | Self::Failed => 100,
        }
    }

    pub fn step_label(self) -> &'static str {
        match self {
            Self::Idle => "Waiting to start",
            Self::ValidatingInput => "Validating business information",
            Self::InvokingGenerator => "Generating website with AI",
            Self::ProcessingResponse => "Processing generated code",
            Self::Succeeded => "Website generated successfully",
            Self::Failed => "Generation failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("cannot move from {from} to {to}")]
    IllegalTransition {
        from: GenerationPhase,
        to: GenerationPhase,
    },
}

/// Where a run ended up; returned with a successful generate response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub phase: GenerationPhase,
    pub progress: u8,
    pub current_step: String,
    pub error: Option<String>,
    pub attempts: u32,
}

/// Forward-only state machine:
/// `idle -> validating-input -> invoking-generator -> processing-response`,
/// then `succeeded` or `failed`. A failed run may re-enter
/// `invoking-generator` through [`retry`](Self::retry); [`reset`](Self::reset)
/// returns to `idle` from anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationProgress {
    phase: GenerationPhase,
    error: Option<String>,
    attempts: u32,
}

impl Default for GenerationProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress {
    pub fn new() -> Self {
        Self {
            phase: GenerationPhase::Idle,
            error: None,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.phase.progress()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of times the generator has been invoked in this run
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Move to the next non-terminal phase.
    pub fn advance(&mut self) -> Result<GenerationPhase, ProgressError> {
        let next = match self.phase {
            GenerationPhase::Idle => GenerationPhase::ValidatingInput,
            GenerationPhase::ValidatingInput => GenerationPhase::InvokingGenerator,
            GenerationPhase::InvokingGenerator => GenerationPhase::ProcessingResponse,
            from => {
                return Err(ProgressError::IllegalTransition {
                    from,
                    to: GenerationPhase::Succeeded,
                });
            }
        };
        self.enter(next);
        Ok(next)
    }

    pub fn succeed(&mut self) -> Result<(), ProgressError> {
        if self.phase != GenerationPhase::ProcessingResponse {
            return Err(ProgressError::IllegalTransition {
                from: self.phase,
                to: GenerationPhase::Succeeded,
            });
        }
        self.enter(GenerationPhase::Succeeded);
        Ok(())
    }

    /// Any running phase may fail; idle and terminal phases may not.
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), ProgressError> {
        if self.phase == GenerationPhase::Idle || self.phase.is_terminal() {
            return Err(ProgressError::IllegalTransition {
                from: self.phase,
                to: GenerationPhase::Failed,
            });
        }
        self.phase = GenerationPhase::Failed;
        self.error = Some(error.into());
        Ok(())
    }

    pub fn retry(&mut self) -> Result<(), ProgressError> {
        if self.phase != GenerationPhase::Failed {
            return Err(ProgressError::IllegalTransition {
                from: self.phase,
                to: GenerationPhase::InvokingGenerator,
            });
        }
        self.error = None;
        self.enter(GenerationPhase::InvokingGenerator);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            phase: self.phase,
            progress: self.progress(),
            current_step: self.phase.step_label().to_string(),
            error: self.error.clone(),
            attempts: self.attempts,
        }
    }

    fn enter(&mut self, phase: GenerationPhase) {
        if phase == GenerationPhase::InvokingGenerator {
            self.attempts += 1;
        }
        self.phase = phase;
    }
}
