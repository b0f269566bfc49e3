//! Session state machine.
//!
//! State advances strictly forward (`Intro` → `Deciding` → `Evaluating` →
//! `Feedback`); `reset` is the only way back. Fields are private so every
//! mutation goes through a transition method that checks the current state.
//!
//! Sessions are in-memory only: they hold a `std::time::Instant` and are
//! discarded when the trainee navigates away, so there is deliberately no
//! serde on `Session` itself.

use std::fmt;
use std::time::Instant;

use crate::error::{FlashpointError, Result};
use crate::evaluation::DecisionEvaluation;
use crate::scenario::Scenario;

/// The four presentation states of a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Scenario narrative shown, simulation not yet started.
    Intro,
    /// Choices on screen, the response timer is running.
    Deciding,
    /// A choice is locked in, evaluation is outstanding.
    Evaluating,
    /// Evaluation attached, feedback on screen.
    Feedback,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Deciding => "deciding",
            Self::Evaluating => "evaluating",
            Self::Feedback => "feedback",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trainee's run through one scenario.
///
/// Owned exclusively by a single presentation for its lifetime; there is no
/// concurrent writer, so no interior locking.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// The scenario this session runs through
    pub scenario_id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    state: SessionState,
    choices: Vec<String>,
    selected_choice_index: Option<usize>,
    started_at: Option<Instant>,
    response_time_seconds: Option<f64>,
    evaluation: Option<DecisionEvaluation>,
    current_media_id: String,
    outcome_video_url: Option<String>,
    initial_media_id: String,
}

impl Session {
    /// Creates a fresh session in `Intro`, pointing at the scenario's
    /// initial display media.
    pub fn new(scenario: &Scenario) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            scenario_id: scenario.id.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            state: SessionState::Intro,
            choices: Vec::new(),
            selected_choice_index: None,
            started_at: None,
            response_time_seconds: None,
            evaluation: None,
            current_media_id: scenario.initial_media_id.clone(),
            outcome_video_url: None,
            initial_media_id: scenario.initial_media_id.clone(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected_choice_index(&self) -> Option<usize> {
        self.selected_choice_index
    }

    /// Response time fixed at the moment of selection; never recomputed.
    pub fn response_time_seconds(&self) -> Option<f64> {
        self.response_time_seconds
    }

    pub fn evaluation(&self) -> Option<&DecisionEvaluation> {
        self.evaluation.as_ref()
    }

    pub fn current_media_id(&self) -> &str {
        &self.current_media_id
    }

    pub fn outcome_video_url(&self) -> Option<&str> {
        self.outcome_video_url.as_deref()
    }

    /// Whole seconds spent deciding so far. Display-only; the authoritative
    /// metric is `response_time_seconds`, captured once at selection.
    pub fn elapsed_seconds(&self) -> Option<u64> {
        match self.state {
            SessionState::Deciding => self.started_at.map(|t| t.elapsed().as_secs()),
            _ => None,
        }
    }

    /// Enters `Deciding` with the resolved choice list and starts the
    /// response timer.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `Intro`; `Validation` for an empty list
    /// (the machine must never sit in `Deciding` with nothing to choose).
    pub fn begin_deciding(&mut self, choices: Vec<String>) -> Result<()> {
        if self.state != SessionState::Intro {
            return Err(FlashpointError::invalid_transition(
                self.state.as_str(),
                "begin_deciding",
            ));
        }
        if choices.is_empty() {
            return Err(FlashpointError::validation(
                "cannot enter deciding with an empty choice list",
            ));
        }
        self.choices = choices;
        // First entry after a reset starts the timer; the None check keeps
        // re-entrant callers from restarting it.
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        self.state = SessionState::Deciding;
        Ok(())
    }

    /// Locks in the choice at `index`, fixes the response time, and enters
    /// `Evaluating`. Returns the chosen action string for the evaluation
    /// request.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `Deciding`; `Validation` for an
    /// out-of-bounds index (no state change in either case).
    pub fn select_choice(&mut self, index: usize) -> Result<&str> {
        if self.state != SessionState::Deciding {
            return Err(FlashpointError::invalid_transition(
                self.state.as_str(),
                "select_choice",
            ));
        }
        if index >= self.choices.len() {
            return Err(FlashpointError::validation(format!(
                "choice index {index} out of bounds for {} choices",
                self.choices.len()
            )));
        }
        self.response_time_seconds = self.started_at.map(|t| t.elapsed().as_secs_f64());
        self.selected_choice_index = Some(index);
        self.state = SessionState::Evaluating;
        Ok(&self.choices[index])
    }

    /// Attaches the evaluation result and enters `Feedback`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `Evaluating`; the evaluation's own range
    /// validation failure leaves the session in `Evaluating`.
    pub fn complete_evaluation(&mut self, evaluation: DecisionEvaluation) -> Result<()> {
        if self.state != SessionState::Evaluating {
            return Err(FlashpointError::invalid_transition(
                self.state.as_str(),
                "complete_evaluation",
            ));
        }
        evaluation.validate()?;
        self.evaluation = Some(evaluation);
        self.state = SessionState::Feedback;
        Ok(())
    }

    /// Re-points the display media at an outcome asset. Allowed from
    /// `Evaluating` onward; never affects the state.
    pub fn set_outcome_media(&mut self, media_id: impl Into<String>) -> Result<()> {
        self.require_outcome_stage("set_outcome_media")?;
        self.current_media_id = media_id.into();
        Ok(())
    }

    /// Attaches a generated outcome video. The media request races the
    /// evaluation, so this may land in `Evaluating` or `Feedback`.
    pub fn set_outcome_video(&mut self, video_url: impl Into<String>) -> Result<()> {
        self.require_outcome_stage("set_outcome_video")?;
        self.outcome_video_url = Some(video_url.into());
        Ok(())
    }

    fn require_outcome_stage(&self, trigger: &'static str) -> Result<()> {
        match self.state {
            SessionState::Evaluating | SessionState::Feedback => Ok(()),
            state => Err(FlashpointError::invalid_transition(state.as_str(), trigger)),
        }
    }

    /// Returns to `Intro` with every mutable field at its creation-time
    /// default and the display media back at the scenario's initial asset.
    /// Always succeeds, from any state.
    pub fn reset(&mut self) {
        self.state = SessionState::Intro;
        self.choices.clear();
        self.selected_choice_index = None;
        self.started_at = None;
        self.response_time_seconds = None;
        self.evaluation = None;
        self.outcome_video_url = None;
        self.current_media_id = self.initial_media_id.clone();
    }
}
