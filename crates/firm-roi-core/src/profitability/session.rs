//! Editing <-> showing-result flow for an interactive calculator front end.
//!
//! The session owns the current [`FirmProfile`] snapshot and, after a
//! calculation, the result it produced. Any edit discards a shown result.

use serde::Serialize;

use crate::profitability::assumptions::ProjectionAssumptions;
use crate::profitability::calculator::{compute_with, ProjectionResult};
use crate::profitability::profile::{FirmProfile, ProfileField};
use crate::profitability::recommendations::{classify_with, Recommendation};

/// Consultation booking link shown alongside a finished calculation.
pub const BOOKING_URL: &str = "https://link.hirevirtuals.com/widget/bookings/hire-virtuals";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Editing,
    ShowingResult {
        result: ProjectionResult,
        recommendations: Vec<Recommendation>,
    },
}

#[derive(Debug, Clone)]
pub struct CalculatorSession {
    profile: FirmProfile,
    assumptions: ProjectionAssumptions,
    state: SessionState,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::with_assumptions(ProjectionAssumptions::default())
    }

    pub fn with_assumptions(assumptions: ProjectionAssumptions) -> Self {
        CalculatorSession {
            profile: FirmProfile::default(),
            assumptions,
            state: SessionState::Editing,
        }
    }

    pub fn profile(&self) -> &FirmProfile {
        &self.profile
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing)
    }

    /// Replace one field from raw text and return to editing.
    pub fn edit(&mut self, field: ProfileField, raw: &str) {
        self.profile = self.profile.with_raw_field(field, raw);
        self.state = SessionState::Editing;
    }

    /// Compute from the current snapshot and show the result.
    pub fn calculate(&mut self) -> ProjectionResult {
        let result = compute_with(&self.profile, &self.assumptions);
        let recommendations = classify_with(&result, &self.assumptions.thresholds);
        self.state = SessionState::ShowingResult {
            result: result.clone(),
            recommendations,
        };
        result
    }

    /// Discard the shown result. Inputs are kept.
    pub fn back_to_edit(&mut self) {
        self.state = SessionState::Editing;
    }

    pub fn result(&self) -> Option<&ProjectionResult> {
        match &self.state {
            SessionState::ShowingResult { result, .. } => Some(result),
            SessionState::Editing => None,
        }
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match &self.state {
            SessionState::ShowingResult {
                recommendations, ..
            } => recommendations,
            SessionState::Editing => &[],
        }
    }

    /// Booking link, offered only once a result is on screen.
    pub fn booking_url(&self) -> Option<&'static str> {
        self.result().map(|_| BOOKING_URL)
    }
}
