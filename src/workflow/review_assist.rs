//! Assisted single-script review.
//!
//! `ChecklistEvaluator` does not analyse anything. It reports a fixed set of
//! named checks, all marked simulated, so the assisted flow can be exercised
//! end to end. Replace it with an evaluator backed by a real brand-safety
//! service before relying on its output.

use crate::domain::{CampaignBrief, ScriptSubmission};
use serde::Serialize;

/// Names of the checks every assessment reports, in display order.
pub const CHECKLIST: [&str; 5] = [
    "Brand safety",
    "CTA presence",
    "Guideline adherence",
    "Hook in first seconds",
    "Tone",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Pass,
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: CheckOutcome,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptAssessment {
    pub checks: Vec<CheckResult>,
    /// True when no real evaluation took place.
    pub simulated: bool,
}

impl ScriptAssessment {
    pub fn flagged(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.outcome == CheckOutcome::Flag)
    }
}

pub trait ScriptEvaluator: Send + Sync {
    fn evaluate(&self, script: &ScriptSubmission, brief: Option<&CampaignBrief>)
        -> ScriptAssessment;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistEvaluator;

impl ScriptEvaluator for ChecklistEvaluator {
    fn evaluate(
        &self,
        script: &ScriptSubmission,
        _brief: Option<&CampaignBrief>,
    ) -> ScriptAssessment {
        tracing::debug!(
            creator_id = %script.creator_id,
            "Reporting simulated checklist; no evaluation service is configured"
        );
        ScriptAssessment {
            checks: CHECKLIST
                .iter()
                .map(|name| CheckResult {
                    name: *name,
                    outcome: CheckOutcome::Pass,
                    note: "simulated".to_string(),
                })
                .collect(),
            simulated: true,
        }
    }
}

#[cfg(test)]
#[path = "tests/review_assist_tests.rs"]
mod tests;
