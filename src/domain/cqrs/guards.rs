//! Phase gates and transition checks run before a request leaves the client.

use super::CampaignData;
use crate::domain::errors::WorkflowError;
use crate::domain::model::{AmountDecision, AssignmentUpdate, CampaignBrief, ReviewDecision};
use crate::domain::status::{AssignmentStatus, BidStatus, ContentStatus, ScriptStatus};
use crate::domain::transitions::{Lifecycle, ACTION_GO_LIVE, ACTION_SUBMIT};
use crate::domain::types::{Amount, CreatorId};
use std::collections::HashSet;

fn reject_duplicates<'a>(
    ids: impl Iterator<Item = &'a CreatorId>,
) -> Result<(), WorkflowError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(WorkflowError::DuplicateDecision {
                creator_id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn unknown(creator_id: &CreatorId) -> WorkflowError {
    WorkflowError::UnknownCreator {
        creator_id: creator_id.to_string(),
    }
}

fn require_text(value: &str, what: &str) -> Result<(), WorkflowError> {
    if value.trim().is_empty() {
        return Err(WorkflowError::InvalidInput {
            message: format!("{} must not be empty", what),
        });
    }
    Ok(())
}

fn require_feedback(decisions: &[ReviewDecision]) -> Result<(), WorkflowError> {
    match decisions.iter().find(|d| !d.is_complete()) {
        Some(decision) => Err(WorkflowError::FeedbackRequired {
            creator_id: decision.creator_id.to_string(),
            action: decision.action.to_string(),
        }),
        None => Ok(()),
    }
}

impl CampaignData {
    fn require_final_roster(&self, what: &str) -> Result<(), WorkflowError> {
        if !self.campaign.creators_are_final() {
            return Err(WorkflowError::GateClosed {
                message: format!(
                    "{} once creators are final (campaign status '{}')",
                    what, self.campaign.review_status
                ),
            });
        }
        Ok(())
    }

    fn require_brief(&self) -> Result<(), WorkflowError> {
        if !self.campaign.brief_completed {
            return Err(WorkflowError::GateClosed {
                message: "the campaign brief is not completed".to_string(),
            });
        }
        Ok(())
    }

    fn script_status(&self, creator_id: &CreatorId) -> Option<&ScriptStatus> {
        self.pairings
            .get(creator_id)
            .and_then(|p| p.script.as_ref())
            .map(|s| &s.status)
    }

    fn content_status(&self, creator_id: &CreatorId) -> Option<&ContentStatus> {
        self.pairings
            .get(creator_id)
            .and_then(|p| p.content.as_ref())
            .map(|c| &c.status)
    }

    fn bid_status(&self, creator_id: &CreatorId) -> Option<&BidStatus> {
        self.pairings
            .get(creator_id)
            .and_then(|p| p.bid.as_ref())
            .map(|b| &b.status)
    }

    fn require_script_approved(&self, creator_id: &CreatorId) -> Result<(), WorkflowError> {
        if self.script_status(creator_id) != Some(&ScriptStatus::Approved) {
            return Err(WorkflowError::GateClosed {
                message: format!("script for creator '{}' is not approved", creator_id),
            });
        }
        Ok(())
    }

    pub(super) fn check_assignment_review(
        &self,
        updates: &[AssignmentUpdate],
    ) -> Result<(), WorkflowError> {
        if !self.campaign.assignment_editable() {
            return Err(WorkflowError::ReviewLocked {
                status: self.campaign.review_status.to_string(),
            });
        }
        if updates.is_empty() {
            return Err(WorkflowError::NoUpdates);
        }
        reject_duplicates(updates.iter().map(|u| &u.creator_id))?;

        for update in updates {
            let current = self
                .pairings
                .get(&update.creator_id)
                .and_then(|p| p.assignment.as_ref())
                .ok_or_else(|| unknown(&update.creator_id))?;
            if AssignmentStatus::next(Some(&current.status), update.status.as_str()).is_none() {
                return Err(WorkflowError::InvalidTransition {
                    message: format!(
                        "creator '{}' cannot move from '{}' to '{}'",
                        update.creator_id, current.status, update.status
                    ),
                });
            }
        }
        Ok(())
    }

    pub(super) fn check_brief(&self, brief: &CampaignBrief) -> Result<(), WorkflowError> {
        self.require_final_roster("the brief can be uploaded")?;
        let missing = brief.missing_fields();
        if !missing.is_empty() {
            return Err(WorkflowError::InvalidInput {
                message: format!("missing required brief fields: {}", missing.join(", ")),
            });
        }
        Ok(())
    }

    pub(super) fn check_amount_decisions(
        &self,
        decisions: &[AmountDecision],
    ) -> Result<(), WorkflowError> {
        self.require_final_roster("bids are available")?;
        if decisions.is_empty() {
            return Err(WorkflowError::NoUpdates);
        }
        reject_duplicates(decisions.iter().map(|d| &d.creator_id))?;

        for decision in decisions {
            let status = self
                .bid_status(&decision.creator_id)
                .ok_or_else(|| unknown(&decision.creator_id))?;
            if BidStatus::next(Some(status), decision.action.as_str()).is_none() {
                return Err(WorkflowError::InvalidTransition {
                    message: format!(
                        "bid for creator '{}' is '{}'; {} needs '{}'",
                        decision.creator_id,
                        status,
                        decision.action,
                        BidStatus::AmountNegotiated
                    ),
                });
            }
        }
        Ok(())
    }

    pub(super) fn check_script_reviews(
        &self,
        decisions: &[ReviewDecision],
    ) -> Result<(), WorkflowError> {
        self.require_brief()?;
        if decisions.is_empty() {
            return Err(WorkflowError::NoUpdates);
        }
        reject_duplicates(decisions.iter().map(|d| &d.creator_id))?;
        require_feedback(decisions)?;

        for decision in decisions {
            let status = self
                .script_status(&decision.creator_id)
                .ok_or_else(|| unknown(&decision.creator_id))?;
            if ScriptStatus::next(Some(status), decision.action.as_str()).is_none() {
                return Err(WorkflowError::InvalidTransition {
                    message: format!(
                        "script for creator '{}' is '{}' and cannot take '{}'",
                        decision.creator_id, status, decision.action
                    ),
                });
            }
        }
        Ok(())
    }

    pub(super) fn check_content_reviews(
        &self,
        decisions: &[ReviewDecision],
    ) -> Result<(), WorkflowError> {
        self.require_brief()?;
        if decisions.is_empty() {
            return Err(WorkflowError::NoUpdates);
        }
        reject_duplicates(decisions.iter().map(|d| &d.creator_id))?;
        require_feedback(decisions)?;

        for decision in decisions {
            self.require_script_approved(&decision.creator_id)?;
            let status = self
                .content_status(&decision.creator_id)
                .ok_or_else(|| unknown(&decision.creator_id))?;
            if ContentStatus::next(Some(status), decision.action.as_str()).is_none() {
                return Err(WorkflowError::InvalidTransition {
                    message: format!(
                        "content for creator '{}' is '{}' and cannot take '{}'",
                        decision.creator_id, status, decision.action
                    ),
                });
            }
        }
        Ok(())
    }

    pub(super) fn check_bid(
        &self,
        creator_id: &CreatorId,
        amount: Amount,
    ) -> Result<(), WorkflowError> {
        self.require_final_roster("bids can be placed")?;
        if amount.is_zero() {
            return Err(WorkflowError::InvalidInput {
                message: "bid amount must be greater than zero".to_string(),
            });
        }
        let current = self.bid_status(creator_id);
        if BidStatus::next(current, ACTION_SUBMIT).is_none() {
            return Err(WorkflowError::InvalidTransition {
                message: format!(
                    "a bid was already placed (status '{}')",
                    current.map(BidStatus::as_str).unwrap_or_default()
                ),
            });
        }
        Ok(())
    }

    pub(super) fn check_script_submission(
        &self,
        creator_id: &CreatorId,
        text: &str,
    ) -> Result<(), WorkflowError> {
        self.require_brief()?;
        require_text(text, "script")?;
        let current = self.script_status(creator_id);
        if ScriptStatus::next(current, ACTION_SUBMIT).is_none() {
            return Err(WorkflowError::InvalidTransition {
                message: format!(
                    "script is '{}'; resubmission needs a revision request",
                    current.map(ScriptStatus::as_str).unwrap_or_default()
                ),
            });
        }
        Ok(())
    }

    pub(super) fn check_content_submission(
        &self,
        creator_id: &CreatorId,
        content_url: &str,
    ) -> Result<(), WorkflowError> {
        self.require_brief()?;
        self.require_script_approved(creator_id)?;
        require_text(content_url, "content URL")?;
        let current = self.content_status(creator_id);
        if ContentStatus::next(current, ACTION_SUBMIT).is_none() {
            return Err(WorkflowError::InvalidTransition {
                message: format!(
                    "content is '{}'; resubmission needs a revision request",
                    current.map(ContentStatus::as_str).unwrap_or_default()
                ),
            });
        }
        Ok(())
    }

    pub(super) fn check_go_live(
        &self,
        creator_id: &CreatorId,
        live_url: &str,
    ) -> Result<(), WorkflowError> {
        require_text(live_url, "live URL")?;
        let current = self.content_status(creator_id);
        if ContentStatus::next(current, ACTION_GO_LIVE).is_none() {
            return Err(WorkflowError::InvalidTransition {
                message: format!(
                    "content must be approved before going live (status '{}')",
                    current.map(ContentStatus::as_str).unwrap_or("none")
                ),
            });
        }
        Ok(())
    }
}
