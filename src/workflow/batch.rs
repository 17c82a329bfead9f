//! Draft builders that turn a reviewer's selections into submittable batches.

use crate::domain::{
    AssignmentStatus, AssignmentUpdate, CreatorAssignment, CreatorId, ReviewAction,
    ReviewDecision,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    action: ReviewAction,
    feedback: String,
}

/// Script or content decisions selected across creators.
///
/// Selections that still need feedback stay in the draft but are left out
/// of `decisions()` until feedback is entered.
#[derive(Debug, Clone, Default)]
pub struct ReviewBatch {
    selections: BTreeMap<CreatorId, Selection>,
}

impl ReviewBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the action for a creator, keeping any feedback already typed.
    pub fn select(&mut self, creator_id: CreatorId, action: ReviewAction) {
        self.selections
            .entry(creator_id)
            .and_modify(|s| s.action = action)
            .or_insert(Selection {
                action,
                feedback: String::new(),
            });
    }

    /// Returns false when the creator has no selection yet.
    pub fn set_feedback(&mut self, creator_id: &CreatorId, feedback: &str) -> bool {
        match self.selections.get_mut(creator_id) {
            Some(selection) => {
                selection.feedback = feedback.to_string();
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self, creator_id: &CreatorId) {
        self.selections.remove(creator_id);
    }

    fn decision(creator_id: &CreatorId, selection: &Selection) -> ReviewDecision {
        let feedback = selection.feedback.trim();
        ReviewDecision {
            creator_id: creator_id.clone(),
            action: selection.action,
            feedback: (!feedback.is_empty()).then(|| feedback.to_string()),
        }
    }

    /// Complete decisions, ready to send.
    pub fn decisions(&self) -> Vec<ReviewDecision> {
        self.selections
            .iter()
            .map(|(id, selection)| Self::decision(id, selection))
            .filter(ReviewDecision::is_complete)
            .collect()
    }

    /// Creators whose selection is held back for missing feedback.
    pub fn excluded(&self) -> Vec<CreatorId> {
        self.selections
            .iter()
            .filter(|(id, selection)| !Self::decision(id, selection).is_complete())
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn is_submittable(&self) -> bool {
        !self.decisions().is_empty()
    }
}

/// Pending edits to a campaign's creator roster.
#[derive(Debug, Clone, Default)]
pub struct AssignmentDraft {
    current: BTreeMap<CreatorId, AssignmentStatus>,
    edits: BTreeMap<CreatorId, (AssignmentStatus, Option<String>)>,
}

impl AssignmentDraft {
    pub fn from_assignments<'a>(assignments: impl IntoIterator<Item = &'a CreatorAssignment>) -> Self {
        Self {
            current: assignments
                .into_iter()
                .map(|a| (a.creator_id.clone(), a.status.clone()))
                .collect(),
            edits: BTreeMap::new(),
        }
    }

    /// Records a decision; a blank comment counts as none.
    pub fn set(&mut self, creator_id: CreatorId, status: AssignmentStatus, comment: Option<&str>) {
        let comment = comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self.edits.insert(creator_id, (status, comment));
    }

    /// Edits that change a status or carry a comment.
    pub fn updates(&self) -> Vec<AssignmentUpdate> {
        self.edits
            .iter()
            .filter(|(id, (status, comment))| {
                comment.is_some() || self.current.get(*id) != Some(status)
            })
            .map(|(id, (status, comment))| AssignmentUpdate {
                creator_id: id.clone(),
                status: status.clone(),
                comment: comment.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/batch_tests.rs"]
mod tests;
