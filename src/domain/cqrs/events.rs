//! Campaign events for the CQRS aggregate.
//!
//! Events represent facts that have happened: a snapshot arrived from the
//! backend, a request was sent, or a request finished.

use crate::domain::model::{
    AmountDecision, AssignmentUpdate, Bid, Campaign, CampaignBrief, ContentSubmission,
    CreatorAssignment, ReviewDecision, ScriptSubmission,
};
use crate::domain::types::{Amount, CreatorId, Operation, TimestampUtc};
use cqrs_es::DomainEvent;
use serde::{Deserialize, Serialize};

/// Events emitted by the campaign aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignEvent {
    CampaignSynced {
        campaign: Campaign,
        synced_at: TimestampUtc,
    },

    AssignmentsSynced {
        assignments: Vec<CreatorAssignment>,
        synced_at: TimestampUtc,
    },

    BidsSynced {
        bids: Vec<Bid>,
        synced_at: TimestampUtc,
    },

    ScriptsSynced {
        scripts: Vec<ScriptSubmission>,
        synced_at: TimestampUtc,
    },

    ContentSynced {
        content: Vec<ContentSubmission>,
        synced_at: TimestampUtc,
    },

    AssignmentReviewSubmitted {
        updates: Vec<AssignmentUpdate>,
        submitted_at: TimestampUtc,
    },

    BriefUploadSubmitted {
        brief: CampaignBrief,
        submitted_at: TimestampUtc,
    },

    AmountFinalizationSubmitted {
        decisions: Vec<AmountDecision>,
        submitted_at: TimestampUtc,
    },

    ScriptReviewSubmitted {
        decisions: Vec<ReviewDecision>,
        submitted_at: TimestampUtc,
    },

    ContentReviewSubmitted {
        decisions: Vec<ReviewDecision>,
        submitted_at: TimestampUtc,
    },

    BidSubmitted {
        creator_id: CreatorId,
        amount: Amount,
        submitted_at: TimestampUtc,
    },

    ScriptSubmitted {
        creator_id: CreatorId,
        text: String,
        submitted_at: TimestampUtc,
    },

    ContentSubmitted {
        creator_id: CreatorId,
        content_url: String,
        submitted_at: TimestampUtc,
    },

    GoLiveSubmitted {
        creator_id: CreatorId,
        live_url: String,
        submitted_at: TimestampUtc,
    },

    RequestCompleted {
        operation: Operation,
        completed_at: TimestampUtc,
    },

    RequestFailed {
        operation: Operation,
        message: String,
        failed_at: TimestampUtc,
    },
}

impl CampaignEvent {
    /// The request this event opens, if it is a submission event.
    pub fn opened_operation(&self) -> Option<Operation> {
        match self {
            Self::AssignmentReviewSubmitted { .. } => Some(Operation::AssignmentReview),
            Self::BriefUploadSubmitted { .. } => Some(Operation::BriefUpload),
            Self::AmountFinalizationSubmitted { .. } => Some(Operation::AmountFinalization),
            Self::ScriptReviewSubmitted { .. } => Some(Operation::ScriptReview),
            Self::ContentReviewSubmitted { .. } => Some(Operation::ContentReview),
            Self::BidSubmitted { .. } => Some(Operation::BidSubmission),
            Self::ScriptSubmitted { .. } => Some(Operation::ScriptSubmission),
            Self::ContentSubmitted { .. } => Some(Operation::ContentSubmission),
            Self::GoLiveSubmitted { .. } => Some(Operation::GoLive),
            _ => None,
        }
    }
}

impl DomainEvent for CampaignEvent {
    fn event_type(&self) -> String {
        match self {
            Self::CampaignSynced { .. } => "CampaignSynced".to_string(),
            Self::AssignmentsSynced { .. } => "AssignmentsSynced".to_string(),
            Self::BidsSynced { .. } => "BidsSynced".to_string(),
            Self::ScriptsSynced { .. } => "ScriptsSynced".to_string(),
            Self::ContentSynced { .. } => "ContentSynced".to_string(),
            Self::AssignmentReviewSubmitted { .. } => "AssignmentReviewSubmitted".to_string(),
            Self::BriefUploadSubmitted { .. } => "BriefUploadSubmitted".to_string(),
            Self::AmountFinalizationSubmitted { .. } => {
                "AmountFinalizationSubmitted".to_string()
            }
            Self::ScriptReviewSubmitted { .. } => "ScriptReviewSubmitted".to_string(),
            Self::ContentReviewSubmitted { .. } => "ContentReviewSubmitted".to_string(),
            Self::BidSubmitted { .. } => "BidSubmitted".to_string(),
            Self::ScriptSubmitted { .. } => "ScriptSubmitted".to_string(),
            Self::ContentSubmitted { .. } => "ContentSubmitted".to_string(),
            Self::GoLiveSubmitted { .. } => "GoLiveSubmitted".to_string(),
            Self::RequestCompleted { .. } => "RequestCompleted".to_string(),
            Self::RequestFailed { .. } => "RequestFailed".to_string(),
        }
    }

    fn event_version(&self) -> String {
        "1".to_string()
    }
}
