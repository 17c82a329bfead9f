//! Campaign commands for the CQRS aggregate.
//!
//! Commands represent intent to change state. Sync commands carry a fresh
//! backend snapshot; the remaining commands announce a request the client is
//! about to send, and the aggregate validates them against the transition
//! tables and phase gates before anything reaches the network.

use crate::domain::model::{
    AmountDecision, AssignmentUpdate, Bid, Campaign, CampaignBrief, ContentSubmission,
    CreatorAssignment, ReviewDecision, ScriptSubmission,
};
use crate::domain::types::{Amount, CreatorId, Operation};
use serde::{Deserialize, Serialize};

/// Commands that can be executed against the campaign aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignCommand {
    /// Replace campaign metadata with a freshly fetched copy.
    SyncCampaign { campaign: Campaign },

    /// Replace the creator roster.
    SyncAssignments { assignments: Vec<CreatorAssignment> },

    /// Replace all bids.
    SyncBids { bids: Vec<Bid> },

    /// Replace all scripts.
    SyncScripts { scripts: Vec<ScriptSubmission> },

    /// Replace all content submissions.
    SyncContent { content: Vec<ContentSubmission> },

    /// Brand submits accept/reject decisions on proposed creators.
    SubmitAssignmentReview { updates: Vec<AssignmentUpdate> },

    /// Brand uploads the creative brief.
    UploadBrief { brief: CampaignBrief },

    /// Brand answers counter-offers.
    FinalizeAmounts { decisions: Vec<AmountDecision> },

    /// Brand reviews scripts.
    ReviewScripts { decisions: Vec<ReviewDecision> },

    /// Brand reviews content.
    ReviewContent { decisions: Vec<ReviewDecision> },

    /// Creator places a bid.
    SubmitBid { creator_id: CreatorId, amount: Amount },

    /// Creator submits or resubmits a script.
    SubmitScript { creator_id: CreatorId, text: String },

    /// Creator submits or resubmits content.
    SubmitContent {
        creator_id: CreatorId,
        content_url: String,
    },

    /// Creator reports the published post.
    GoLive { creator_id: CreatorId, live_url: String },

    /// The outstanding request succeeded.
    CompleteRequest { operation: Operation },

    /// The outstanding request failed; nothing local changes beyond the flag.
    FailRequest { operation: Operation, message: String },
}

impl CampaignCommand {
    /// Human-readable name for error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SyncCampaign { .. } => "SyncCampaign",
            Self::SyncAssignments { .. } => "SyncAssignments",
            Self::SyncBids { .. } => "SyncBids",
            Self::SyncScripts { .. } => "SyncScripts",
            Self::SyncContent { .. } => "SyncContent",
            Self::SubmitAssignmentReview { .. } => "SubmitAssignmentReview",
            Self::UploadBrief { .. } => "UploadBrief",
            Self::FinalizeAmounts { .. } => "FinalizeAmounts",
            Self::ReviewScripts { .. } => "ReviewScripts",
            Self::ReviewContent { .. } => "ReviewContent",
            Self::SubmitBid { .. } => "SubmitBid",
            Self::SubmitScript { .. } => "SubmitScript",
            Self::SubmitContent { .. } => "SubmitContent",
            Self::GoLive { .. } => "GoLive",
            Self::CompleteRequest { .. } => "CompleteRequest",
            Self::FailRequest { .. } => "FailRequest",
        }
    }
}
