//! Domain model for the campaign collaboration workflow.
//!
//! The backend owns every campaign record. This module models the client's
//! transient copy of it as an event-sourced aggregate: sync commands replace
//! the snapshot, request commands are checked against explicit transition
//! tables before anything is sent.
//!
//! # Architecture
//!
//! - **Status** (`status.rs`): closed status vocabularies and presentation categories
//! - **Transitions** (`transitions.rs`): `(from, action, to)` tables per sub-workflow
//! - **Commands / Events / Aggregate** (`cqrs/`): validation and event application
//! - **View** (`view.rs`): read-only board projection
//! - **Wire** (`wire.rs`): tolerant decoding of backend field spellings

pub mod cqrs;
pub mod errors;
pub mod model;
pub mod services;
pub mod status;
pub mod transitions;
pub mod types;
pub mod view;
mod wire;

// Re-export CQRS types
pub use cqrs::*;

// Re-export commonly used types for convenience
pub use errors::WorkflowError;
pub use model::{
    AmountDecision, AssignmentUpdate, Bid, Campaign, CampaignBrief, ContentSubmission,
    CreatorAssignment, ReviewDecision, ScriptSubmission,
};
pub use services::{CampaignClock, CampaignServices};
pub use status::{
    status_category, AssignmentStatus, BidStatus, CampaignReviewStatus, ContentStatus,
    ScriptStatus, StatusCategory,
};
pub use transitions::{CounterAction, Lifecycle, ReviewAction};
pub use types::{Amount, CampaignId, CreatorId, Operation, TimestampUtc};
pub use view::{CampaignBoard, CampaignEventEnvelope};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
