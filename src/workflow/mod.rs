//! Client-side campaign workflow: validate, send, record, resync.

pub mod batch;
mod creator;
pub mod review_assist;
pub mod service;
pub mod sync;

pub use batch::{AssignmentDraft, ReviewBatch};
pub use review_assist::{ChecklistEvaluator, ScriptAssessment, ScriptEvaluator};
pub use service::{CampaignWorkflow, LoadedCampaign};
pub use sync::{ListGenerations, ListKind};

#[cfg(test)]
#[path = "tests/mock_api.rs"]
pub(crate) mod mock_api;
