//! Error types for the campaign workflow domain.

use std::fmt::{Display, Formatter};

/// Errors that can occur during campaign command handling and workflow operations.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// Command executed before the campaign snapshot was loaded.
    NotInitialized,
    /// The campaign is not in a state that accepts the operation.
    ReviewLocked { status: String },
    /// Nothing to submit.
    NoUpdates,
    /// A reject or revision request was made without feedback.
    FeedbackRequired { creator_id: String, action: String },
    /// A decision references a creator with no matching record.
    UnknownCreator { creator_id: String },
    /// The same creator appears twice in one batch.
    DuplicateDecision { creator_id: String },
    /// Invalid state transition attempted.
    InvalidTransition { message: String },
    /// A phase gate is closed (brief incomplete, roster not final, script not approved).
    GateClosed { message: String },
    /// A previous request for this campaign has not finished.
    RequestInFlight { operation: String },
    /// Client-side input validation failed.
    InvalidInput { message: String },
    /// The session does not have the role the operation needs.
    WrongRole { expected: String, actual: String },
    /// The backend rejected the session token.
    SessionExpired,
    /// The campaign is not visible to this session.
    UnknownCampaign { campaign_id: String },
    /// The backend or the network failed; carries the user-facing message.
    Api { message: String },
    /// Storage/persistence failure.
    StorageFailure { message: String },
    /// Optimistic lock failure (concurrent modification detected).
    ConcurrencyConflict { message: String },
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "campaign not loaded"),
            Self::ReviewLocked { status } => write!(
                f,
                "creator review is locked (campaign status '{}')",
                status
            ),
            Self::NoUpdates => write!(f, "No updates to submit"),
            Self::FeedbackRequired { creator_id, action } => write!(
                f,
                "feedback is required to {} for creator '{}'",
                action, creator_id
            ),
            Self::UnknownCreator { creator_id } => {
                write!(f, "no record for creator '{}' in this campaign", creator_id)
            }
            Self::DuplicateDecision { creator_id } => {
                write!(f, "creator '{}' appears more than once", creator_id)
            }
            Self::InvalidTransition { message } => write!(f, "invalid transition: {}", message),
            Self::GateClosed { message } => write!(f, "not available yet: {}", message),
            Self::RequestInFlight { operation } => {
                write!(f, "a {} request is already in progress", operation)
            }
            Self::InvalidInput { message } => write!(f, "invalid input: {}", message),
            Self::WrongRole { expected, actual } => write!(
                f,
                "this operation needs a {} session (logged in as {})",
                expected, actual
            ),
            Self::SessionExpired => write!(f, "session expired, please log in again"),
            Self::UnknownCampaign { campaign_id } => {
                write!(f, "campaign '{}' not found", campaign_id)
            }
            Self::Api { message } => write!(f, "{}", message),
            Self::StorageFailure { message } => write!(f, "storage failure: {}", message),
            Self::ConcurrencyConflict { message } => write!(f, "concurrency conflict: {}", message),
        }
    }
}

impl std::error::Error for WorkflowError {}
