//! Transition tables for the campaign sub-workflows.
//!
//! Every status change the client may request is listed here as a row of
//! `(from, action, to)` using canonical backend codes. `NONE` stands for
//! "no record yet". The aggregate consults these tables before emitting an
//! event, so a request the backend would reject never leaves the client.

use crate::domain::status::{
    AssignmentStatus, BidStatus, CampaignReviewStatus, ContentStatus, ScriptStatus,
};
use serde::{Deserialize, Serialize};

/// Placeholder `from` code for a sub-workflow record that does not exist yet.
pub const NONE: &str = "none";

/// One permitted status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: &'static str,
    pub action: &'static str,
    pub to: &'static str,
}

const fn row(from: &'static str, action: &'static str, to: &'static str) -> Transition {
    Transition { from, action, to }
}

/// Looks up the target code for `action` taken from `from`.
pub fn step(table: &[Transition], from: &str, action: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|t| t.from == from && t.action == action)
        .map(|t| t.to)
}

/// A status vocabulary with an attached transition table.
pub trait Lifecycle: Sized {
    const TABLE: &'static [Transition];

    fn code(&self) -> &str;

    fn from_code(code: &str) -> Self;

    /// Returns the status reached by `action`, or `None` when the table has no such row.
    fn next(current: Option<&Self>, action: &str) -> Option<Self> {
        let from = current.map(Self::code).unwrap_or(NONE);
        step(Self::TABLE, from, action).map(Self::from_code)
    }

    /// Actions the table allows from `current`.
    fn allowed_actions(current: Option<&Self>) -> Vec<&'static str> {
        let from = current.map(Self::code).unwrap_or(NONE);
        Self::TABLE
            .iter()
            .filter(|t| t.from == from)
            .map(|t| t.action)
            .collect()
    }
}

/// Brand decision on a script or a content submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
    RequestRevision,
}

impl ReviewAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::RequestRevision => "request_revision",
        }
    }

    /// Reject and request-revision must explain themselves to the creator.
    pub fn requires_feedback(self) -> bool {
        !matches!(self, Self::Approve)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            "request_revision" | "revise" => Some(Self::RequestRevision),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brand response to a counter-offer on a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterAction {
    AcceptCounter,
    RejectCounter,
}

impl CounterAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AcceptCounter => "accept_counter",
            Self::RejectCounter => "reject_counter",
        }
    }
}

impl std::fmt::Display for CounterAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ACTION_SUBMIT: &str = "submit";
pub const ACTION_GO_LIVE: &str = "go_live";
pub const ACTION_BRAND_SUBMIT: &str = "brand_submit";
pub const ACTION_ADMIN_FINALIZE: &str = "admin_finalize";

const CAMPAIGN_REVIEW_TABLE: &[Transition] = &[
    row("creators_pending", ACTION_BRAND_SUBMIT, "creators_in_review"),
    row("creators_in_review", ACTION_ADMIN_FINALIZE, "creators_are_final"),
];

// The brand may flip any proposed creator between the three editable
// states while the roster is still pending.
const ASSIGNMENT_TABLE: &[Transition] = &[
    row("pending", "pending", "pending"),
    row("pending", "accepted", "accepted"),
    row("pending", "rejected", "rejected"),
    row("accepted", "pending", "pending"),
    row("accepted", "accepted", "accepted"),
    row("accepted", "rejected", "rejected"),
    row("rejected", "pending", "pending"),
    row("rejected", "accepted", "accepted"),
    row("rejected", "rejected", "rejected"),
    row("negotiated", "pending", "pending"),
    row("negotiated", "accepted", "accepted"),
    row("negotiated", "rejected", "rejected"),
];

const BID_TABLE: &[Transition] = &[
    row(NONE, ACTION_SUBMIT, "bid_submitted"),
    row("amount_negotiated", "accept_counter", "amount_finalized"),
    row("amount_negotiated", "reject_counter", "amount_rejected"),
];

// Rejection is terminal; only a requested revision reopens submission.
const SCRIPT_TABLE: &[Transition] = &[
    row(NONE, ACTION_SUBMIT, "script_pending"),
    row("script_revision_requested", ACTION_SUBMIT, "script_pending"),
    row("script_pending", "approve", "script_approved"),
    row("script_pending", "reject", "script_rejected"),
    row("script_pending", "request_revision", "script_revision_requested"),
];

const CONTENT_TABLE: &[Transition] = &[
    row(NONE, ACTION_SUBMIT, "content_pending"),
    row("content_revision_requested", ACTION_SUBMIT, "content_pending"),
    row("content_pending", "approve", "content_approved"),
    row("content_pending", "reject", "content_rejected"),
    row("content_pending", "request_revision", "content_revision_requested"),
    row("content_approved", ACTION_GO_LIVE, "content_live"),
];

impl Lifecycle for CampaignReviewStatus {
    const TABLE: &'static [Transition] = CAMPAIGN_REVIEW_TABLE;

    fn code(&self) -> &str {
        self.as_str()
    }

    fn from_code(code: &str) -> Self {
        Self::parse(code)
    }
}

impl Lifecycle for AssignmentStatus {
    const TABLE: &'static [Transition] = ASSIGNMENT_TABLE;

    fn code(&self) -> &str {
        self.as_str()
    }

    fn from_code(code: &str) -> Self {
        Self::parse(code)
    }
}

impl Lifecycle for BidStatus {
    const TABLE: &'static [Transition] = BID_TABLE;

    fn code(&self) -> &str {
        self.as_str()
    }

    fn from_code(code: &str) -> Self {
        Self::parse(code)
    }
}

impl Lifecycle for ScriptStatus {
    const TABLE: &'static [Transition] = SCRIPT_TABLE;

    fn code(&self) -> &str {
        self.as_str()
    }

    fn from_code(code: &str) -> Self {
        Self::parse(code)
    }
}

impl Lifecycle for ContentStatus {
    const TABLE: &'static [Transition] = CONTENT_TABLE;

    fn code(&self) -> &str {
        self.as_str()
    }

    fn from_code(code: &str) -> Self {
        Self::parse(code)
    }
}

#[cfg(test)]
#[path = "tests/transitions_tests.rs"]
mod tests;
