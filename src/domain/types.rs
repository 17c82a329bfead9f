//! Strongly typed domain primitives for the campaign aggregate.
//!
//! These newtypes keep campaign and creator identifiers apart and carry
//! money as whole rupees. They are used throughout the domain model and
//! on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend identifier of a campaign. Used as the aggregate_id in the event store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub String);

impl CampaignId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CampaignId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CampaignId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend identifier of a creator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatorId(pub String);

impl CreatorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CreatorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CreatorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CreatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money amount in whole rupees.
///
/// The backend is loose about number encoding, so deserialization accepts
/// integers, floats (rounded) and numeric strings. Serialization is always
/// a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "LooseNumber", into = "u64")]
pub struct Amount(pub u64);

impl Amount {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<LooseNumber> for Amount {
    type Error = String;

    fn try_from(raw: LooseNumber) -> Result<Self, Self::Error> {
        raw.whole()
            .map(Self)
            .ok_or_else(|| format!("invalid amount: {}", raw))
    }
}

/// A number as the backend may send it: integer, float or numeric string
/// (`"12,500"`, `"₹7000"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseNumber {
    Int(u64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    /// Non-negative whole value; fractions are rounded.
    pub(crate) fn whole(&self) -> Option<u64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => cleaned(text)
                .parse::<u64>()
                .ok()
                .or_else(|| self.non_negative().map(|v| v.round() as u64)),
            Self::Float(_) => self.non_negative().map(|v| v.round() as u64),
        }
    }

    /// Finite, non-negative value.
    pub(crate) fn non_negative(&self) -> Option<f64> {
        let value = match self {
            Self::Int(value) => *value as f64,
            Self::Float(value) => *value,
            Self::Text(text) => cleaned(text).parse::<f64>().ok()?,
        };
        (value.is_finite() && value >= 0.0).then_some(value)
    }
}

impl std::fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(text) => write!(f, "'{}'", text),
        }
    }
}

fn cleaned(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '₹' && *c != '%')
        .collect()
}

/// Kind of mutating request sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AssignmentReview,
    BriefUpload,
    AmountFinalization,
    ScriptReview,
    ContentReview,
    BidSubmission,
    ScriptSubmission,
    ContentSubmission,
    GoLive,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Self::AssignmentReview => "creator review",
            Self::BriefUpload => "brief upload",
            Self::AmountFinalization => "amount finalization",
            Self::ScriptReview => "script review",
            Self::ContentReview => "content review",
            Self::BidSubmission => "bid submission",
            Self::ScriptSubmission => "script submission",
            Self::ContentSubmission => "content submission",
            Self::GoLive => "go-live",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// UTC timestamp wrapper for domain events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimestampUtc(pub DateTime<Utc>);

impl TimestampUtc {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the timestamp as an RFC3339 string.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for TimestampUtc {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
