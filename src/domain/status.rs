//! Closed status vocabularies for the campaign and its sub-workflows.
//!
//! The backend speaks in plain status strings. Each vocabulary here is a
//! closed enum with an `Other` variant that preserves anything unrecognised,
//! so unknown values survive a round trip and are never silently coerced.

use serde::{Deserialize, Serialize};

/// Presentation category derived from any status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Positive,
    Negative,
    Caution,
    Neutral,
}

impl StatusCategory {
    /// Short marker used by the CLI renderer.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "x",
            Self::Caution => "!",
            Self::Neutral => "-",
        }
    }
}

const NEGATIVE_PREFIXES: &[&str] = &["reject", "declin", "cancel", "expire", "fail"];
const CAUTION_WORDS: &[&str] = &["pending", "negotiated", "submitted", "waiting"];
const CAUTION_PHRASES: &[&str] = &["revision_requested", "in_review"];
const POSITIVE_WORDS: &[&str] = &[
    "accepted",
    "approved",
    "completed",
    "finalized",
    "final",
    "live",
    "paid",
];

/// Maps any status string to a presentation category.
///
/// Total over all inputs: unknown, empty or oddly cased values yield
/// `Neutral` rather than an error.
pub fn status_category(status: &str) -> StatusCategory {
    let normalized = status.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    let words: Vec<&str> = normalized.split('_').filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return StatusCategory::Neutral;
    }
    if words
        .iter()
        .any(|w| NEGATIVE_PREFIXES.iter().any(|p| w.starts_with(p)))
    {
        return StatusCategory::Negative;
    }
    // Caution wins over positive so a requested revision never reads as done.
    if words.iter().any(|w| CAUTION_WORDS.contains(w))
        || CAUTION_PHRASES.iter().any(|p| normalized.contains(p))
    {
        return StatusCategory::Caution;
    }
    if words.iter().any(|w| POSITIVE_WORDS.contains(w)) {
        return StatusCategory::Positive;
    }
    StatusCategory::Neutral
}

macro_rules! string_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Value the backend sent that this client does not know.
            Other(String),
        }

        impl $name {
            /// Parses a backend status string. Unknown values are preserved.
            pub fn parse(raw: &str) -> Self {
                match raw.trim() {
                    $($code $(| $alias)* => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }

            /// Canonical backend code for this status.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Other(raw) => raw,
                }
            }

            pub fn category(&self) -> StatusCategory {
                status_category(self.as_str())
            }

            pub fn is_other(&self) -> bool {
                matches!(self, Self::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::Other(String::new())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::parse(&raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::parse(raw)
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                status.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_status! {
    /// Lifecycle of the campaign's creator roster.
    CampaignReviewStatus {
        CreatorsPending => "creators_pending",
        CreatorsInReview => "creators_in_review",
        CreatorsAreFinal => "creators_are_final",
    }
}

string_status! {
    /// Brand decision on a proposed creator.
    AssignmentStatus {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
        Negotiated => "negotiated",
    }
}

string_status! {
    /// Negotiation state of a creator's bid.
    BidStatus {
        Submitted => "bid_submitted" | "pending" | "submitted",
        AmountNegotiated => "amount_negotiated",
        AmountFinalized => "amount_finalized",
        AmountRejected => "amount_rejected",
    }
}

string_status! {
    /// Review state of a creator's script.
    ScriptStatus {
        Pending => "script_pending",
        Approved => "script_approved",
        Rejected => "script_rejected",
        RevisionRequested => "script_revision_requested",
    }
}

string_status! {
    /// Review state of a creator's content submission.
    ContentStatus {
        Pending => "content_pending",
        Approved => "content_approved",
        Rejected => "content_rejected",
        RevisionRequested => "content_revision_requested",
        Live => "content_live",
    }
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
