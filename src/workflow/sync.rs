//! Generation tickets for list fetches.
//!
//! Every fetch of a list takes a ticket first. When the response arrives it
//! is applied only if no newer ticket was issued for the same list in the
//! meantime, so a slow superseded response never overwrites a newer one.

use std::collections::HashMap;
use std::sync::Mutex;

/// Lists the client fetches independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Campaigns,
    Creators,
    Bids,
    Scripts,
    Content,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Campaigns => "campaigns",
            Self::Creators => "creators",
            Self::Bids => "bids",
            Self::Scripts => "scripts",
            Self::Content => "content",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    scope: String,
    kind: ListKind,
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct ListGenerations {
    latest: Mutex<HashMap<(String, ListKind), u64>>,
}

impl ListGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket for `kind` within `scope` (a campaign id, or
    /// the session role for top-level lists).
    pub fn begin(&self, scope: &str, kind: ListKind) -> FetchTicket {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        let counter = latest.entry((scope.to_string(), kind)).or_insert(0);
        *counter += 1;
        FetchTicket {
            scope: scope.to_string(),
            kind,
            generation: *counter,
        }
    }

    /// True when no newer ticket exists for the same list.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest
            .get(&(ticket.scope.clone(), ticket.kind))
            .is_some_and(|newest| *newest == ticket.generation)
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
