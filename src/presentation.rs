//! Text rendering for campaign lists and review queues.
//!
//! Every view of a campaign goes through [`campaign_row`], so the brand and
//! creator listings cannot drift apart.

use crate::domain::{
    status_category, Amount, Bid, Campaign, ContentSubmission, CreatorAssignment,
    ScriptSubmission, WorkflowError,
};

pub const NO_CAMPAIGNS: &str = "No campaigns yet.";
pub const NO_CREATORS: &str = "No creators assigned yet.";
pub const NO_BIDS: &str = "No bids yet.";
pub const NO_SCRIPTS: &str = "No scripts submitted yet.";
pub const NO_CONTENT: &str = "No content submissions yet.";

const SCRIPT_PREVIEW_CHARS: usize = 80;

/// Groups digits the Indian way: last three, then pairs.
pub fn format_inr(amount: Amount) -> String {
    let digits: Vec<char> = amount.value().to_string().chars().collect();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 2);
    for (i, digit) in digits.iter().enumerate() {
        let remaining = len - i;
        if i > 0 && remaining >= 3 && (remaining == 3 || (remaining - 3) % 2 == 0) {
            out.push(',');
        }
        out.push(*digit);
    }
    out
}

pub fn money(symbol: &str, amount: Option<Amount>) -> String {
    match amount {
        Some(amount) => format!("{}{}", symbol, format_inr(amount)),
        None => "-".to_string(),
    }
}

/// Budget comparison line shown next to the bid input.
pub fn budget_line(symbol: &str, budget: Option<Amount>) -> String {
    match budget {
        Some(_) => format!("Campaign budget: {}", money(symbol, budget)),
        None => "Campaign budget: not set".to_string(),
    }
}

/// Parsed bid input. Empty or zero input keeps submission disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidInput(Amount);

impl BidInput {
    pub fn parse(raw: &str) -> Result<Self, WorkflowError> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ',' | '₹' | ' '))
            .collect();
        if cleaned.is_empty() {
            return Err(WorkflowError::InvalidInput {
                message: "enter a bid amount".to_string(),
            });
        }
        let value: u64 = cleaned.parse().map_err(|_| WorkflowError::InvalidInput {
            message: format!("'{}' is not a whole rupee amount", raw.trim()),
        })?;
        if value == 0 {
            return Err(WorkflowError::InvalidInput {
                message: "bid amount must be greater than zero".to_string(),
            });
        }
        Ok(Self(Amount(value)))
    }

    pub fn amount(self) -> Amount {
        self.0
    }
}

/// `[+] accepted` style badge.
pub fn status_badge(status: &str) -> String {
    format!("[{}] {}", status_category(status).marker(), status)
}

/// The one campaign row used by every listing.
pub fn campaign_row(campaign: &Campaign, symbol: &str) -> String {
    let mut row = format!(
        "{}  {}  {}  budget {}",
        campaign.id,
        campaign.name,
        status_badge(campaign.review_status.as_str()),
        money(symbol, campaign.total_budget)
    );
    if campaign.brief_completed {
        row.push_str("  brief ready");
    }
    if let Some(date) = &campaign.go_live_date {
        row.push_str(&format!("  live by {}", date));
    }
    row
}

pub fn campaign_lines<'a>(
    campaigns: impl IntoIterator<Item = &'a Campaign>,
    symbol: &str,
) -> Vec<String> {
    let lines: Vec<String> = campaigns
        .into_iter()
        .map(|c| campaign_row(c, symbol))
        .collect();
    or_empty(lines, NO_CAMPAIGNS)
}

pub fn assignment_lines(assignments: &[&CreatorAssignment]) -> Vec<String> {
    let lines = assignments
        .iter()
        .map(|a| {
            let mut line = format!(
                "{}  {}  {}",
                a.creator_id,
                a.name,
                status_badge(a.status.as_str())
            );
            if let Some(handle) = &a.handle {
                line.push_str(&format!("  {}", handle));
            }
            if let Some(followers) = a.followers {
                line.push_str(&format!("  {} followers", followers));
            }
            if let Some(comment) = &a.comment {
                line.push_str(&format!("  \"{}\"", comment));
            }
            line
        })
        .collect();
    or_empty(lines, NO_CREATORS)
}

pub fn bid_lines(bids: &[&Bid], symbol: &str) -> Vec<String> {
    let lines = bids
        .iter()
        .map(|b| {
            let mut line = format!(
                "{}  {}  bid {}",
                b.creator_id,
                status_badge(b.status.as_str()),
                money(symbol, b.bid_amount)
            );
            if b.proposed_amount.is_some() {
                line.push_str(&format!("  counter {}", money(symbol, b.proposed_amount)));
            }
            line
        })
        .collect();
    or_empty(lines, NO_BIDS)
}

pub fn script_lines(scripts: &[&ScriptSubmission]) -> Vec<String> {
    let lines = scripts
        .iter()
        .map(|s| {
            let mut line = format!(
                "{}  {}  {}",
                s.creator_id,
                status_badge(s.status.as_str()),
                preview(&s.content)
            );
            if let Some(feedback) = &s.feedback {
                line.push_str(&format!("  feedback: {}", feedback));
            }
            line
        })
        .collect();
    or_empty(lines, NO_SCRIPTS)
}

pub fn content_lines(content: &[&ContentSubmission]) -> Vec<String> {
    let lines = content
        .iter()
        .map(|c| {
            let mut line = format!("{}  {}", c.creator_id, status_badge(c.status.as_str()));
            if let Some(url) = &c.content_url {
                line.push_str(&format!("  {}", url));
            }
            if let Some(live) = &c.live_url {
                line.push_str(&format!("  live at {}", live));
            }
            if let Some(feedback) = &c.feedback {
                line.push_str(&format!("  feedback: {}", feedback));
            }
            line
        })
        .collect();
    or_empty(lines, NO_CONTENT)
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SCRIPT_PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(SCRIPT_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}

fn or_empty(lines: Vec<String>, empty: &str) -> Vec<String> {
    if lines.is_empty() {
        vec![empty.to_string()]
    } else {
        lines
    }
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
