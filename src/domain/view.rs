//! Campaign board projection for the CLI and for callers of the workflow service.
//!
//! The CampaignBoard is derived from CampaignEvent only (no direct mutation).
//! It holds one CampaignData per loaded campaign, built by the same apply
//! logic the aggregate uses.

use crate::domain::cqrs::{CampaignAggregate, CampaignData};
use crate::domain::types::CampaignId;
use crate::domain::CampaignEvent;
use cqrs_es::DomainEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only view of every campaign loaded in this session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignBoard {
    campaigns: BTreeMap<CampaignId, CampaignData>,
    last_event_sequence: u64,
}

impl CampaignBoard {
    /// Apply an event to update the board.
    pub fn apply_event(&mut self, aggregate_id: &str, event: &CampaignEvent, sequence: u64) {
        self.last_event_sequence = sequence;
        let id = CampaignId::from(aggregate_id);

        if let Some(data) = self.campaigns.get_mut(&id) {
            data.apply(event);
            return;
        }

        match event {
            CampaignEvent::CampaignSynced { campaign, .. } => {
                self.campaigns
                    .insert(id, CampaignData::from_campaign(campaign.clone()));
            }
            other => {
                tracing::warn!(
                    "Event {} for unloaded campaign '{}' ignored",
                    other.event_type(),
                    aggregate_id
                );
            }
        }
    }

    pub fn campaign(&self, id: &CampaignId) -> Option<&CampaignData> {
        self.campaigns.get(id)
    }

    pub fn campaigns(&self) -> impl Iterator<Item = &CampaignData> {
        self.campaigns.values()
    }

    pub fn last_event_sequence(&self) -> u64 {
        self.last_event_sequence
    }
}

/// Event envelope for broadcasting to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEventEnvelope {
    pub aggregate_id: String,
    pub sequence: u64,
    pub event: CampaignEvent,
}

impl From<&cqrs_es::EventEnvelope<CampaignAggregate>> for CampaignEventEnvelope {
    fn from(source: &cqrs_es::EventEnvelope<CampaignAggregate>) -> Self {
        Self {
            aggregate_id: source.aggregate_id.clone(),
            sequence: source.sequence as u64,
            event: source.payload.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
