//! CQRS core types for the campaign aggregate.
//!
//! This module contains the core CQRS types:
//! - **Commands**: Intent to sync or to send a request
//! - **Events**: Facts that have happened
//! - **Aggregate**: Command validation and event application
//! - **Query**: Read-side projection

pub mod commands;
pub mod events;
mod guards;
pub mod query;

pub use commands::CampaignCommand;
pub use events::CampaignEvent;
pub use query::BoardQuery;

use crate::domain::errors::WorkflowError;
use crate::domain::model::{
    Bid, Campaign, ContentSubmission, CreatorAssignment, ScriptSubmission,
};
use crate::domain::services::CampaignServices;
use crate::domain::types::{CreatorId, Operation};
use async_trait::async_trait;
use cqrs_es::Aggregate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything known about one (campaign, creator) pairing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub assignment: Option<CreatorAssignment>,
    pub bid: Option<Bid>,
    pub script: Option<ScriptSubmission>,
    pub content: Option<ContentSubmission>,
}

impl Pairing {
    fn is_empty(&self) -> bool {
        self.assignment.is_none()
            && self.bid.is_none()
            && self.script.is_none()
            && self.content.is_none()
    }
}

/// Last synced campaign snapshot plus the in-flight request marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignData {
    campaign: Campaign,
    pairings: BTreeMap<CreatorId, Pairing>,
    in_flight: Option<Operation>,
    last_failure: Option<String>,
}

impl CampaignData {
    pub(crate) fn from_campaign(campaign: Campaign) -> Self {
        Self {
            campaign,
            pairings: BTreeMap::new(),
            in_flight: None,
            last_failure: None,
        }
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn pairings(&self) -> &BTreeMap<CreatorId, Pairing> {
        &self.pairings
    }

    pub fn pairing(&self, creator_id: &CreatorId) -> Option<&Pairing> {
        self.pairings.get(creator_id)
    }

    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn assignments(&self) -> Vec<&CreatorAssignment> {
        self.pairings
            .values()
            .filter_map(|p| p.assignment.as_ref())
            .collect()
    }

    pub fn bids(&self) -> Vec<&Bid> {
        self.pairings.values().filter_map(|p| p.bid.as_ref()).collect()
    }

    pub fn scripts(&self) -> Vec<&ScriptSubmission> {
        self.pairings
            .values()
            .filter_map(|p| p.script.as_ref())
            .collect()
    }

    pub fn content(&self) -> Vec<&ContentSubmission> {
        self.pairings
            .values()
            .filter_map(|p| p.content.as_ref())
            .collect()
    }

    /// Applies an event. Sync events replace their slice of state wholesale,
    /// so applying the same snapshot twice yields the same data.
    pub(crate) fn apply(&mut self, event: &CampaignEvent) {
        match event {
            CampaignEvent::CampaignSynced { campaign, .. } => {
                self.campaign = campaign.clone();
            }
            CampaignEvent::AssignmentsSynced { assignments, .. } => {
                self.replace_slot(assignments, |a| &a.creator_id, |p| &mut p.assignment);
            }
            CampaignEvent::BidsSynced { bids, .. } => {
                self.replace_slot(bids, |b| &b.creator_id, |p| &mut p.bid);
            }
            CampaignEvent::ScriptsSynced { scripts, .. } => {
                self.replace_slot(scripts, |s| &s.creator_id, |p| &mut p.script);
            }
            CampaignEvent::ContentSynced { content, .. } => {
                self.replace_slot(content, |c| &c.creator_id, |p| &mut p.content);
            }
            CampaignEvent::RequestCompleted { .. } => {
                self.in_flight = None;
            }
            CampaignEvent::RequestFailed { message, .. } => {
                self.in_flight = None;
                self.last_failure = Some(message.clone());
            }
            submitted => {
                if let Some(operation) = submitted.opened_operation() {
                    self.in_flight = Some(operation);
                    self.last_failure = None;
                }
            }
        }
    }

    fn replace_slot<T: Clone>(
        &mut self,
        items: &[T],
        key: impl Fn(&T) -> &CreatorId,
        slot: impl Fn(&mut Pairing) -> &mut Option<T>,
    ) {
        for pairing in self.pairings.values_mut() {
            *slot(pairing) = None;
        }
        for item in items {
            let pairing = self.pairings.entry(key(item).clone()).or_default();
            *slot(pairing) = Some(item.clone());
        }
        self.pairings.retain(|_, pairing| !pairing.is_empty());
    }
}

/// Campaign aggregate state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub enum CampaignState {
    /// No snapshot has been synced yet.
    #[default]
    Unloaded,
    /// Snapshot present (boxed for memory efficiency).
    Loaded(Box<CampaignData>),
}

/// The campaign aggregate, one per campaign id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CampaignAggregate {
    pub state: CampaignState,
}

#[async_trait]
impl Aggregate for CampaignAggregate {
    type Command = CampaignCommand;
    type Event = CampaignEvent;
    type Error = WorkflowError;
    type Services = CampaignServices;

    fn aggregate_type() -> String {
        "campaign".to_string()
    }

    async fn handle(
        &self,
        command: Self::Command,
        services: &Self::Services,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        let now = services.clock.now();

        match (&self.state, command) {
            // SyncCampaign initializes or refreshes
            (_, CampaignCommand::SyncCampaign { campaign }) => {
                Ok(vec![CampaignEvent::CampaignSynced {
                    campaign,
                    synced_at: now,
                }])
            }

            (CampaignState::Unloaded, _cmd) => Err(WorkflowError::NotInitialized),

            // List syncs are always accepted, even while a request is outstanding
            (CampaignState::Loaded(_), CampaignCommand::SyncAssignments { assignments }) => {
                Ok(vec![CampaignEvent::AssignmentsSynced {
                    assignments,
                    synced_at: now,
                }])
            }
            (CampaignState::Loaded(_), CampaignCommand::SyncBids { bids }) => {
                Ok(vec![CampaignEvent::BidsSynced {
                    bids,
                    synced_at: now,
                }])
            }
            (CampaignState::Loaded(_), CampaignCommand::SyncScripts { scripts }) => {
                Ok(vec![CampaignEvent::ScriptsSynced {
                    scripts,
                    synced_at: now,
                }])
            }
            (CampaignState::Loaded(_), CampaignCommand::SyncContent { content }) => {
                Ok(vec![CampaignEvent::ContentSynced {
                    content,
                    synced_at: now,
                }])
            }

            // Request outcome must match the outstanding request
            (CampaignState::Loaded(data), CampaignCommand::CompleteRequest { operation })
                if data.in_flight == Some(operation) =>
            {
                Ok(vec![CampaignEvent::RequestCompleted {
                    operation,
                    completed_at: now,
                }])
            }
            (
                CampaignState::Loaded(data),
                CampaignCommand::FailRequest { operation, message },
            ) if data.in_flight == Some(operation) => Ok(vec![CampaignEvent::RequestFailed {
                operation,
                message,
                failed_at: now,
            }]),
            (
                CampaignState::Loaded(_),
                CampaignCommand::CompleteRequest { operation }
                | CampaignCommand::FailRequest { operation, .. },
            ) => Err(WorkflowError::InvalidTransition {
                message: format!("no {} request is outstanding", operation),
            }),

            // One request at a time per campaign
            (CampaignState::Loaded(data), cmd) if data.in_flight.is_some() => {
                let operation = data.in_flight.map(Operation::label).unwrap_or_default();
                tracing::debug!("Rejected {} while {} is in flight", cmd.name(), operation);
                Err(WorkflowError::RequestInFlight {
                    operation: operation.to_string(),
                })
            }

            (CampaignState::Loaded(data), CampaignCommand::SubmitAssignmentReview { updates }) => {
                data.check_assignment_review(&updates)?;
                Ok(vec![CampaignEvent::AssignmentReviewSubmitted {
                    updates,
                    submitted_at: now,
                }])
            }

            (CampaignState::Loaded(data), CampaignCommand::UploadBrief { brief }) => {
                data.check_brief(&brief)?;
                Ok(vec![CampaignEvent::BriefUploadSubmitted {
                    brief,
                    submitted_at: now,
                }])
            }

            (CampaignState::Loaded(data), CampaignCommand::FinalizeAmounts { decisions }) => {
                data.check_amount_decisions(&decisions)?;
                Ok(vec![CampaignEvent::AmountFinalizationSubmitted {
                    decisions,
                    submitted_at: now,
                }])
            }

            (CampaignState::Loaded(data), CampaignCommand::ReviewScripts { decisions }) => {
                data.check_script_reviews(&decisions)?;
                Ok(vec![CampaignEvent::ScriptReviewSubmitted {
                    decisions,
                    submitted_at: now,
                }])
            }

            (CampaignState::Loaded(data), CampaignCommand::ReviewContent { decisions }) => {
                data.check_content_reviews(&decisions)?;
                Ok(vec![CampaignEvent::ContentReviewSubmitted {
                    decisions,
                    submitted_at: now,
                }])
            }

            (CampaignState::Loaded(data), CampaignCommand::SubmitBid { creator_id, amount }) => {
                data.check_bid(&creator_id, amount)?;
                Ok(vec![CampaignEvent::BidSubmitted {
                    creator_id,
                    amount,
                    submitted_at: now,
                }])
            }

            (CampaignState::Loaded(data), CampaignCommand::SubmitScript { creator_id, text }) => {
                data.check_script_submission(&creator_id, &text)?;
                Ok(vec![CampaignEvent::ScriptSubmitted {
                    creator_id,
                    text,
                    submitted_at: now,
                }])
            }

            (
                CampaignState::Loaded(data),
                CampaignCommand::SubmitContent {
                    creator_id,
                    content_url,
                },
            ) => {
                data.check_content_submission(&creator_id, &content_url)?;
                Ok(vec![CampaignEvent::ContentSubmitted {
                    creator_id,
                    content_url,
                    submitted_at: now,
                }])
            }

            (
                CampaignState::Loaded(data),
                CampaignCommand::GoLive {
                    creator_id,
                    live_url,
                },
            ) => {
                data.check_go_live(&creator_id, &live_url)?;
                Ok(vec![CampaignEvent::GoLiveSubmitted {
                    creator_id,
                    live_url,
                    submitted_at: now,
                }])
            }
        }
    }

    fn apply(&mut self, event: Self::Event) {
        match (&mut self.state, event) {
            (CampaignState::Unloaded, CampaignEvent::CampaignSynced { campaign, .. }) => {
                self.state = CampaignState::Loaded(Box::new(CampaignData::from_campaign(campaign)));
            }
            (CampaignState::Loaded(data), event) => data.apply(&event),
            // Ignore events on wrong state (shouldn't happen with correct event sourcing)
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../tests/aggregate_tests.rs"]
mod tests;
