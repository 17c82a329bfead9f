//! CQRS query handler for campaign event projection.
//!
//! The BoardQuery applies events to the CampaignBoard projection, broadcasts
//! them to subscribers via tokio channels, and mirrors them into the
//! structured audit log when one is attached.

use super::CampaignAggregate;
use crate::domain::view::{CampaignBoard, CampaignEventEnvelope};
use crate::structured_logger::StructuredLogger;
use async_trait::async_trait;
use cqrs_es::Query;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, RwLock};

/// CQRS query handler that maintains the CampaignBoard projection.
pub struct BoardQuery {
    /// In-memory projection of every campaign this session has loaded.
    pub projection: Arc<RwLock<CampaignBoard>>,
    /// Watch channel for snapshot updates (latest board).
    pub snapshot_tx: watch::Sender<CampaignBoard>,
    /// Broadcast channel for event streaming.
    pub event_tx: broadcast::Sender<CampaignEventEnvelope>,
    logger: Option<Arc<StructuredLogger>>,
}

impl BoardQuery {
    /// Creates a new board query handler.
    pub fn new(
        projection: Arc<RwLock<CampaignBoard>>,
        snapshot_tx: watch::Sender<CampaignBoard>,
        event_tx: broadcast::Sender<CampaignEventEnvelope>,
    ) -> Self {
        Self {
            projection,
            snapshot_tx,
            event_tx,
            logger: None,
        }
    }

    /// Attaches a structured logger that receives every projected event.
    pub fn with_logger(mut self, logger: Arc<StructuredLogger>) -> Self {
        self.logger = Some(logger);
        self
    }
}

#[async_trait]
impl Query<CampaignAggregate> for BoardQuery {
    async fn dispatch(
        &self,
        aggregate_id: &str,
        events: &[cqrs_es::EventEnvelope<CampaignAggregate>],
    ) {
        let mut board = self.projection.write().await;

        for event in events {
            board.apply_event(aggregate_id, &event.payload, event.sequence as u64);

            if let Some(logger) = &self.logger {
                logger.log_campaign_event(aggregate_id, &event.payload);
            }

            // No receivers is normal for one-shot CLI commands
            let envelope = CampaignEventEnvelope::from(event);
            if self.event_tx.receiver_count() > 0 {
                if let Err(e) = self.event_tx.send(envelope) {
                    tracing::warn!("Failed to broadcast event: {:?}", e);
                }
            }
        }

        let _ = self.snapshot_tx.send(board.clone());
    }
}

#[cfg(test)]
#[path = "../tests/query_tests.rs"]
mod tests;
