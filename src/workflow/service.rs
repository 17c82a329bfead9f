//! The campaign workflow service.
//!
//! Every mutating operation follows the same path: the aggregate validates
//! the request and marks it in flight, the request goes to the backend, the
//! outcome is recorded, and on success the affected lists are refetched.
//! Local state only ever changes through those refetches.

use super::sync::{ListGenerations, ListKind};
use crate::api::{error_message, ApiError, CampaignApi, Profile};
use crate::config::CollabConfig;
use crate::domain::{
    AmountDecision, AssignmentUpdate, BoardQuery, Campaign, CampaignAggregate, CampaignBoard,
    CampaignBrief, CampaignCommand, CampaignData, CampaignEventEnvelope, CampaignId,
    CampaignServices, Operation, ReviewDecision, WorkflowError,
};
use crate::session::{AuthSession, Role, SessionStore};
use crate::structured_logger::StructuredLogger;
use cqrs_es::mem_store::MemStore;
use cqrs_es::{AggregateError, CqrsFramework};
use std::sync::Arc;
use tokio::sync::{broadcast, watch, RwLock};

pub(super) type CampaignCqrs = CqrsFramework<CampaignAggregate, MemStore<CampaignAggregate>>;

/// A campaign snapshot after a refresh, plus the lists that fell back to
/// empty because their fetch failed.
#[derive(Debug, Clone)]
pub struct LoadedCampaign {
    pub data: CampaignData,
    pub degraded: Vec<ListKind>,
}

pub struct CampaignWorkflow {
    pub(super) api: Arc<dyn CampaignApi>,
    cqrs: CampaignCqrs,
    board: Arc<RwLock<CampaignBoard>>,
    snapshot_rx: watch::Receiver<CampaignBoard>,
    event_tx: broadcast::Sender<CampaignEventEnvelope>,
    pub(super) generations: ListGenerations,
    degrade_lists: bool,
    logger: Option<Arc<StructuredLogger>>,
}

impl CampaignWorkflow {
    pub fn new(
        api: Arc<dyn CampaignApi>,
        config: &CollabConfig,
        logger: Option<Arc<StructuredLogger>>,
    ) -> Self {
        let board = Arc::new(RwLock::new(CampaignBoard::default()));
        let (snapshot_tx, snapshot_rx) = watch::channel(CampaignBoard::default());
        let (event_tx, _) = broadcast::channel(256);

        let mut query = BoardQuery::new(board.clone(), snapshot_tx, event_tx.clone());
        if let Some(logger) = &logger {
            query = query.with_logger(logger.clone());
        }
        let cqrs = CqrsFramework::new(
            MemStore::<CampaignAggregate>::default(),
            vec![Box::new(query)],
            CampaignServices::default(),
        );

        Self {
            api,
            cqrs,
            board,
            snapshot_rx,
            event_tx,
            generations: ListGenerations::new(),
            degrade_lists: config.lists.degrade_on_error,
            logger,
        }
    }

    /// Latest board after every projected event.
    pub fn subscribe_board(&self) -> watch::Receiver<CampaignBoard> {
        self.snapshot_rx.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CampaignEventEnvelope> {
        self.event_tx.subscribe()
    }

    pub async fn snapshot(&self, campaign_id: &CampaignId) -> Option<CampaignData> {
        self.board.read().await.campaign(campaign_id).cloned()
    }

    pub(super) async fn execute(
        &self,
        campaign_id: &CampaignId,
        command: CampaignCommand,
    ) -> Result<(), WorkflowError> {
        if let Some(logger) = &self.logger {
            logger.log_campaign_command(campaign_id.as_str(), &command);
        }
        tracing::debug!(campaign_id = %campaign_id, command = command.name(), "Executing command");

        match self.cqrs.execute(campaign_id.as_str(), command).await {
            Ok(()) => Ok(()),
            Err(AggregateError::UserError(err)) => Err(err),
            Err(AggregateError::AggregateConflict) => Err(WorkflowError::ConcurrencyConflict {
                message: "campaign was modified concurrently".to_string(),
            }),
            Err(err) => Err(WorkflowError::StorageFailure {
                message: err.to_string(),
            }),
        }
    }

    /// Runs a blocking API call off the async runtime.
    pub(super) async fn call<T, F>(&self, request: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CampaignApi) -> Result<T, ApiError> + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        match tokio::task::spawn_blocking(move || request(api.as_ref())).await {
            Ok(result) => result,
            Err(e) => Err(ApiError::Network {
                message: format!("request task failed: {}", e),
            }),
        }
    }

    /// Validates `command`, sends `request`, and records the outcome.
    ///
    /// Backend failures come back as `WorkflowError::Api` carrying the
    /// user-facing message; the snapshot is left as it was.
    pub(super) async fn submit<F>(
        &self,
        campaign_id: &CampaignId,
        operation: Operation,
        command: CampaignCommand,
        request: F,
    ) -> Result<(), WorkflowError>
    where
        F: FnOnce(&dyn CampaignApi) -> Result<(), ApiError> + Send + 'static,
    {
        self.execute(campaign_id, command).await?;

        match self.call(request).await {
            Ok(()) => {
                tracing::info!(campaign_id = %campaign_id, "{} accepted", operation);
                self.execute(campaign_id, CampaignCommand::CompleteRequest { operation })
                    .await
            }
            Err(e) => {
                let message = error_message(&e);
                tracing::warn!(
                    campaign_id = %campaign_id,
                    status = ?e.status(),
                    error = %e,
                    "{} failed",
                    operation
                );
                self.execute(
                    campaign_id,
                    CampaignCommand::FailRequest {
                        operation,
                        message: message.clone(),
                    },
                )
                .await?;
                Err(WorkflowError::Api { message })
            }
        }
    }

    /// Fetches one list and syncs it, unless a newer fetch of the same list
    /// was started meanwhile.
    ///
    /// Non-critical lists fall back to empty on failure when configured to;
    /// returns true when that happened.
    pub(super) async fn sync_list<T, F>(
        &self,
        campaign_id: &CampaignId,
        kind: ListKind,
        critical: bool,
        fetch: F,
        into_command: fn(Vec<T>) -> CampaignCommand,
    ) -> Result<bool, WorkflowError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CampaignApi) -> Result<Vec<T>, ApiError> + Send + 'static,
    {
        let ticket = self.generations.begin(campaign_id.as_str(), kind);
        let result = self.call(fetch).await;

        if !self.generations.is_current(&ticket) {
            tracing::debug!(
                campaign_id = %campaign_id,
                list = %kind,
                generation = ticket.generation(),
                "Discarding superseded list response"
            );
            return Ok(false);
        }

        match result {
            Ok(items) => {
                self.execute(campaign_id, into_command(items)).await?;
                Ok(false)
            }
            Err(e) if !critical && self.degrade_lists => {
                tracing::warn!(
                    campaign_id = %campaign_id,
                    list = %kind,
                    error = %e,
                    "List fetch failed; showing it as empty"
                );
                self.execute(campaign_id, into_command(Vec::new())).await?;
                Ok(true)
            }
            Err(e) => Err(WorkflowError::Api {
                message: error_message(&e),
            }),
        }
    }

    /// Fetches the account profile.
    ///
    /// A 401 here means the token is no longer valid: the saved session is
    /// removed and `SessionExpired` is returned. Other failures leave the
    /// session alone.
    pub async fn fetch_profile(&self, session: &AuthSession) -> Result<Profile, WorkflowError> {
        let role = session.role;
        let owned = session.clone();
        let result = match role {
            Role::Brand => self.call(move |api| api.brand_profile(&owned)).await,
            Role::Creator => self.call(move |api| api.creator_profile(&owned)).await,
            Role::Admin => {
                return Err(WorkflowError::WrongRole {
                    expected: "brand or creator".to_string(),
                    actual: role.to_string(),
                })
            }
        };

        match result {
            Ok(profile) => Ok(profile),
            Err(e) if e.is_unauthorized() => {
                tracing::warn!(role = %role, "Profile fetch unauthorized; ending session");
                if let Err(clear_err) = SessionStore::clear(role) {
                    tracing::error!("Failed to remove session file: {:#}", clear_err);
                }
                if let Some(logger) = &self.logger {
                    logger.log_session_change(role.as_str(), "expired");
                }
                Err(WorkflowError::SessionExpired)
            }
            Err(e) => Err(WorkflowError::Api {
                message: error_message(&e),
            }),
        }
    }

    // Brand operations

    /// Lists the brand's campaigns and syncs each into its aggregate.
    pub async fn list_campaigns(
        &self,
        session: &AuthSession,
    ) -> Result<Vec<Campaign>, WorkflowError> {
        session.require_role(Role::Brand)?;
        let ticket = self.generations.begin(session.role.as_str(), ListKind::Campaigns);
        let owned = session.clone();
        let campaigns = self
            .call(move |api| api.brand_campaigns(&owned))
            .await
            .map_err(|e| WorkflowError::Api {
                message: error_message(&e),
            })?;

        if !self.generations.is_current(&ticket) {
            tracing::debug!("Discarding superseded campaign list response");
            let board = self.board.read().await;
            return Ok(board.campaigns().map(|d| d.campaign().clone()).collect());
        }

        for campaign in &campaigns {
            let id = campaign.id.clone();
            self.execute(
                &id,
                CampaignCommand::SyncCampaign {
                    campaign: campaign.clone(),
                },
            )
            .await?;
        }
        Ok(campaigns)
    }

    /// Fetches a campaign and every list its phase makes visible.
    ///
    /// Bids appear once creators are final; scripts and content once the
    /// brief is complete.
    pub async fn load_campaign(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<LoadedCampaign, WorkflowError> {
        let campaigns = self.list_campaigns(session).await?;
        let campaign = campaigns
            .into_iter()
            .find(|c| &c.id == campaign_id)
            .ok_or_else(|| WorkflowError::UnknownCampaign {
                campaign_id: campaign_id.to_string(),
            })?;
        let roster_final = campaign.creators_are_final();
        let brief_completed = campaign.brief_completed;

        let mut degraded = Vec::new();

        let (s, id) = (session.clone(), campaign_id.clone());
        self.sync_list(
            campaign_id,
            ListKind::Creators,
            true,
            move |api| api.campaign_creators(&s, &id),
            |assignments| CampaignCommand::SyncAssignments { assignments },
        )
        .await?;

        if roster_final {
            let (s, id) = (session.clone(), campaign_id.clone());
            let failed = self
                .sync_list(
                    campaign_id,
                    ListKind::Bids,
                    false,
                    move |api| api.campaign_bids(&s, &id),
                    |bids| CampaignCommand::SyncBids { bids },
                )
                .await?;
            if failed {
                degraded.push(ListKind::Bids);
            }
        }

        if brief_completed {
            let (s, id) = (session.clone(), campaign_id.clone());
            let failed = self
                .sync_list(
                    campaign_id,
                    ListKind::Scripts,
                    false,
                    move |api| api.campaign_scripts(&s, &id),
                    |scripts| CampaignCommand::SyncScripts { scripts },
                )
                .await?;
            if failed {
                degraded.push(ListKind::Scripts);
            }

            let (s, id) = (session.clone(), campaign_id.clone());
            let failed = self
                .sync_list(
                    campaign_id,
                    ListKind::Content,
                    false,
                    move |api| api.campaign_content(&s, &id),
                    |content| CampaignCommand::SyncContent { content },
                )
                .await?;
            if failed {
                degraded.push(ListKind::Content);
            }
        }

        self.loaded(campaign_id, degraded).await
    }

    pub(super) async fn loaded(
        &self,
        campaign_id: &CampaignId,
        degraded: Vec<ListKind>,
    ) -> Result<LoadedCampaign, WorkflowError> {
        let data = self
            .snapshot(campaign_id)
            .await
            .ok_or(WorkflowError::NotInitialized)?;
        Ok(LoadedCampaign { data, degraded })
    }

    async fn ensure_brand_loaded(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<(), WorkflowError> {
        session.require_role(Role::Brand)?;
        if self.snapshot(campaign_id).await.is_none() {
            self.load_campaign(session, campaign_id).await?;
        }
        Ok(())
    }

    /// Sends the brand's accept/reject decisions on proposed creators.
    pub async fn submit_review(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        updates: Vec<AssignmentUpdate>,
    ) -> Result<LoadedCampaign, WorkflowError> {
        self.ensure_brand_loaded(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), updates.clone());
        self.submit(
            campaign_id,
            Operation::AssignmentReview,
            CampaignCommand::SubmitAssignmentReview { updates },
            move |api| api.respond_to_creators(&s, &id, &payload),
        )
        .await?;
        self.load_campaign(session, campaign_id).await
    }

    pub async fn upload_brief(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        brief: CampaignBrief,
    ) -> Result<LoadedCampaign, WorkflowError> {
        self.ensure_brand_loaded(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), brief.clone());
        self.submit(
            campaign_id,
            Operation::BriefUpload,
            CampaignCommand::UploadBrief { brief },
            move |api| api.upload_brief(&s, &id, &payload),
        )
        .await?;
        self.load_campaign(session, campaign_id).await
    }

    /// Answers counter-offers, then refetches so bids show the backend's view.
    pub async fn finalize_creator_amounts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: Vec<AmountDecision>,
    ) -> Result<LoadedCampaign, WorkflowError> {
        self.ensure_brand_loaded(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), decisions.clone());
        self.submit(
            campaign_id,
            Operation::AmountFinalization,
            CampaignCommand::FinalizeAmounts { decisions },
            move |api| api.finalize_amounts(&s, &id, &payload),
        )
        .await?;
        self.load_campaign(session, campaign_id).await
    }

    pub async fn review_scripts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: Vec<ReviewDecision>,
    ) -> Result<LoadedCampaign, WorkflowError> {
        self.ensure_brand_loaded(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), decisions.clone());
        self.submit(
            campaign_id,
            Operation::ScriptReview,
            CampaignCommand::ReviewScripts { decisions },
            move |api| api.review_scripts(&s, &id, &payload),
        )
        .await?;
        self.load_campaign(session, campaign_id).await
    }

    pub async fn review_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: Vec<ReviewDecision>,
    ) -> Result<LoadedCampaign, WorkflowError> {
        self.ensure_brand_loaded(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), decisions.clone());
        self.submit(
            campaign_id,
            Operation::ContentReview,
            CampaignCommand::ReviewContent { decisions },
            move |api| api.review_content(&s, &id, &payload),
        )
        .await?;
        self.load_campaign(session, campaign_id).await
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
