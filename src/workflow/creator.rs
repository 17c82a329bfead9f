//! Creator-side operations.
//!
//! The creator campaign list carries each campaign together with the
//! creator's own bid, script and content status. Syncing it fills the same
//! aggregate the brand side uses, with a single pairing for the creator, so
//! creator requests pass through the same transition tables and gates.

use super::service::{CampaignWorkflow, LoadedCampaign};
use super::sync::ListKind;
use crate::api::{error_message, CreatorCampaign};
use crate::domain::{
    Amount, CampaignBrief, CampaignCommand, CampaignId, CreatorId, Operation, WorkflowError,
};
use crate::session::{AuthSession, Role};

impl CampaignWorkflow {
    async fn sync_creator_campaign(
        &self,
        creator_id: Option<&CreatorId>,
        listed: &CreatorCampaign,
    ) -> Result<(), WorkflowError> {
        let campaign_id = listed.campaign.id.clone();
        self.execute(
            &campaign_id,
            CampaignCommand::SyncCampaign {
                campaign: listed.campaign.clone(),
            },
        )
        .await?;

        let Some(me) = creator_id else {
            return Ok(());
        };
        let bids = listed.own_bid(me).into_iter().collect();
        self.execute(&campaign_id, CampaignCommand::SyncBids { bids })
            .await?;
        let scripts = listed.own_script(me).into_iter().collect();
        self.execute(&campaign_id, CampaignCommand::SyncScripts { scripts })
            .await?;
        let content = listed.own_content(me).into_iter().collect();
        self.execute(&campaign_id, CampaignCommand::SyncContent { content })
            .await
    }

    /// Lists the campaigns visible to the creator and syncs each one.
    pub async fn creator_campaigns(
        &self,
        session: &AuthSession,
    ) -> Result<Vec<CreatorCampaign>, WorkflowError> {
        session.require_role(Role::Creator)?;
        let ticket = self
            .generations
            .begin(session.role.as_str(), ListKind::Campaigns);
        let owned = session.clone();
        let listed = self
            .call(move |api| api.creator_campaigns(&owned))
            .await
            .map_err(|e| WorkflowError::Api {
                message: error_message(&e),
            })?;

        if !self.generations.is_current(&ticket) {
            tracing::debug!("Discarding superseded creator campaign list response");
            return Ok(listed);
        }

        let creator_id = session.actor_id.clone().map(CreatorId::from);
        for campaign in &listed {
            self.sync_creator_campaign(creator_id.as_ref(), campaign)
                .await?;
        }
        Ok(listed)
    }

    /// Refetches the creator's view of one campaign.
    pub async fn load_creator_campaign(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<LoadedCampaign, WorkflowError> {
        let listed = self.creator_campaigns(session).await?;
        if !listed.iter().any(|c| &c.campaign.id == campaign_id) {
            return Err(WorkflowError::UnknownCampaign {
                campaign_id: campaign_id.to_string(),
            });
        }
        self.loaded(campaign_id, Vec::new()).await
    }

    async fn creator_context(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<CreatorId, WorkflowError> {
        session.require_role(Role::Creator)?;
        let creator_id = CreatorId::from(session.require_actor_id()?);
        if self.snapshot(campaign_id).await.is_none() {
            self.load_creator_campaign(session, campaign_id).await?;
        }
        Ok(creator_id)
    }

    /// Links the creator to a campaign. Nothing local is validated or synced.
    pub async fn link_creator(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<(), WorkflowError> {
        session.require_role(Role::Creator)?;
        let (s, id) = (session.clone(), campaign_id.clone());
        self.call(move |api| api.link_creator(&s, &id))
            .await
            .map_err(|e| WorkflowError::Api {
                message: error_message(&e),
            })?;
        tracing::info!(campaign_id = %campaign_id, "Creator linked");
        Ok(())
    }

    pub async fn submit_bid(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        amount: Amount,
    ) -> Result<LoadedCampaign, WorkflowError> {
        let creator_id = self.creator_context(session, campaign_id).await?;
        let (s, id) = (session.clone(), campaign_id.clone());
        self.submit(
            campaign_id,
            Operation::BidSubmission,
            CampaignCommand::SubmitBid { creator_id, amount },
            move |api| api.submit_bid(&s, &id, amount),
        )
        .await?;
        self.load_creator_campaign(session, campaign_id).await
    }

    pub async fn submit_script(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        text: &str,
    ) -> Result<LoadedCampaign, WorkflowError> {
        let creator_id = self.creator_context(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), text.to_string());
        self.submit(
            campaign_id,
            Operation::ScriptSubmission,
            CampaignCommand::SubmitScript {
                creator_id,
                text: text.to_string(),
            },
            move |api| api.submit_script(&s, &id, &payload),
        )
        .await?;
        self.load_creator_campaign(session, campaign_id).await
    }

    pub async fn upload_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        content_url: &str,
    ) -> Result<LoadedCampaign, WorkflowError> {
        let creator_id = self.creator_context(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), content_url.to_string());
        self.submit(
            campaign_id,
            Operation::ContentSubmission,
            CampaignCommand::SubmitContent {
                creator_id,
                content_url: content_url.to_string(),
            },
            move |api| api.submit_content(&s, &id, &payload),
        )
        .await?;
        self.load_creator_campaign(session, campaign_id).await
    }

    /// Reports the published post. Only approved content can go live.
    pub async fn go_live(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        live_url: &str,
    ) -> Result<LoadedCampaign, WorkflowError> {
        let creator_id = self.creator_context(session, campaign_id).await?;
        let (s, id, payload) = (session.clone(), campaign_id.clone(), live_url.to_string());
        self.submit(
            campaign_id,
            Operation::GoLive,
            CampaignCommand::GoLive {
                creator_id,
                live_url: live_url.to_string(),
            },
            move |api| api.go_live(&s, &id, &payload),
        )
        .await?;
        self.load_creator_campaign(session, campaign_id).await
    }

    pub async fn fetch_creator_campaign_brief(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<CampaignBrief, WorkflowError> {
        session.require_role(Role::Creator)?;
        let (s, id) = (session.clone(), campaign_id.clone());
        self.call(move |api| api.creator_brief(&s, &id))
            .await
            .map_err(|e| WorkflowError::Api {
                message: error_message(&e),
            })
    }
}

#[cfg(test)]
#[path = "tests/creator_tests.rs"]
mod tests;
