//! Brand commands

use super::{print_lines, session_context, split_pair};
use crate::domain::{
    AmountDecision, AssignmentStatus, CampaignBrief, CampaignId, CounterAction, CreatorId,
    Lifecycle, ReviewAction,
};
use crate::presentation::{
    assignment_lines, bid_lines, campaign_lines, campaign_row, content_lines, script_lines,
};
use crate::session::Role;
use crate::workflow::{
    AssignmentDraft, ChecklistEvaluator, ListKind, LoadedCampaign, ReviewBatch, ScriptEvaluator,
};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

/// Brand subcommands
#[derive(Subcommand, Debug)]
pub enum BrandCommands {
    /// List the brand's campaigns
    Campaigns,

    /// Show one campaign with every list its phase allows
    Show { campaign_id: String },

    /// Accept or reject proposed creators
    ReviewCreators {
        campaign_id: String,
        #[arg(long = "accept", value_name = "CREATOR")]
        accept: Vec<String>,
        #[arg(long = "reject", value_name = "CREATOR")]
        reject: Vec<String>,
        #[arg(long = "pending", value_name = "CREATOR")]
        pending: Vec<String>,
        /// Comment for a creator, as <creator-id>=<text>
        #[arg(long = "comment", value_name = "CREATOR=TEXT")]
        comment: Vec<String>,
    },

    /// Upload the campaign brief
    UploadBrief {
        campaign_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        primary_focus: String,
        #[arg(long)]
        secondary_focus: Option<String>,
        #[arg(long)]
        dos: Option<String>,
        #[arg(long)]
        donts: Option<String>,
        #[arg(long)]
        cta: String,
        #[arg(long)]
        sample_video_url: String,
    },

    /// Accept or reject creator counter-offers
    FinalizeAmounts {
        campaign_id: String,
        #[arg(long = "accept", value_name = "CREATOR")]
        accept: Vec<String>,
        #[arg(long = "reject", value_name = "CREATOR")]
        reject: Vec<String>,
    },

    /// Review submitted scripts in one batch
    ReviewScripts {
        campaign_id: String,
        #[command(flatten)]
        decisions: ReviewArgs,
    },

    /// Run the assisted checklist on one creator's script, then optionally
    /// decide on it
    AssistScript {
        campaign_id: String,
        creator_id: String,
        #[command(flatten)]
        decision: AssistDecision,
    },

    /// Review submitted content in one batch
    ReviewContent {
        campaign_id: String,
        #[command(flatten)]
        decisions: ReviewArgs,
    },
}

/// Review selections. Reject and revise take <creator-id>=<feedback>.
#[derive(clap::Args, Debug, Default)]
pub struct ReviewArgs {
    #[arg(long = "approve", value_name = "CREATOR")]
    pub approve: Vec<String>,
    #[arg(long = "reject", value_name = "CREATOR=FEEDBACK")]
    pub reject: Vec<String>,
    #[arg(long = "revise", value_name = "CREATOR=FEEDBACK")]
    pub revise: Vec<String>,
}

impl ReviewArgs {
    /// Builds the batch. A reject or revise without feedback stays selected
    /// but is left out of the submitted decisions.
    pub fn batch(&self) -> Result<ReviewBatch> {
        let mut batch = ReviewBatch::new();
        for id in &self.approve {
            batch.select(CreatorId::from(id.trim()), ReviewAction::Approve);
        }
        for (raw, action) in self
            .reject
            .iter()
            .map(|r| (r, ReviewAction::Reject))
            .chain(self.revise.iter().map(|r| (r, ReviewAction::RequestRevision)))
        {
            let (id, feedback) = if raw.contains('=') {
                split_pair(raw)?
            } else {
                (raw.trim().to_string(), String::new())
            };
            let creator_id = CreatorId::from(id);
            batch.select(creator_id.clone(), action);
            batch.set_feedback(&creator_id, &feedback);
        }
        Ok(batch)
    }
}

/// Decision on the single script shown by the assisted checklist.
#[derive(clap::Args, Debug, Default)]
#[group(multiple = false)]
pub struct AssistDecision {
    /// Approve the script
    #[arg(long)]
    pub approve: bool,
    /// Reject the script with feedback
    #[arg(long, value_name = "FEEDBACK")]
    pub reject: Option<String>,
    /// Request a revision with feedback
    #[arg(long, value_name = "FEEDBACK")]
    pub revise: Option<String>,
}

impl AssistDecision {
    /// One-script batch for the chosen action; `None` when only the
    /// checklist was asked for.
    pub fn batch(&self, creator_id: &CreatorId) -> Result<Option<ReviewBatch>> {
        let (action, feedback) = if self.approve {
            (ReviewAction::Approve, None)
        } else if let Some(text) = &self.reject {
            (ReviewAction::Reject, Some(text))
        } else if let Some(text) = &self.revise {
            (ReviewAction::RequestRevision, Some(text))
        } else {
            return Ok(None);
        };

        let mut batch = ReviewBatch::new();
        batch.select(creator_id.clone(), action);
        if let Some(text) = feedback {
            batch.set_feedback(creator_id, text);
        }
        if !batch.is_submittable() {
            anyhow::bail!("feedback is required to reject or request a revision");
        }
        Ok(Some(batch))
    }
}

pub(super) fn assignment_draft(
    loaded: &LoadedCampaign,
    accept: &[String],
    reject: &[String],
    pending: &[String],
    comment: &[String],
) -> Result<AssignmentDraft> {
    let mut comments = std::collections::HashMap::new();
    for raw in comment {
        let (id, text) = split_pair(raw)?;
        comments.insert(id, text);
    }

    let mut draft = AssignmentDraft::from_assignments(loaded.data.assignments());
    let mut decided = std::collections::HashSet::new();
    for (ids, status) in [
        (accept, AssignmentStatus::Accepted),
        (reject, AssignmentStatus::Rejected),
        (pending, AssignmentStatus::Pending),
    ] {
        for id in ids {
            let id = id.trim().to_string();
            let text = comments.get(&id).map(String::as_str);
            draft.set(CreatorId::from(id.as_str()), status.clone(), text);
            decided.insert(id);
        }
    }
    // A comment alone keeps the creator's current status.
    for (id, text) in &comments {
        if decided.contains(id) {
            continue;
        }
        let creator_id = CreatorId::from(id.as_str());
        let current = loaded
            .data
            .pairing(&creator_id)
            .and_then(|p| p.assignment.as_ref())
            .map(|a| a.status.clone())
            .with_context(|| format!("creator '{}' is not assigned to this campaign", id))?;
        comment_keeps_status(id, &current)?;
        draft.set(creator_id, current, Some(text));
    }
    Ok(draft)
}

/// A comment alone resubmits the current status, which only the editable
/// statuses allow.
fn comment_keeps_status(id: &str, current: &AssignmentStatus) -> Result<()> {
    if AssignmentStatus::next(Some(current), current.code()).is_some() {
        return Ok(());
    }
    if current.is_other() {
        anyhow::bail!(
            "creator '{}' has unrecognized status '{}' and cannot be commented on",
            id,
            current
        );
    }
    let choices = AssignmentStatus::allowed_actions(Some(current));
    anyhow::bail!(
        "creator '{}' is {}; a comment needs a new status too (--{})",
        id,
        current,
        choices
            .into_iter()
            .map(flag_for)
            .collect::<Vec<_>>()
            .join(", --")
    )
}

fn flag_for(status: &'static str) -> &'static str {
    match status {
        "accepted" => "accept",
        "rejected" => "reject",
        other => other,
    }
}

pub(super) fn render_loaded(loaded: &LoadedCampaign, currency: &str) {
    let data = &loaded.data;
    let campaign = data.campaign();
    println!("{}", campaign_row(campaign, currency));
    if let Some(description) = &campaign.description {
        println!("  {}", description);
    }

    let assignments = data.assignments();
    if !assignments.is_empty() {
        print_lines("Creators:", &assignment_lines(&assignments));
    }
    if campaign.creators_are_final() {
        print_lines("Bids:", &bid_lines(&data.bids(), currency));
    }
    if campaign.brief_completed {
        print_lines("Scripts:", &script_lines(&data.scripts()));
        print_lines("Content:", &content_lines(&data.content()));
    }

    for kind in &loaded.degraded {
        println!("note: {} could not be loaded; showing an empty list", kind);
    }
    if let Some(failure) = data.last_failure() {
        println!("last request failed: {}", failure);
    }
}

fn warn_excluded(batch: &ReviewBatch) {
    for id in batch.excluded() {
        println!("skipped {}: feedback is required to reject or request a revision", id);
    }
}

pub(super) async fn execute(command: BrandCommands, config: &Option<PathBuf>) -> Result<()> {
    let (session, ctx) = session_context(config, Role::Brand)?;
    let workflow = &ctx.workflow;

    match command {
        BrandCommands::Campaigns => {
            let campaigns = workflow.list_campaigns(&session).await?;
            print_lines("Campaigns:", &campaign_lines(&campaigns, ctx.currency()));
        }
        BrandCommands::Show { campaign_id } => {
            let loaded = workflow
                .load_campaign(&session, &CampaignId::from(campaign_id))
                .await?;
            render_loaded(&loaded, ctx.currency());
        }
        BrandCommands::ReviewCreators {
            campaign_id,
            accept,
            reject,
            pending,
            comment,
        } => {
            let id = CampaignId::from(campaign_id);
            let loaded = workflow.load_campaign(&session, &id).await?;
            let draft = assignment_draft(&loaded, &accept, &reject, &pending, &comment)?;
            let loaded = workflow.submit_review(&session, &id, draft.updates()).await?;
            println!("Creator review submitted.");
            render_loaded(&loaded, ctx.currency());
        }
        BrandCommands::UploadBrief {
            campaign_id,
            title,
            primary_focus,
            secondary_focus,
            dos,
            donts,
            cta,
            sample_video_url,
        } => {
            let id = CampaignId::from(campaign_id);
            let brief = CampaignBrief {
                campaign_id: Some(id.clone()),
                video_title: title,
                primary_focus,
                secondary_focus,
                dos,
                donts,
                cta,
                sample_video_url: Some(sample_video_url),
            };
            let loaded = workflow.upload_brief(&session, &id, brief).await?;
            println!("Brief uploaded.");
            render_loaded(&loaded, ctx.currency());
        }
        BrandCommands::FinalizeAmounts {
            campaign_id,
            accept,
            reject,
        } => {
            let decisions: Vec<AmountDecision> = accept
                .iter()
                .map(|c| (c, CounterAction::AcceptCounter))
                .chain(reject.iter().map(|c| (c, CounterAction::RejectCounter)))
                .map(|(c, action)| AmountDecision {
                    creator_id: CreatorId::from(c.trim()),
                    action,
                })
                .collect();
            let id = CampaignId::from(campaign_id);
            let loaded = workflow
                .finalize_creator_amounts(&session, &id, decisions)
                .await?;
            println!("Amounts finalized.");
            render_loaded(&loaded, ctx.currency());
        }
        BrandCommands::ReviewScripts {
            campaign_id,
            decisions,
        } => {
            let batch = decisions.batch()?;
            warn_excluded(&batch);
            let id = CampaignId::from(campaign_id);
            let loaded = workflow
                .review_scripts(&session, &id, batch.decisions())
                .await?;
            println!("Script review submitted.");
            render_loaded(&loaded, ctx.currency());
        }
        BrandCommands::AssistScript {
            campaign_id,
            creator_id,
            decision,
        } => {
            let id = CampaignId::from(campaign_id);
            let creator_id = CreatorId::from(creator_id);
            let batch = decision.batch(&creator_id)?;
            let loaded = workflow.load_campaign(&session, &id).await?;
            if loaded.degraded.contains(&ListKind::Scripts) {
                anyhow::bail!("scripts could not be loaded for campaign '{}'", id);
            }
            let script = loaded
                .data
                .pairing(&creator_id)
                .and_then(|p| p.script.as_ref())
                .with_context(|| format!("no script from creator '{}'", creator_id))?;
            let assessment =
                ChecklistEvaluator.evaluate(script, loaded.data.campaign().brief.as_ref());
            if assessment.simulated {
                println!("Assisted review (simulated; no evaluation service configured)");
            }
            for check in &assessment.checks {
                println!("  {:<22} {:?}  {}", check.name, check.outcome, check.note);
            }
            for check in assessment.flagged() {
                println!("flagged: {}", check.name);
            }

            if let Some(batch) = batch {
                let loaded = workflow
                    .review_scripts(&session, &id, batch.decisions())
                    .await?;
                println!("Script review submitted.");
                render_loaded(&loaded, ctx.currency());
            }
        }
        BrandCommands::ReviewContent {
            campaign_id,
            decisions,
        } => {
            let batch = decisions.batch()?;
            warn_excluded(&batch);
            let id = CampaignId::from(campaign_id);
            let loaded = workflow
                .review_content(&session, &id, batch.decisions())
                .await?;
            println!("Content review submitted.");
            render_loaded(&loaded, ctx.currency());
        }
    }
    Ok(())
}
