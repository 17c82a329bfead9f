//! Creator commands

use super::brand::render_loaded;
use super::{print_lines, session_context};
use crate::api::CreatorCampaign;
use crate::domain::{CampaignBrief, CampaignId};
use crate::presentation::{budget_line, campaign_row, money, status_badge, BidInput};
use crate::session::Role;
use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

/// Creator subcommands
#[derive(Subcommand, Debug)]
pub enum CreatorCommands {
    /// List campaigns offered to or joined by the creator
    Campaigns,

    /// Link the creator to a campaign
    Link { campaign_id: String },

    /// Place a bid in whole rupees
    Bid { campaign_id: String, amount: String },

    /// Submit a script (or a revised one)
    SubmitScript {
        campaign_id: String,
        /// Script text
        text: String,
    },

    /// Submit the produced content by URL
    UploadContent {
        campaign_id: String,
        content_url: String,
    },

    /// Report the published post for approved content
    GoLive { campaign_id: String, live_url: String },

    /// Show the campaign brief
    Brief { campaign_id: String },
}

/// Campaign row plus the creator's own progress.
pub(super) fn creator_campaign_lines(listed: &[CreatorCampaign], currency: &str) -> Vec<String> {
    listed
        .iter()
        .map(|c| {
            let mut line = campaign_row(&c.campaign, currency);
            let mut progress = |label: &str, status: Option<&str>| {
                if let Some(status) = status {
                    line.push_str(&format!("\n    {:<8}{}", label, status_badge(status)));
                }
            };
            progress("invite", c.assignment_status.as_ref().map(|s| s.as_str()));
            progress("bid", c.bid_status.as_ref().map(|s| s.as_str()));
            progress("script", c.script_status.as_ref().map(|s| s.as_str()));
            progress("content", c.content_status.as_ref().map(|s| s.as_str()));
            if c.bid_amount.is_some() {
                line.push_str(&format!("\n    your bid {}", money(currency, c.bid_amount)));
            }
            if c.proposed_amount.is_some() {
                line.push_str(&format!("\n    counter  {}", money(currency, c.proposed_amount)));
            }
            line
        })
        .collect()
}

pub(super) fn brief_lines(brief: &CampaignBrief) -> Vec<String> {
    let mut lines = vec![
        format!("title:           {}", brief.video_title),
        format!("primary focus:   {}", brief.primary_focus),
    ];
    let optional = [
        ("secondary focus", &brief.secondary_focus),
        ("do", &brief.dos),
        ("don't", &brief.donts),
    ];
    for (label, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            lines.push(format!("{:<17}{}", format!("{}:", label), value));
        }
    }
    lines.push(format!("call to action:  {}", brief.cta));
    if let Some(url) = &brief.sample_video_url {
        lines.push(format!("sample video:    {}", url));
    }
    lines
}

pub(super) async fn execute(command: CreatorCommands, config: &Option<PathBuf>) -> Result<()> {
    let (session, ctx) = session_context(config, Role::Creator)?;
    let workflow = &ctx.workflow;

    match command {
        CreatorCommands::Campaigns => {
            let listed = workflow.creator_campaigns(&session).await?;
            if listed.is_empty() {
                println!("No campaigns yet.");
            } else {
                print_lines("Campaigns:", &creator_campaign_lines(&listed, ctx.currency()));
            }
        }
        CreatorCommands::Link { campaign_id } => {
            let id = CampaignId::from(campaign_id);
            workflow.link_creator(&session, &id).await?;
            println!("Linked to campaign {}.", id);
        }
        CreatorCommands::Bid {
            campaign_id,
            amount,
        } => {
            let id = CampaignId::from(campaign_id);
            let amount = BidInput::parse(&amount)?.amount();
            let loaded = workflow.submit_bid(&session, &id, amount).await?;
            println!(
                "Bid of {} submitted. {}",
                money(ctx.currency(), Some(amount)),
                budget_line(ctx.currency(), loaded.data.campaign().total_budget)
            );
            render_loaded(&loaded, ctx.currency());
        }
        CreatorCommands::SubmitScript { campaign_id, text } => {
            let id = CampaignId::from(campaign_id);
            let loaded = workflow.submit_script(&session, &id, &text).await?;
            println!("Script submitted.");
            render_loaded(&loaded, ctx.currency());
        }
        CreatorCommands::UploadContent {
            campaign_id,
            content_url,
        } => {
            let id = CampaignId::from(campaign_id);
            let loaded = workflow.upload_content(&session, &id, &content_url).await?;
            println!("Content submitted.");
            render_loaded(&loaded, ctx.currency());
        }
        CreatorCommands::GoLive {
            campaign_id,
            live_url,
        } => {
            let id = CampaignId::from(campaign_id);
            let loaded = workflow.go_live(&session, &id, &live_url).await?;
            println!("Marked live.");
            render_loaded(&loaded, ctx.currency());
        }
        CreatorCommands::Brief { campaign_id } => {
            let id = CampaignId::from(campaign_id);
            let brief = workflow.fetch_creator_campaign_brief(&session, &id).await?;
            print_lines(&format!("Brief for {}:", id), &brief_lines(&brief));
        }
    }
    Ok(())
}
