use super::*;

#[test]
fn step_finds_matching_row() {
    assert_eq!(
        step(SCRIPT_TABLE, "script_pending", "approve"),
        Some("script_approved")
    );
    assert_eq!(step(SCRIPT_TABLE, "script_approved", "approve"), None);
}

#[test]
fn campaign_review_only_moves_forward() {
    assert_eq!(
        CampaignReviewStatus::next(
            Some(&CampaignReviewStatus::CreatorsPending),
            ACTION_BRAND_SUBMIT
        ),
        Some(CampaignReviewStatus::CreatorsInReview)
    );
    assert_eq!(
        CampaignReviewStatus::next(
            Some(&CampaignReviewStatus::CreatorsInReview),
            ACTION_ADMIN_FINALIZE
        ),
        Some(CampaignReviewStatus::CreatorsAreFinal)
    );
    assert_eq!(
        CampaignReviewStatus::next(
            Some(&CampaignReviewStatus::CreatorsAreFinal),
            ACTION_BRAND_SUBMIT
        ),
        None
    );
}

#[test]
fn bid_allows_one_counter_round() {
    assert_eq!(BidStatus::next(None, ACTION_SUBMIT), Some(BidStatus::Submitted));
    assert_eq!(
        BidStatus::next(Some(&BidStatus::AmountNegotiated), "accept_counter"),
        Some(BidStatus::AmountFinalized)
    );
    assert_eq!(
        BidStatus::next(Some(&BidStatus::AmountNegotiated), "reject_counter"),
        Some(BidStatus::AmountRejected)
    );
    assert_eq!(
        BidStatus::next(Some(&BidStatus::AmountFinalized), "reject_counter"),
        None
    );
}

#[test]
fn rejected_script_is_terminal() {
    assert!(ScriptStatus::allowed_actions(Some(&ScriptStatus::Rejected)).is_empty());
    assert_eq!(
        ScriptStatus::allowed_actions(Some(&ScriptStatus::Pending)),
        vec!["approve", "reject", "request_revision"]
    );
}

#[test]
fn content_goes_live_only_from_approved() {
    assert_eq!(
        ContentStatus::next(Some(&ContentStatus::Approved), ACTION_GO_LIVE),
        Some(ContentStatus::Live)
    );
    assert_eq!(
        ContentStatus::next(Some(&ContentStatus::Pending), ACTION_GO_LIVE),
        None
    );
    assert_eq!(
        ContentStatus::next(Some(&ContentStatus::RevisionRequested), ACTION_SUBMIT),
        Some(ContentStatus::Pending)
    );
}

#[test]
fn unknown_status_has_no_transitions() {
    let other = AssignmentStatus::Other("shortlisted".to_string());
    assert!(AssignmentStatus::allowed_actions(Some(&other)).is_empty());
}

#[test]
fn assignment_table_never_targets_negotiated() {
    assert!(ASSIGNMENT_TABLE.iter().all(|t| t.to != "negotiated"));
}

#[test]
fn review_action_feedback_rules() {
    assert!(!ReviewAction::Approve.requires_feedback());
    assert!(ReviewAction::Reject.requires_feedback());
    assert!(ReviewAction::RequestRevision.requires_feedback());
    assert_eq!(ReviewAction::parse("revise"), Some(ReviewAction::RequestRevision));
    assert_eq!(ReviewAction::parse("maybe"), None);
}

#[test]
fn actions_serialize_in_snake_case() {
    assert_eq!(
        serde_json::to_string(&ReviewAction::RequestRevision).unwrap(),
        r#""request_revision""#
    );
    assert_eq!(
        serde_json::to_string(&CounterAction::AcceptCounter).unwrap(),
        r#""accept_counter""#
    );
}
