use super::*;
use crate::config::CollabConfig;
use crate::domain::fixtures::{assignment, bid, campaign, content, script};
use crate::domain::{
    AssignmentStatus, BidStatus, CampaignReviewStatus, ContentStatus, CounterAction, ReviewAction,
    ScriptStatus,
};
use crate::paths::set_home_for_test;
use crate::presentation;
use crate::workflow::mock_api::{network_error, Hold, MockApi, MockState};
use crate::workflow::{AssignmentDraft, ReviewBatch};
use serde_json::json;
use serial_test::serial;
use tempfile::tempdir;

fn brand() -> AuthSession {
    AuthSession::login(Role::Brand, "brand-token", Some("brand-1".to_string())).unwrap()
}

fn camp() -> CampaignId {
    CampaignId::from("camp-1")
}

fn workflow_with(state: MockState, degrade: bool) -> (Arc<MockApi>, CampaignWorkflow) {
    let mock = Arc::new(MockApi::new(state));
    let mut config = CollabConfig::default_config().unwrap();
    config.lists.degrade_on_error = degrade;
    let api: Arc<dyn CampaignApi> = mock.clone();
    (mock, CampaignWorkflow::new(api, &config, None))
}

fn pending_roster() -> MockState {
    MockState {
        campaigns: vec![campaign(CampaignReviewStatus::CreatorsPending, false)],
        creators: vec![assignment("c1", AssignmentStatus::Pending)],
        ..MockState::default()
    }
}

fn reviewing_scripts() -> MockState {
    MockState {
        campaigns: vec![campaign(CampaignReviewStatus::CreatorsAreFinal, true)],
        creators: vec![assignment("c1", AssignmentStatus::Accepted)],
        bids: vec![bid("c1", BidStatus::AmountFinalized)],
        scripts: vec![script("c1", ScriptStatus::Pending)],
        ..MockState::default()
    }
}

#[tokio::test]
async fn accepting_a_creator_sends_one_review_and_locks_the_roster() {
    let (mock, workflow) = workflow_with(pending_roster(), true);

    let loaded = workflow.load_campaign(&brand(), &camp()).await.unwrap();
    let mut draft = AssignmentDraft::from_assignments(loaded.data.assignments());
    draft.set("c1".into(), AssignmentStatus::Accepted, Some("good fit"));

    let after = workflow
        .submit_review(&brand(), &camp(), draft.updates())
        .await
        .unwrap();

    let calls = mock.calls_to("respond_to_creators");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].payload,
        json!([{"creator_id": "c1", "status": "accepted", "comment": "good fit"}])
    );
    assert_eq!(
        after.data.campaign().review_status,
        CampaignReviewStatus::CreatorsInReview
    );
    assert!(!after.data.campaign().assignment_editable());
    assert!(after.data.in_flight().is_none());
}

#[tokio::test]
async fn locked_review_makes_no_network_write() {
    let mut state = pending_roster();
    state.campaigns = vec![campaign(CampaignReviewStatus::CreatorsInReview, false)];
    let (mock, workflow) = workflow_with(state, true);

    let updates = vec![AssignmentUpdate {
        creator_id: "c1".into(),
        status: AssignmentStatus::Accepted,
        comment: None,
    }];
    let err = workflow
        .submit_review(&brand(), &camp(), updates)
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::ReviewLocked { .. }));
    assert!(mock.calls_to("respond_to_creators").is_empty());
}

#[tokio::test]
async fn empty_review_is_rejected_before_sending() {
    let (mock, workflow) = workflow_with(pending_roster(), true);

    let err = workflow
        .submit_review(&brand(), &camp(), Vec::new())
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::NoUpdates);
    assert_eq!(err.to_string(), "No updates to submit");
    assert!(mock.calls_to("respond_to_creators").is_empty());
}

#[tokio::test]
async fn backend_error_is_surfaced_and_state_is_untouched() {
    let (mock, workflow) = workflow_with(pending_roster(), true);
    mock.fail(
        "respond_to_creators",
        ApiError::Http {
            status: 409,
            body: r#"{"message":"Campaign already reviewed"}"#.to_string(),
        },
    );
    let before = workflow.load_campaign(&brand(), &camp()).await.unwrap();

    let updates = vec![AssignmentUpdate {
        creator_id: "c1".into(),
        status: AssignmentStatus::Rejected,
        comment: None,
    }];
    let err = workflow
        .submit_review(&brand(), &camp(), updates.clone())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::Api {
            message: "Campaign already reviewed".to_string()
        }
    );
    let after = workflow.snapshot(&camp()).await.unwrap();
    assert_eq!(after.assignments(), before.data.assignments());
    assert!(after.in_flight().is_none());
    assert_eq!(after.last_failure(), Some("Campaign already reviewed"));

    // the flag is cleared, so a retry goes out
    let _ = workflow.submit_review(&brand(), &camp(), updates).await;
    assert_eq!(mock.calls_to("respond_to_creators").len(), 2);
}

#[tokio::test]
async fn reject_without_feedback_is_never_sent() {
    let (mock, workflow) = workflow_with(reviewing_scripts(), true);
    workflow.load_campaign(&brand(), &camp()).await.unwrap();

    let mut batch = ReviewBatch::new();
    batch.select("c1".into(), ReviewAction::Reject);
    assert!(batch.decisions().is_empty());
    let err = workflow
        .review_scripts(&brand(), &camp(), batch.decisions())
        .await
        .unwrap_err();
    assert_eq!(err, WorkflowError::NoUpdates);

    // a decision built by hand is still caught by the aggregate
    let bare = vec![ReviewDecision {
        creator_id: "c1".into(),
        action: ReviewAction::Reject,
        feedback: Some("  ".to_string()),
    }];
    let err = workflow
        .review_scripts(&brand(), &camp(), bare)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::FeedbackRequired { .. }));
    assert!(mock.calls_to("review_scripts").is_empty());

    batch.set_feedback(&"c1".into(), "Needs a hook in first 3s");
    let after = workflow
        .review_scripts(&brand(), &camp(), batch.decisions())
        .await
        .unwrap();

    let calls = mock.calls_to("review_scripts");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].payload,
        json!([{"creator_id": "c1", "action": "reject", "feedback": "Needs a hook in first 3s"}])
    );
    assert_eq!(after.data.scripts()[0].status, ScriptStatus::Rejected);
}

#[tokio::test]
async fn failed_content_fetch_shows_empty_state() {
    let mut state = reviewing_scripts();
    state.content = vec![content("c1", ContentStatus::Pending)];
    let (mock, workflow) = workflow_with(state, true);
    mock.fail("campaign_content", network_error());

    let loaded = workflow.load_campaign(&brand(), &camp()).await.unwrap();

    assert_eq!(loaded.degraded, vec![ListKind::Content]);
    assert!(loaded.data.content().is_empty());
    assert_eq!(
        presentation::content_lines(&loaded.data.content()),
        vec!["No content submissions yet.".to_string()]
    );
    assert_eq!(loaded.data.scripts().len(), 1);
}

#[tokio::test]
async fn failed_content_fetch_is_an_error_when_degrading_is_off() {
    let (mock, workflow) = workflow_with(reviewing_scripts(), false);
    mock.fail("campaign_content", network_error());

    let err = workflow.load_campaign(&brand(), &camp()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Api { .. }));
}

#[tokio::test]
async fn creator_list_failure_is_never_degraded() {
    let (mock, workflow) = workflow_with(pending_roster(), true);
    mock.fail("campaign_creators", network_error());

    let err = workflow.load_campaign(&brand(), &camp()).await.unwrap_err();
    assert!(err.to_string().contains("Network error (connection reset)"));
}

#[tokio::test]
async fn refetch_without_mutation_is_idempotent() {
    let mut state = reviewing_scripts();
    state.content = vec![content("c1", ContentStatus::Pending)];
    let (_mock, workflow) = workflow_with(state, true);

    let first = workflow.load_campaign(&brand(), &camp()).await.unwrap();
    let second = workflow.load_campaign(&brand(), &camp()).await.unwrap();

    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn overlapping_script_fetch_keeps_the_newer_snapshot() {
    let (mock, workflow) = workflow_with(reviewing_scripts(), true);
    let Hold { arrived, release } = mock.hold_next("campaign_scripts");

    let (older_brand, older_camp) = (brand(), camp());
    let older = workflow.load_campaign(&older_brand, &older_camp);
    let newer = async {
        arrived.await.unwrap();
        mock.state.lock().unwrap().scripts = vec![script("c1", ScriptStatus::Approved)];
        let loaded = workflow.load_campaign(&brand(), &camp()).await.unwrap();
        release.send(()).unwrap();
        loaded
    };
    let (older, newer) = tokio::join!(older, newer);
    let older = older.unwrap();

    assert_eq!(mock.calls_to("campaign_scripts").len(), 2);
    assert_eq!(newer.data.scripts()[0].status, ScriptStatus::Approved);
    assert_eq!(older.data.scripts()[0].status, ScriptStatus::Approved);
    let snapshot = workflow.snapshot(&camp()).await.unwrap();
    assert_eq!(snapshot.scripts()[0].status, ScriptStatus::Approved);
}

#[tokio::test]
async fn overlapping_campaign_list_keeps_the_newer_names() {
    let (mock, workflow) = workflow_with(pending_roster(), true);
    let Hold { arrived, release } = mock.hold_next("brand_campaigns");

    let older_brand = brand();
    let older = workflow.list_campaigns(&older_brand);
    let newer = async {
        arrived.await.unwrap();
        mock.state.lock().unwrap().campaigns[0].name = "Renamed".to_string();
        let listed = workflow.list_campaigns(&brand()).await.unwrap();
        release.send(()).unwrap();
        listed
    };
    let (older, newer) = tokio::join!(older, newer);

    assert_eq!(newer[0].name, "Renamed");
    assert_eq!(older.unwrap()[0].name, "Renamed");
    let snapshot = workflow.snapshot(&camp()).await.unwrap();
    assert_eq!(snapshot.campaign().name, "Renamed");
}

#[tokio::test]
async fn lists_follow_phase_gates() {
    let (mock, workflow) = workflow_with(pending_roster(), true);
    workflow.load_campaign(&brand(), &camp()).await.unwrap();

    assert!(mock.calls_to("campaign_bids").is_empty());
    assert!(mock.calls_to("campaign_scripts").is_empty());
    assert!(mock.calls_to("campaign_content").is_empty());
}

#[tokio::test]
async fn counter_offer_is_finalized_once() {
    let mut state = reviewing_scripts();
    state.bids = vec![bid("c1", BidStatus::AmountNegotiated)];
    let (mock, workflow) = workflow_with(state, true);

    let decisions = vec![AmountDecision {
        creator_id: "c1".into(),
        action: CounterAction::AcceptCounter,
    }];
    let after = workflow
        .finalize_creator_amounts(&brand(), &camp(), decisions.clone())
        .await
        .unwrap();
    assert_eq!(after.data.bids()[0].status, BidStatus::AmountFinalized);

    let err = workflow
        .finalize_creator_amounts(&brand(), &camp(), decisions)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
    assert_eq!(mock.calls_to("finalize_amounts").len(), 1);
}

#[tokio::test]
async fn content_review_waits_for_script_approval() {
    let mut state = reviewing_scripts();
    state.content = vec![content("c1", ContentStatus::Pending)];
    let (mock, workflow) = workflow_with(state, true);

    let approve = vec![ReviewDecision {
        creator_id: "c1".into(),
        action: ReviewAction::Approve,
        feedback: None,
    }];
    let err = workflow
        .review_content(&brand(), &camp(), approve.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::GateClosed { .. }));

    workflow
        .review_scripts(&brand(), &camp(), approve.clone())
        .await
        .unwrap();
    let after = workflow
        .review_content(&brand(), &camp(), approve)
        .await
        .unwrap();
    assert_eq!(after.data.content()[0].status, ContentStatus::Approved);
    assert_eq!(mock.calls_to("review_content").len(), 1);
}

#[tokio::test]
async fn brief_upload_opens_script_review() {
    let mut state = pending_roster();
    state.campaigns = vec![campaign(CampaignReviewStatus::CreatorsAreFinal, false)];
    let (mock, workflow) = workflow_with(state, true);

    let incomplete = CampaignBrief {
        video_title: "Rain run".to_string(),
        ..CampaignBrief::default()
    };
    let err = workflow
        .upload_brief(&brand(), &camp(), incomplete)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("primary_focus"));

    let brief = CampaignBrief {
        video_title: "Rain run".to_string(),
        primary_focus: "Grip on wet roads".to_string(),
        cta: "Shop the drop".to_string(),
        sample_video_url: Some("https://videos.example.in/s.mp4".to_string()),
        ..CampaignBrief::default()
    };
    let after = workflow
        .upload_brief(&brand(), &camp(), brief)
        .await
        .unwrap();

    assert!(after.data.campaign().brief_completed);
    assert_eq!(mock.calls_to("upload_brief").len(), 1);
    assert_eq!(mock.calls_to("campaign_scripts").len(), 1);
}

#[tokio::test]
async fn unknown_campaign_and_wrong_role() {
    let (_mock, workflow) = workflow_with(pending_roster(), true);

    let err = workflow
        .load_campaign(&brand(), &CampaignId::from("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownCampaign { .. }));

    let creator = AuthSession::login(Role::Creator, "t", Some("c1".to_string())).unwrap();
    let err = workflow
        .submit_review(&creator, &camp(), Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::WrongRole { .. }));
}

#[tokio::test]
async fn board_subscribers_see_synced_campaigns() {
    let (_mock, workflow) = workflow_with(pending_roster(), true);
    let board = workflow.subscribe_board();
    let mut events = workflow.subscribe_events();

    workflow.load_campaign(&brand(), &camp()).await.unwrap();

    assert!(board.borrow().campaign(&camp()).is_some());
    let first = events.try_recv().unwrap();
    assert_eq!(first.aggregate_id, "camp-1");
}

#[tokio::test]
#[serial]
async fn unauthorized_profile_ends_the_session() {
    let home = tempdir().unwrap();
    let _guard = set_home_for_test(home.path());
    let session = brand();
    SessionStore::save(&session).unwrap();

    let (mock, workflow) = workflow_with(pending_roster(), true);
    mock.fail(
        "brand_profile",
        ApiError::Http {
            status: 401,
            body: String::new(),
        },
    );

    let err = workflow.fetch_profile(&session).await.unwrap_err();
    assert_eq!(err, WorkflowError::SessionExpired);
    assert!(SessionStore::load(Role::Brand).unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn other_profile_errors_keep_the_session() {
    let home = tempdir().unwrap();
    let _guard = set_home_for_test(home.path());
    let session = brand();
    SessionStore::save(&session).unwrap();

    let (mock, workflow) = workflow_with(pending_roster(), true);
    mock.fail(
        "brand_profile",
        ApiError::Http {
            status: 500,
            body: String::new(),
        },
    );

    let err = workflow.fetch_profile(&session).await.unwrap_err();
    assert_eq!(
        err,
        WorkflowError::Api {
            message: "Request failed with status 500".to_string()
        }
    );
    assert!(SessionStore::load(Role::Brand).unwrap().is_some());
}
