use super::*;
use crate::domain::fixtures::assignment;

#[test]
fn reject_without_feedback_is_held_back() {
    let mut batch = ReviewBatch::new();
    let c1 = CreatorId::from("c1");
    batch.select(c1.clone(), ReviewAction::Reject);

    assert!(batch.decisions().is_empty());
    assert_eq!(batch.excluded(), vec![c1.clone()]);
    assert!(!batch.is_submittable());

    batch.set_feedback(&c1, "   ");
    assert!(batch.decisions().is_empty());

    batch.set_feedback(&c1, "Needs a hook in first 3s");
    let decisions = batch.decisions();
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].action, ReviewAction::Reject);
    assert_eq!(
        decisions[0].feedback.as_deref(),
        Some("Needs a hook in first 3s")
    );
    assert!(batch.excluded().is_empty());
}

#[test]
fn mixed_batch_sends_only_complete_decisions() {
    let mut batch = ReviewBatch::new();
    batch.select("c1".into(), ReviewAction::Approve);
    batch.select("c2".into(), ReviewAction::RequestRevision);

    let ids: Vec<String> = batch
        .decisions()
        .iter()
        .map(|d| d.creator_id.to_string())
        .collect();
    assert_eq!(ids, vec!["c1"]);
    assert_eq!(batch.excluded(), vec![CreatorId::from("c2")]);
    assert!(batch.is_submittable());
}

#[test]
fn changing_action_keeps_feedback() {
    let mut batch = ReviewBatch::new();
    let c1 = CreatorId::from("c1");
    batch.select(c1.clone(), ReviewAction::Approve);
    assert!(batch.set_feedback(&c1, "Tighten the ending"));
    batch.select(c1.clone(), ReviewAction::RequestRevision);

    assert_eq!(
        batch.decisions()[0].feedback.as_deref(),
        Some("Tighten the ending")
    );

    batch.deselect(&c1);
    assert!(!batch.set_feedback(&c1, "x"));
}

#[test]
fn assignment_draft_sends_changes_only() {
    let roster = vec![
        assignment("c1", AssignmentStatus::Pending),
        assignment("c2", AssignmentStatus::Pending),
    ];
    let mut draft = AssignmentDraft::from_assignments(&roster);
    draft.set("c1".into(), AssignmentStatus::Accepted, Some("good fit"));
    draft.set("c2".into(), AssignmentStatus::Pending, Some("  "));

    assert_eq!(
        draft.updates(),
        vec![AssignmentUpdate {
            creator_id: "c1".into(),
            status: AssignmentStatus::Accepted,
            comment: Some("good fit".to_string()),
        }]
    );
}
