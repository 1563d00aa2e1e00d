mod common;

use ballot::errors::AppError;
use ballot::models::{Poll, PollOption, Vote, Voter, VoterPoll};
use ballot::repository::Repository;
use common::{Cluster, OPTION_A, OPTION_B, POLL_ID, VOTER_ID};

// ============================================================================
// CAST
// ============================================================================

#[tokio::test]
async fn test_cast_vote_records_history() {
    let cluster = Cluster::seeded().await;

    let vote = cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .expect("Failed to cast vote");
    assert_eq!(vote, Vote::new("5", VOTER_ID, POLL_ID, OPTION_A));

    let stored = cluster.votes.get_vote("5").await.unwrap();
    assert_eq!(stored.vote_value, OPTION_A);

    let history = cluster.voters.get_history(VOTER_ID).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].poll_id, POLL_ID);
}

#[tokio::test]
async fn test_path_id_overrides_body_id() {
    let cluster = Cluster::seeded().await;

    cluster
        .votes
        .add_vote("5", Vote::new("77", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();

    assert!(cluster.votes.get_vote("5").await.is_ok());
    assert!(matches!(
        cluster.votes.get_vote("77").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_unknown_voter_writes_nothing() {
    let cluster = Cluster::seeded().await;
    let before = cluster.votes_store.writes();

    let err = cluster
        .votes
        .add_vote("5", Vote::new("", "404", POLL_ID, OPTION_A))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(cluster.votes_store.writes(), before);
    assert!(cluster.votes.list_votes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_poll_or_option_is_not_found() {
    let cluster = Cluster::seeded().await;

    let err = cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, "404", OPTION_A))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = cluster
        .votes
        .add_vote("6", Vote::new("", VOTER_ID, POLL_ID, "Z"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(cluster.votes_store.writes(), 0);
}

#[tokio::test]
async fn test_malformed_body_ids_are_bad_request() {
    let cluster = Cluster::seeded().await;

    for vote in [
        Vote::new("", "", POLL_ID, OPTION_A),
        Vote::new("", VOTER_ID, "a/b", OPTION_A),
        Vote::new("", VOTER_ID, POLL_ID, "   "),
    ] {
        let err = cluster.votes.add_vote("5", vote).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)), "got {err:?}");
    }
}

#[tokio::test]
async fn test_duplicate_vote_id_conflicts() {
    let cluster = Cluster::seeded().await;
    cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();

    let err = cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_B))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(cluster.votes.get_vote("5").await.unwrap().vote_value, OPTION_A);
}

#[tokio::test]
async fn test_second_vote_in_same_poll_is_rolled_back() {
    let cluster = Cluster::seeded().await;
    cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();

    // History already has poll 9, so the Voter service refuses the entry.
    let err = cluster
        .votes
        .add_vote("6", Vote::new("", VOTER_ID, POLL_ID, OPTION_B))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert!(matches!(
        cluster.votes.get_vote("6").await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(cluster.voters.get_history(VOTER_ID).await.unwrap().len(), 1);
}

// ============================================================================
// UPDATE
// ============================================================================

#[tokio::test]
async fn test_update_changes_only_vote_value() {
    let cluster = Cluster::seeded().await;
    cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();

    let updated = cluster
        .votes
        .update_vote("5", Vote::new("99", "other", "other", OPTION_B))
        .await
        .unwrap();

    assert_eq!(updated, Vote::new("5", VOTER_ID, POLL_ID, OPTION_B));
    assert_eq!(cluster.votes.get_vote("5").await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_rejects_blank_and_unknown_values() {
    let cluster = Cluster::seeded().await;
    cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();

    let err = cluster.votes.update_vote("5", Vote::default()).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cluster
        .votes
        .update_vote("5", Vote::new("", "", "", "Z"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(cluster.votes.get_vote("5").await.unwrap().vote_value, OPTION_A);
}

#[tokio::test]
async fn test_update_missing_vote_is_not_found() {
    let cluster = Cluster::seeded().await;
    let err = cluster
        .votes
        .update_vote("5", Vote::new("", "", "", OPTION_B))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ============================================================================
// DELETE
// ============================================================================

#[tokio::test]
async fn test_delete_removes_vote_and_history_entry() {
    let cluster = Cluster::seeded().await;
    cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();

    cluster.votes.delete_vote("5").await.unwrap();

    assert!(matches!(
        cluster.votes.get_vote("5").await,
        Err(AppError::NotFound(_))
    ));
    assert!(cluster.voters.get_history(VOTER_ID).await.unwrap().is_empty());

    let err = cluster.votes.delete_vote("5").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ============================================================================
// COMPENSATION
// ============================================================================

#[tokio::test]
async fn test_failed_history_add_removes_vote() {
    let cluster = Cluster::with_failing_history();
    cluster.seed().await;

    let err = cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert!(cluster.votes.list_votes().await.unwrap().is_empty());
    assert!(cluster.votes_store.inner.is_empty());
}

#[tokio::test]
async fn test_failed_history_update_restores_vote() {
    let cluster = Cluster::with_failing_history();
    cluster.seed().await;
    // State a successful cast would have left behind.
    cluster
        .voters
        .add_voter_poll(VOTER_ID, POLL_ID, Voter::with_single_entry(VoterPoll::new(POLL_ID)))
        .await
        .unwrap();
    let original = Vote::new("5", VOTER_ID, POLL_ID, OPTION_A);
    Repository::<Vote>::new(cluster.votes_store.clone())
        .create(&original)
        .await
        .unwrap();

    let err = cluster
        .votes
        .update_vote("5", Vote::new("", "", "", OPTION_B))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert_eq!(cluster.votes.get_vote("5").await.unwrap(), original);
}

#[tokio::test]
async fn test_failed_history_delete_keeps_vote_deleted() {
    let cluster = Cluster::with_failing_history();
    cluster.seed().await;
    Repository::<Vote>::new(cluster.votes_store.clone())
        .create(&Vote::new("5", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();

    let err = cluster.votes.delete_vote("5").await.unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert!(matches!(
        cluster.votes.get_vote("5").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_vote_of_deleted_voter_can_still_be_deleted() {
    let cluster = Cluster::seeded().await;
    cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();
    cluster.voters.delete_voter(VOTER_ID).await.unwrap();

    let err = cluster.votes.delete_vote("5").await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));

    assert!(matches!(
        cluster.votes.get_vote("5").await,
        Err(AppError::NotFound(_))
    ));
    assert!(cluster.votes.list_votes().await.unwrap().is_empty());
    let err = cluster.votes.delete_vote("5").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ============================================================================
// READ-THROUGH
// ============================================================================

#[tokio::test]
async fn test_read_through_passes_peer_answers() {
    let cluster = Cluster::seeded().await;

    let voters = cluster.votes.all_voters().await.unwrap();
    assert_eq!(voters.len(), 1);
    assert_eq!(cluster.votes.voter(VOTER_ID).await.unwrap().first_name, "Ada");

    let polls = cluster.votes.all_polls().await.unwrap();
    assert_eq!(polls.len(), 1);
    assert_eq!(cluster.votes.poll(POLL_ID).await.unwrap().title, "Lunch");
    assert_eq!(cluster.votes.poll_options(POLL_ID).await.unwrap().len(), 2);
    assert_eq!(
        cluster.votes.poll_option(POLL_ID, OPTION_B).await.unwrap(),
        PollOption::new(OPTION_B, "Tacos")
    );

    cluster
        .votes
        .add_vote("5", Vote::new("", VOTER_ID, POLL_ID, OPTION_A))
        .await
        .unwrap();
    assert_eq!(cluster.votes.voter_history(VOTER_ID).await.unwrap().len(), 1);
    assert_eq!(
        cluster.votes.voter_poll(VOTER_ID, POLL_ID).await.unwrap().poll_id,
        POLL_ID
    );
}

#[tokio::test]
async fn test_read_through_missing_entities_are_not_found() {
    let cluster = Cluster::new();

    assert!(cluster.votes.all_voters().await.unwrap().is_empty());
    assert!(matches!(
        cluster.votes.voter("404").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        cluster.votes.poll_option("404", OPTION_A).await,
        Err(AppError::NotFound(_))
    ));

    cluster
        .polls
        .add_poll(Poll::new("3", "Empty", ""))
        .await
        .unwrap();
    assert!(cluster.votes.poll_options("3").await.unwrap().is_empty());
}
