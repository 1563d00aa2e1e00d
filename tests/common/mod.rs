//! Shared test infrastructure for the service tests.
//!
//! Everything runs against `MemoryStore`, and the Votes service talks to
//! the Voter and Poll services in-process through their peer trait impls.
//!
//! # Fixtures
//! - `Cluster::new()` - all three services sharing one in-process wiring
//! - `Cluster::seeded()` - plus voter Ada (1), poll 9 and its options A, B
//! - `CountingStore` - counts writes so tests can assert nothing was stored
//! - `FailingVoterPeer` - reads succeed, history writes fail

#![allow(dead_code)]

use async_trait::async_trait;
use redis::RedisResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ballot::models::{Poll, PollOption, Voter, VoterPoll};
use ballot::peers::{PeerError, PollPeer, VoterPeer};
use ballot::services::{PollService, VoterService, VotesService};
use ballot::store::{DocumentStore, MemoryStore};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const VOTER_ID: &str = "1";
pub const POLL_ID: &str = "9";
pub const OPTION_A: &str = "A";
pub const OPTION_B: &str = "B";

// ============================================================================
// STORES
// ============================================================================

/// `MemoryStore` that counts every mutating call.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> RedisResult<()> {
        self.bump();
        self.inner.set(key, value).await
    }

    async fn set_if_absent(&self, key: &str, value: String) -> RedisResult<bool> {
        self.bump();
        self.inner.set_if_absent(key, value).await
    }

    async fn delete(&self, key: &str) -> RedisResult<u64> {
        self.bump();
        self.inner.delete(key).await
    }

    async fn keys_with_prefix(&self, prefix: &str) -> RedisResult<Vec<String>> {
        self.inner.keys_with_prefix(prefix).await
    }
}

// ============================================================================
// PEERS
// ============================================================================

/// Delegates reads to a real `VoterService` but refuses every history
/// write, as an unreachable or broken Voter service would.
pub struct FailingVoterPeer {
    pub voters: Arc<VoterService>,
}

#[async_trait]
impl VoterPeer for FailingVoterPeer {
    async fn voters(&self) -> Result<Vec<Voter>, PeerError> {
        self.voters.as_ref().voters().await
    }

    async fn voter(&self, voter_id: &str) -> Result<Voter, PeerError> {
        VoterPeer::voter(self.voters.as_ref(), voter_id).await
    }

    async fn history(&self, voter_id: &str) -> Result<Vec<VoterPoll>, PeerError> {
        self.voters.as_ref().history(voter_id).await
    }

    async fn history_entry(&self, voter_id: &str, poll_id: &str) -> Result<VoterPoll, PeerError> {
        self.voters.as_ref().history_entry(voter_id, poll_id).await
    }

    async fn add_history_entry(&self, _: &str, _: &str, _: &VoterPoll) -> Result<(), PeerError> {
        Err(PeerError::Transport("connection refused".into()))
    }

    async fn update_history_entry(&self, _: &str, _: &str, _: &VoterPoll) -> Result<(), PeerError> {
        Err(PeerError::Status(500))
    }

    async fn delete_history_entry(&self, _: &str, _: &str) -> Result<(), PeerError> {
        Err(PeerError::Transport("timed out".into()))
    }
}

// ============================================================================
// SERVICE WIRING
// ============================================================================

pub struct Cluster {
    pub voters: Arc<VoterService>,
    pub polls: Arc<PollService>,
    pub votes: VotesService,
    pub votes_store: Arc<CountingStore>,
}

impl Cluster {
    pub fn new() -> Self {
        let voters = Arc::new(VoterService::new(Arc::new(MemoryStore::new())));
        let polls = Arc::new(PollService::new(Arc::new(MemoryStore::new())));
        let votes_store = Arc::new(CountingStore::default());
        let votes = VotesService::new(votes_store.clone(), voters.clone(), polls.clone());
        Self {
            voters,
            polls,
            votes,
            votes_store,
        }
    }

    /// Voter service that accepts reads but fails every history write.
    pub fn with_failing_history() -> Self {
        let mut cluster = Self::new();
        let peer = FailingVoterPeer {
            voters: cluster.voters.clone(),
        };
        cluster.votes = VotesService::new(
            cluster.votes_store.clone(),
            Arc::new(peer),
            cluster.polls.clone(),
        );
        cluster
    }

    pub async fn seeded() -> Self {
        let cluster = Self::new();
        cluster.seed().await;
        cluster
    }

    pub async fn seed(&self) {
        self.voters
            .add_voter(Voter::new(VOTER_ID, "Ada", "Lovelace"))
            .await
            .expect("Failed to seed voter");
        seed_poll(&self.polls).await;
    }
}

/// Poll 9 with options A and B.
pub async fn seed_poll(polls: &PollService) {
    polls
        .add_poll(Poll::new(POLL_ID, "Lunch", "What should we eat?"))
        .await
        .expect("Failed to seed poll");
    for (id, text) in [(OPTION_A, "Pizza"), (OPTION_B, "Tacos")] {
        polls
            .add_poll_option(POLL_ID, id, Poll::with_single_option(PollOption::new("", text)))
            .await
            .expect("Failed to seed poll option");
    }
}
