use actix_web::ResponseError;
use async_trait::async_trait;

use super::{PeerError, PollPeer, VoterPeer};
use crate::errors::AppError;
use crate::models::{Poll, PollOption, Voter, VoterPoll};
use crate::services::{PollService, VoterService};

/// Same status the HTTP handler would have answered with.
fn as_peer_error(e: AppError) -> PeerError {
    PeerError::Status(e.status_code().as_u16())
}

#[async_trait]
impl VoterPeer for VoterService {
    async fn voters(&self) -> Result<Vec<Voter>, PeerError> {
        self.list_voters().await.map_err(as_peer_error)
    }

    async fn voter(&self, voter_id: &str) -> Result<Voter, PeerError> {
        self.get_voter(voter_id).await.map_err(as_peer_error)
    }

    async fn history(&self, voter_id: &str) -> Result<Vec<VoterPoll>, PeerError> {
        self.get_history(voter_id).await.map_err(as_peer_error)
    }

    async fn history_entry(&self, voter_id: &str, poll_id: &str) -> Result<VoterPoll, PeerError> {
        self.get_voter_poll(voter_id, poll_id).await.map_err(as_peer_error)
    }

    async fn add_history_entry(
        &self,
        voter_id: &str,
        poll_id: &str,
        entry: &VoterPoll,
    ) -> Result<(), PeerError> {
        self.add_voter_poll(voter_id, poll_id, Voter::with_single_entry(entry.clone()))
            .await
            .map_err(as_peer_error)
    }

    async fn update_history_entry(
        &self,
        voter_id: &str,
        poll_id: &str,
        entry: &VoterPoll,
    ) -> Result<(), PeerError> {
        self.update_poll_data(voter_id, poll_id, Voter::with_single_entry(entry.clone()))
            .await
            .map_err(as_peer_error)
    }

    async fn delete_history_entry(&self, voter_id: &str, poll_id: &str) -> Result<(), PeerError> {
        self.delete_voter_poll(voter_id, poll_id).await.map_err(as_peer_error)
    }
}

#[async_trait]
impl PollPeer for PollService {
    async fn polls(&self) -> Result<Vec<Poll>, PeerError> {
        self.list_polls().await.map_err(as_peer_error)
    }

    async fn poll(&self, poll_id: &str) -> Result<Poll, PeerError> {
        self.get_poll(poll_id).await.map_err(as_peer_error)
    }

    async fn options(&self, poll_id: &str) -> Result<Vec<PollOption>, PeerError> {
        self.get_options(poll_id).await.map_err(as_peer_error)
    }

    async fn option(&self, poll_id: &str, option_id: &str) -> Result<PollOption, PeerError> {
        self.get_poll_option(poll_id, option_id).await.map_err(as_peer_error)
    }
}
