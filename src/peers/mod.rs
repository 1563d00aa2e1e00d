//! Clients for the services the Votes service depends on.
//!
//! The Votes service never talks to another service's store. It goes
//! through these traits, which have an HTTP implementation for deployment
//! and an in-process one (the services themselves) for tests and
//! single-process wiring.

mod http;
mod local;

pub use http::{HttpPollPeer, HttpVoterPeer, PeerClient};

use async_trait::async_trait;
use std::fmt;

use crate::models::{Poll, PollOption, Voter, VoterPoll};

#[derive(Debug)]
pub enum PeerError {
    /// The request never produced a response (connect, timeout, decode).
    Transport(String),
    /// The peer answered with a non-success status.
    Status(u16),
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerError::Transport(e) => write!(f, "transport failure: {e}"),
            PeerError::Status(code) => write!(f, "peer answered {code}"),
        }
    }
}

impl std::error::Error for PeerError {}

impl From<reqwest::Error> for PeerError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => PeerError::Status(status.as_u16()),
            None => PeerError::Transport(e.to_string()),
        }
    }
}

#[async_trait]
pub trait VoterPeer: Send + Sync {
    async fn voters(&self) -> Result<Vec<Voter>, PeerError>;
    async fn voter(&self, voter_id: &str) -> Result<Voter, PeerError>;
    async fn history(&self, voter_id: &str) -> Result<Vec<VoterPoll>, PeerError>;
    async fn history_entry(&self, voter_id: &str, poll_id: &str) -> Result<VoterPoll, PeerError>;
    async fn add_history_entry(
        &self,
        voter_id: &str,
        poll_id: &str,
        entry: &VoterPoll,
    ) -> Result<(), PeerError>;
    async fn update_history_entry(
        &self,
        voter_id: &str,
        poll_id: &str,
        entry: &VoterPoll,
    ) -> Result<(), PeerError>;
    async fn delete_history_entry(&self, voter_id: &str, poll_id: &str) -> Result<(), PeerError>;
}

#[async_trait]
pub trait PollPeer: Send + Sync {
    async fn polls(&self) -> Result<Vec<Poll>, PeerError>;
    async fn poll(&self, poll_id: &str) -> Result<Poll, PeerError>;
    async fn options(&self, poll_id: &str) -> Result<Vec<PollOption>, PeerError>;
    async fn option(&self, poll_id: &str, option_id: &str) -> Result<PollOption, PeerError>;
}
