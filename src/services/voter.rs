use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{Voter, VoterPoll};
use crate::peers::PollPeer;
use crate::repository::Repository;
use crate::store::DocumentStore;
use crate::validate::{expect_unique, require_single};

/// Voter records and their vote history.
pub struct VoterService {
    voters: Repository<Voter>,
    polls: Option<Arc<dyn PollPeer>>,
}

impl VoterService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            voters: Repository::new(store),
            polls: None,
        }
    }

    /// Require history entries to name a poll that `polls` can resolve.
    pub fn with_poll_validation(mut self, polls: Arc<dyn PollPeer>) -> Self {
        self.polls = Some(polls);
        self
    }

    pub async fn list_voters(&self) -> Result<Vec<Voter>, AppError> {
        self.voters.list().await
    }

    pub async fn get_voter(&self, voter_id: &str) -> Result<Voter, AppError> {
        self.voters.get(voter_id).await
    }

    /// Create a voter. History cannot be seeded: whatever the payload
    /// carries is discarded.
    pub async fn add_voter(&self, mut voter: Voter) -> Result<(), AppError> {
        voter.vote_history.clear();
        self.voters.create(&voter).await?;
        log::info!("Voter {} created", voter.voter_id);
        Ok(())
    }

    /// Merge the non-blank name fields of `update` into the stored voter.
    /// History is never touched here.
    pub async fn update_voter(&self, update: Voter) -> Result<Voter, AppError> {
        let mut voter = self.voters.get(&update.voter_id).await?;
        if !update.first_name.trim().is_empty() {
            voter.first_name = update.first_name;
        }
        if !update.last_name.trim().is_empty() {
            voter.last_name = update.last_name;
        }
        self.voters.overwrite(&voter).await?;
        Ok(voter)
    }

    pub async fn delete_voter(&self, voter_id: &str) -> Result<(), AppError> {
        self.voters.delete(voter_id).await?;
        log::info!("Voter {voter_id} deleted");
        Ok(())
    }

    pub async fn get_history(&self, voter_id: &str) -> Result<Vec<VoterPoll>, AppError> {
        Ok(self.voters.get(voter_id).await?.vote_history)
    }

    pub async fn get_voter_poll(&self, voter_id: &str, poll_id: &str) -> Result<VoterPoll, AppError> {
        let voter = self.voters.get(voter_id).await?;
        let entry = expect_unique(
            voter.vote_history.iter().filter(|p| p.poll_id == poll_id),
            || format!("poll {poll_id} in voter {voter_id}'s history"),
        )?;
        Ok(entry.clone())
    }

    /// Append one history entry. The entry's poll id always comes from
    /// `poll_id`; a voter may hold at most one entry per poll.
    pub async fn add_voter_poll(
        &self,
        voter_id: &str,
        poll_id: &str,
        payload: Voter,
    ) -> Result<(), AppError> {
        let mut voter = self.voters.get(voter_id).await?;

        let mut entry = require_single(&payload.vote_history, "history entry")?.clone();
        entry.poll_id = poll_id.to_string();

        if let Some(polls) = &self.polls {
            polls.poll(poll_id).await.map_err(|e| {
                AppError::NotFound(format!("poll {poll_id} could not be resolved: {e}"))
            })?;
        }

        if voter.vote_history.iter().any(|p| p.poll_id == poll_id) {
            return Err(AppError::Conflict(format!(
                "poll {poll_id} already in voter {voter_id}'s history, use PUT to update it"
            )));
        }

        voter.vote_history.push(entry);
        self.voters.overwrite(&voter).await?;
        log::info!("Voter {voter_id} history gained poll {poll_id}");
        Ok(())
    }

    /// Replace the history entry for `poll_id` wholesale.
    pub async fn update_poll_data(
        &self,
        voter_id: &str,
        poll_id: &str,
        payload: Voter,
    ) -> Result<(), AppError> {
        let mut voter = self.voters.get(voter_id).await?;

        let mut entry = require_single(&payload.vote_history, "history entry")?.clone();
        entry.poll_id = poll_id.to_string();

        let slot = voter
            .vote_history
            .iter_mut()
            .find(|p| p.poll_id == poll_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("poll {poll_id} not in voter {voter_id}'s history"))
            })?;
        *slot = entry;

        self.voters.overwrite(&voter).await
    }

    pub async fn delete_voter_poll(&self, voter_id: &str, poll_id: &str) -> Result<(), AppError> {
        let mut voter = self.voters.get(voter_id).await?;

        let index = voter
            .vote_history
            .iter()
            .position(|p| p.poll_id == poll_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("poll {poll_id} not in voter {voter_id}'s history"))
            })?;
        voter.vote_history.remove(index);

        self.voters.overwrite(&voter).await?;
        log::info!("Voter {voter_id} history lost poll {poll_id}");
        Ok(())
    }
}
