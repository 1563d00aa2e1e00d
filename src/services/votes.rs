//! Vote casting across services.
//!
//! A vote write touches three places: the Voter and Poll services for
//! validation, this service's own store, and the voter's history for
//! propagation. There is no distributed transaction, so each write runs as
//! a small saga: validate, commit locally, propagate. Create and update
//! undo the local commit if propagation fails; delete does not.
//!
//! Validation and read-through failures surface as NotFound whether the
//! peer was unreachable or the entity was missing. Propagation failures
//! surface as Internal.

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{Poll, PollOption, Vote, Voter, VoterPoll};
use crate::peers::{PeerError, PollPeer, VoterPeer};
use crate::repository::Repository;
use crate::store::DocumentStore;
use crate::validate::validate_id;

pub struct VotesService {
    votes: Repository<Vote>,
    voters: Arc<dyn VoterPeer>,
    polls: Arc<dyn PollPeer>,
}

fn unresolved(what: String) -> impl FnOnce(PeerError) -> AppError {
    move |e| AppError::NotFound(format!("{what} could not be resolved: {e}"))
}

impl VotesService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        voters: Arc<dyn VoterPeer>,
        polls: Arc<dyn PollPeer>,
    ) -> Self {
        Self {
            votes: Repository::new(store),
            voters,
            polls,
        }
    }

    pub async fn list_votes(&self) -> Result<Vec<Vote>, AppError> {
        self.votes.list().await
    }

    pub async fn get_vote(&self, vote_id: &str) -> Result<Vote, AppError> {
        self.votes.get(vote_id).await
    }

    /// Cast a vote. `vote_id` from the path wins over any id in the body.
    pub async fn add_vote(&self, vote_id: &str, mut vote: Vote) -> Result<Vote, AppError> {
        vote.vote_id = vote_id.to_string();
        vote.voter_id = validate_id(&vote.voter_id, "VoterID")?;
        vote.poll_id = validate_id(&vote.poll_id, "PollID")?;
        vote.vote_value = validate_id(&vote.vote_value, "VoteValue")?;

        if self.votes.find(vote_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "vote {vote_id} already exists, use PUT to change it"
            )));
        }

        self.voters
            .voter(&vote.voter_id)
            .await
            .map_err(unresolved(format!("voter {}", vote.voter_id)))?;
        self.polls
            .poll(&vote.poll_id)
            .await
            .map_err(unresolved(format!("poll {}", vote.poll_id)))?;
        self.polls
            .option(&vote.poll_id, &vote.vote_value)
            .await
            .map_err(unresolved(format!(
                "option {} of poll {}",
                vote.vote_value, vote.poll_id
            )))?;

        self.votes.create(&vote).await?;

        let entry = VoterPoll::new(vote.poll_id.clone());
        if let Err(e) = self
            .voters
            .add_history_entry(&vote.voter_id, &vote.poll_id, &entry)
            .await
        {
            let undo = self.votes.delete(vote_id).await;
            report_compensation(&format!("removing vote {vote_id}"), undo);
            return Err(AppError::Internal(format!(
                "could not record poll {} in voter {}'s history: {e}",
                vote.poll_id, vote.voter_id
            )));
        }

        log::info!(
            "Vote {vote_id} cast by voter {} in poll {} for option {}",
            vote.voter_id,
            vote.poll_id,
            vote.vote_value
        );
        Ok(vote)
    }

    /// Change the chosen option of an existing vote. Every other field of
    /// `update` is ignored.
    pub async fn update_vote(&self, vote_id: &str, update: Vote) -> Result<Vote, AppError> {
        let previous = self.votes.get(vote_id).await?;

        if update.vote_value.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "no VoteValue given to update vote {vote_id}"
            )));
        }
        let new_value = validate_id(&update.vote_value, "VoteValue")?;

        self.polls
            .option(&previous.poll_id, &new_value)
            .await
            .map_err(unresolved(format!(
                "option {new_value} of poll {}",
                previous.poll_id
            )))?;

        let mut vote = previous.clone();
        vote.vote_value = new_value;
        self.votes.overwrite(&vote).await?;

        let entry = VoterPoll::new(vote.poll_id.clone());
        if let Err(e) = self
            .voters
            .update_history_entry(&vote.voter_id, &vote.poll_id, &entry)
            .await
        {
            let undo = self.votes.overwrite(&previous).await;
            report_compensation(&format!("restoring vote {vote_id}"), undo);
            return Err(AppError::Internal(format!(
                "could not refresh poll {} in voter {}'s history: {e}",
                vote.poll_id, vote.voter_id
            )));
        }

        log::info!("Vote {vote_id} changed to option {}", vote.vote_value);
        Ok(vote)
    }

    /// Delete a vote, then drop the poll from the voter's history. A failed
    /// history update is reported as Internal but the local delete stands.
    pub async fn delete_vote(&self, vote_id: &str) -> Result<(), AppError> {
        let vote = self.votes.get(vote_id).await?;
        self.votes.delete(vote_id).await?;

        if let Err(e) = self
            .voters
            .delete_history_entry(&vote.voter_id, &vote.poll_id)
            .await
        {
            log::warn!(
                "Vote {vote_id} deleted, but voter {}'s history was not updated",
                vote.voter_id
            );
            return Err(AppError::Internal(format!(
                "could not remove poll {} from voter {}'s history: {e}",
                vote.poll_id, vote.voter_id
            )));
        }

        log::info!("Vote {vote_id} deleted");
        Ok(())
    }

    pub async fn all_voters(&self) -> Result<Vec<Voter>, AppError> {
        self.voters
            .voters()
            .await
            .map_err(unresolved("voter list".to_string()))
    }

    pub async fn voter(&self, voter_id: &str) -> Result<Voter, AppError> {
        self.voters
            .voter(voter_id)
            .await
            .map_err(unresolved(format!("voter {voter_id}")))
    }

    pub async fn voter_history(&self, voter_id: &str) -> Result<Vec<VoterPoll>, AppError> {
        self.voters
            .history(voter_id)
            .await
            .map_err(unresolved(format!("history of voter {voter_id}")))
    }

    pub async fn voter_poll(&self, voter_id: &str, poll_id: &str) -> Result<VoterPoll, AppError> {
        self.voters
            .history_entry(voter_id, poll_id)
            .await
            .map_err(unresolved(format!("poll {poll_id} in voter {voter_id}'s history")))
    }

    pub async fn all_polls(&self) -> Result<Vec<Poll>, AppError> {
        self.polls
            .polls()
            .await
            .map_err(unresolved("poll list".to_string()))
    }

    pub async fn poll(&self, poll_id: &str) -> Result<Poll, AppError> {
        self.polls
            .poll(poll_id)
            .await
            .map_err(unresolved(format!("poll {poll_id}")))
    }

    pub async fn poll_options(&self, poll_id: &str) -> Result<Vec<PollOption>, AppError> {
        self.polls
            .options(poll_id)
            .await
            .map_err(unresolved(format!("options of poll {poll_id}")))
    }

    pub async fn poll_option(&self, poll_id: &str, option_id: &str) -> Result<PollOption, AppError> {
        self.polls
            .option(poll_id, option_id)
            .await
            .map_err(unresolved(format!("option {option_id} of poll {poll_id}")))
    }
}

fn report_compensation(action: &str, outcome: Result<(), AppError>) {
    match outcome {
        Ok(()) => log::warn!("Propagation failed; compensated by {action}"),
        Err(e) => log::error!(
            "Propagation failed and compensation ({action}) also failed, stores are now inconsistent: {e}"
        ),
    }
}
