use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{Poll, PollOption};
use crate::repository::Repository;
use crate::store::DocumentStore;
use crate::validate::{expect_unique, require_single};

/// Polls and their options.
pub struct PollService {
    polls: Repository<Poll>,
}

impl PollService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            polls: Repository::new(store),
        }
    }

    pub async fn list_polls(&self) -> Result<Vec<Poll>, AppError> {
        self.polls.list().await
    }

    pub async fn get_poll(&self, poll_id: &str) -> Result<Poll, AppError> {
        self.polls.get(poll_id).await
    }

    /// Create a poll with no options; options are added one at a time.
    pub async fn add_poll(&self, mut poll: Poll) -> Result<(), AppError> {
        poll.options.clear();
        self.polls.create(&poll).await?;
        log::info!("Poll {} created", poll.poll_id);
        Ok(())
    }

    pub async fn update_poll(&self, update: Poll) -> Result<Poll, AppError> {
        let mut poll = self.polls.get(&update.poll_id).await?;
        if !update.title.trim().is_empty() {
            poll.title = update.title;
        }
        if !update.question.trim().is_empty() {
            poll.question = update.question;
        }
        self.polls.overwrite(&poll).await?;
        Ok(poll)
    }

    pub async fn delete_poll(&self, poll_id: &str) -> Result<(), AppError> {
        self.polls.delete(poll_id).await?;
        log::info!("Poll {poll_id} deleted");
        Ok(())
    }

    pub async fn get_options(&self, poll_id: &str) -> Result<Vec<PollOption>, AppError> {
        Ok(self.polls.get(poll_id).await?.options)
    }

    pub async fn get_poll_option(&self, poll_id: &str, option_id: &str) -> Result<PollOption, AppError> {
        let poll = self.polls.get(poll_id).await?;
        let option = expect_unique(
            poll.options.iter().filter(|o| o.option_id == option_id),
            || format!("option {option_id} of poll {poll_id}"),
        )?;
        Ok(option.clone())
    }

    /// Append one option. The option id is taken from `option_id`, never
    /// from the payload.
    pub async fn add_poll_option(
        &self,
        poll_id: &str,
        option_id: &str,
        payload: Poll,
    ) -> Result<(), AppError> {
        let mut poll = self.polls.get(poll_id).await?;

        let mut option = require_single(&payload.options, "poll option")?.clone();
        option.option_id = option_id.to_string();

        if poll.options.iter().any(|o| o.option_id == option_id) {
            return Err(AppError::Conflict(format!(
                "option {option_id} already exists in poll {poll_id}"
            )));
        }

        poll.options.push(option);
        self.polls.overwrite(&poll).await?;
        log::info!("Poll {poll_id} gained option {option_id}");
        Ok(())
    }

    pub async fn update_poll_option(
        &self,
        poll_id: &str,
        option_id: &str,
        payload: Poll,
    ) -> Result<(), AppError> {
        let mut poll = self.polls.get(poll_id).await?;

        let mut option = require_single(&payload.options, "poll option")?.clone();
        option.option_id = option_id.to_string();

        let slot = poll
            .options
            .iter_mut()
            .find(|o| o.option_id == option_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("option {option_id} not in poll {poll_id}"))
            })?;
        *slot = option;

        self.polls.overwrite(&poll).await
    }

    pub async fn delete_poll_option(&self, poll_id: &str, option_id: &str) -> Result<(), AppError> {
        let mut poll = self.polls.get(poll_id).await?;

        let index = poll
            .options
            .iter()
            .position(|o| o.option_id == option_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("option {option_id} not in poll {poll_id}"))
            })?;
        poll.options.remove(index);

        self.polls.overwrite(&poll).await?;
        log::info!("Poll {poll_id} lost option {option_id}");
        Ok(())
    }
}
