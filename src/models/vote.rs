use serde::{Deserialize, Serialize};

use crate::repository::Document;

/// A cast vote. `vote_value` is the chosen option id within `poll_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "VoteID", default)]
    pub vote_id: String,
    #[serde(rename = "VoterID", default)]
    pub voter_id: String,
    #[serde(rename = "PollID", default)]
    pub poll_id: String,
    #[serde(rename = "VoteValue", default)]
    pub vote_value: String,
}

impl Vote {
    pub fn new(
        vote_id: impl Into<String>,
        voter_id: impl Into<String>,
        poll_id: impl Into<String>,
        vote_value: impl Into<String>,
    ) -> Self {
        Self {
            vote_id: vote_id.into(),
            voter_id: voter_id.into(),
            poll_id: poll_id.into(),
            vote_value: vote_value.into(),
        }
    }
}

impl Document for Vote {
    const KIND: &'static str = "Vote";
    // Keys keep the path-shaped layout of earlier deployments: vote:/votes/<id>
    const KEY_PREFIX: &'static str = "vote:/votes/";

    fn id(&self) -> &str {
        &self.vote_id
    }
}
