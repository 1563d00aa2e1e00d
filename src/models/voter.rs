use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::Document;

/// One entry of a voter's history: the poll voted in and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterPoll {
    #[serde(rename = "PollID", default)]
    pub poll_id: String,
    #[serde(rename = "VoteDate", default = "Utc::now")]
    pub vote_date: DateTime<Utc>,
}

impl VoterPoll {
    pub fn new(poll_id: impl Into<String>) -> Self {
        Self {
            poll_id: poll_id.into(),
            vote_date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    #[serde(rename = "VoterID", default)]
    pub voter_id: String,
    #[serde(rename = "FirstName", default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(rename = "LastName", default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(rename = "VoteHistory", default)]
    pub vote_history: Vec<VoterPoll>,
}

impl Voter {
    pub fn new(voter_id: impl Into<String>, first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            voter_id: voter_id.into(),
            first_name: first.into(),
            last_name: last.into(),
            vote_history: Vec::new(),
        }
    }

    /// Payload carrying a single history entry, the shape expected by the
    /// history sub-resource endpoints.
    pub fn with_single_entry(entry: VoterPoll) -> Self {
        Self {
            vote_history: vec![entry],
            ..Self::default()
        }
    }
}

impl Document for Voter {
    const KIND: &'static str = "Voter";
    const KEY_PREFIX: &'static str = "voter:";

    fn id(&self) -> &str {
        &self.voter_id
    }
}
