use serde::{Deserialize, Serialize};

use crate::repository::Document;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    #[serde(rename = "PollOptionID", default)]
    pub option_id: String,
    #[serde(rename = "PollOptionText", default)]
    pub text: String,
}

impl PollOption {
    pub fn new(option_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    #[serde(rename = "PollID", default)]
    pub poll_id: String,
    #[serde(rename = "PollTitle", default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(rename = "PollQuestion", default, skip_serializing_if = "String::is_empty")]
    pub question: String,
    #[serde(rename = "PollOptions", default)]
    pub options: Vec<PollOption>,
}

impl Poll {
    pub fn new(poll_id: impl Into<String>, title: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            poll_id: poll_id.into(),
            title: title.into(),
            question: question.into(),
            options: Vec::new(),
        }
    }

    /// Payload carrying a single option for the options sub-resource.
    pub fn with_single_option(option: PollOption) -> Self {
        Self {
            options: vec![option],
            ..Self::default()
        }
    }
}

impl Document for Poll {
    const KIND: &'static str = "Poll";
    const KEY_PREFIX: &'static str = "poll:";

    fn id(&self) -> &str {
        &self.poll_id
    }
}
