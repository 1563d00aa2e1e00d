use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{PeerError, PollPeer, VoterPeer};
use crate::models::{Poll, PollOption, Voter, VoterPoll};

/// Thin JSON client bound to one peer's base URL.
#[derive(Clone)]
pub struct PeerClient {
    client: Client,
    base_url: String,
}

impl PeerClient {
    /// Every request made through this client is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PeerError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let resp = self.client.get(&url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), PeerError> {
        let url = self.url(path);
        log::debug!("{method} {url}");
        self.client
            .request(method, &url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), PeerError> {
        let url = self.url(path);
        log::debug!("DELETE {url}");
        self.client.delete(&url).send().await?.error_for_status()?;
        Ok(())
    }
}

/// Voter service reached over HTTP (`<base>/voters/...`).
#[derive(Clone)]
pub struct HttpVoterPeer {
    client: PeerClient,
}

impl HttpVoterPeer {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VoterPeer for HttpVoterPeer {
    async fn voters(&self) -> Result<Vec<Voter>, PeerError> {
        self.client.get_json("/voters").await
    }

    async fn voter(&self, voter_id: &str) -> Result<Voter, PeerError> {
        self.client.get_json(&format!("/voters/{voter_id}")).await
    }

    async fn history(&self, voter_id: &str) -> Result<Vec<VoterPoll>, PeerError> {
        self.client.get_json(&format!("/voters/{voter_id}/polls")).await
    }

    async fn history_entry(&self, voter_id: &str, poll_id: &str) -> Result<VoterPoll, PeerError> {
        self.client
            .get_json(&format!("/voters/{voter_id}/polls/{poll_id}"))
            .await
    }

    async fn add_history_entry(
        &self,
        voter_id: &str,
        poll_id: &str,
        entry: &VoterPoll,
    ) -> Result<(), PeerError> {
        let body = Voter::with_single_entry(entry.clone());
        self.client
            .send_json(Method::POST, &format!("/voters/{voter_id}/polls/{poll_id}"), &body)
            .await
    }

    async fn update_history_entry(
        &self,
        voter_id: &str,
        poll_id: &str,
        entry: &VoterPoll,
    ) -> Result<(), PeerError> {
        let body = Voter::with_single_entry(entry.clone());
        self.client
            .send_json(Method::PUT, &format!("/voters/{voter_id}/polls/{poll_id}"), &body)
            .await
    }

    async fn delete_history_entry(&self, voter_id: &str, poll_id: &str) -> Result<(), PeerError> {
        self.client
            .delete(&format!("/voters/{voter_id}/polls/{poll_id}"))
            .await
    }
}

/// Poll service reached over HTTP (`<base>/polls/...`). Pointing the base
/// URL at `<votes>/votes` reaches the same routes through the Votes
/// service's read-through proxy.
#[derive(Clone)]
pub struct HttpPollPeer {
    client: PeerClient,
}

impl HttpPollPeer {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PollPeer for HttpPollPeer {
    async fn polls(&self) -> Result<Vec<Poll>, PeerError> {
        self.client.get_json("/polls").await
    }

    async fn poll(&self, poll_id: &str) -> Result<Poll, PeerError> {
        self.client.get_json(&format!("/polls/{poll_id}")).await
    }

    async fn options(&self, poll_id: &str) -> Result<Vec<PollOption>, PeerError> {
        self.client.get_json(&format!("/polls/{poll_id}/options")).await
    }

    async fn option(&self, poll_id: &str, option_id: &str) -> Result<PollOption, PeerError> {
        self.client
            .get_json(&format!("/polls/{poll_id}/options/{option_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = PeerClient::new("http://localhost:1080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1080");
        assert_eq!(client.url("/voters/1"), "http://localhost:1080/voters/1");
    }
}
