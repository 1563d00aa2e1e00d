//! Command-line configuration. Every flag can be overridden from the
//! environment (`VOTERAPI_*`, `POLLAPI_*`, `VOTESAPI_*`); a `.env` file is
//! loaded before parsing.

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "ballot-services", version, about = "Voter, Poll and Votes HTTP services")]
pub struct Cli {
    #[command(subcommand)]
    pub service: Service,
}

#[derive(Subcommand, Debug)]
pub enum Service {
    /// Voter records and vote history
    Voter(VoterArgs),
    /// Polls and poll options
    Poll(PollArgs),
    /// Vote casting across the Voter and Poll services
    Votes(VotesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct VoterArgs {
    #[arg(short = 'H', long, env = "VOTERAPI_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(short, long, env = "VOTERAPI_PORT", default_value_t = 1080)]
    pub port: u16,
    #[arg(short, long, env = "VOTERAPI_CACHE_URL", default_value = "redis://127.0.0.1:6379")]
    pub cache_url: String,
    /// Keep documents in process memory instead of Redis
    #[arg(long, env = "VOTERAPI_IN_MEMORY")]
    pub in_memory: bool,
    /// Votes API base URL; when set, history entries must name a poll it can resolve
    #[arg(long, env = "VOTERAPI_VOTES_API_URL")]
    pub votes_api: Option<String>,
    /// Timeout for each call to another service, at least one second
    #[arg(
        long,
        env = "VOTERAPI_PEER_TIMEOUT_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub peer_timeout_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    #[arg(short = 'H', long, env = "POLLAPI_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(short, long, env = "POLLAPI_PORT", default_value_t = 2080)]
    pub port: u16,
    #[arg(short, long, env = "POLLAPI_CACHE_URL", default_value = "redis://127.0.0.1:6379")]
    pub cache_url: String,
    #[arg(long, env = "POLLAPI_IN_MEMORY")]
    pub in_memory: bool,
}

#[derive(Args, Debug, Clone)]
pub struct VotesArgs {
    #[arg(short = 'H', long, env = "VOTESAPI_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(short, long, env = "VOTESAPI_PORT", default_value_t = 3080)]
    pub port: u16,
    #[arg(short, long, env = "VOTESAPI_CACHE_URL", default_value = "redis://127.0.0.1:6379")]
    pub cache_url: String,
    #[arg(long, env = "VOTESAPI_IN_MEMORY")]
    pub in_memory: bool,
    #[arg(long, env = "VOTESAPI_VOTER_API_URL", default_value = "http://localhost:1080")]
    pub voter_api: String,
    #[arg(long, env = "VOTESAPI_POLL_API_URL", default_value = "http://localhost:2080")]
    pub poll_api: String,
    /// Timeout for each call to another service, at least one second
    #[arg(
        long,
        env = "VOTESAPI_PEER_TIMEOUT_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub peer_timeout_secs: u64,
}

impl VoterArgs {
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }
}

impl VotesArgs {
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }
}
