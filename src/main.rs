use actix_web::{App, HttpServer, middleware, web};
use clap::Parser;
use std::io;
use std::sync::Arc;

use ballot::config::{Cli, PollArgs, Service, VoterArgs, VotesArgs};
use ballot::handlers::health::ServiceInfo;
use ballot::handlers::{poll_handlers, voter_handlers, votes_handlers};
use ballot::peers::{HttpPollPeer, HttpVoterPeer, PeerClient};
use ballot::services::{PollService, VoterService, VotesService};
use ballot::store::{DocumentStore, MemoryStore, RedisStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    match Cli::parse().service {
        Service::Voter(args) => run_voter(args).await,
        Service::Poll(args) => run_poll(args).await,
        Service::Votes(args) => run_votes(args).await,
    }
}

async fn open_store(in_memory: bool, cache_url: &str) -> io::Result<Arc<dyn DocumentStore>> {
    if in_memory {
        log::warn!("Using in-memory document store, data is lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = RedisStore::connect(cache_url).await.map_err(|e| {
        io::Error::other(format!("Error connecting to document store at {cache_url}: {e}"))
    })?;
    Ok(Arc::new(store))
}

fn peer_client(base_url: &str, args_timeout: std::time::Duration) -> io::Result<PeerClient> {
    PeerClient::new(base_url, args_timeout).map_err(io::Error::other)
}

async fn run_voter(args: VoterArgs) -> io::Result<()> {
    log::info!("Init/cacheURL: {}", args.cache_url);
    log::info!("Init/votesAPIURL: {}", args.votes_api.as_deref().unwrap_or("(none)"));
    log::info!("Init/host: {}", args.host);
    log::info!("Init/port: {}", args.port);

    let store = open_store(args.in_memory, &args.cache_url).await?;
    let mut service = VoterService::new(store);
    if let Some(votes_api) = &args.votes_api {
        // Poll lookups go through the Votes service's read-through routes.
        let base = format!("{}/votes", votes_api.trim_end_matches('/'));
        let polls = HttpPollPeer::new(peer_client(&base, args.peer_timeout())?);
        service = service.with_poll_validation(Arc::new(polls));
    }
    let service = web::Data::new(service);
    let info = web::Data::new(ServiceInfo::new("voter-api"));

    log::info!("Starting voter-api at http://{}:{}", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .app_data(info.clone())
            .configure(voter_handlers::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}

async fn run_poll(args: PollArgs) -> io::Result<()> {
    log::info!("Init/cacheURL: {}", args.cache_url);
    log::info!("Init/host: {}", args.host);
    log::info!("Init/port: {}", args.port);

    let store = open_store(args.in_memory, &args.cache_url).await?;
    let service = web::Data::new(PollService::new(store));
    let info = web::Data::new(ServiceInfo::new("poll-api"));

    log::info!("Starting poll-api at http://{}:{}", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .app_data(info.clone())
            .configure(poll_handlers::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}

async fn run_votes(args: VotesArgs) -> io::Result<()> {
    log::info!("Init/cacheURL: {}", args.cache_url);
    log::info!("Init/voterAPIURL: {}", args.voter_api);
    log::info!("Init/pollAPIURL: {}", args.poll_api);
    log::info!("Init/host: {}", args.host);
    log::info!("Init/port: {}", args.port);

    let store = open_store(args.in_memory, &args.cache_url).await?;
    let voters = HttpVoterPeer::new(peer_client(&args.voter_api, args.peer_timeout())?);
    let polls = HttpPollPeer::new(peer_client(&args.poll_api, args.peer_timeout())?);
    let service = web::Data::new(VotesService::new(store, Arc::new(voters), Arc::new(polls)));
    let info = web::Data::new(ServiceInfo::new("votes-api"));

    log::info!("Starting votes-api at http://{}:{}", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .app_data(info.clone())
            .configure(votes_handlers::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}
