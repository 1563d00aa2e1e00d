use actix_web::{web, HttpResponse};

use super::health;
use super::{id_pair, json_config, new_id};
use crate::errors::AppError;
use crate::models::Vote;
use crate::services::VotesService;
use crate::validate::validate_id;

/// Segments routed to fixed handlers in this scope.
const RESERVED_IDS: &[&str] = &["health", "voters", "polls"];

/// GET /votes
pub async fn list(service: web::Data<VotesService>) -> Result<HttpResponse, AppError> {
    let votes = service.list_votes().await?;
    Ok(HttpResponse::Ok().json(votes))
}

/// GET /votes/{voteid}
pub async fn read(
    service: web::Data<VotesService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let vote_id = validate_id(&path, "Vote ID")?;
    let vote = service.get_vote(&vote_id).await?;
    Ok(HttpResponse::Ok().json(vote))
}

/// POST /votes/{voteid} - validates voter, poll and option, stores the
/// vote, then records it in the voter's history.
pub async fn create(
    service: web::Data<VotesService>,
    path: web::Path<String>,
    body: web::Json<Vote>,
) -> Result<HttpResponse, AppError> {
    let vote_id = new_id(&path, "Vote ID", RESERVED_IDS)?;
    service.add_vote(&vote_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// PUT /votes/{voteid} - only VoteValue is read from the body.
pub async fn update(
    service: web::Data<VotesService>,
    path: web::Path<String>,
    body: web::Json<Vote>,
) -> Result<HttpResponse, AppError> {
    let vote_id = validate_id(&path, "Vote ID")?;
    service.update_vote(&vote_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /votes/{voteid}
pub async fn delete(
    service: web::Data<VotesService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let vote_id = validate_id(&path, "Vote ID")?;
    service.delete_vote(&vote_id).await?;
    Ok(HttpResponse::Ok().finish())
}

// Read-through routes: pass the Voter and Poll services' answers along.

/// GET /votes/voters
pub async fn voters(service: web::Data<VotesService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.all_voters().await?))
}

/// GET /votes/voters/{voterid}
pub async fn voter(
    service: web::Data<VotesService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let voter_id = validate_id(&path, "Voter ID")?;
    Ok(HttpResponse::Ok().json(service.voter(&voter_id).await?))
}

/// GET /votes/voters/{voterid}/polls
pub async fn voter_history(
    service: web::Data<VotesService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let voter_id = validate_id(&path, "Voter ID")?;
    Ok(HttpResponse::Ok().json(service.voter_history(&voter_id).await?))
}

/// GET /votes/voters/{voterid}/polls/{pollid}
pub async fn voter_poll(
    service: web::Data<VotesService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (voter_id, poll_id) = id_pair(path, "Voter ID", "Poll ID")?;
    Ok(HttpResponse::Ok().json(service.voter_poll(&voter_id, &poll_id).await?))
}

/// GET /votes/polls
pub async fn polls(service: web::Data<VotesService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.all_polls().await?))
}

/// GET /votes/polls/{pollid}
pub async fn poll(
    service: web::Data<VotesService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let poll_id = validate_id(&path, "Poll ID")?;
    Ok(HttpResponse::Ok().json(service.poll(&poll_id).await?))
}

/// GET /votes/polls/{pollid}/options
pub async fn poll_options(
    service: web::Data<VotesService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let poll_id = validate_id(&path, "Poll ID")?;
    Ok(HttpResponse::Ok().json(service.poll_options(&poll_id).await?))
}

/// GET /votes/polls/{pollid}/options/{optionid}
pub async fn poll_option(
    service: web::Data<VotesService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (poll_id, option_id) = id_pair(path, "Poll ID", "Option ID")?;
    Ok(HttpResponse::Ok().json(service.poll_option(&poll_id, &option_id).await?))
}

/// Configure Votes API routes. The fixed `/votes/voters`, `/votes/polls`
/// and `/votes/health` prefixes come before `/votes/{voteid}`.
/// The health route reads `web::Data<ServiceInfo>` from app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(
        web::scope("/votes")
            .route("", web::get().to(list))
            .route("/health", web::get().to(health::status))
            .route("/voters", web::get().to(voters))
            .route("/voters/{voterid}", web::get().to(voter))
            .route("/voters/{voterid}/polls", web::get().to(voter_history))
            .route("/voters/{voterid}/polls/{pollid}", web::get().to(voter_poll))
            .route("/polls", web::get().to(polls))
            .route("/polls/{pollid}", web::get().to(poll))
            .route("/polls/{pollid}/options", web::get().to(poll_options))
            .route("/polls/{pollid}/options/{optionid}", web::get().to(poll_option))
            .route("/{voteid}", web::get().to(read))
            .route("/{voteid}", web::post().to(create))
            .route("/{voteid}", web::put().to(update))
            .route("/{voteid}", web::delete().to(delete)),
    );
}
