use actix_web::{web, HttpResponse};

use super::health;
use super::{id_pair, json_config, new_id};
use crate::errors::AppError;
use crate::models::Voter;
use crate::services::VoterService;
use crate::validate::validate_id;

/// Segments routed to fixed handlers in this scope.
const RESERVED_IDS: &[&str] = &["health"];

/// GET /voters
pub async fn list(service: web::Data<VoterService>) -> Result<HttpResponse, AppError> {
    let voters = service.list_voters().await?;
    Ok(HttpResponse::Ok().json(voters))
}

/// GET /voters/{id}
pub async fn read(
    service: web::Data<VoterService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let voter_id = validate_id(&path, "Voter ID")?;
    let voter = service.get_voter(&voter_id).await?;
    Ok(HttpResponse::Ok().json(voter))
}

/// POST /voters/{id} - the path id overrides any VoterID in the body, and
/// any history in the body is dropped.
pub async fn create(
    service: web::Data<VoterService>,
    path: web::Path<String>,
    body: web::Json<Voter>,
) -> Result<HttpResponse, AppError> {
    let mut voter = body.into_inner();
    voter.voter_id = new_id(&path, "Voter ID", RESERVED_IDS)?;
    service.add_voter(voter).await?;
    Ok(HttpResponse::Ok().finish())
}

/// PUT /voters/{id} - blank name fields keep their stored values.
pub async fn update(
    service: web::Data<VoterService>,
    path: web::Path<String>,
    body: web::Json<Voter>,
) -> Result<HttpResponse, AppError> {
    let mut voter = body.into_inner();
    voter.voter_id = validate_id(&path, "Voter ID")?;
    service.update_voter(voter).await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /voters/{id}
pub async fn delete(
    service: web::Data<VoterService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let voter_id = validate_id(&path, "Voter ID")?;
    service.delete_voter(&voter_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// GET /voters/{id}/polls
pub async fn history(
    service: web::Data<VoterService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let voter_id = validate_id(&path, "Voter ID")?;
    let history = service.get_history(&voter_id).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// GET /voters/{id}/polls/{pollid}
pub async fn read_poll(
    service: web::Data<VoterService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (voter_id, poll_id) = id_pair(path, "Voter ID", "Poll ID")?;
    let entry = service.get_voter_poll(&voter_id, &poll_id).await?;
    Ok(HttpResponse::Ok().json(entry))
}

/// POST /voters/{id}/polls/{pollid} - body is a voter whose VoteHistory
/// holds exactly one entry; everything else in it is ignored.
pub async fn add_poll(
    service: web::Data<VoterService>,
    path: web::Path<(String, String)>,
    body: web::Json<Voter>,
) -> Result<HttpResponse, AppError> {
    let (voter_id, poll_id) = id_pair(path, "Voter ID", "Poll ID")?;
    service
        .add_voter_poll(&voter_id, &poll_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// PUT /voters/{id}/polls/{pollid}
pub async fn update_poll(
    service: web::Data<VoterService>,
    path: web::Path<(String, String)>,
    body: web::Json<Voter>,
) -> Result<HttpResponse, AppError> {
    let (voter_id, poll_id) = id_pair(path, "Voter ID", "Poll ID")?;
    service
        .update_poll_data(&voter_id, &poll_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /voters/{id}/polls/{pollid}
pub async fn delete_poll(
    service: web::Data<VoterService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (voter_id, poll_id) = id_pair(path, "Voter ID", "Poll ID")?;
    service.delete_voter_poll(&voter_id, &poll_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Configure Voter API routes. `/voters/health` is registered before
/// `/voters/{id}` so it is not read as a voter id.
/// The health route reads `web::Data<ServiceInfo>` from app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(
        web::scope("/voters")
            .route("", web::get().to(list))
            .route("/health", web::get().to(health::status))
            .route("/{id}", web::get().to(read))
            .route("/{id}", web::post().to(create))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete))
            .route("/{id}/polls", web::get().to(history))
            .route("/{id}/polls/{pollid}", web::get().to(read_poll))
            .route("/{id}/polls/{pollid}", web::post().to(add_poll))
            .route("/{id}/polls/{pollid}", web::put().to(update_poll))
            .route("/{id}/polls/{pollid}", web::delete().to(delete_poll)),
    );
}
