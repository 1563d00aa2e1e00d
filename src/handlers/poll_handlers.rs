use actix_web::{web, HttpResponse};

use super::health;
use super::{id_pair, json_config, new_id};
use crate::errors::AppError;
use crate::models::Poll;
use crate::services::PollService;
use crate::validate::validate_id;

/// Segments routed to fixed handlers in this scope.
const RESERVED_IDS: &[&str] = &["health"];

/// GET /polls
pub async fn list(service: web::Data<PollService>) -> Result<HttpResponse, AppError> {
    let polls = service.list_polls().await?;
    Ok(HttpResponse::Ok().json(polls))
}

/// GET /polls/{id}
pub async fn read(
    service: web::Data<PollService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let poll_id = validate_id(&path, "Poll ID")?;
    let poll = service.get_poll(&poll_id).await?;
    Ok(HttpResponse::Ok().json(poll))
}

/// POST /polls/{id} - options in the body are dropped.
pub async fn create(
    service: web::Data<PollService>,
    path: web::Path<String>,
    body: web::Json<Poll>,
) -> Result<HttpResponse, AppError> {
    let mut poll = body.into_inner();
    poll.poll_id = new_id(&path, "Poll ID", RESERVED_IDS)?;
    service.add_poll(poll).await?;
    Ok(HttpResponse::Ok().finish())
}

/// PUT /polls/{id}
pub async fn update(
    service: web::Data<PollService>,
    path: web::Path<String>,
    body: web::Json<Poll>,
) -> Result<HttpResponse, AppError> {
    let mut poll = body.into_inner();
    poll.poll_id = validate_id(&path, "Poll ID")?;
    service.update_poll(poll).await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /polls/{id}
pub async fn delete(
    service: web::Data<PollService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let poll_id = validate_id(&path, "Poll ID")?;
    service.delete_poll(&poll_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// GET /polls/{id}/options
pub async fn options(
    service: web::Data<PollService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let poll_id = validate_id(&path, "Poll ID")?;
    let options = service.get_options(&poll_id).await?;
    Ok(HttpResponse::Ok().json(options))
}

/// GET /polls/{id}/options/{optionid}
pub async fn read_option(
    service: web::Data<PollService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (poll_id, option_id) = id_pair(path, "Poll ID", "Option ID")?;
    let option = service.get_poll_option(&poll_id, &option_id).await?;
    Ok(HttpResponse::Ok().json(option))
}

/// POST /polls/{id}/options/{optionid} - body is a poll whose PollOptions
/// holds exactly one option.
pub async fn add_option(
    service: web::Data<PollService>,
    path: web::Path<(String, String)>,
    body: web::Json<Poll>,
) -> Result<HttpResponse, AppError> {
    let (poll_id, option_id) = id_pair(path, "Poll ID", "Option ID")?;
    service
        .add_poll_option(&poll_id, &option_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// PUT /polls/{id}/options/{optionid}
pub async fn update_option(
    service: web::Data<PollService>,
    path: web::Path<(String, String)>,
    body: web::Json<Poll>,
) -> Result<HttpResponse, AppError> {
    let (poll_id, option_id) = id_pair(path, "Poll ID", "Option ID")?;
    service
        .update_poll_option(&poll_id, &option_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /polls/{id}/options/{optionid}
pub async fn delete_option(
    service: web::Data<PollService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (poll_id, option_id) = id_pair(path, "Poll ID", "Option ID")?;
    service.delete_poll_option(&poll_id, &option_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Configure Poll API routes.
/// The health route reads `web::Data<ServiceInfo>` from app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(
        web::scope("/polls")
            .route("", web::get().to(list))
            .route("/health", web::get().to(health::status))
            .route("/{id}", web::get().to(read))
            .route("/{id}", web::post().to(create))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete))
            .route("/{id}/options", web::get().to(options))
            .route("/{id}/options/{optionid}", web::get().to(read_option))
            .route("/{id}/options/{optionid}", web::post().to(add_option))
            .route("/{id}/options/{optionid}", web::put().to(update_option))
            .route("/{id}/options/{optionid}", web::delete().to(delete_option)),
    );
}
