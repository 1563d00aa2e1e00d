pub mod health;
pub mod poll_handlers;
pub mod voter_handlers;
pub mod votes_handlers;

use actix_web::web;

use crate::errors::AppError;
use crate::validate::validate_id;

/// Malformed JSON bodies go through `AppError` like every other failure,
/// so the client sees a bare 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        AppError::BadRequest(format!("{} {}: {err}", req.method(), req.path())).into()
    })
}

/// Validate the id of a resource being created. Ids listed in `reserved`
/// name fixed routes of the same scope and are refused, since a GET for
/// them would never reach the stored record.
pub(crate) fn new_id(raw: &str, field_name: &str, reserved: &[&str]) -> Result<String, AppError> {
    let id = validate_id(raw, field_name)?;
    if reserved.contains(&id.as_str()) {
        return Err(AppError::BadRequest(format!(
            "{field_name} '{id}' is reserved for a fixed route"
        )));
    }
    Ok(id)
}

/// Validate a (parent, child) pair of path ids.
pub(crate) fn id_pair(
    path: web::Path<(String, String)>,
    parent: &str,
    child: &str,
) -> Result<(String, String), AppError> {
    let (a, b) = path.into_inner();
    Ok((validate_id(&a, parent)?, validate_id(&b, child)?))
}
