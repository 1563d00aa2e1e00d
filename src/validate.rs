use crate::errors::AppError;

const MAX_ID_LEN: usize = 64;

/// Validate an identifier taken from a request path: 1-64 chars, ASCII
/// letters, digits, '-' and '_' only. Returns the trimmed id.
pub fn validate_id(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field_name} is required")));
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(AppError::BadRequest(format!(
            "{field_name} must be at most {MAX_ID_LEN} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::BadRequest(format!(
            "{field_name} '{trimmed}' may only contain letters, numbers, '-' and '_'"
        )));
    }
    Ok(trimmed.to_string())
}

/// Sub-resource writes carry exactly one item per request.
pub fn require_single<'a, T>(items: &'a [T], what: &str) -> Result<&'a T, AppError> {
    match items {
        [item] => Ok(item),
        _ => Err(AppError::BadRequest(format!(
            "only one {what} may be submitted at a time, {} given",
            items.len()
        ))),
    }
}

/// Zero matches is NotFound, more than one is a broken invariant.
pub fn expect_unique<'a, T>(
    mut matches: impl Iterator<Item = &'a T>,
    describe: impl Fn() -> String,
) -> Result<&'a T, AppError> {
    let first = matches
        .next()
        .ok_or_else(|| AppError::NotFound(describe()))?;
    if matches.next().is_some() {
        return Err(AppError::Internal(format!(
            "internal state is inconsistent, multiple matches for {}",
            describe()
        )));
    }
    Ok(first)
}
