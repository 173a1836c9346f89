// Handlers are split by session requirement:
// public routes read the session when present, protected routes sit behind
// `middleware::require_session` and receive `AuthUser`.
pub mod protected;
pub mod public;

use crate::database::MapId;
use crate::error::ApiError;

/// Parse a `:map_id` path segment. Anything that is not a positive integer
/// cannot name a map, so it is reported as not found.
pub(crate) fn parse_map_id(raw: &str) -> Result<MapId, ApiError> {
    match raw.parse::<MapId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::not_found(format!("Map '{}' not found", raw))),
    }
}
