//! Acting-party extractor
//!
//! Mutating routes identify the caller through two headers, `x-actor-code`
//! and `x-actor-role`. Codes are normalized the same way order payloads are,
//! so `" cen-01 "` and `CEN-01` name the same party.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use shared::models::Role;

use crate::core::ServerState;
use crate::orders::identity;
use crate::utils::AppError;

pub const ACTOR_CODE_HEADER: &str = "x-actor-code";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// The marketplace party a request acts as.
#[derive(Debug, Clone)]
pub struct CurrentActor {
    pub code: String,
    pub role: Role,
}

fn actor_from_parts(parts: &Parts) -> Result<Option<CurrentActor>, AppError> {
    let code_header = parts.headers.get(ACTOR_CODE_HEADER);
    let role_header = parts.headers.get(ACTOR_ROLE_HEADER);

    let (Some(code_value), Some(role_value)) = (code_header, role_header) else {
        if code_header.is_none() && role_header.is_none() {
            return Ok(None);
        }
        return Err(AppError::invalid(
            "Both x-actor-code and x-actor-role headers are required",
        ));
    };

    let code_raw = code_value
        .to_str()
        .map_err(|_| AppError::invalid("x-actor-code header is not valid UTF-8"))?;
    let code = identity::normalize_code(code_raw)
        .ok_or_else(|| AppError::invalid("x-actor-code header is empty"))?;

    let role_raw = role_value
        .to_str()
        .map_err(|_| AppError::invalid("x-actor-role header is not valid UTF-8"))?;
    let role = identity::normalize_role(role_raw)
        .ok_or_else(|| AppError::invalid(format!("Unknown role '{}'", role_raw.trim())))?;

    Ok(Some(CurrentActor { code, role }))
}

impl FromRequestParts<ServerState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        actor_from_parts(parts)?.ok_or_else(|| {
            AppError::invalid("Missing x-actor-code and x-actor-role headers")
        })
    }
}

/// `Option<CurrentActor>` succeeds with `None` when both headers are absent,
/// but still rejects malformed ones.
impl OptionalFromRequestParts<ServerState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Option<Self>, Self::Rejection> {
        actor_from_parts(parts)
    }
}
