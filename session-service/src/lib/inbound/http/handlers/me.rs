use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSession;

/// Claims of the presented token.
pub async fn me(
    Extension(session): Extension<AuthenticatedSession>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    let principal = session.principal;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user_id: principal.user_id.to_string(),
            email: principal.email,
            issued_at: principal.issued_at,
            expires_at: principal.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user_id: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
