use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::middleware::AuthenticatedSession;
use crate::inbound::http::router::AppState;

/// Revoke the token the request was authenticated with.
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedSession>,
) -> Result<StatusCode, ApiError> {
    state.session_service.logout(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
