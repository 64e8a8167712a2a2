use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::session::models::Principal;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

/// Extension carrying the accepted token and the identity it proves.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub principal: Principal,
    pub token: String,
}

/// Middleware that accepts a request only if its bearer token passes the
/// session check (signature, expiry, revocation).
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?.to_string();

    let principal = state
        .session_service
        .authorize(&token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            ApiError::from(e)
        })?;

    req.extensions_mut()
        .insert(AuthenticatedSession { principal, token });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/auth/me");
        if let Some(value) = header {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let req = request_with(None);
        assert!(matches!(
            extract_token_from_header(&req),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_scheme_is_unauthorized() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer   ", "abc.def.ghi"] {
            let req = request_with(Some(value));
            assert!(
                matches!(extract_token_from_header(&req), Err(ApiError::Unauthorized(_))),
                "{value:?} was accepted"
            );
        }
    }
}
