use crate::services::token_service::TokenError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Session authentication errors for protected routes.
#[derive(Debug)]
pub enum BearerAuthError {
    MissingAuthorizationHeader,
    InvalidAuthorizationFormat,
    InvalidToken,
    ExpiredToken,
}

impl std::fmt::Display for BearerAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BearerAuthError::MissingAuthorizationHeader => {
                write!(f, "Authorization header is required")
            }
            BearerAuthError::InvalidAuthorizationFormat => {
                write!(f, "Authorization header must be 'Bearer <token>'")
            }
            BearerAuthError::InvalidToken => write!(f, "Invalid session token"),
            BearerAuthError::ExpiredToken => write!(f, "Session token has expired"),
        }
    }
}

impl IntoResponse for BearerAuthError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
    }
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, BearerAuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(BearerAuthError::MissingAuthorizationHeader)?
        .to_str()
        .map_err(|_| BearerAuthError::InvalidAuthorizationFormat)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(BearerAuthError::InvalidAuthorizationFormat);
    }

    Ok(auth_header["Bearer ".len()..].to_string())
}

/// Gate for protected routes: validates the bearer session token and attaches
/// the caller's identity to the request for handlers to read.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BearerAuthError> {
    let token = extract_bearer_token(request.headers())?;

    let identity = state.token_service.validate(&token).map_err(|e| match e {
        TokenError::Expired => BearerAuthError::ExpiredToken,
        _ => BearerAuthError::InvalidToken,
    })?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));

        let token = extract_bearer_token(&headers).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = HeaderMap::new();
        let err = extract_bearer_token(&headers).unwrap_err();
        assert!(matches!(err, BearerAuthError::MissingAuthorizationHeader));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));

        let err = extract_bearer_token(&headers).unwrap_err();
        assert!(matches!(err, BearerAuthError::InvalidAuthorizationFormat));
    }
}
