use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose};
use meallog_core::domain::common::Identity;
use serde::Deserialize;
use uuid::Uuid;

use super::http::server::api_entities::api_error::ApiError;

#[derive(Debug, Deserialize)]
struct JwtClaims {
    sub: Uuid,
}

/// Resolves the caller from the bearer token's payload segment.
///
/// Token issuance and signature verification are owned by the external
/// identity provider sitting in front of this service; here we only read the
/// subject claim to know who the caller is.
fn identity_from_bearer(token: &str) -> Option<Identity> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    let decoded = general_purpose::URL_SAFE_NO_PAD.decode(segments[1]).ok()?;
    let payload = String::from_utf8(decoded).ok()?;
    let claims: JwtClaims = serde_json::from_str(&payload).ok()?;

    Some(Identity::new(claims.sub))
}

/// Middleware that attaches an `Identity` extension when a parseable bearer
/// token is present. Requests without one pass through; handlers requiring a
/// caller use [`RequiredIdentity`] and reject with 401.
pub async fn auth(mut req: Request, next: Next) -> Response {
    if let Some(header) = req.headers().get("authorization")
        && let Ok(value) = header.to_str()
        && let Some(token) = value.strip_prefix("Bearer ")
        && let Some(identity) = identity_from_bearer(token)
    {
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}

/// Extractor for handlers that must run on behalf of an authenticated user.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(RequiredIdentity)
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("header.{encoded}.signature")
    }

    #[test]
    fn test_identity_parsed_from_sub_claim() {
        let user_id = Uuid::new_v4();
        let token = token_with_payload(&format!(r#"{{"sub":"{user_id}","exp":1735689600}}"#));

        let identity = identity_from_bearer(&token).unwrap();
        assert_eq!(identity.id(), user_id);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(identity_from_bearer("not-a-jwt").is_none());
        assert!(identity_from_bearer("a.b").is_none());
        assert!(identity_from_bearer(&token_with_payload("not json")).is_none());
        assert!(identity_from_bearer(&token_with_payload(r#"{"sub":"not-a-uuid"}"#)).is_none());
    }
}
