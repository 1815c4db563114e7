use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::presentation::http::errors::AppError;

pub const VISITOR_COOKIE: &str = "visitor_id";
const VISITOR_COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

/// Value of the named cookie, if the request carries it.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// Browser-scoped id for anonymous visitors, kept in the `visitor_id` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorId(pub Uuid);

/// Attaches a [`VisitorId`] to the request, issuing a new cookie when the
/// browser has none or sends one that does not parse.
pub async fn visitor_middleware(mut req: Request, next: Next) -> Response {
    let known = cookie_value(req.headers(), VISITOR_COOKIE).and_then(|v| v.parse::<Uuid>().ok());
    let visitor = known.unwrap_or_else(Uuid::now_v7);
    req.extensions_mut().insert(VisitorId(visitor));

    let mut response = next.run(req).await;
    if known.is_none() {
        let cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax; HttpOnly",
            VISITOR_COOKIE, visitor, VISITOR_COOKIE_MAX_AGE
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

impl<S: Send + Sync> FromRequestParts<S> for VisitorId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VisitorId>()
            .copied()
            .ok_or_else(|| AppError::Internal("visitor middleware not applied".into()))
    }
}
