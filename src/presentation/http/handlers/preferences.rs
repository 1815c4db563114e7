use crate::{
    domain::preferences::{
        quote::{DailyQuote, quote_for_day},
        theme::Theme,
    },
    presentation::http::{errors::AppError, middleware::visitor::cookie_value},
};
use axum::{
    Json,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

const THEME_COOKIE: &str = "theme";
const THEME_COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThemePreference {
    pub theme: Theme,
}

/// Theme stored in the `theme` cookie; light when absent or unreadable.
pub fn theme_from_cookies(headers: &HeaderMap) -> Theme {
    cookie_value(headers, THEME_COOKIE)
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

fn with_theme_cookie(theme: Theme) -> Result<Response, AppError> {
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        THEME_COOKIE,
        theme.as_str(),
        THEME_COOKIE_MAX_AGE
    );
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("theme cookie: {}", e)))?;
    Ok(([(header::SET_COOKIE, value)], Json(ThemePreference { theme })).into_response())
}

pub async fn daily_quote() -> Json<DailyQuote> {
    Json(quote_for_day(Utc::now().date_naive()))
}

pub async fn get_theme(headers: HeaderMap) -> Json<ThemePreference> {
    Json(ThemePreference {
        theme: theme_from_cookies(&headers),
    })
}

pub async fn set_theme(Json(body): Json<ThemePreference>) -> Result<Response, AppError> {
    with_theme_cookie(body.theme)
}

pub async fn toggle_theme(headers: HeaderMap) -> Result<Response, AppError> {
    with_theme_cookie(theme_from_cookies(&headers).toggle())
}
