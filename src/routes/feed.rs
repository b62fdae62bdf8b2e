//! Calendar feed endpoint

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{info, warn};

use notionical_core::auth::authenticate;
use notionical_core::ics::generate_feed;

use crate::routes::AppError;
use crate::state::AppState;

const FEED_FILENAME: &str = "notionical.ics";

pub fn router() -> Router<AppState> {
    // The feed is served on every path
    Router::new()
        .route("/", get(feed))
        .route("/{*path}", get(feed))
}

/// Query string as ordered pairs, so repeated keys never fail extraction
type FeedParams = Vec<(String, String)>;

/// First `token` value, or empty when there is none or the query is malformed
fn token_param(params: Result<Query<FeedParams>, QueryRejection>) -> String {
    let Ok(Query(params)) = params else {
        return String::new();
    };
    params
        .into_iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// GET /?token=... - Render the database as an iCalendar feed
async fn feed(
    State(state): State<AppState>,
    params: Result<Query<FeedParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let token = token_param(params);

    if !authenticate(&token, &state.config.access_token) {
        warn!("Rejected feed request with an invalid token");
        return Ok((StatusCode::UNAUTHORIZED, "Unauthorized").into_response());
    }

    let pages = state
        .notion
        .query_database(&state.config.calendar_id)
        .await
        .map_err(AppError::upstream)?;

    let fetched = pages.len();
    let events = state.mapping.map_records(pages)?;
    info!(pages = fetched, events = events.len(), "Rendering feed");

    let body = generate_feed(&state.config.calendar_name, &events);

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", FEED_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
