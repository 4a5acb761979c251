use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use serde::Deserialize;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::activity_log::{LogFilter, LogLevel, LogPage, LogSource};
use crate::state::SharedState;

const DEFAULT_HISTORY_LIMIT: usize = 100;

/// `?source=report&level=warn&limit=20`; every key is optional.
#[derive(Deserialize)]
pub struct LogQuery {
    pub limit: Option<usize>,
    pub source: Option<LogSource>,
    pub level: Option<LogLevel>,
}

impl LogQuery {
    fn filter(&self) -> LogFilter {
        LogFilter {
            source: self.source,
            level: self.level,
        }
    }
}

/// GET /logs/history
pub async fn log_history(
    State(state): State<SharedState>,
    Query(query): Query<LogQuery>,
) -> Json<LogPage> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Json(state.logs.recent(limit, &query.filter()).await)
}

/// GET /logs/stream: live entries matching the same filter as the history.
pub async fn log_stream(
    State(state): State<SharedState>,
    Query(query): Query<LogQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let filter = query.filter();

    let events = BroadcastStream::new(state.logs.subscribe()).filter_map(move |received| {
        // Lagged receivers skip what they missed.
        let entry = received.ok().filter(|e| filter.matches(e))?;
        let data = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().event("log").data(data)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
