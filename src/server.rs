use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(crate::routes::health::health))
        // Dashboard view state + snapshot
        .route("/dashboard", get(crate::routes::dashboard::get_dashboard))
        .route("/dashboard/tab", post(crate::routes::dashboard::select_tab))
        .route(
            "/dashboard/zone",
            get(crate::routes::dashboard::selected_zone)
                .post(crate::routes::dashboard::select_zone),
        )
        .route(
            "/dashboard/regenerate",
            post(crate::routes::dashboard::regenerate),
        )
        // Save-report workflow
        .route("/report", get(crate::routes::report::status))
        .route("/report/save", post(crate::routes::report::save))
        .route(
            "/report/continue",
            post(crate::routes::report::continue_to_summary),
        )
        // Historic summary
        .route("/historic", get(crate::routes::historic::get_historic))
        .route("/historic/range", post(crate::routes::historic::select_range))
        .route("/historic/reports", get(crate::routes::historic::reports))
        // Activity log
        .route("/logs/history", get(crate::routes::logs::log_history))
        .route("/logs/stream", get(crate::routes::logs::log_stream))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
