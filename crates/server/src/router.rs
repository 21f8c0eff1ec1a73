use super::{handlers, state::AppState};
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/students",
            get(handlers::list_students_handler).post(handlers::create_student_handler),
        )
        .route(
            "/students/{id}",
            get(handlers::get_student_handler)
                .put(handlers::update_student_handler)
                .delete(handlers::delete_student_handler),
        );

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
