use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{self, protected, public};
use crate::middleware::jwt_auth_middleware;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/health", get(public::health))
        .route("/login", post(public::login))
        // Protected API
        .merge(protected_routes(state.clone()))
        .fallback(handlers::not_found)
        // Known path, unregistered method: same 404 body as an unknown path
        .method_not_allowed_fallback(handlers::not_found)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{questions, standards, subjects, units, users};

    Router::new()
        .route("/units", post(units::create))
        .route("/units/:id", get(units::get).patch(units::update))
        .route("/users", post(users::create))
        .route("/users/:user_id", get(users::get).patch(users::update))
        .route("/users/:user_id/subjects", get(users::subjects))
        .route("/subjects", post(subjects::create))
        .route("/subjects/:id", get(subjects::get))
        .route("/subjects/:id/users/:user_id", post(subjects::assign_user))
        .route("/standards", post(standards::create))
        .route("/standards/:set_id", get(standards::list))
        .route("/questions", post(questions::create))
        .route("/questions/:subject_id", get(questions::list))
        // route_layer keeps unmatched paths on the 404 fallback instead of 401
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
    }
}
