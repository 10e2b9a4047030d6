use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::authentication::ports::AuthServicePort;
use crate::authentication::service::AuthService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Wire both domain services over one repository and build the router.
pub fn create_application<UR>(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Router
where
    UR: UserRepository,
{
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&repository),
        Arc::clone(&authenticator),
    ));
    let user_service = Arc::new(UserService::new(repository, Arc::clone(&authenticator)));

    create_router(auth_service, user_service, authenticator)
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route(
            "/api/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.authenticator),
            auth_middleware,
        ));

    // Authorization headers are never recorded on the span.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
