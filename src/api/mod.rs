// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::any::Any;

use axum::{
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::access_control,
    error::ApiError,
    hosts,
    models::{AddApiKey, ApiKeyCreated, ApiKeySummary, SnsType, Token, UserMe, UserRegister},
    state::AppState,
    store::KeyStatus,
};

pub mod api_keys;
pub mod auth;
pub mod index;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register/{sns_type}", post(auth::register))
        .route("/auth/login/{sns_type}", post(auth::login))
        .route("/me", get(users::me))
        .route(
            "/apikeys",
            get(api_keys::list_keys).post(api_keys::create_key),
        )
        .route("/apikeys/{key_id}", put(api_keys::update_key));

    Router::new()
        .route("/", get(index::index))
        .route("/health", get(index::health))
        .route("/test", get(index::test_page))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Filter pipeline, outermost last: trusted hosts, then CORS, then
        // access control. The catch-panic layer sits inside access control
        // so an exploding handler still gets its audit record and a
        // wire-format 500.
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), access_control))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn_with_state(state.clone(), hosts::enforce))
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.allow_origins;

    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin)
}

/// Panic-to-response translation: a generic 500 in the stable wire shape.
/// The panic payload goes into `detail` only.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unhandled panic".to_string()
    };

    ApiError::internal(detail).into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        index::index,
        index::health,
        index::test_page,
        auth::register,
        auth::login,
        users::me,
        api_keys::list_keys,
        api_keys::create_key,
        api_keys::update_key
    ),
    components(schemas(
        SnsType,
        UserRegister,
        Token,
        UserMe,
        AddApiKey,
        ApiKeySummary,
        ApiKeyCreated,
        KeyStatus,
        index::HealthResponse
    )),
    tags(
        (name = "Health", description = "Liveness probes"),
        (name = "Authentication", description = "Registration and login"),
        (name = "User", description = "Current user profile"),
        (name = "ApiKeys", description = "API key lifecycle")
    )
)]
struct ApiDoc;
