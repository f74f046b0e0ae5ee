// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{comments, index, photos, social_medias, users},
    middleware::{
        auth::{TOKEN_HEADER, auth_middleware},
        ownership::authorize,
    },
    models::{comment::Comment, photo::Photo, social_media::SocialMedia, user::User},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Every resource router except register/login sits behind `auth_middleware`.
/// * `/{id}` routes additionally run `authorize::<R>` for their resource type.
/// * Applies global middleware (Trace, CORS) and injects `AppState`.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(TOKEN_HEADER)]);

    let auth = from_fn_with_state(state.clone(), auth_middleware);

    // route_layer only wraps routes registered before it, so register/login
    // stay public.
    let user_routes = Router::new()
        .route("/{id}", put(users::update_user).delete(users::delete_user))
        .route_layer(from_fn_with_state(state.clone(), authorize::<User>))
        .route_layer(auth.clone())
        .route("/register", post(users::register))
        .route("/login", post(users::login));

    let photo_routes = Router::new()
        .route(
            "/{id}",
            put(photos::update_photo).delete(photos::delete_photo),
        )
        .route_layer(from_fn_with_state(state.clone(), authorize::<Photo>))
        .route("/", get(photos::list_photos).post(photos::create_photo))
        .route_layer(auth.clone());

    let comment_routes = Router::new()
        .route(
            "/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route_layer(from_fn_with_state(state.clone(), authorize::<Comment>))
        .route(
            "/",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route_layer(auth.clone());

    let social_media_routes = Router::new()
        .route(
            "/{id}",
            put(social_medias::update_social_media).delete(social_medias::delete_social_media),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            authorize::<SocialMedia>,
        ))
        .route(
            "/",
            get(social_medias::list_social_medias).post(social_medias::create_social_media),
        )
        .route_layer(auth);

    Router::new()
        .route("/", get(index::root))
        .nest("/users", user_routes)
        .nest("/photos", photo_routes)
        .nest("/comments", comment_routes)
        .nest("/socialmedias", social_media_routes)
        .fallback(index::not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
