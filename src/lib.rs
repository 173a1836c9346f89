pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;
pub mod views;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

pub use state::AppState;

/// Full route table. Paths are unique per method; protected routes are
/// gated by `require_session` before their handler runs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .nest("/api/users", handlers::public::users_router())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/", get(public::index))
        .route("/health", get(public::health))
        // Development login
        .route("/login/:id", get(public::login))
        .route("/logout", post(public::logout))
        .route("/maps/:map_id", get(public::map_show))
        .route("/maps/:map_id/json", get(public::map_points_json))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected;

    Router::new()
        .route("/maps/new", get(protected::map_new_form).post(protected::map_create))
        .route("/maps/:map_id/edit", get(protected::map_edit_form))
        .route("/maps/:map_id/delete", post(protected::map_delete))
        .route("/maps/:map_id/points", post(protected::point_add))
        .route("/maps/:map_id/points/:point_id", post(protected::point_edit))
        .route("/maps/:map_id/points/:point_id/delete", post(protected::point_delete))
        .route("/users/:id", get(protected::user_profile))
        .route("/users/:id/favourites", post(protected::favourite_add))
        .route(
            "/users/:id/favourites/:favourite_id/delete",
            post(protected::favourite_remove),
        )
        .route_layer(from_fn_with_state(state, middleware::require_session))
}
