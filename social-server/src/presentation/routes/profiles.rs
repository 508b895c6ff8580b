use axum::Router;
use axum::middleware;
use axum::routing::{get, put};

use crate::presentation::AppState;
use crate::presentation::handlers::profiles::{
    create_profile, follow_profile, get_my_profile, get_profile, list_auth_profiles,
    list_profiles, search_profiles, unfollow_profile, update_profile,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/search/{index}", get(search_profiles));

    let protected = Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route("/me", get(get_my_profile))
        .route("/auth", get(list_auth_profiles))
        .route("/{id}", get(get_profile).put(update_profile))
        .route("/{id}/follow/{other}", put(follow_profile))
        .route("/{id}/unfollow/{other}", put(unfollow_profile))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
