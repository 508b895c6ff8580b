use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_by_category, list_by_creator, list_by_mention,
    list_mine, list_posts, list_shares, search_posts, update_post,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_posts))
        .route("/{id}", get(get_post))
        .route("/mention/{mention}", get(list_by_mention))
        .route("/creator/{uid}", get(list_by_creator))
        .route("/category/{cate}", get(list_by_category))
        .route("/share/{share}", get(list_shares))
        .route("/search/{index}", get(search_posts));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/mine", get(list_mine))
        .route("/{id}", put(update_post).delete(delete_post))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
