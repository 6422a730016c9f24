mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{places, routes, stops};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/stops", get(stops::list).post(stops::create))
        .route("/stops/reset", post(stops::reset))
        .route("/stops/:id", patch(stops::update).delete(stops::remove))
        .route("/stops/:id/place", patch(stops::select_place))
        .route("/places/suggestions", get(places::find_suggestions))
        .route(
            "/route",
            get(routes::find).post(routes::compute).delete(routes::clear),
        )
        .route("/route/link", get(routes::link))
        .route("/route/itinerary", get(routes::itinerary))
        .route("/route/summary", get(routes::summary))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            unexpected_error()
        })
}
