use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, RouteAPI};
use crate::entities::{ItineraryEntry, RouteResult, RouteSummary};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct LinkResponse {
    url: String,
}

#[axum_macros::debug_handler]
pub async fn compute(Extension(api): Extension<DynAPI>) -> Result<Json<RouteResult>, Error> {
    let route = api.compute_route().await?;

    Ok(route.into())
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<Option<RouteResult>>, Error> {
    let route = api.find_route().await?;

    Ok(route.into())
}

pub async fn clear(Extension(api): Extension<DynAPI>) -> Result<Json<()>, Error> {
    api.clear_route().await?;

    Ok(().into())
}

pub async fn link(Extension(api): Extension<DynAPI>) -> Result<Json<LinkResponse>, Error> {
    let url = api.shareable_link().await?;

    Ok(LinkResponse { url }.into())
}

pub async fn itinerary(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<ItineraryEntry>>, Error> {
    let itinerary = api.itinerary().await?;

    Ok(itinerary.into())
}

pub async fn summary(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Option<RouteSummary>>, Error> {
    let summary = api.find_route().await?.as_ref().map(RouteSummary::from);

    Ok(summary.into())
}
