use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{DynAPI, StopAPI};
use crate::entities::Stop;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct UpdateParams {
    address: String,
}

#[derive(Serialize, Deserialize)]
pub struct SelectPlaceParams {
    place_id: String,
    #[serde(default)]
    session_token: String,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Stop>>, Error> {
    let stops = api.list_stops().await?;

    Ok(stops.into())
}

pub async fn create(Extension(api): Extension<DynAPI>) -> Result<Json<Stop>, Error> {
    let stop = api.add_stop().await?;

    Ok(stop.into())
}

pub async fn reset(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Stop>>, Error> {
    let stops = api.reset_stops().await?;

    Ok(stops.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateParams>,
) -> Result<Json<Vec<Stop>>, Error> {
    let stops = api.update_stop(id, params.address).await?;

    Ok(stops.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Stop>>, Error> {
    let stops = api.remove_stop(id).await?;

    Ok(stops.into())
}

pub async fn select_place(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<SelectPlaceParams>,
) -> Result<Json<Vec<Stop>>, Error> {
    let stops = api
        .select_place(id, params.place_id, params.session_token)
        .await?;

    Ok(stops.into())
}
