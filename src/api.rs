use async_trait::async_trait;
use geo_types::Rect;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{
    Coordinates, DirectionsRequest, DirectionsResponse, ItineraryEntry, Place, PlaceSuggestions,
    RouteResult, Stop,
};
use crate::error::Error;

#[async_trait]
pub trait DirectionsAPI {
    async fn route(&self, request: DirectionsRequest) -> Result<DirectionsResponse, Error>;
}

#[async_trait]
pub trait GeocodingAPI {
    async fn geocode(&self, address: String) -> Result<Coordinates, Error>;
}

#[async_trait]
pub trait PlacesAPI {
    async fn find_place_suggestions(
        &self,
        input: String,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error>;
    async fn find_place(&self, place_id: String, session_token: String) -> Result<Place, Error>;
}

/// Whatever renders the map: pans, zooms and frames it.
pub trait MapView {
    fn pan_to(&self, center: Coordinates);
    fn set_zoom(&self, zoom: u8);
    fn fit_bounds(&self, bounds: Rect<f64>);
}

pub type DynDirections = Arc<dyn DirectionsAPI + Send + Sync>;
pub type DynGeocoding = Arc<dyn GeocodingAPI + Send + Sync>;
pub type DynPlaces = Arc<dyn PlacesAPI + Send + Sync>;

#[async_trait]
pub trait StopAPI {
    async fn list_stops(&self) -> Result<Vec<Stop>, Error>;
    async fn add_stop(&self) -> Result<Stop, Error>;
    async fn update_stop(&self, id: Uuid, address: String) -> Result<Vec<Stop>, Error>;
    async fn remove_stop(&self, id: Uuid) -> Result<Vec<Stop>, Error>;
    async fn reset_stops(&self) -> Result<Vec<Stop>, Error>;
    async fn select_place(
        &self,
        id: Uuid,
        place_id: String,
        session_token: String,
    ) -> Result<Vec<Stop>, Error>;
    async fn suggest_places(
        &self,
        input: String,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn compute_route(&self) -> Result<RouteResult, Error>;
    async fn find_route(&self) -> Result<Option<RouteResult>, Error>;
    async fn clear_route(&self) -> Result<(), Error>;
    async fn shareable_link(&self) -> Result<String, Error>;
    async fn itinerary(&self) -> Result<Vec<ItineraryEntry>, Error>;
}

pub trait API: StopAPI + RouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
