mod coordinator;
mod helpers;
mod route_api;
mod stop_api;

pub use coordinator::{Phase, RouteCoordinator, RouteOptions, RouteSnapshot};
pub use helpers::build_shareable_link;

use tokio::sync::{watch, Mutex};

use crate::{
    api::{DynDirections, DynGeocoding, DynPlaces, MapView, API},
    config::Config,
    entities::StopList,
};

/// One planning session: the stops being edited and the route derived from
/// them.
pub struct Engine {
    stops: Mutex<StopList>,
    coordinator: RouteCoordinator,
    places: DynPlaces,
    config: Config,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(
        config: Config,
        directions: DynDirections,
        geocoder: DynGeocoding,
        places: DynPlaces,
    ) -> Self {
        let options = RouteOptions {
            reorder_stops: config.reorder_stops,
        };

        Self {
            stops: Mutex::new(StopList::new()),
            coordinator: RouteCoordinator::new(directions, geocoder, options),
            places,
            config,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RouteSnapshot> {
        self.coordinator.subscribe()
    }

    pub async fn wait_for_markers(&self) -> Vec<crate::entities::Marker> {
        self.coordinator.wait_for_markers().await
    }

    pub async fn fit_view(&self, view: &(dyn MapView + Send + Sync)) -> bool {
        self.coordinator.fit_view(view).await
    }

    /// Back to the configured default center and zoom.
    pub fn recenter(&self, view: &(dyn MapView + Send + Sync)) {
        self.coordinator
            .recenter(view, self.config.default_center, self.config.default_zoom);
    }

    /// Stop edits invalidate whatever route was derived from the old stops.
    /// Callers hold the stops lock, so no computation can claim a generation
    /// between the edit and the clear.
    async fn invalidate(&self) {
        tracing::debug!("stops changed, clearing route");
        self.coordinator.clear().await;
    }
}

impl API for Engine {}
