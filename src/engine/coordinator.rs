use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use super::helpers::{build_request, order_stops, total_distance, total_duration, validate_stops};
use crate::{
    api::{DynDirections, DynGeocoding, MapView},
    entities::{Coordinates, Marker, RouteResult, Stop},
    error::{routing_error, superseded_error, Error},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Requesting,
    Deriving,
    Ready,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSnapshot {
    pub phase: Phase,
    pub result: Option<RouteResult>,
}

#[derive(Clone, Copy, Debug)]
pub struct RouteOptions {
    pub reorder_stops: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            reorder_stops: true,
        }
    }
}

struct State {
    /// Bumped by every computation and every clear. Directions replies for an
    /// older generation are dropped.
    generation: u64,
    phase: Phase,
    result: Option<RouteResult>,
    lookups: Vec<JoinHandle<()>>,
}

impl State {
    fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot {
            phase: self.phase,
            result: self.result.clone(),
        }
    }

    fn settle(&mut self) {
        self.phase = match self.result {
            Some(_) => Phase::Ready,
            None => Phase::Idle,
        };
    }
}

pub struct RouteCoordinator {
    directions: DynDirections,
    geocoder: DynGeocoding,
    options: RouteOptions,
    state: Arc<Mutex<State>>,
    updates: Arc<watch::Sender<RouteSnapshot>>,
}

impl RouteCoordinator {
    pub fn new(directions: DynDirections, geocoder: DynGeocoding, options: RouteOptions) -> Self {
        let state = State {
            generation: 0,
            phase: Phase::Idle,
            result: None,
            lookups: vec![],
        };
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            directions,
            geocoder,
            options,
            state: Arc::new(Mutex::new(state)),
            updates: Arc::new(updates),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RouteSnapshot> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> RouteSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn result(&self) -> Option<RouteResult> {
        self.state.lock().await.result.clone()
    }

    fn publish(updates: &watch::Sender<RouteSnapshot>, state: &State) {
        updates.send_replace(state.snapshot());
    }

    pub async fn compute_route(&self, stops: Vec<Stop>) -> Result<RouteResult, Error> {
        let generation = self.begin(&stops).await?;
        self.run(generation, stops).await
    }

    /// Validates `stops` and claims a new generation for them. A rejected
    /// list leaves the state untouched, so an in-flight computation keeps
    /// its phase.
    #[tracing::instrument(skip_all, fields(stops = stops.len()))]
    pub async fn begin(&self, stops: &[Stop]) -> Result<u64, Error> {
        if let Err(err) = validate_stops(stops) {
            tracing::info!("rejected incomplete stop list");
            return Err(err);
        }

        let mut state = self.state.lock().await;
        state.generation += 1;
        state.phase = Phase::Requesting;
        Self::publish(&self.updates, &state);

        Ok(state.generation)
    }

    /// Requests directions for a generation claimed by `begin` and stores the
    /// derived result, unless a clear or a newer computation came first.
    #[tracing::instrument(skip(self, stops), fields(stops = stops.len()))]
    pub async fn run(&self, generation: u64, stops: Vec<Stop>) -> Result<RouteResult, Error> {
        let request = build_request(&stops, self.options.reorder_stops);
        let reply = self.directions.route(request).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::info!(generation, current = state.generation, "dropping stale directions reply");
            return Err(superseded_error());
        }

        let response = match reply {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(code = err.code, message = %err.message, "directions request failed");
                state.settle();
                Self::publish(&self.updates, &state);
                return Err(if err.is_routing() {
                    err
                } else {
                    routing_error(err.message)
                });
            }
        };

        state.phase = Phase::Deriving;
        Self::publish(&self.updates, &state);

        let derived = response
            .routes
            .first()
            .ok_or_else(|| routing_error("no route returned"))
            .and_then(|route| {
                let ordered = order_stops(&route.waypoint_order, stops.len())?;
                Ok((ordered, total_distance(route), total_duration(route)))
            });

        let (ordered, distance, duration) = match derived {
            Ok(derived) => derived,
            Err(err) => {
                tracing::warn!(code = err.code, "could not derive route");
                state.settle();
                Self::publish(&self.updates, &state);
                return Err(err);
            }
        };

        let result = RouteResult::new(generation, stops, ordered, distance, duration);

        tracing::info!(
            generation,
            distance_km = result.distance_km(),
            duration_minutes = result.duration_minutes(),
            "route ready"
        );

        state.result = Some(result.clone());
        state.phase = Phase::Ready;
        Self::publish(&self.updates, &state);

        let lookups = self.spawn_marker_lookups(&result);
        state.lookups.retain(|lookup| !lookup.is_finished());
        state.lookups.extend(lookups);

        Ok(result)
    }

    /// One geocoding lookup per stop in visiting order. Each writes its own
    /// marker, and only while the result it was started for is still current.
    fn spawn_marker_lookups(&self, result: &RouteResult) -> Vec<JoinHandle<()>> {
        result
            .ordered_stop_indices
            .iter()
            .enumerate()
            .map(|(i, &stop_index)| {
                let geocoder = self.geocoder.clone();
                let state = self.state.clone();
                let updates = self.updates.clone();
                let generation = result.generation;
                let address = result.stops[stop_index].address.clone();
                let label = i + 1;

                tokio::spawn(async move {
                    let position = match geocoder.geocode(address.clone()).await {
                        Ok(position) => position,
                        Err(err) => {
                            tracing::warn!(%address, message = %err.message, "no marker for stop");
                            return;
                        }
                    };

                    let mut state = state.lock().await;
                    match state.result.as_mut() {
                        Some(result) if result.generation == generation => {
                            result.markers.push(Marker {
                                position,
                                label,
                                stop_index,
                            });
                            Self::publish(&updates, &state);
                        }
                        _ => tracing::debug!(generation, label, "dropping stale marker"),
                    }
                })
            })
            .collect()
    }

    /// Waits for every outstanding marker lookup, then returns the current
    /// markers ordered by label.
    pub async fn wait_for_markers(&self) -> Vec<Marker> {
        let lookups: Vec<JoinHandle<()>> = self.state.lock().await.lookups.drain(..).collect();

        for joined in futures::future::join_all(lookups).await {
            if let Err(err) = joined {
                tracing::error!(%err, "marker lookup panicked");
            }
        }

        self.state
            .lock()
            .await
            .result
            .as_ref()
            .map(RouteResult::markers_by_label)
            .unwrap_or_default()
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;

        state.generation += 1;
        state.result = None;
        state.phase = Phase::Idle;

        Self::publish(&self.updates, &state);
    }

    /// Frames the view around the current markers; does nothing without any.
    pub async fn fit_view(&self, view: &(dyn MapView + Send + Sync)) -> bool {
        let state = self.state.lock().await;
        let bounds = state
            .result
            .as_ref()
            .and_then(|result| Coordinates::bounds(result.markers.iter().map(|m| &m.position)));

        match bounds {
            Some(bounds) => {
                view.fit_bounds(bounds);
                true
            }
            None => false,
        }
    }

    pub fn recenter(&self, view: &(dyn MapView + Send + Sync), center: Coordinates, zoom: u8) {
        view.pan_to(center);
        view.set_zoom(zoom);
    }
}
