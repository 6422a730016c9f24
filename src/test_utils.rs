use async_trait::async_trait;
use geo_types::Rect;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};
use uuid::Uuid;

use crate::{
    api::{DirectionsAPI, GeocodingAPI, MapView, PlacesAPI},
    entities::{
        Coordinates, DirectionsRequest, DirectionsResponse, DirectionsRoute, Geometry, Leg, Place,
        PlaceSuggestion, PlaceSuggestions, Stop,
    },
    error::{geocoding_error, invalid_input_error, routing_error, Error},
};

pub fn stops(addresses: &[&str]) -> Vec<Stop> {
    addresses
        .iter()
        .map(|address| Stop {
            id: Uuid::new_v4(),
            address: address.to_string(),
        })
        .collect()
}

pub fn route(legs: &[(u64, u64)], waypoint_order: &[usize]) -> DirectionsResponse {
    DirectionsResponse {
        routes: vec![DirectionsRoute {
            legs: legs
                .iter()
                .map(|&(distance_meters, duration_seconds)| Leg {
                    distance_meters,
                    duration_seconds,
                })
                .collect(),
            waypoint_order: waypoint_order.to_vec(),
        }],
    }
}

/// Directions collaborator that replays a canned reply and records requests.
/// A gated one holds every reply until the test releases it.
pub struct MockDirections {
    reply: Mutex<Result<DirectionsResponse, Error>>,
    requests: Mutex<Vec<DirectionsRequest>>,
    calls: AtomicUsize,
    gate: Semaphore,
    received: Notify,
}

impl MockDirections {
    pub fn replying(reply: DirectionsResponse) -> Arc<Self> {
        Self::build(Ok(reply), Semaphore::MAX_PERMITS)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::build(Err(routing_error(message)), Semaphore::MAX_PERMITS)
    }

    pub fn gated(reply: DirectionsResponse) -> Arc<Self> {
        Self::build(Ok(reply), 0)
    }

    fn build(reply: Result<DirectionsResponse, Error>, permits: usize) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            requests: Mutex::new(vec![]),
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(permits),
            received: Notify::new(),
        })
    }

    /// Resolves once a request has reached the mock. Each request wakes one
    /// waiter.
    pub async fn requested(&self) {
        self.received.notified().await;
    }

    pub fn release(&self, replies: usize) {
        self.gate.add_permits(replies);
    }

    pub fn set_reply(&self, reply: Result<DirectionsResponse, Error>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<DirectionsRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DirectionsAPI for MockDirections {
    async fn route(&self, request: DirectionsRequest) -> Result<DirectionsResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.received.notify_one();

        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| routing_error("gate closed"))?;
        permit.forget();

        self.reply.lock().unwrap().clone()
    }
}

/// Geocoder whose lookups wait on a gate until the test releases them.
pub struct MockGeocoder {
    gate: Semaphore,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl MockGeocoder {
    pub fn open() -> Arc<Self> {
        Self::build(Semaphore::MAX_PERMITS, &[])
    }

    pub fn gated() -> Arc<Self> {
        Self::build(0, &[])
    }

    pub fn failing_for(addresses: &[&str]) -> Arc<Self> {
        Self::build(Semaphore::MAX_PERMITS, addresses)
    }

    fn build(permits: usize, failing: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(permits),
            failing: failing.iter().map(|a| a.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn release(&self, lookups: usize) {
        self.gate.add_permits(lookups);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Deterministic fake position derived from the address.
    pub fn position(address: &str) -> Coordinates {
        let n = address.bytes().map(f64::from).sum::<f64>();
        Coordinates::new(32.0 + n / 10_000.0, -117.0 - n / 10_000.0)
    }
}

#[async_trait]
impl GeocodingAPI for MockGeocoder {
    async fn geocode(&self, address: String) -> Result<Coordinates, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| geocoding_error("gate closed"))?;
        permit.forget();

        if self.failing.contains(&address) {
            return Err(geocoding_error(format!("ZERO_RESULTS for {}", address)));
        }

        Ok(Self::position(&address))
    }
}

#[derive(Default)]
pub struct MockPlaces {
    pub places: HashMap<String, Place>,
    pub suggestions: PlaceSuggestions,
}

impl MockPlaces {
    pub fn with_place(place_id: &str, formatted_address: &str) -> Arc<Self> {
        let place = Place {
            place_id: place_id.into(),
            formatted_address: formatted_address.into(),
            geometry: Geometry {
                location: MockGeocoder::position(formatted_address),
            },
        };

        Arc::new(Self {
            places: HashMap::from([(place_id.to_string(), place)]),
            suggestions: vec![PlaceSuggestion {
                place_id: place_id.into(),
                description: formatted_address.into(),
            }],
        })
    }
}

#[async_trait]
impl PlacesAPI for MockPlaces {
    async fn find_place_suggestions(
        &self,
        input: String,
        _session_token: String,
    ) -> Result<PlaceSuggestions, Error> {
        Ok(self
            .suggestions
            .iter()
            .filter(|s| s.description.contains(&input))
            .cloned()
            .collect())
    }

    async fn find_place(&self, place_id: String, _session_token: String) -> Result<Place, Error> {
        self.places
            .get(&place_id)
            .cloned()
            .ok_or_else(invalid_input_error)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewCall {
    PanTo(Coordinates),
    SetZoom(u8),
    FitBounds(Rect<f64>),
}

#[derive(Default)]
pub struct RecordingView {
    pub calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl MapView for RecordingView {
    fn pan_to(&self, center: Coordinates) {
        self.calls.lock().unwrap().push(ViewCall::PanTo(center));
    }

    fn set_zoom(&self, zoom: u8) {
        self.calls.lock().unwrap().push(ViewCall::SetZoom(zoom));
    }

    fn fit_bounds(&self, bounds: Rect<f64>) {
        self.calls.lock().unwrap().push(ViewCall::FitBounds(bounds));
    }
}
