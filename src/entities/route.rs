use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, Stop};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinates,
    /// 1-based position in the optimized visiting order.
    pub label: usize,
    pub stop_index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub position: usize,
    pub stop_id: Uuid,
    pub address: String,
}

/// Outcome of one successful route computation. Only valid for the stops it
/// was derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub generation: u64,
    pub stops: Vec<Stop>,
    pub ordered_stop_indices: Vec<usize>,
    pub total_distance_meters: u64,
    pub total_duration_seconds: u64,
    pub markers: Vec<Marker>,
    pub computed_at: DateTime<Utc>,
}

impl RouteResult {
    pub fn new(
        generation: u64,
        stops: Vec<Stop>,
        ordered_stop_indices: Vec<usize>,
        total_distance_meters: u64,
        total_duration_seconds: u64,
    ) -> Self {
        Self {
            generation,
            stops,
            ordered_stop_indices,
            total_distance_meters,
            total_duration_seconds,
            markers: vec![],
            computed_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_stop_indices.is_empty()
    }

    pub fn distance_km(&self) -> f64 {
        self.total_distance_meters as f64 / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.total_duration_seconds as f64 / 60.0
    }

    /// Markers arrive in lookup completion order; this sorts them by label.
    pub fn markers_by_label(&self) -> Vec<Marker> {
        let mut markers = self.markers.clone();
        markers.sort_by_key(|marker| marker.label);
        markers
    }

    pub fn itinerary(&self) -> Vec<ItineraryEntry> {
        self.ordered_stop_indices
            .iter()
            .filter_map(|&index| self.stops.get(index))
            .enumerate()
            .map(|(i, stop)| ItineraryEntry {
                position: i + 1,
                stop_id: stop.id,
                address: stop.address.clone(),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub itinerary: Vec<ItineraryEntry>,
    pub markers: Vec<Marker>,
}

impl From<&RouteResult> for RouteSummary {
    fn from(result: &RouteResult) -> Self {
        Self {
            distance_km: result.distance_km(),
            duration_minutes: result.duration_minutes(),
            itinerary: result.itinerary(),
            markers: result.markers_by_label(),
        }
    }
}
