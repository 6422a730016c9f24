use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
    /// Lets the service reorder `waypoints`. Origin and destination stay fixed.
    pub optimize_waypoints: bool,
    pub travel_mode: TravelMode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub legs: Vec<Leg>,
    /// Visiting order as indices into the request's `waypoints`.
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub distance_meters: u64,
    pub duration_seconds: u64,
}
