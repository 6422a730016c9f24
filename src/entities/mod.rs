mod directions;
mod location;
mod place;
mod route;
mod stop;

pub use directions::{DirectionsRequest, DirectionsResponse, DirectionsRoute, Leg, TravelMode};
pub use location::Coordinates;
pub use place::{Geometry, Place, PlaceSuggestion, PlaceSuggestions};
pub use route::{ItineraryEntry, Marker, RouteResult, RouteSummary};
pub use stop::{Stop, StopList, MAX_STOPS, MIN_STOPS};
