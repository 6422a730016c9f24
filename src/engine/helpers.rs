use urlencoding::encode;

use crate::{
    entities::{DirectionsRequest, DirectionsRoute, RouteResult, Stop, TravelMode},
    error::{upstream_error, validation_error, Error},
};

const SHARE_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1";
const WAYPOINT_SEPARATOR: &str = "%7C";

pub fn validate_stops(stops: &[Stop]) -> Result<(), Error> {
    if stops.len() < 2 || stops.iter().any(Stop::is_unset) {
        return Err(validation_error());
    }

    Ok(())
}

/// Origin and destination are the first and last stops; everything in
/// between is sent as a waypoint.
pub fn build_request(stops: &[Stop], optimize_waypoints: bool) -> DirectionsRequest {
    let last = stops.len() - 1;

    DirectionsRequest {
        origin: stops[0].address.clone(),
        destination: stops[last].address.clone(),
        waypoints: stops[1..last]
            .iter()
            .map(|stop| stop.address.clone())
            .collect(),
        optimize_waypoints,
        travel_mode: TravelMode::Driving,
    }
}

/// Maps a waypoint-relative visiting order onto positions in the full stop
/// list: origin first, each waypoint shifted past the origin, destination
/// last. An empty order means the waypoints were not reordered.
pub fn order_stops(waypoint_order: &[usize], stop_count: usize) -> Result<Vec<usize>, Error> {
    let waypoint_count = stop_count.saturating_sub(2);

    let order: Vec<usize> = if waypoint_order.is_empty() {
        (0..waypoint_count).collect()
    } else {
        waypoint_order.to_vec()
    };

    let mut seen = vec![false; waypoint_count];
    for &index in &order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(upstream_error()),
        }
    }
    if order.len() != waypoint_count {
        return Err(upstream_error());
    }

    let mut ordered = Vec::with_capacity(stop_count);
    ordered.push(0);
    ordered.extend(order.iter().map(|index| index + 1));
    ordered.push(stop_count - 1);

    Ok(ordered)
}

pub fn total_distance(route: &DirectionsRoute) -> u64 {
    route.legs.iter().map(|leg| leg.distance_meters).sum()
}

pub fn total_duration(route: &DirectionsRoute) -> u64 {
    route.legs.iter().map(|leg| leg.duration_seconds).sum()
}

/// Deep link opening the itinerary in a web map viewer. Empty when there is
/// no result or it does not fit `stops`. Waypoints are joined with an
/// encoded pipe (`%7C`), so the whole query stays percent-encoded.
pub fn build_shareable_link(result: &RouteResult, stops: &[Stop]) -> String {
    let indices = &result.ordered_stop_indices;
    if result.is_empty()
        || indices.len() < 2
        || indices.iter().any(|&index| index >= stops.len())
    {
        return String::new();
    }

    let address = |index: usize| encode(&stops[index].address).into_owned();

    let origin = address(indices[0]);
    let destination = address(indices[indices.len() - 1]);
    let waypoints: Vec<String> = indices[1..indices.len() - 1]
        .iter()
        .map(|&index| address(index))
        .collect();

    let mut link = format!(
        "{}&origin={}&destination={}",
        SHARE_BASE_URL, origin, destination
    );
    if !waypoints.is_empty() {
        link.push_str("&waypoints=");
        link.push_str(&waypoints.join(WAYPOINT_SEPARATOR));
    }
    link.push_str("&travelmode=");
    link.push_str(TravelMode::Driving.name());

    link
}
