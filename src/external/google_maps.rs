use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    api::{DirectionsAPI, GeocodingAPI, PlacesAPI},
    config::Config,
    entities::{
        Coordinates, DirectionsRequest, DirectionsResponse, DirectionsRoute, Geometry, Leg, Place,
        PlaceSuggestions,
    },
    error::{geocoding_error, invalid_input_error, routing_error, upstream_error, Error},
};

#[derive(Clone, Debug, Deserialize)]
struct Response<T> {
    status: String,
    error_message: Option<String>,
    result: Option<T>,
    results: Option<T>,
    predictions: Option<T>,
    routes: Option<T>,
}

#[derive(Clone, Debug, Deserialize)]
struct Route {
    legs: Vec<RouteLeg>,
    #[serde(default)]
    waypoint_order: Vec<usize>,
}

#[derive(Clone, Debug, Deserialize)]
struct RouteLeg {
    distance: Measure,
    duration: Measure,
}

#[derive(Clone, Debug, Deserialize)]
struct Measure {
    value: u64,
}

#[derive(Clone, Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

impl From<Route> for DirectionsRoute {
    fn from(route: Route) -> Self {
        DirectionsRoute {
            legs: route
                .legs
                .into_iter()
                .map(|leg| Leg {
                    distance_meters: leg.distance.value,
                    duration_seconds: leg.duration.value,
                })
                .collect(),
            waypoint_order: route.waypoint_order,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("https://{}/maps/api/{}/json", self.api_base, path)
    }
}

fn check_status(res: &reqwest::Response) -> Result<(), Error> {
    let status_code = res.status().as_u16();

    if (400..500).contains(&status_code) {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(())
}

/// Service message for a non-OK directions reply, e.g. `NOT_FOUND` or
/// `OVER_QUERY_LIMIT: You have exceeded your daily request quota`.
fn service_message<T>(data: &Response<T>) -> String {
    match &data.error_message {
        Some(message) => format!("{}: {}", data.status, message),
        None => data.status.clone(),
    }
}

fn waypoints_param(request: &DirectionsRequest) -> Option<String> {
    if request.waypoints.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(request.waypoints.len() + 1);
    if request.optimize_waypoints {
        parts.push("optimize:true".to_string());
    }
    parts.extend(request.waypoints.iter().cloned());

    Some(parts.join("|"))
}

fn decode_directions(data: Response<Vec<Route>>) -> Result<DirectionsResponse, Error> {
    if data.status != "OK" {
        return Err(routing_error(service_message(&data)));
    }

    let routes = data.routes.ok_or_else(upstream_error)?;

    Ok(DirectionsResponse {
        routes: routes.into_iter().map(DirectionsRoute::from).collect(),
    })
}

fn decode_geocode(address: &str, data: Response<Vec<GeocodeResult>>) -> Result<Coordinates, Error> {
    if data.status != "OK" {
        return Err(geocoding_error(format!(
            "could not geocode {:?}: {}",
            address,
            service_message(&data)
        )));
    }

    data.results
        .and_then(|results| results.into_iter().next())
        .map(|result| result.geometry.location)
        .ok_or_else(|| geocoding_error(format!("no geocoding result for {:?}", address)))
}

#[async_trait]
impl DirectionsAPI for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn route(&self, request: DirectionsRequest) -> Result<DirectionsResponse, Error> {
        let mut builder = self
            .client
            .get(self.url("directions"))
            .query(&[("key", &self.api_key)])
            .query(&[("origin", &request.origin)])
            .query(&[("destination", &request.destination)])
            .query(&[("mode", request.travel_mode.name())]);

        if let Some(waypoints) = waypoints_param(&request) {
            builder = builder.query(&[("waypoints", waypoints)]);
        }

        let res = builder.send().await?;
        check_status(&res)?;

        let data: Response<Vec<Route>> = res.json().await?;

        decode_directions(data)
    }
}

#[async_trait]
impl GeocodingAPI for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: String) -> Result<Coordinates, Error> {
        let res = self
            .client
            .get(self.url("geocode"))
            .query(&[("key", &self.api_key)])
            .query(&[("address", &address)])
            .send()
            .await?;

        check_status(&res)?;

        let data: Response<Vec<GeocodeResult>> = res.json().await?;

        decode_geocode(&address, data)
    }
}

#[async_trait]
impl PlacesAPI for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn find_place_suggestions(
        &self,
        input: String,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error> {
        let res = self
            .client
            .get(self.url("place/autocomplete"))
            .query(&[("key", &self.api_key)])
            .query(&[("input", input)])
            .query(&[("sessiontoken", session_token)])
            .send()
            .await?;

        check_status(&res)?;

        let data: Response<PlaceSuggestions> = res.json().await?;

        if !(data.status == "OK" || data.status == "ZERO_RESULTS") {
            return Err(upstream_error());
        }

        Ok(data.predictions.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, place_id: String, session_token: String) -> Result<Place, Error> {
        let res = self
            .client
            .get(self.url("place/details"))
            .query(&[("key", &self.api_key)])
            .query(&[("sessiontoken", session_token)])
            .query(&[("place_id", place_id)])
            .send()
            .await?;

        check_status(&res)?;

        let data: Response<Place> = res.json().await?;

        if data.status != "OK" {
            return Err(upstream_error());
        }

        data.result.ok_or_else(upstream_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TravelMode;

    fn request(waypoints: &[&str], optimize_waypoints: bool) -> DirectionsRequest {
        DirectionsRequest {
            origin: "A".into(),
            destination: "D".into(),
            waypoints: waypoints.iter().map(|w| w.to_string()).collect(),
            optimize_waypoints,
            travel_mode: TravelMode::Driving,
        }
    }

    #[test]
    fn waypoints_param_requests_optimization() {
        assert_eq!(
            waypoints_param(&request(&["B", "C"], true)).as_deref(),
            Some("optimize:true|B|C")
        );
        assert_eq!(
            waypoints_param(&request(&["B"], false)).as_deref(),
            Some("B")
        );
        assert_eq!(waypoints_param(&request(&[], true)), None);
    }

    #[test]
    fn decodes_directions_reply() {
        let data: Response<Vec<Route>> = serde_json::from_str(
            r#"{
                "status": "OK",
                "routes": [{
                    "legs": [
                        {"distance": {"text": "1 km", "value": 1000}, "duration": {"text": "1 min", "value": 60}},
                        {"distance": {"text": "2 km", "value": 2000}, "duration": {"text": "2 mins", "value": 120}}
                    ],
                    "waypoint_order": [1, 0]
                }]
            }"#,
        )
        .unwrap();

        let response = decode_directions(data).unwrap();

        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].waypoint_order, vec![1, 0]);
        assert_eq!(
            response.routes[0].legs,
            vec![
                Leg {
                    distance_meters: 1000,
                    duration_seconds: 60
                },
                Leg {
                    distance_meters: 2000,
                    duration_seconds: 120
                },
            ]
        );
    }

    #[test]
    fn failed_directions_carry_service_message() {
        let data: Response<Vec<Route>> = serde_json::from_str(
            r#"{"status": "NOT_FOUND", "error_message": "origin could not be geocoded", "routes": []}"#,
        )
        .unwrap();

        let err = decode_directions(data).unwrap_err();

        assert!(err.is_routing());
        assert_eq!(err.message, "NOT_FOUND: origin could not be geocoded");
    }

    #[test]
    fn decodes_geocode_reply() {
        let data: Response<Vec<GeocodeResult>> = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [{
                    "formatted_address": "San Diego, CA, USA",
                    "geometry": {"location": {"lat": 32.7157, "lng": -117.1611}}
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(
            decode_geocode("San Diego", data).unwrap(),
            Coordinates::new(32.7157, -117.1611)
        );
    }

    #[test]
    fn zero_geocode_results_is_an_error() {
        let data: Response<Vec<GeocodeResult>> =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap();

        let err = decode_geocode("nowhere", data).unwrap_err();
        assert_eq!(err.code, crate::error::GEOCODING_ERROR);
    }
}
