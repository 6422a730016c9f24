use std::env;
use std::net::SocketAddr;

use crate::entities::Coordinates;
use crate::error::{invalid_input_error, Error};

pub const DEFAULT_API_BASE: &str = "maps.googleapis.com";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_ZOOM: u8 = 15;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base: String,
    pub api_key: String,
    pub bind_address: SocketAddr,
    pub reorder_stops: bool,
    pub default_center: Coordinates,
    pub default_zoom: u8,
}

impl Config {
    /// Reads the environment, after loading a `.env` file if one exists.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let api_key = env::var("GOOGLE_MAPS_API_KEY")?;
        let api_base = env::var("GOOGLE_MAPS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        let bind_address = env::var("PLANNER_BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.into())
            .parse()
            .map_err(|_| invalid_input_error())?;

        let reorder_stops = match env::var("PLANNER_REORDER_STOPS") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => true,
        };

        Ok(Self {
            api_base,
            api_key,
            bind_address,
            reorder_stops,
            ..Self::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            api_key: String::new(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            reorder_stops: true,
            // San Diego
            default_center: Coordinates::new(32.7157, -117.1611),
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid_input_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        assert_eq!(parse_flag("TRUE"), Ok(true));
        assert_eq!(parse_flag(" off "), Ok(false));
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn default_binds_locally() {
        let config = Config::default();

        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert!(config.reorder_stops);
        assert_eq!(config.default_zoom, 15);
    }
}
