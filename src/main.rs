use std::sync::Arc;

use stop_planner::config::Config;
use stop_planner::engine::Engine;
use stop_planner::error::Error;
use stop_planner::external::GoogleMaps;
use stop_planner::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let google_maps = Arc::new(GoogleMaps::new(&config));
    let addr = config.bind_address;

    let engine = Engine::new(config, google_maps.clone(), google_maps.clone(), google_maps);

    serve(engine, addr).await
}
