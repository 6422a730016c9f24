use super::{helpers::build_shareable_link, Engine};

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{ItineraryEntry, RouteResult},
    error::Error,
};

#[async_trait]
impl RouteAPI for Engine {
    /// The generation is claimed while the stop list is still locked, so an
    /// edit landing before the reply marks this computation stale.
    #[tracing::instrument(skip(self))]
    async fn compute_route(&self) -> Result<RouteResult, Error> {
        let (generation, stops) = {
            let list = self.stops.lock().await;
            let stops = list.stops().to_vec();
            (self.coordinator.begin(&stops).await?, stops)
        };

        self.coordinator.run(generation, stops).await
    }

    async fn find_route(&self) -> Result<Option<RouteResult>, Error> {
        Ok(self.coordinator.result().await)
    }

    /// Drops the route and starts over with two empty stops.
    #[tracing::instrument(skip(self))]
    async fn clear_route(&self) -> Result<(), Error> {
        let mut list = self.stops.lock().await;
        list.reset();
        self.coordinator.clear().await;

        Ok(())
    }

    async fn shareable_link(&self) -> Result<String, Error> {
        Ok(self
            .coordinator
            .result()
            .await
            .map(|result| build_shareable_link(&result, &result.stops))
            .unwrap_or_default())
    }

    async fn itinerary(&self) -> Result<Vec<ItineraryEntry>, Error> {
        Ok(self
            .coordinator
            .result()
            .await
            .map(|result| result.itinerary())
            .unwrap_or_default())
    }
}
