use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::StopAPI,
    entities::{PlaceSuggestions, Stop},
    error::{stop_limit_error, Error},
};

#[async_trait]
impl StopAPI for Engine {
    async fn list_stops(&self) -> Result<Vec<Stop>, Error> {
        Ok(self.stops.lock().await.stops().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn add_stop(&self) -> Result<Stop, Error> {
        let mut list = self.stops.lock().await;
        let stop = list.add_stop().cloned().ok_or_else(stop_limit_error)?;

        self.invalidate().await;

        Ok(stop)
    }

    #[tracing::instrument(skip(self))]
    async fn update_stop(&self, id: Uuid, address: String) -> Result<Vec<Stop>, Error> {
        let mut list = self.stops.lock().await;

        if list.update_stop(id, address) {
            self.invalidate().await;
        }

        Ok(list.stops().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn remove_stop(&self, id: Uuid) -> Result<Vec<Stop>, Error> {
        let mut list = self.stops.lock().await;

        if list.remove_stop(id) {
            self.invalidate().await;
        }

        Ok(list.stops().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn reset_stops(&self) -> Result<Vec<Stop>, Error> {
        let mut list = self.stops.lock().await;
        list.reset();

        self.invalidate().await;

        Ok(list.stops().to_vec())
    }

    /// Writes the resolved place's formatted address into the stop.
    #[tracing::instrument(skip(self))]
    async fn select_place(
        &self,
        id: Uuid,
        place_id: String,
        session_token: String,
    ) -> Result<Vec<Stop>, Error> {
        let place = self.places.find_place(place_id, session_token).await?;

        if place.formatted_address.is_empty() {
            tracing::debug!("place has no formatted address, leaving stop unchanged");
            return self.list_stops().await;
        }

        self.update_stop(id, place.formatted_address).await
    }

    #[tracing::instrument(skip(self))]
    async fn suggest_places(
        &self,
        input: String,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error> {
        self.places
            .find_place_suggestions(input, session_token)
            .await
    }
}
