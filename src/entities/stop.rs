use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_STOPS: usize = 2;
pub const MAX_STOPS: usize = 25;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub id: Uuid,
    pub address: String,
}

impl Stop {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            address: String::new(),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.address.trim().is_empty()
    }
}

impl Default for Stop {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered list of stops. The first stop is the origin and the last one the
/// destination; the list always holds between `MIN_STOPS` and `MAX_STOPS`.
#[derive(Clone, Debug, Serialize)]
pub struct StopList {
    stops: Vec<Stop>,
}

impl StopList {
    pub fn new() -> Self {
        Self {
            stops: (0..MIN_STOPS).map(|_| Stop::new()).collect(),
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Appends an empty stop, or does nothing once `MAX_STOPS` is reached.
    #[tracing::instrument(skip(self))]
    pub fn add_stop(&mut self) -> Option<&Stop> {
        if self.stops.len() >= MAX_STOPS {
            tracing::debug!("stop limit reached, ignoring add");
            return None;
        }

        self.stops.push(Stop::new());
        self.stops.last()
    }

    /// Returns whether a stop with `id` existed and was changed.
    #[tracing::instrument(skip(self))]
    pub fn update_stop(&mut self, id: Uuid, address: String) -> bool {
        match self.stops.iter_mut().find(|stop| stop.id == id) {
            Some(stop) if stop.address != address => {
                stop.address = address;
                true
            }
            _ => false,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_stop(&mut self, id: Uuid) -> bool {
        if self.stops.len() <= MIN_STOPS {
            tracing::debug!("minimum stop count reached, ignoring remove");
            return false;
        }

        let before = self.stops.len();
        self.stops.retain(|stop| stop.id != id);

        before != self.stops.len()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for StopList {
    fn default() -> Self {
        Self::new()
    }
}
