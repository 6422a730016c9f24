use geo_types::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Smallest rectangle holding every coordinate, `None` for an empty set.
    pub fn bounds<'a, I>(coordinates: I) -> Option<Rect<f64>>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        let mut points = coordinates.into_iter().map(|&c| Point::from(c));
        let first = points.next()?;

        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x().min(p.x()), min.y().min(p.y())),
                Point::new(max.x().max(p.x()), max.y().max(p.y())),
            )
        });

        Some(Rect::new(min.0, max.0))
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}
