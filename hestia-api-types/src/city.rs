use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GeoPoint;

/// One of the six cities covered by the listing dataset.
#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum City {
    Amsterdam,
    Lisbon,
    London,
    Paris,
    Rome,
    Vienna,
}

#[derive(Debug, Error)]
#[error("unknown city {0:?}")]
pub struct UnknownCity(pub String);

impl City {
    pub const ALL: [City; 6] = [
        City::Amsterdam,
        City::Lisbon,
        City::London,
        City::Paris,
        City::Rome,
        City::Vienna,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            City::Amsterdam => "Amsterdam",
            City::Lisbon => "Lisbon",
            City::London => "London",
            City::Paris => "Paris",
            City::Rome => "Rome",
            City::Vienna => "Vienna",
        }
    }

    /// Coordinates the map layer centers on when this city is selected.
    pub fn center(&self) -> GeoPoint {
        let (latitude, longitude) = match self {
            City::Amsterdam => (52.377956, 4.897070),
            City::Lisbon => (38.736946, -9.142685),
            City::London => (51.509865, -0.118092),
            City::Paris => (48.864716, 2.349014),
            City::Rome => (41.902782, 12.496366),
            City::Vienna => (48.210033, 16.363449),
        };
        GeoPoint {
            latitude,
            longitude,
        }
    }
}

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Amsterdam" => City::Amsterdam,
            "Lisbon" => City::Lisbon,
            "London" => City::London,
            "Paris" => City::Paris,
            "Rome" => City::Rome,
            "Vienna" => City::Vienna,
            _ => return Err(UnknownCity(s.to_string())),
        })
    }
}

impl Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
