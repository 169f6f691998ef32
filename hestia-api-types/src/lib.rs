mod city;
mod listing;

pub mod aggregates;
pub mod report;

pub use city::{City, UnknownCity};
pub use listing::{Listing, RoomType, UnknownRoomType};

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}
