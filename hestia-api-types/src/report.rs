use serde::{Deserialize, Serialize};

use crate::aggregates::NeighbourhoodAggregate;
use crate::{City, GeoPoint, RoomType};

/// Summed listing price per room type, the pie chart's input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomTypePriceShare {
    pub entire_home: f64,
    pub private_room: f64,
}

impl RoomTypePriceShare {
    pub fn total(&self) -> f64 {
        self.entire_home + self.private_room
    }
}

/// Box-plot statistics of one price group, exclusive-median quartiles.
/// Whiskers sit on the most extreme observation within 1.5·IQR of the box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceBoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub sample_size: usize,
}

/// One marker on the listing point map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub position: GeoPoint,
    pub room_type: RoomType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapacityBoxGroup {
    pub person_capacity: u8,
    pub room_type: RoomType,
    pub stats: PriceBoxStats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodBoxGroup {
    pub neighbourhood: String,
    pub room_type: RoomType,
    pub stats: PriceBoxStats,
}

/// Mean prices of one neighbourhood of the reported city, bar/line chart
/// and choropleth input. Rows come out sorted by neighbourhood name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodMeanRow {
    pub neighbourhood: String,
    pub means: NeighbourhoodAggregate,
}

/// Everything the dashboard renders for one selected city.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityReport {
    pub city: City,
    /// Computed over every listing of the city; the pie counts outliers too.
    pub room_type_share: RoomTypePriceShare,
    pub capacity_boxes: Vec<CapacityBoxGroup>,
    pub neighbourhood_boxes: Vec<NeighbourhoodBoxGroup>,
    pub aggregates: Vec<NeighbourhoodMeanRow>,
    /// Every listing of the city, unfiltered, for the point map.
    pub points: Vec<MapPoint>,
}
