use serde::{Deserialize, Serialize};

use crate::{City, GeoPoint};

/// Key of the per-neighbourhood aggregation. Neighbourhood names are scoped
/// to their city, so the pair is the identity.
#[derive(
    Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NeighbourhoodKey {
    pub city: City,
    pub neighbourhood: String,
}

/// Mean prices of one (city, neighbourhood) group.
///
/// A room-type mean is `None` when the group has no listings of that room
/// type. Zero would read as "free", which is not what "no data" means.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodAggregate {
    pub mean_price_overall: f64,
    pub mean_price_entire_home: Option<f64>,
    pub mean_price_private_room: Option<f64>,
}

/// One row of the pre-computed neighbourhood means shipped alongside the
/// listings. Carries the centroid the map layer anchors its labels on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodSummary {
    pub city: City,
    pub neighbourhood: String,
    pub mean_price_overall: f64,
    pub mean_price_entire_home: Option<f64>,
    pub mean_price_private_room: Option<f64>,
    pub centroid: GeoPoint,
}
