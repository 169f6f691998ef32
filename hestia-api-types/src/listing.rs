use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{City, GeoPoint};

/// The kind of hosting a listing offers. The dataset only carries these two.
#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RoomType {
    EntireHome,
    PrivateRoom,
}

#[derive(Debug, Error)]
#[error("unknown room type {0:?}")]
pub struct UnknownRoomType(pub String);

impl RoomType {
    pub fn name(&self) -> &'static str {
        match self {
            RoomType::EntireHome => "Entire home",
            RoomType::PrivateRoom => "Private room",
        }
    }
}

impl FromStr for RoomType {
    type Err = UnknownRoomType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Entire home" => RoomType::EntireHome,
            "Private room" => RoomType::PrivateRoom,
            _ => return Err(UnknownRoomType(s.to_string())),
        })
    }
}

/// One listing observation. Loaded once from the dataset and never mutated;
/// filtering produces new collections.
///
/// Prices are currency-normalized per city by the dataset supplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub city: City,
    pub neighbourhood: String,
    pub room_type: RoomType,
    pub price: f64,
    pub person_capacity: u8,
    pub position: GeoPoint,
}
