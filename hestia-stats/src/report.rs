use hestia_api_types::report::{
    CapacityBoxGroup, CityReport, MapPoint, NeighbourhoodBoxGroup, NeighbourhoodMeanRow,
    RoomTypePriceShare,
};
use hestia_api_types::{City, Listing, RoomType};
use itertools::Itertools;
use thiserror::Error;
use tracing::instrument;

use crate::aggregate::aggregate;
use crate::math::price_box_stats;
use crate::outlier::{filter_listings, FilterError};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no listings recorded for {0}")]
    EmptyCity(City),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Summed price per room type over the given listings (the pie chart input,
/// which weighs slices by price rather than by listing count).
pub fn room_type_price_share<'a>(
    listings: impl IntoIterator<Item = &'a Listing>,
) -> RoomTypePriceShare {
    let mut share = RoomTypePriceShare::default();
    for listing in listings {
        match listing.room_type {
            RoomType::EntireHome => share.entire_home += listing.price,
            RoomType::PrivateRoom => share.private_room += listing.price,
        }
    }
    share
}

/// Box-plot statistics per (person capacity, room type) group.
pub fn capacity_boxes(listings: &[Listing]) -> Vec<CapacityBoxGroup> {
    listings
        .iter()
        .map(|l| ((l.person_capacity, l.room_type), l.price))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|((capacity, room_type), _)| (*capacity, *room_type))
        .filter_map(|((person_capacity, room_type), prices)| {
            price_box_stats(&prices).map(|stats| CapacityBoxGroup {
                person_capacity,
                room_type,
                stats,
            })
        })
        .collect()
}

/// Box-plot statistics per (neighbourhood, room type) group.
pub fn neighbourhood_boxes(listings: &[Listing]) -> Vec<NeighbourhoodBoxGroup> {
    listings
        .iter()
        .map(|l| ((l.neighbourhood.clone(), l.room_type), l.price))
        .into_group_map()
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .filter_map(|((neighbourhood, room_type), prices)| {
            price_box_stats(&prices).map(|stats| NeighbourhoodBoxGroup {
                neighbourhood,
                room_type,
                stats,
            })
        })
        .collect()
}

/// Computes everything the dashboard shows for one selected city: one
/// outlier-filter pass over the city's listings, one aggregation pass, and
/// the descriptive statistics for the charts.
///
/// The pie share and the map points cover every listing of the city; box
/// plots and neighbourhood means are computed from the filtered slice so a
/// single extreme listing cannot distort them.
#[instrument(skip(listings))]
pub fn build_city_report(
    listings: &[Listing],
    city: City,
    neighbours: usize,
) -> Result<CityReport, ReportError> {
    let city_slice: Vec<Listing> = listings
        .iter()
        .filter(|listing| listing.city == city)
        .cloned()
        .collect();
    if city_slice.is_empty() {
        return Err(ReportError::EmptyCity(city));
    }

    let room_type_share = room_type_price_share(&city_slice);
    let points = city_slice
        .iter()
        .map(|listing| MapPoint {
            position: listing.position,
            room_type: listing.room_type,
        })
        .collect();

    let filtered = filter_listings(city_slice, neighbours)?;
    let aggregates = aggregate(&filtered)
        .into_iter()
        .map(|(key, means)| NeighbourhoodMeanRow {
            neighbourhood: key.neighbourhood,
            means,
        })
        .collect();

    Ok(CityReport {
        city,
        room_type_share,
        capacity_boxes: capacity_boxes(&filtered),
        neighbourhood_boxes: neighbourhood_boxes(&filtered),
        aggregates,
        points,
    })
}
