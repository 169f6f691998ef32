use std::collections::BTreeMap;

use hestia_api_types::aggregates::{NeighbourhoodAggregate, NeighbourhoodKey};
use hestia_api_types::{Listing, RoomType};

#[derive(Default)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn push(&mut self, price: f64) {
        self.sum += price;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

#[derive(Default)]
struct GroupAccumulator {
    overall: MeanAccumulator,
    entire_home: MeanAccumulator,
    private_room: MeanAccumulator,
}

/// Mean price per (city, neighbourhood), overall and split by room type.
///
/// Pass whatever collection should back the means; the report pipeline
/// hands in the outlier-filtered slice. Keys with no listings never appear
/// in the output, and a room type with no listings in its group comes out
/// as `None` rather than a zero price.
pub fn aggregate<'a>(
    listings: impl IntoIterator<Item = &'a Listing>,
) -> BTreeMap<NeighbourhoodKey, NeighbourhoodAggregate> {
    let mut groups: BTreeMap<NeighbourhoodKey, GroupAccumulator> = BTreeMap::new();
    for listing in listings {
        let group = groups
            .entry(NeighbourhoodKey {
                city: listing.city,
                neighbourhood: listing.neighbourhood.clone(),
            })
            .or_default();
        group.overall.push(listing.price);
        match listing.room_type {
            RoomType::EntireHome => group.entire_home.push(listing.price),
            RoomType::PrivateRoom => group.private_room.push(listing.price),
        }
    }
    groups
        .into_iter()
        .filter_map(|(key, group)| {
            // a group only exists once a listing pushed into it, so the
            // overall mean is always present
            let mean_price_overall = group.overall.mean()?;
            Some((
                key,
                NeighbourhoodAggregate {
                    mean_price_overall,
                    mean_price_entire_home: group.entire_home.mean(),
                    mean_price_private_room: group.private_room.mean(),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use hestia_api_types::City;

    fn listing(neighbourhood: &str, room_type: RoomType, price: f64) -> Listing {
        Listing {
            city: City::Amsterdam,
            neighbourhood: neighbourhood.to_string(),
            room_type,
            price,
            person_capacity: 2,
            position: City::Amsterdam.center(),
        }
    }

    #[test]
    fn test_means_split_by_room_type() {
        let listings = vec![
            listing("Centrum", RoomType::EntireHome, 200.0),
            listing("Centrum", RoomType::EntireHome, 300.0),
            listing("Centrum", RoomType::PrivateRoom, 100.0),
            listing("Noord", RoomType::PrivateRoom, 80.0),
        ];
        let aggregates = aggregate(&listings);
        assert_eq!(aggregates.len(), 2);

        let centrum = &aggregates[&NeighbourhoodKey {
            city: City::Amsterdam,
            neighbourhood: "Centrum".to_string(),
        }];
        assert_eq!(centrum.mean_price_overall, 200.0);
        assert_eq!(centrum.mean_price_entire_home, Some(250.0));
        assert_eq!(centrum.mean_price_private_room, Some(100.0));

        let noord = &aggregates[&NeighbourhoodKey {
            city: City::Amsterdam,
            neighbourhood: "Noord".to_string(),
        }];
        assert_eq!(noord.mean_price_overall, 80.0);
        assert_eq!(noord.mean_price_private_room, Some(80.0));
    }

    #[test]
    fn test_missing_room_type_is_absent_not_zero() {
        let listings = vec![
            listing("Jordaan", RoomType::EntireHome, 150.0),
            listing("Jordaan", RoomType::EntireHome, 170.0),
        ];
        let aggregates = aggregate(&listings);
        let jordaan = aggregates.values().next().unwrap();
        assert_eq!(jordaan.mean_price_entire_home, Some(160.0));
        assert_eq!(jordaan.mean_price_private_room, None);
    }

    #[test]
    fn test_mean_stays_within_group_bounds() {
        let prices = [90.0, 130.0, 101.5, 118.0, 95.25];
        let listings: Vec<Listing> = prices
            .iter()
            .map(|price| listing("Oud-West", RoomType::PrivateRoom, *price))
            .collect();
        let aggregates = aggregate(&listings);
        let group = aggregates.values().next().unwrap();
        assert!(group.mean_price_overall >= 90.0);
        assert!(group.mean_price_overall <= 130.0);
    }

    #[test]
    fn test_no_listings_no_keys() {
        let listings: Vec<Listing> = Vec::new();
        assert!(aggregate(&listings).is_empty());
    }
}
