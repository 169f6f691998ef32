//! Loaders for the two tabular files the dashboard ships with: the raw
//! listing observations and the pre-computed per-neighbourhood mean prices.
//! Everything is validated on the way in so the statistics core only ever
//! sees well-formed records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hestia_api_types::aggregates::NeighbourhoodSummary;
use hestia_api_types::{City, GeoPoint, Listing, RoomType};
use log::info;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("record {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}

fn invalid(line: u64, reason: impl ToString) -> DatasetError {
    DatasetError::InvalidRecord {
        line,
        reason: reason.to_string(),
    }
}

/// Raw listings row, column names as they appear in the file.
#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Neighbourhood")]
    neighbourhood: String,
    #[serde(rename = "Room type")]
    room_type: String,
    #[serde(rename = "Price")]
    price: f64,
    // the source file stores capacity as a float ("2.0")
    #[serde(rename = "Person capacity")]
    person_capacity: f64,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

/// Raw summary row of the pre-computed neighbourhood means file.
#[derive(Debug, Deserialize)]
struct SummaryRow {
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Neighbourhood")]
    neighbourhood: String,
    #[serde(rename = "Overall Mean")]
    mean_price_overall: f64,
    #[serde(rename = "Mean Ent. home")]
    mean_price_entire_home: Option<f64>,
    #[serde(rename = "Mean Priv. room")]
    mean_price_private_room: Option<f64>,
    #[serde(rename = "Centroid")]
    centroid: String,
}

pub fn load_listings(path: impl AsRef<Path>) -> Result<Vec<Listing>, DatasetError> {
    let path = path.as_ref();
    let file = open(path)?;
    let listings = read_listings(file)?;
    info!("loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

/// Reads listings out of any CSV source. Fails on the first row that does
/// not survive validation, naming the offending line.
pub fn read_listings(reader: impl Read) -> Result<Vec<Listing>, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut listings = Vec::new();
    for (index, row) in csv_reader.deserialize::<ListingRow>().enumerate() {
        // header occupies line 1
        let line = index as u64 + 2;
        listings.push(convert_listing(row?, line)?);
    }
    Ok(listings)
}

pub fn load_neighbourhood_summary(
    path: impl AsRef<Path>,
) -> Result<Vec<NeighbourhoodSummary>, DatasetError> {
    let path = path.as_ref();
    let file = open(path)?;
    let rows = read_neighbourhood_summary(file)?;
    info!(
        "loaded {} neighbourhood summaries from {}",
        rows.len(),
        path.display()
    );
    Ok(rows)
}

/// Reads the pre-computed neighbourhood means out of any CSV source. The
/// room-type mean cells may be empty (a neighbourhood without that room
/// type); those come through as `None`.
pub fn read_neighbourhood_summary(
    reader: impl Read,
) -> Result<Vec<NeighbourhoodSummary>, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (index, row) in csv_reader.deserialize::<SummaryRow>().enumerate() {
        let line = index as u64 + 2;
        rows.push(convert_summary(row?, line)?);
    }
    Ok(rows)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn convert_listing(row: ListingRow, line: u64) -> Result<Listing, DatasetError> {
    let city: City = row.city.parse().map_err(|e| invalid(line, e))?;
    let room_type: RoomType = row.room_type.parse().map_err(|e| invalid(line, e))?;
    if row.neighbourhood.trim().is_empty() {
        return Err(invalid(line, "missing neighbourhood"));
    }
    if !row.price.is_finite() || row.price <= 0.0 {
        return Err(invalid(line, format!("price {} is not positive", row.price)));
    }
    if row.person_capacity < 1.0
        || row.person_capacity > f64::from(u8::MAX)
        || row.person_capacity.fract() != 0.0
    {
        return Err(invalid(
            line,
            format!("person capacity {} is not a positive whole number", row.person_capacity),
        ));
    }
    let position = geo_point(row.latitude, row.longitude).ok_or_else(|| {
        invalid(
            line,
            format!(
                "coordinates ({}, {}) are out of range",
                row.latitude, row.longitude
            ),
        )
    })?;
    Ok(Listing {
        city,
        neighbourhood: row.neighbourhood,
        room_type,
        price: row.price,
        person_capacity: row.person_capacity as u8,
        position,
    })
}

fn convert_summary(row: SummaryRow, line: u64) -> Result<NeighbourhoodSummary, DatasetError> {
    let city: City = row.city.parse().map_err(|e| invalid(line, e))?;
    if row.neighbourhood.trim().is_empty() {
        return Err(invalid(line, "missing neighbourhood"));
    }
    if !row.mean_price_overall.is_finite() || row.mean_price_overall <= 0.0 {
        return Err(invalid(
            line,
            format!("overall mean {} is not positive", row.mean_price_overall),
        ));
    }
    let centroid = parse_centroid(&row.centroid)
        .ok_or_else(|| invalid(line, format!("invalid centroid {:?}", row.centroid)))?;
    Ok(NeighbourhoodSummary {
        city,
        neighbourhood: row.neighbourhood,
        mean_price_overall: row.mean_price_overall,
        mean_price_entire_home: row.mean_price_entire_home,
        mean_price_private_room: row.mean_price_private_room,
        centroid: geo_point(centroid.latitude, centroid.longitude)
            .ok_or_else(|| invalid(line, format!("centroid {:?} is out of range", row.centroid)))?,
    })
}

fn geo_point(latitude: f64, longitude: f64) -> Option<GeoPoint> {
    ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)).then_some(
        GeoPoint {
            latitude,
            longitude,
        },
    )
}

/// Parses the summary file's `POINT (lon lat)` centroid strings.
fn parse_centroid(value: &str) -> Option<GeoPoint> {
    let inner = value
        .trim()
        .strip_prefix("POINT")?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let mut parts = inner.split_whitespace();
    let longitude: f64 = parts.next()?.parse().ok()?;
    let latitude: f64 = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some(GeoPoint {
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTINGS_CSV: &str = "\
City,Neighbourhood,Room type,Price,Person capacity,Latitude,Longitude
Amsterdam,Centrum,Entire home,194.0,2.0,52.3676,4.9041
Amsterdam,Noord,Private room,98.5,4.0,52.4,4.92
Paris,Louvre,Entire home,210.25,2.0,48.86,2.34
";

    const SUMMARY_CSV: &str = "\
City,Neighbourhood,Overall Mean,Mean Ent. home,Mean Priv. room,Centroid
Amsterdam,Centrum,187.3,201.8,122.4,POINT (4.9041 52.3676)
Amsterdam,Noord,98.5,,98.5,POINT (4.92 52.4)
";

    #[test]
    fn test_read_listings() {
        let listings = read_listings(LISTINGS_CSV.as_bytes()).unwrap();
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].city, City::Amsterdam);
        assert_eq!(listings[0].room_type, RoomType::EntireHome);
        assert_eq!(listings[0].price, 194.0);
        assert_eq!(listings[1].person_capacity, 4);
        assert_eq!(listings[2].neighbourhood, "Louvre");
    }

    #[test]
    fn test_unknown_city_is_rejected_with_its_line() {
        let csv = "\
City,Neighbourhood,Room type,Price,Person capacity,Latitude,Longitude
Amsterdam,Centrum,Entire home,194.0,2.0,52.3676,4.9041
Berlin,Mitte,Entire home,150.0,2.0,52.52,13.4
";
        let err = read_listings(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::InvalidRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("Berlin"));
            }
            other => panic!("expected InvalidRecord, got {other}"),
        }
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let csv = "\
City,Neighbourhood,Room type,Price,Person capacity,Latitude,Longitude
Rome,Trastevere,Private room,0.0,2.0,41.88,12.47
";
        assert!(read_listings(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_fractional_capacity_is_rejected() {
        let csv = "\
City,Neighbourhood,Room type,Price,Person capacity,Latitude,Longitude
Rome,Trastevere,Private room,80.0,2.5,41.88,12.47
";
        assert!(read_listings(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_read_summary_with_missing_room_type_mean() {
        let rows = read_neighbourhood_summary(SUMMARY_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mean_price_entire_home, Some(201.8));
        assert_eq!(rows[1].mean_price_entire_home, None);
        assert_eq!(rows[1].mean_price_private_room, Some(98.5));
        assert_eq!(rows[0].centroid.latitude, 52.3676);
        assert_eq!(rows[0].centroid.longitude, 4.9041);
    }

    #[test]
    fn test_malformed_centroid_is_rejected() {
        let csv = "\
City,Neighbourhood,Overall Mean,Mean Ent. home,Mean Priv. room,Centroid
Amsterdam,Centrum,187.3,201.8,122.4,4.9041;52.3676
";
        let err = read_neighbourhood_summary(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_parse_centroid() {
        let point = parse_centroid("POINT (2.349014 48.864716)").unwrap();
        assert_eq!(point.longitude, 2.349014);
        assert_eq!(point.latitude, 48.864716);

        assert!(parse_centroid("POINT ()").is_none());
        assert!(parse_centroid("POINT (1.0 2.0 3.0)").is_none());
        assert!(parse_centroid("LINESTRING (0 0, 1 1)").is_none());
    }
}
