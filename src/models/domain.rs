use serde::{Deserialize, Serialize};

/// A geocoded coordinate pair in degrees
///
/// Derived from a geocoder lookup and never mutated afterwards. A failed
/// lookup is represented as `Option::<GeoPoint>::None` at the call sites,
/// never as a sentinel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A registered dealer, keyed by its 4-digit Swiss zip code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealer {
    pub zip: String,
    pub name: String,
}

impl Dealer {
    pub fn new(zip: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            zip: zip.into(),
            name: name.into(),
        }
    }
}

/// A ranked search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestDealer {
    pub zip: String,
    pub name: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// One completed search, appended to the in-memory history
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: String,
    #[serde(rename = "queryZip")]
    pub query_zip: String,
    #[serde(rename = "dealerZip")]
    pub dealer_zip: String,
    #[serde(rename = "dealerName")]
    pub dealer_name: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "searchedAt")]
    pub searched_at: chrono::DateTime<chrono::Utc>,
}

impl SearchRecord {
    /// Build a record for the top match of a successful search
    pub fn from_match(query_zip: &str, nearest: &NearestDealer) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            query_zip: query_zip.to_string(),
            dealer_zip: nearest.zip.clone(),
            dealer_name: nearest.name.clone(),
            distance_km: nearest.distance_km,
            searched_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_record_from_match() {
        let nearest = NearestDealer {
            zip: "3076".to_string(),
            name: "Bächelmatt Garage Worb".to_string(),
            distance_km: 12.5,
        };

        let record = SearchRecord::from_match("3000", &nearest);

        assert_eq!(record.query_zip, "3000");
        assert_eq!(record.dealer_zip, "3076");
        assert_eq!(record.dealer_name, "Bächelmatt Garage Worb");
        assert!(!record.id.is_empty());
    }
}
