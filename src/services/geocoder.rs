use crate::core::ResolveLocation;
use crate::models::GeoPoint;
use crate::services::cache::{CacheStats, GeocodeCache};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the geocoding service
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// One row of a Nominatim search response
///
/// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Nominatim search client
///
/// Appends the configured country qualifier to every query and issues a
/// single bounded-timeout lookup. No retries; transient failures surface as
/// errors for the caller to degrade.
pub struct NominatimClient {
    base_url: String,
    country: String,
    client: Client,
}

impl NominatimClient {
    /// Create a new client
    ///
    /// Nominatim's usage policy requires an identifying User-Agent, so one is
    /// set on every request.
    pub fn new(
        base_url: String,
        user_agent: String,
        country: String,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            country,
            client,
        }
    }

    /// Resolve a free-text query to coordinates
    ///
    /// `Ok(None)` means the service answered but found nothing.
    pub async fn lookup(&self, query: &str) -> Result<Option<GeoPoint>, GeocoderError> {
        let place = format!("{}, {}", query, self.country);
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&place)
        );

        tracing::debug!("Geocoding '{}'", place);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocoderError::ApiError(format!(
                "Geocoding '{}' failed: {}",
                place,
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocoderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let Some(first) = places.first() else {
            return Ok(None);
        };

        let latitude = first
            .lat
            .parse::<f64>()
            .map_err(|e| GeocoderError::InvalidResponse(format!("Bad latitude '{}': {}", first.lat, e)))?;
        let longitude = first
            .lon
            .parse::<f64>()
            .map_err(|e| GeocoderError::InvalidResponse(format!("Bad longitude '{}': {}", first.lon, e)))?;

        Ok(Some(GeoPoint::new(latitude, longitude)))
    }
}

/// Cache-through geocoder used by the search pipeline
///
/// Lookup failures of any kind degrade to `None` here after being reported;
/// no geocoder error crosses this boundary.
pub struct GeocodeService {
    client: NominatimClient,
    cache: GeocodeCache,
}

impl GeocodeService {
    pub fn new(client: NominatimClient, cache: GeocodeCache) -> Self {
        Self { client, cache }
    }

    /// Cache statistics for the health endpoint
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl ResolveLocation for GeocodeService {
    async fn resolve(&self, query: &str) -> Option<GeoPoint> {
        if let Some(point) = self.cache.get(query).await {
            return Some(point);
        }

        match self.client.lookup(query).await {
            Ok(Some(point)) => {
                self.cache.insert(query, point).await;
                Some(point)
            }
            Ok(None) => {
                tracing::debug!("No geocode result for '{}'", query);
                None
            }
            Err(e) => {
                tracing::warn!("Geocoding error for '{}': {}", query, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: String) -> NominatimClient {
        NominatimClient::new(
            base_url,
            "dealer-locator-tests".to_string(),
            "Switzerland".to_string(),
            5,
        )
    }

    #[tokio::test]
    async fn test_lookup_parses_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat": "47.3769", "lon": "8.5417", "display_name": "8001, Zürich"}]"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let point = client.lookup("8001").await.unwrap().unwrap();

        assert!((point.latitude - 47.3769).abs() < 1e-6);
        assert!((point.longitude - 8.5417).abs() < 1e-6);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_empty_result_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(server.url());
        assert!(client.lookup("9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = test_client(server.url());
        let result = client.lookup("8001").await;

        assert!(matches!(result, Err(GeocoderError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_lookup_garbage_coordinates_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat": "not-a-number", "lon": "8.5417"}]"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let result = client.lookup("8001").await;

        assert!(matches!(result, Err(GeocoderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_service_caches_successful_lookups() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat": "46.9480", "lon": "7.4474"}]"#)
            .expect(1)
            .create_async()
            .await;

        let service = GeocodeService::new(test_client(server.url()), GeocodeCache::new(100, 60));

        let first = service.resolve("3000").await;
        let second = service.resolve("3000").await;

        assert_eq!(first, second);
        assert!(first.is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_service_degrades_errors_to_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let service = GeocodeService::new(test_client(server.url()), GeocodeCache::new(100, 60));
        assert!(service.resolve("8001").await.is_none());
    }
}
