use crate::models::domain::{Dealer, NearestDealer, SearchRecord};
use crate::services::cache::CacheStats;
use serde::{Deserialize, Serialize};

/// Response for the nearest-dealer search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindNearestResponse {
    #[serde(rename = "queryZip")]
    pub query_zip: String,
    pub matches: Vec<NearestDealer>,
    #[serde(rename = "totalDealers")]
    pub total_dealers: usize,
    #[serde(rename = "unresolvedDealers")]
    pub unresolved_dealers: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Registry snapshot response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerListResponse {
    pub dealers: Vec<Dealer>,
    pub total: usize,
}

/// Response after adding a dealer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDealerResponse {
    pub success: bool,
    pub zip: String,
}

/// Response after removing a dealer, carrying the prior name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveDealerResponse {
    pub success: bool,
    pub zip: String,
    pub name: String,
}

/// History snapshot response, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<SearchRecord>,
    pub total: usize,
}
