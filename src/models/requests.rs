use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to find the nearest dealer(s) for a zip code
///
/// `limit` falls back to the configured search default when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindNearestRequest {
    #[validate(custom(function = "validate_zip"))]
    pub zip: String,
    #[serde(default)]
    pub limit: Option<u8>,
}

/// Request to register a new dealer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddDealerRequest {
    #[validate(custom(function = "validate_zip"))]
    pub zip: String,
    #[validate(length(min = 1))]
    pub name: String,
}

/// A Swiss zip code is exactly four ASCII digits
pub fn validate_zip(zip: &str) -> Result<(), ValidationError> {
    if zip.len() == 4 && zip.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_zip"))
    }
}
