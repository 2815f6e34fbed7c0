use crate::models::Dealer;
use thiserror::Error;

/// Errors from registry mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Dealer with zip {0} already exists")]
    Duplicate(String),

    #[error("No dealer with zip {0}")]
    NotFound(String),
}

/// In-memory dealer registry
///
/// Zip codes are unique at all times. Insertion order is preserved for
/// display; ranking ties in the search are broken lexicographically, so the
/// order carries no search semantics. State lives only for the process
/// lifetime.
#[derive(Debug, Clone, Default)]
pub struct DealerRegistry {
    dealers: Vec<Dealer>,
}

impl DealerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the fixed Swiss dealer set
    pub fn with_swiss_seed() -> Self {
        let mut registry = Self::new();
        for &(zip, name) in SWISS_SEED {
            // Seed entries are distinct by construction
            let _ = registry.add(zip, name);
        }
        registry
    }

    /// Register a dealer, rejecting duplicate zip codes
    pub fn add(&mut self, zip: impl Into<String>, name: impl Into<String>) -> Result<(), RegistryError> {
        let zip = zip.into();
        if self.dealers.iter().any(|d| d.zip == zip) {
            return Err(RegistryError::Duplicate(zip));
        }
        self.dealers.push(Dealer::new(zip, name));
        Ok(())
    }

    /// Remove a dealer, returning its prior name
    pub fn remove(&mut self, zip: &str) -> Result<String, RegistryError> {
        match self.dealers.iter().position(|d| d.zip == zip) {
            Some(index) => Ok(self.dealers.remove(index).name),
            None => Err(RegistryError::NotFound(zip.to_string())),
        }
    }

    /// Look up a dealer's name
    pub fn get(&self, zip: &str) -> Option<&str> {
        self.dealers
            .iter()
            .find(|d| d.zip == zip)
            .map(|d| d.name.as_str())
    }

    /// Snapshot of all dealers in insertion order
    pub fn snapshot(&self) -> Vec<Dealer> {
        self.dealers.clone()
    }

    pub fn len(&self) -> usize {
        self.dealers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dealers.is_empty()
    }
}

/// The dealer network the service ships with
const SWISS_SEED: &[(&str, &str)] = &[
    ("3076", "Bächelmatt Garage Worb"),
    ("8106", "Garage R. Wallishauser AG"),
    ("3613", "Autohaus Thun-Nord AG"),
    ("7205", "Garage O. Stock AG"),
    ("4503", "Gysin + Gerspacher AG"),
    ("9500", "alphaCARS.CH AG – Wil"),
    ("5432", "Garage Matter AG"),
    ("9014", "alphaCARS.CH AG – Oberuzwil"),
    ("9242", "alphaCARS.CH AG – St. Gallen"),
    ("6467", "Brand Automobile AG"),
    ("4950", "Garage Rupli"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_list() {
        let mut registry = DealerRegistry::new();
        registry.add("8001", "Alpha").unwrap();

        let dealers = registry.snapshot();
        assert_eq!(dealers.len(), 1);
        assert_eq!(dealers[0].zip, "8001");
        assert_eq!(dealers[0].name, "Alpha");
    }

    #[test]
    fn test_duplicate_add_rejected_and_list_unchanged() {
        let mut registry = DealerRegistry::new();
        registry.add("8001", "Alpha").unwrap();

        let err = registry.add("8001", "Impostor").unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("8001".to_string()));

        let dealers = registry.snapshot();
        assert_eq!(dealers.len(), 1);
        assert_eq!(dealers[0].name, "Alpha");
    }

    #[test]
    fn test_remove_returns_prior_name() {
        let mut registry = DealerRegistry::new();
        registry.add("8001", "Alpha").unwrap();
        registry.add("3000", "Beta").unwrap();

        let name = registry.remove("8001").unwrap();
        assert_eq!(name, "Alpha");
        assert_eq!(registry.len(), 1);
        assert!(registry.get("8001").is_none());
    }

    #[test]
    fn test_remove_unknown_rejected_and_list_unchanged() {
        let mut registry = DealerRegistry::new();
        registry.add("8001", "Alpha").unwrap();

        let err = registry.remove("9999").unwrap_err();
        assert_eq!(err, RegistryError::NotFound("9999".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = DealerRegistry::new();
        registry.add("9500", "First").unwrap();
        registry.add("3000", "Second").unwrap();
        registry.add("8001", "Third").unwrap();

        let snapshot = registry.snapshot();
        let zips: Vec<&str> = snapshot.iter().map(|d| d.zip.as_str()).collect();
        assert_eq!(zips, vec!["9500", "3000", "8001"]);
    }

    #[test]
    fn test_swiss_seed_loaded() {
        let registry = DealerRegistry::with_swiss_seed();
        assert_eq!(registry.len(), 11);
        assert_eq!(registry.get("3076"), Some("Bächelmatt Garage Worb"));
        assert_eq!(registry.snapshot()[0].zip, "3076");
    }
}
