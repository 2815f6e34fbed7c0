// Service exports
pub mod cache;
pub mod geocoder;
pub mod history;
pub mod registry;

pub use cache::{CacheStats, GeocodeCache};
pub use geocoder::{GeocodeService, GeocoderError, NominatimClient};
pub use history::SearchHistory;
pub use registry::{DealerRegistry, RegistryError};
