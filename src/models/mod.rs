// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Dealer, GeoPoint, NearestDealer, SearchRecord};
pub use requests::{AddDealerRequest, FindNearestRequest};
pub use responses::{
    AddDealerResponse, DealerListResponse, ErrorResponse, FindNearestResponse, HealthResponse,
    HistoryResponse, RemoveDealerResponse,
};
