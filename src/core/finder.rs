use crate::core::distance::haversine_distance;
use crate::models::{Dealer, GeoPoint, NearestDealer};

/// Anything that can turn a free-text location query into coordinates
///
/// Lookup failures of any kind surface as `None`; implementors report the
/// condition themselves and never let an error escape this boundary.
#[allow(async_fn_in_trait)]
pub trait ResolveLocation {
    async fn resolve(&self, query: &str) -> Option<GeoPoint>;
}

/// A dealer whose location resolved successfully
#[derive(Debug, Clone)]
pub struct ResolvedDealer {
    pub zip: String,
    pub name: String,
    pub point: GeoPoint,
}

/// Result of a nearest-dealer search
///
/// `query_point` is `None` when the searched zip itself failed to geocode;
/// the match list is empty in that case. An empty match list with a resolved
/// query point means no dealer could be resolved.
#[derive(Debug)]
pub struct FindResult {
    pub matches: Vec<NearestDealer>,
    pub query_point: Option<GeoPoint>,
    pub total_dealers: usize,
    pub unresolved: usize,
}

/// Nearest-dealer search orchestrator
///
/// # Pipeline
/// 1. Resolve the query point; bail out empty if it cannot be geocoded
/// 2. Resolve every registry entry, skipping entries that fail
/// 3. Rank resolved entries by great-circle distance and truncate
#[derive(Debug, Clone, Default)]
pub struct Finder;

impl Finder {
    pub fn new() -> Self {
        Self
    }

    /// Find the `limit` nearest dealers to a query zip code
    ///
    /// A dealer that fails to resolve is skipped and counted, never aborting
    /// the search. Dealers are resolved sequentially; the resolver's cache
    /// makes repeat scans cheap.
    pub async fn find_nearest<R: ResolveLocation>(
        &self,
        resolver: &R,
        query_zip: &str,
        dealers: &[Dealer],
        limit: usize,
    ) -> FindResult {
        let Some(origin) = resolver.resolve(query_zip).await else {
            return FindResult {
                matches: Vec::new(),
                query_point: None,
                total_dealers: dealers.len(),
                unresolved: 0,
            };
        };

        let mut candidates = Vec::with_capacity(dealers.len());
        let mut unresolved = 0;

        for dealer in dealers {
            match resolver.resolve(&dealer.zip).await {
                Some(point) => candidates.push(ResolvedDealer {
                    zip: dealer.zip.clone(),
                    name: dealer.name.clone(),
                    point,
                }),
                None => {
                    tracing::debug!("Skipping dealer {} ({}): no geocode result", dealer.zip, dealer.name);
                    unresolved += 1;
                }
            }
        }

        let matches = rank_nearest(origin, candidates, limit);

        FindResult {
            matches,
            query_point: Some(origin),
            total_dealers: dealers.len(),
            unresolved,
        }
    }
}

/// Rank resolved dealers by ascending distance from the origin
///
/// Equidistant entries order lexicographically by zip, a deterministic
/// tie-break rather than whatever order the registry happened to iterate in.
pub fn rank_nearest(
    origin: GeoPoint,
    candidates: Vec<ResolvedDealer>,
    limit: usize,
) -> Vec<NearestDealer> {
    let mut ranked: Vec<NearestDealer> = candidates
        .into_iter()
        .map(|dealer| NearestDealer {
            distance_km: haversine_distance(origin, dealer.point),
            zip: dealer.zip,
            name: dealer.name,
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.zip.cmp(&b.zip))
    });

    ranked.truncate(limit);
    ranked
}
