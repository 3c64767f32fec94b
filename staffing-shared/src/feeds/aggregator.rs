/// Merges every configured feed into one sorted, de-duplicated listing
///
/// Merged listings are cached per filter for [`CACHE_TTL`]; pages are sliced
/// from the cached listing. A failing feed contributes nothing and is logged.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::internal::{InternalFeed, ID_PREFIX};
use super::{FeedFilter, FeedJob, FeedPage, FeedQuery, FeedSource, JobFeed, MAX_PAGE_SIZE};
use crate::dates::parse_timestamp;

pub const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Listings requested from each feed per merge
const PER_FEED_LIMIT: u32 = MAX_PAGE_SIZE;

/// Distinct filters kept in the cache at once
pub const MAX_CACHED_FILTERS: usize = 256;

struct CachedListing {
    fetched_at: Instant,
    jobs: Arc<Vec<FeedJob>>,
}

pub struct Aggregator {
    internal: InternalFeed,
    feeds: Vec<Arc<dyn JobFeed>>,
    cache: RwLock<HashMap<FeedFilter, CachedListing>>,
    ttl: Duration,
}

impl Aggregator {
    /// Aggregates the catalogue with the given external feeds
    pub fn new(external: Vec<Arc<dyn JobFeed>>) -> Self {
        let mut feeds: Vec<Arc<dyn JobFeed>> = vec![Arc::new(InternalFeed)];
        feeds.extend(external);

        Self {
            internal: InternalFeed,
            feeds,
            cache: RwLock::new(HashMap::new()),
            ttl: CACHE_TTL,
        }
    }

    /// Catalogue only, no network access
    pub fn internal_only() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn sources(&self) -> Vec<FeedSource> {
        self.feeds.iter().map(|feed| feed.source()).collect()
    }

    pub async fn search(&self, query: &FeedQuery) -> FeedPage {
        let filter = query.filter();
        let jobs = self.listing(&filter).await;

        let page = query.page();
        let limit = query.limit();
        let start = (page as usize - 1).saturating_mul(limit as usize);

        FeedPage {
            jobs: jobs.iter().skip(start).take(limit as usize).cloned().collect(),
            total: jobs.len(),
            page,
            total_pages: (jobs.len() as u32).div_ceil(limit),
            source: "aggregated",
        }
    }

    /// Finds a listing by its prefixed id
    ///
    /// Catalogue ids resolve directly; other ids are looked up in the
    /// unfiltered listing.
    pub async fn find(&self, id: &str) -> Option<FeedJob> {
        if id.starts_with(ID_PREFIX) {
            return self.internal.find(id);
        }

        self.listing(&FeedFilter::default())
            .await
            .iter()
            .find(|job| job.id == id)
            .cloned()
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        tracing::info!("Job feed cache cleared");
    }

    async fn listing(&self, filter: &FeedFilter) -> Arc<Vec<FeedJob>> {
        if let Some(cached) = self.cache.read().await.get(filter) {
            if cached.fetched_at.elapsed() < self.ttl {
                tracing::debug!("Returning cached job feed");
                return Arc::clone(&cached.jobs);
            }
        }

        let jobs = Arc::new(self.merge(filter).await);

        let mut cache = self.cache.write().await;
        cache.retain(|_, cached| cached.fetched_at.elapsed() < self.ttl);
        if cache.len() >= MAX_CACHED_FILTERS && !cache.contains_key(filter) {
            let oldest = cache
                .iter()
                .min_by_key(|(_, cached)| cached.fetched_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                cache.remove(&oldest);
            }
        }
        cache.insert(
            filter.clone(),
            CachedListing {
                fetched_at: Instant::now(),
                jobs: Arc::clone(&jobs),
            },
        );
        jobs
    }

    async fn merge(&self, filter: &FeedFilter) -> Vec<FeedJob> {
        let results = join_all(
            self.feeds
                .iter()
                .map(|feed| async move { (feed.source(), feed.search(filter, PER_FEED_LIMIT).await) }),
        )
        .await;

        let mut jobs = Vec::new();
        for (source, result) in results {
            match result {
                Ok(found) => {
                    tracing::debug!(source = source.as_str(), count = found.len(), "Feed results");
                    jobs.extend(found);
                }
                Err(e) => {
                    tracing::warn!(source = source.as_str(), error = %e, "Job feed failed, skipping");
                }
            }
        }

        let mut jobs = deduplicate(jobs);
        sort(&mut jobs, filter.query.as_deref());
        jobs
    }
}

/// Keeps one listing per title and company, preferring the more complete one
fn deduplicate(jobs: Vec<FeedJob>) -> Vec<FeedJob> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<FeedJob> = Vec::with_capacity(jobs.len());

    for job in jobs {
        let key = job.dedup_key();
        match positions.get(&key) {
            Some(&index) => {
                if job.completeness() > unique[index].completeness() {
                    unique[index] = job;
                }
            }
            None => {
                positions.insert(key, unique.len());
                unique.push(job);
            }
        }
    }

    unique
}

/// Featured, then catalogue, then title matches, then newest
fn sort(jobs: &mut [FeedJob], query: Option<&str>) {
    let query = query.map(str::to_lowercase);
    let title_match = |job: &FeedJob| {
        query
            .as_deref()
            .is_some_and(|q| job.title.to_lowercase().contains(q))
    };

    jobs.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| {
                (b.source == FeedSource::Internal).cmp(&(a.source == FeedSource::Internal))
            })
            .then_with(|| title_match(b).cmp(&title_match(a)))
            .then_with(|| newest_first(a, b))
    });
}

fn newest_first(a: &FeedJob, b: &FeedJob) -> Ordering {
    parse_timestamp(&b.posted_date).cmp(&parse_timestamp(&a.posted_date))
}
