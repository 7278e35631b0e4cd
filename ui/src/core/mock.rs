//! Fake data source backing the charts until a real backend exists.
//!
//! Presentation code only ever talks to [`MetricsSource`], so swapping in a
//! real client later is a one-line change at the call site. The mock is
//! seeded from its inputs: the same filters always render the same series.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::filters::{Platform, PrimaryMetric};
use super::timerange::{BucketType, DateWindow};

/// One plotted point: the bucket's start instant and the metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub bucket_start: time::OffsetDateTime,
    pub value: f64,
}

/// Data-access seam between filters and charts.
pub trait MetricsSource {
    /// Metric values for one platform across the window, one point per bucket.
    fn series(
        &self,
        platform: Platform,
        metric: PrimaryMetric,
        window: &DateWindow,
        bucket: BucketType,
    ) -> Vec<SeriesPoint>;
}

/// Deterministic pseudo-random source used by every chart today.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockMetricsSource;

pub static MOCK_SOURCE: Lazy<MockMetricsSource> = Lazy::new(MockMetricsSource::default);

impl MetricsSource for MockMetricsSource {
    fn series(
        &self,
        platform: Platform,
        metric: PrimaryMetric,
        window: &DateWindow,
        bucket: BucketType,
    ) -> Vec<SeriesPoint> {
        let mut rng = StdRng::seed_from_u64(seed_for(platform, metric, window, bucket));
        let (base, spread) = scale_for(metric, bucket);

        let mut points = Vec::new();
        let mut cursor = window.from;
        // Capped so a degenerate window can't allocate unbounded buckets.
        while cursor < window.to && points.len() < 400 {
            let drift = 1.0 + (points.len() as f64 / 60.0).sin() * 0.25;
            let value = (base * drift + rng.gen_range(-spread..spread)).max(0.0);
            points.push(SeriesPoint {
                bucket_start: cursor,
                value,
            });
            cursor += bucket.step();
        }
        points
    }
}

fn seed_for(
    platform: Platform,
    metric: PrimaryMetric,
    window: &DateWindow,
    bucket: BucketType,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    platform.as_tag().hash(&mut hasher);
    metric.as_tag().hash(&mut hasher);
    bucket.as_tag().hash(&mut hasher);
    window.from.unix_timestamp().hash(&mut hasher);
    window.to.unix_timestamp().hash(&mut hasher);
    hasher.finish()
}

/// Plausible magnitudes per metric so mock charts read like real dashboards.
fn scale_for(metric: PrimaryMetric, bucket: BucketType) -> (f64, f64) {
    let bucket_factor = match bucket {
        BucketType::Hourly => 1.0,
        BucketType::Daily => 24.0,
        BucketType::Weekly => 168.0,
    };
    match metric {
        PrimaryMetric::Views => (1_800.0 * bucket_factor, 400.0 * bucket_factor),
        PrimaryMetric::Likes => (140.0 * bucket_factor, 45.0 * bucket_factor),
        PrimaryMetric::Comments => (18.0 * bucket_factor, 8.0 * bucket_factor),
        PrimaryMetric::Shares => (9.0 * bucket_factor, 4.0 * bucket_factor),
        PrimaryMetric::AvgViewsPerPost => (950.0, 220.0),
        PrimaryMetric::EngagementRate => (0.047, 0.012),
        PrimaryMetric::LikeRate => (0.078, 0.02),
        PrimaryMetric::CommentRate => (0.011, 0.004),
    }
}
