//! Reduction of interval-level forecast points into daily and windowed summaries.
//!
//! Everything in this module is pure: no I/O, no clock, no process locale.
//! Calendar dates and hour labels are derived through an explicit
//! [`FixedOffset`] held by the [`ForecastAggregator`], UTC unless the caller
//! chooses otherwise, so the same input always yields the same output.

use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{
    ConditionFamily, CurrentConditions, DailyAggregate, DayOutlook, ForecastPoint, HourlyPoint,
    LocationMetadata, RainChance, Sky, utc,
};

/// Number of points in the intraday series (24 hours at 3-hour steps).
pub const SHORT_HORIZON_POINTS: usize = 8;

/// Number of days in the default outlook.
pub const DEFAULT_OUTLOOK_DAYS: usize = 3;

/// How a day's representative point is chosen.
///
/// The representative point supplies the day's condition and its day/night
/// classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentativePolicy {
    /// The earliest point of the day.
    #[default]
    FirstPointOfDay,

    /// The first point carrying the day's most frequent `condition_main`.
    /// Ties go to the condition seen first.
    MostFrequent,
}

impl RepresentativePolicy {
    /// Pick the representative point of a bucket, `None` only if it is empty.
    pub fn pick<'a>(self, bucket: &[&'a ForecastPoint]) -> Option<&'a ForecastPoint> {
        match self {
            RepresentativePolicy::FirstPointOfDay => bucket.first().copied(),
            RepresentativePolicy::MostFrequent => {
                let mut best: Option<(&'a ForecastPoint, usize)> = None;
                for point in bucket {
                    let count = bucket
                        .iter()
                        .filter(|other| other.condition_main == point.condition_main)
                        .count();
                    if best.is_none_or(|(_, best_count)| count > best_count) {
                        best = Some((*point, count));
                    }
                }
                best.map(|(point, _)| point)
            }
        }
    }
}

/// Pure reducer from forecast points to summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastAggregator {
    offset: FixedOffset,
    policy: RepresentativePolicy,
}

impl Default for ForecastAggregator {
    fn default() -> Self {
        Self::new(utc())
    }
}

impl ForecastAggregator {
    /// Create an aggregator bucketing dates under `offset`, using the
    /// first-point-of-day policy.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            policy: RepresentativePolicy::default(),
        }
    }

    /// Replace the representative-point policy.
    pub fn with_policy(mut self, policy: RepresentativePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reduce points into one aggregate per calendar date.
    ///
    /// Dates appear in first-seen order, which is ascending for
    /// timestamp-ordered input. Empty input yields an empty vector.
    /// Points whose timestamp chrono cannot represent are skipped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let daily = ForecastAggregator::default().reduce_to_daily(&forecast.points);
    /// for day in &daily {
    ///     println!("{}: {:.0}..{:.0}", day.date, day.min_temperature_c, day.max_temperature_c);
    /// }
    /// ```
    pub fn reduce_to_daily(&self, points: &[ForecastPoint]) -> Vec<DailyAggregate> {
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();
        let mut buckets: Vec<(NaiveDate, Vec<&ForecastPoint>)> = Vec::new();

        for point in points {
            let Some(local) = point.local_time(self.offset) else {
                continue;
            };
            let date = local.date_naive();
            match index.get(&date) {
                Some(&i) => buckets[i].1.push(point),
                None => {
                    index.insert(date, buckets.len());
                    buckets.push((date, vec![point]));
                }
            }
        }

        buckets
            .into_iter()
            .filter_map(|(date, bucket)| self.summarize_day(date, &bucket))
            .collect()
    }

    /// Aggregate one non-empty bucket.
    fn summarize_day(&self, date: NaiveDate, bucket: &[&ForecastPoint]) -> Option<DailyAggregate> {
        let representative = self.policy.pick(bucket)?;

        let min = bucket
            .iter()
            .map(|p| p.temperature_c)
            .fold(f64::INFINITY, f64::min);
        let max = bucket
            .iter()
            .map(|p| p.temperature_c)
            .fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = bucket.iter().map(|p| p.temperature_c).sum();
        // Clamp absorbs float rounding so min <= avg <= max always holds.
        let avg = (sum / bucket.len() as f64).clamp(min, max);

        let precipitation_probability = bucket
            .iter()
            .map(|p| p.precipitation_probability)
            .fold(0.0, f64::max);

        Some(DailyAggregate {
            date,
            min_temperature_c: min,
            max_temperature_c: max,
            avg_temperature_c: avg,
            representative_condition: representative.condition_main.clone(),
            representative_code: representative.condition_code,
            representative_timestamp_utc: representative.timestamp_utc,
            precipitation_probability,
            point_count: bucket.len(),
        })
    }

    /// The first [`SHORT_HORIZON_POINTS`] points, unaggregated, with hour labels.
    pub fn short_horizon(&self, points: &[ForecastPoint]) -> Vec<HourlyPoint> {
        points
            .iter()
            .take(SHORT_HORIZON_POINTS)
            .map(|p| HourlyPoint {
                timestamp_utc: p.timestamp_utc,
                hour_label: self.hour_label(p),
                temperature_c: p.temperature_c,
                precipitation_probability: p.precipitation_probability,
                precipitation_pct: p.precipitation_pct(),
            })
            .collect()
    }

    /// Chance of rain over the short horizon, as rounded percentages.
    pub fn rain_chance(&self, points: &[ForecastPoint]) -> Vec<RainChance> {
        points
            .iter()
            .take(SHORT_HORIZON_POINTS)
            .map(|p| RainChance {
                hour_label: self.hour_label(p),
                precipitation_pct: p.precipitation_pct(),
            })
            .collect()
    }

    /// The first `days` daily aggregates, each with a weekday name and the
    /// sky classification of its representative point.
    pub fn outlook(
        &self,
        points: &[ForecastPoint],
        location: &LocationMetadata,
        days: usize,
    ) -> Vec<DayOutlook> {
        self.reduce_to_daily(points)
            .into_iter()
            .take(days)
            .map(|day| DayOutlook {
                weekday: day.date.format("%A").to_string(),
                sky: Sky {
                    family: ConditionFamily::from_code(day.representative_code),
                    daytime: location.is_daytime(day.representative_timestamp_utc),
                },
                day,
            })
            .collect()
    }

    /// Conditions at the first forecast point, `None` for an empty forecast.
    pub fn current(
        &self,
        points: &[ForecastPoint],
        location: &LocationMetadata,
    ) -> Option<CurrentConditions> {
        let first = points.first()?;
        Some(CurrentConditions {
            timestamp_utc: first.timestamp_utc,
            temperature_c: first.temperature_c,
            description: first.description.clone(),
            humidity_pct: first.humidity_pct,
            wind_speed_ms: first.wind_speed_ms,
            precipitation_pct: first.precipitation_pct(),
            sky: Sky {
                family: first.family(),
                daytime: location.is_daytime(first.timestamp_utc),
            },
        })
    }

    /// 12-hour clock label such as "09 am" under the aggregator's offset.
    fn hour_label(&self, point: &ForecastPoint) -> String {
        point
            .local_time(self.offset)
            .map(|t| t.format("%I %P").to_string())
            .unwrap_or_default()
    }
}
