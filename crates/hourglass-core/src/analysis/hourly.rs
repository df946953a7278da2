use super::{Analyzer, HourlyBucket};
use crate::Result;
use crate::log::Record;
use chrono::{NaiveDateTime, Timelike};

pub const HOURS_PER_DAY: usize = 24;

/// Counts requests per hour of day, 00 to 23
pub struct HourlyAnalyzer;

impl Analyzer for HourlyAnalyzer {
    type Output = Vec<HourlyBucket>;

    fn analyze(&self, records: &[Record]) -> Result<Self::Output> {
        tracing::debug!("Mapping hourly requests for {} records", records.len());

        let mut counts = [0usize; HOURS_PER_DAY];
        let mut skipped = 0usize;

        for record in records {
            match record
                .timestamp
                .as_ref()
                .and_then(|ts| parse_hour(ts.first()))
            {
                Some(hour) => counts[hour as usize] += 1,
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} records without a parsable timestamp", skipped);
        }

        let buckets: Vec<HourlyBucket> = (0u32..)
            .zip(counts)
            .map(|(hour, requests)| HourlyBucket { hour, requests })
            .collect();

        tracing::info!(
            "Hourly analysis complete: {} requests counted",
            records.len() - skipped
        );

        Ok(buckets)
    }
}

/// Hour of a `YYYY-MM-DD HH:mm:ss,SSS` timestamp, taken as local time
pub(crate) fn parse_hour(timestamp: &str) -> Option<u32> {
    let (date_time, millis) = timestamp.split_once(',')?;
    if millis.is_empty() || millis.len() > 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDateTime::parse_from_str(date_time, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|parsed| parsed.hour())
}
