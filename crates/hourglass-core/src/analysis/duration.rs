use super::{Analyzer, DurationStat};
use crate::log::Record;
use crate::{Error, Result};
use std::collections::HashMap;

pub struct DurationAnalyzer {
    top_n: usize,
}

impl DurationAnalyzer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Default for DurationAnalyzer {
    fn default() -> Self {
        Self::new(10)
    }
}

#[derive(Default)]
struct Timings {
    total: u128,
    samples: u128,
}

impl Timings {
    /// Mean rounded half up, `None` without samples
    fn average(&self) -> Option<u64> {
        if self.samples == 0 {
            return None;
        }
        let rounded = (self.total * 2 + self.samples) / (self.samples * 2);
        Some(u64::try_from(rounded).unwrap_or(u64::MAX))
    }
}

impl Analyzer for DurationAnalyzer {
    type Output = Vec<DurationStat>;

    fn analyze(&self, records: &[Record]) -> Result<Self::Output> {
        tracing::debug!(
            "Calculating average durations for {} records",
            records.len()
        );

        if self.top_n == 0 {
            return Err(Error::InvalidTopN(self.top_n));
        }

        // Groups stay in first-encounter order so ties sort stably
        let mut index: HashMap<Option<&str>, usize> = HashMap::new();
        let mut groups: Vec<(Option<&str>, Timings)> = Vec::new();
        let mut skipped = 0usize;

        for record in records {
            let resource = record.resource.as_ref().map(|r| r.first());
            let slot = *index.entry(resource).or_insert_with(|| {
                groups.push((resource, Timings::default()));
                groups.len() - 1
            });

            let duration = record
                .duration
                .as_ref()
                .and_then(|d| parse_duration(d.first()));
            match duration {
                Some(value) => {
                    let timings = &mut groups[slot].1;
                    timings.total += u128::from(value);
                    timings.samples += 1;
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} records without a numeric duration", skipped);
        }

        let mut stats: Vec<DurationStat> = groups
            .into_iter()
            .map(|(resource, timings)| DurationStat {
                resource: resource.map(str::to_string),
                average: timings.average(),
            })
            .collect();

        // Stable sort; resources without an average end up last
        stats.sort_by(|a, b| b.average.cmp(&a.average));
        let distinct = stats.len();
        stats.truncate(self.top_n);

        tracing::info!(
            "Duration analysis complete: {} resources, showing {}",
            distinct,
            stats.len()
        );

        Ok(stats)
    }
}

/// Base-10 duration; digit runs too long for `u64` saturate
fn parse_duration(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(value.parse::<u64>().unwrap_or(u64::MAX))
}
