mod duration;
mod histogram;
mod hourly;

pub use duration::DurationAnalyzer;
pub use histogram::{BAR_MARKER, BAR_WIDTH, Histogram, HistogramRow};
pub use hourly::{HOURS_PER_DAY, HourlyAnalyzer};

use crate::log::Record;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub top_n: usize,
    pub slowest: Vec<DurationStat>,
    pub histogram: Histogram,
}

/// Average duration of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationStat {
    /// `None` groups the lines that had no resource
    pub resource: Option<String>,
    /// `None` when the resource had no parsable duration
    pub average: Option<u64>,
}

/// Request count for one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub requests: usize,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, records: &[Record]) -> crate::Result<Self::Output>;
}
