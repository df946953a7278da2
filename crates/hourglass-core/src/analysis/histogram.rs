use super::HourlyBucket;
use serde::Serialize;
use std::fmt::{self, Display};

/// Upper end of the scaled bar range; bars hold `scaled + 1` markers
pub const BAR_WIDTH: usize = 70;
pub const BAR_MARKER: char = '*';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramRow {
    pub hour: u32,
    pub requests: usize,
    pub bar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub rows: Vec<HistogramRow>,
}

impl Histogram {
    /// Scale each bucket's count from `[min, max]` onto `[0, BAR_WIDTH]`.
    ///
    /// A flat distribution (including all zeros) renders a single marker
    /// per hour.
    pub fn render(buckets: &[HourlyBucket]) -> Self {
        let minimum = buckets.iter().map(|b| b.requests).min().unwrap_or(0);
        let maximum = buckets.iter().map(|b| b.requests).max().unwrap_or(0);
        let spread = maximum - minimum;

        let rows = buckets
            .iter()
            .map(|bucket| {
                let scaled = if spread == 0 {
                    0
                } else {
                    (bucket.requests - minimum) * BAR_WIDTH / spread
                };
                HistogramRow {
                    hour: bucket.hour,
                    requests: bucket.requests,
                    bar: BAR_MARKER.to_string().repeat(scaled + 1),
                }
            })
            .collect();

        tracing::debug!("Rendered histogram: min={}, max={}", minimum, maximum);

        Self { rows }
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{:<2} | {} ({})", row.hour, row.bar, row.requests)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(counts: &[usize]) -> Vec<HourlyBucket> {
        (0u32..)
            .zip(counts)
            .map(|(hour, &requests)| HourlyBucket { hour, requests })
            .collect()
    }

    #[test]
    fn test_scales_to_bar_width() {
        let mut counts = vec![0; 24];
        counts[0] = 5;
        counts[23] = 2;

        let histogram = Histogram::render(&buckets(&counts));

        assert_eq!(histogram.rows.len(), 24);
        assert_eq!(histogram.rows[0].bar.len(), 71);
        assert_eq!(histogram.rows[1].bar, "*");
        assert_eq!(histogram.rows[23].bar.len(), 2 * 70 / 5 + 1);
    }

    #[test]
    fn test_nonzero_minimum_is_offset() {
        let histogram = Histogram::render(&buckets(&[10, 20, 15]));

        assert_eq!(histogram.rows[0].bar.len(), 1);
        assert_eq!(histogram.rows[1].bar.len(), 71);
        assert_eq!(histogram.rows[2].bar.len(), 36);
    }

    #[test]
    fn test_flat_distribution_renders_minimal_bars() {
        let histogram = Histogram::render(&buckets(&[0; 24]));
        assert!(histogram.rows.iter().all(|row| row.bar == "*"));

        let histogram = Histogram::render(&buckets(&[7; 24]));
        assert!(histogram.rows.iter().all(|row| row.bar == "*"));
    }

    #[test]
    fn test_display_aligns_hours() {
        let histogram = Histogram::render(&buckets(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4]));
        let rendered = histogram.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "0  | * (0)");
        assert_eq!(lines[10], format!("10 | {} (4)", "*".repeat(71)));
    }
}
