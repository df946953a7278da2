use anyhow::Result;
use hourglass_core::analysis::{
    AnalysisReport, Analyzer, DurationAnalyzer, Histogram, HourlyAnalyzer,
};
use hourglass_core::log::LogReader;
use std::io::Write;
use std::path::Path;

/// Read a log file and build both reports.
///
/// The whole file is extracted before any aggregation runs.
pub async fn analyze_log(file: &Path, top_n: usize) -> Result<AnalysisReport> {
    tracing::debug!("Reading log file: {}", file.display());

    let records = LogReader::from_file(file).await?;

    let slowest = DurationAnalyzer::new(top_n).analyze(&records)?;
    let buckets = HourlyAnalyzer.analyze(&records)?;
    let histogram = Histogram::render(&buckets);

    Ok(AnalysisReport {
        top_n,
        slowest,
        histogram,
    })
}

pub fn execute(file: &Path, top_n: usize) -> Result<()> {
    tracing::info!("Analyzing log file: {}", file.display());

    // Only the file read suspends, a single thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(analyze_log(file, top_n))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    crate::report::write_report(&mut out, &report)?;
    out.flush()?;

    Ok(())
}
