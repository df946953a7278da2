use console::style;
use hourglass_core::analysis::{AnalysisReport, DurationStat, Histogram};
use std::io::{self, Write};

const RULE_WIDTH: usize = 101;

/// Write the slowest resources table followed by the hourly histogram
pub fn write_report<W: Write>(out: &mut W, report: &AnalysisReport) -> io::Result<()> {
    write_top_list(out, report.top_n, &report.slowest)?;
    write_histogram(out, &report.histogram)
}

pub fn write_top_list<W: Write>(
    out: &mut W,
    top_n: usize,
    stats: &[DurationStat],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        style(format!("Top {} slowest resources:", top_n)).bold()
    )?;

    let width = stats
        .iter()
        .map(|stat| resource_label(stat).len())
        .chain(std::iter::once("resource".len()))
        .max()
        .unwrap_or_default();

    writeln!(out, "{:>3} | {:<width$} | average", "#", "resource")?;
    for (i, stat) in stats.iter().enumerate() {
        let average = stat
            .average
            .map_or_else(|| "n/a".to_string(), |avg| avg.to_string());
        writeln!(
            out,
            "{:>3} | {:<width$} | {}",
            i + 1,
            resource_label(stat),
            average
        )?;
    }

    Ok(())
}

pub fn write_histogram<W: Write>(out: &mut W, histogram: &Histogram) -> io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", style("Hourly graph of requests:").bold())?;
    writeln!(out, "hr | requests")?;
    writeln!(out, "{}", rule)?;
    write!(out, "{}", histogram)?;
    writeln!(out, "{}", rule)
}

fn resource_label(stat: &DurationStat) -> &str {
    stat.resource.as_deref().unwrap_or("undefined")
}
