use anyhow::Result;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "hourglass")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Summarise an application timing log",
    long_about = "Hourglass reads a timing log and reports the slowest resources by average \
                  request duration, followed by a histogram of requests per hour of day."
)]
struct Cli {
    /// Name of the log file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Number of items on the top slowest resources list
    #[arg(value_name = "TOP_N", default_value = "10")]
    top_n: NonZeroUsize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    hourglass_cli::pipeline::execute(&cli.file, cli.top_n.get())?;

    tracing::info!("Finished in {} ms", started.elapsed().as_millis());
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("hourglass=debug")
    } else {
        EnvFilter::new("hourglass=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
