use anyhow::Context;
use clap::Parser;
use std::process;
use storm_track_processor::TrackError;
use storm_track_processor::cli::Args;
use storm_track_processor::processor::{TrackProcessor, wait_for_interrupt};
use tracing::debug;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(run(args)) {
        Ok(true) => process::exit(0),
        Ok(false) => {
            eprintln!("Error: some files failed to convert");
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Run the conversion, returning whether every file converted
async fn run(args: Args) -> anyhow::Result<bool> {
    let config = args.to_config();
    debug!("Processor configuration: {:?}", config);

    let processor = TrackProcessor::new(config).context("Invalid conversion settings")?;

    let stats = tokio::select! {
        result = processor.process() => result.context("Conversion failed")?,
        _ = wait_for_interrupt(tokio::signal::ctrl_c()) => {
            eprintln!("\nReceived CTRL+C, shutting down...");
            return Err(TrackError::Interrupted {
                reason: "interrupted by user".to_string(),
            }
            .into());
        }
    };

    Ok(stats.is_success())
}

fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "storm_track_processor={}",
            log_level.as_str().to_lowercase()
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
