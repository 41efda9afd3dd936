mod cli;

use anyhow::bail;
use clap::Parser;
use coursecal_core::config::load_config;
use coursecal_service::batch::run_batch;
use coursecal_service::source::excel::ExcelReader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(false))
        .init();

    let mut settings = load_config(cli.config.as_deref())?;
    cli.apply(&mut settings);

    if let Ok(filter) = EnvFilter::try_new(settings.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %settings.logging.level, "Invalid log level in config, keeping info");
    }

    tracing::debug!(settings = ?settings, "Effective configuration");

    let reader = ExcelReader::from_config(&settings.input);
    let report = run_batch(&settings, &reader)?;

    if report.source_missing {
        tracing::warn!(
            directory = %settings.input.directory.display(),
            "Source directory does not exist; create it and add schedule spreadsheets"
        );
        return Ok(());
    }

    if !report.is_success() {
        let failed: Vec<String> = report
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.input.display(), f.error))
            .collect();
        bail!(
            "{} file(s) could not be converted:\n  {}",
            failed.len(),
            failed.join("\n  ")
        );
    }

    tracing::info!(
        files = report.processed.len(),
        events = report.processed.iter().map(|p| p.event_count).sum::<usize>(),
        output = %settings.output.directory.display(),
        "Conversion complete"
    );
    Ok(())
}
