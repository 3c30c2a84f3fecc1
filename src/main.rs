//! TikTok Export Downloader - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use indicatif::MultiProgress;
use tracing_subscriber::{fmt, EnvFilter};

use tiktok_export_dl::{
    cli::Args,
    config::{validate_config, Config},
    download::{BatchSummary, CancelFlag, ProgressObserver, Runner},
    engine::YtDlpEngine,
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_batch_summary, print_config_summary, print_error, print_info,
        print_success, print_warning, ConsoleProgress, ProgressLogWriter,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(summary) if summary.cancelled => ExitCode::from(exit_codes::ABORT as u8),
        Ok(summary) if summary.has_failures() => {
            ExitCode::from(exit_codes::SOME_ITEMS_FAILED as u8)
        }
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_)
                | Error::UnknownCategory(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Metadata(_) | Error::Json(_) => {
                    ExitCode::from(exit_codes::METADATA_ERROR as u8)
                }
                Error::YtDlpNotFound | Error::Fetch(_) => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<BatchSummary> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // Log lines pause the progress bars instead of drawing over them
    let multi = MultiProgress::new();
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(ProgressLogWriter::new(multi.clone()))
        .init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let category = config.options.category;
    print_config_summary(
        &args.metadata_file.display().to_string(),
        &category.to_string(),
        &args.download_dir.display().to_string(),
    );

    let engine = YtDlpEngine::locate(config.engine.ytdlp_path.as_deref())?;
    print_info(&format!("Using yt-dlp at {}", engine.ytdlp_path().display()));

    // Stop between videos on Ctrl-C
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                print_warning("Interrupted, stopping after the current video...");
                cancel.cancel();
            }
        });
    }

    let progress = config
        .options
        .show_progress
        .then(|| ConsoleProgress::with_multi(multi));
    let observer = progress.as_ref().map(|p| p as &dyn ProgressObserver);

    let summary = Runner::new(Arc::new(engine))
        .with_fetch_options(config.engine.fetch_options())
        .with_cancel_flag(cancel)
        .run(&args.metadata_file, &args.download_dir, category, observer)
        .await?;

    if let Some(progress) = &progress {
        progress.finish();
    }

    print_batch_summary(&summary);
    if summary.cancelled {
        print_warning("Download cancelled");
    } else if summary.has_failures() {
        print_warning("Download finished with errors");
    } else {
        print_success("Download complete!");
    }

    Ok(summary)
}
