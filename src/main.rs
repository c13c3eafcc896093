//! Datetime Prefixer - copy photos under chronologically sortable names
//!
//! Reads the EXIF capture time of every image in a folder and copies each
//! one with that time prefixed to its file name.

use anyhow::Result;
use clap::Parser;
use datetime_prefixer::process::ProcessingStatus;
use datetime_prefixer::logging::file_layer;
use datetime_prefixer::{Cli, Config, ConsoleStatus, Processor, init_locale};
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

// Initialize i18n for this binary
rust_i18n::i18n!("locales", fallback = "en");

// CLI Output Module
mod cli_output {
    //! Styled summary output for the command line

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    pub fn print_title(title: &str) {
        let _ = stdout().execute(Print(format!("  {}\n", title.bold())));
    }

    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_hint(msg: &str) {
        let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_stat(key: &str, value: &str, color: Color) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = style(value).with(color).bold();
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(key_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(value_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print one processing result line
    pub fn print_result(status_icon: &str, status_color: Color, source: &str, dest_or_msg: &str) {
        let icon_styled = style(status_icon).with(status_color).bold();
        let source_styled = style(source).italic();
        let msg_styled = style(dest_or_msg).with(CliTheme::HINT);

        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(icon_styled));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(source_styled));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(msg_styled));
        let _ = stdout().execute(Print("\n"));
    }

    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }
}

/// Convenience macro for translation
macro_rules! t {
    ($key:expr) => {
        rust_i18n::t!($key)
    };
    ($key:expr, $($tt:tt)*) => {
        rust_i18n::t!($key, $($tt)*)
    };
}

fn main() -> Result<()> {
    init_locale();

    let cli = Cli::parse();
    if cli.sample_config {
        print!("{}", Config::sample_config());
        return Ok(());
    }

    let guard = setup_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Datetime Prefixer starting"
    );

    let config = load_config(&cli)?;
    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    if let Some(ref path) = cli.save_config {
        config.save_to_file(path)?;
        println!("{}", t!("config_saved_to", path = path.display()));
        return Ok(());
    }

    let input_dir = config.resolve_input_dir()?;
    let output_dir = match config.resolve_output_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!(error = %e, "Cannot prepare output directory");
            let folder = config.output_folder.clone().unwrap_or_default();
            eprintln!("{}: {}", t!("output_dir_error", dir = folder.display()), e);
            eprintln!("{}", t!("exiting_program"));
            exit_with_failure(guard);
        }
    };

    println!("{}", t!("processing_files_in", dir = input_dir.display()));

    let mut processor = Processor::new(input_dir, output_dir, &config);
    let mut status = ConsoleStatus::stdout();

    match processor.run(&mut status) {
        Ok(results) => {
            if config.verbose || config.dry_run {
                print_summary(&processor, &results, config.dry_run);
            }
            info!(summary = %processor.stats().summary(), "Processing complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Processing failed");
            eprintln!("Error: {}", e);
            exit_with_failure(guard);
        }
    }
}

/// Flush the log file, then exit with status 1
///
/// `process::exit` skips destructors, so the appender guard is dropped first.
fn exit_with_failure(guard: Option<WorkerGuard>) -> ! {
    drop(guard);
    std::process::exit(1)
}

/// Print statistics and the per-file listing
fn print_summary(
    processor: &Processor,
    results: &[datetime_prefixer::FileResult],
    dry_run: bool,
) {
    use cli_output::*;

    let stats = processor.stats();

    print_separator();
    print_title(&t!("cli_processing_complete"));
    print_separator();

    print_blank();
    print_stat(&t!("stat_total"), &stats.total_files.to_string(), CliTheme::ACCENT);
    print_stat(&t!("stat_copied"), &stats.copied.to_string(), CliTheme::SUCCESS);
    if dry_run {
        print_stat(&t!("stat_dry_run"), &stats.dry_run.to_string(), CliTheme::ACCENT);
    }
    print_stat(&t!("stat_unreadable"), &stats.unreadable.to_string(), CliTheme::WARNING);
    print_stat(&t!("stat_copy_failed"), &stats.copy_failed.to_string(), CliTheme::ERROR);
    print_blank();

    print_separator();
    print_hint(&t!("cli_detailed_results"));
    print_blank();

    let unknown_error = t!("unknown_error");
    for result in results {
        let source = result.source.display().to_string();
        let dest = result
            .destination
            .as_ref()
            .map(|p| format!("→ {}", p.display()))
            .unwrap_or_default();
        match result.status {
            ProcessingStatus::Copied => print_result("✓", CliTheme::SUCCESS, &source, &dest),
            ProcessingStatus::DryRun => print_result("~", CliTheme::ACCENT, &source, &dest),
            ProcessingStatus::SourceUnreadable | ProcessingStatus::CopyFailed => {
                let msg = result.error.as_deref().unwrap_or(&unknown_error);
                print_result("✗", CliTheme::ERROR, &source, msg);
            }
        }
    }

    if stats.failed() > 0 {
        print_separator();
        print_error(&format!(
            "{} {} {}",
            t!("cli_failed_files"),
            stats.failed(),
            t!("files")
        ));
    }

    if dry_run {
        print_separator();
        print_warning(&t!("cli_dry_run_notice"));
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(ref config_path) = cli.config {
        info!(config_file = %config_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(config_path)?;
        return Ok(cli.merge_with_config(file_config));
    }

    match cli.to_config() {
        Some(config) => Ok(config),
        None => anyhow::bail!("{}", t!("no_input_folder_error")),
    }
}

/// Setup logging: stderr always, plus an optional log file
fn setup_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let console_level = if cli.verbose { Level::DEBUG } else { Level::ERROR };
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let (log_layer, guard) = match cli.log_file {
        Some(ref log_path) => {
            let (layer, guard) = file_layer(log_path, cli.verbose, cli.json_log)?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(log_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}
