// brewup/src/main.rs
use std::path::Path;
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing::debug;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::CliArgs;

fn init_logging(verbose: u8, log_dir: Option<&Path>) {
    let level_filter = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let max_log_level = level_filter.into_level().unwrap_or(tracing::Level::INFO);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("BREWUP_LOG")
        .from_env_lossy();

    if let Some(dir) = log_dir {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(dir, "brewup.log");
                let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

                let stderr_writer = std::io::stderr.with_max_level(max_log_level);
                let file_writer = non_blocking_appender.with_max_level(max_log_level);

                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(stderr_writer.and(file_writer))
                    .with_ansi(true)
                    .without_time()
                    .try_init();

                Box::leak(Box::new(guard)); // Keep guard alive

                debug!("Writing logs to: {}/brewup.log", dir.display());
                return;
            }
            Err(e) => eprintln!(
                "{} Failed to create log directory {}: {}",
                "Warning:".yellow(),
                dir.display(),
                e
            ),
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    init_logging(cli_args.verbose, cli_args.log_dir.as_deref());

    if let Err(e) = cli_args.command.run().await {
        debug!("Command failed: {:#}", e);
        eprintln!("{}: {:#}", "brewup".red().bold(), e);
        process::exit(e.exit_code());
    }

    debug!("Command completed successfully.");
}
