// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use learn_dl::{
    cli::{Cli, LogLevel},
    constants,
    error::AppError,
    run_from_cli,
};
use log::{info, warn};
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() {
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{} Interrupted by user.", "[!]".yellow());
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::process::exit(130);
        }
    });

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| clap::crate_name!().to_string());
    let after_help = format!(
        "Examples:\n  # Pick courses interactively\n  {bin}\n\n  # List the courses of an account\n  {bin} -u abc123 --list\n\n  # Mirror courses 1 and 3 into ./learn, writing nothing (dry run)\n  {bin} -c 1,3 -o ./learn --dry-run\n\nThe password is read from ${pw} when set, otherwise prompted for.",
        bin = bin_name,
        pw = constants::PASSWORD_ENV,
    );

    let cmd = Cli::command().after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    init_logger(args.log_level);
    info!("{} {} starting", clap::crate_name!(), clap::crate_version!());

    match run_from_cli(args).await {
        Ok(()) => {}
        Err(AppError::UserInterrupt) => {
            eprintln!("\n{} {}", "[!]".yellow(), "Cancelled.".yellow());
            std::process::exit(130);
        }
        Err(e) => {
            log::error!("Run failed: {}", e);
            eprintln!("\n{} {}", "[X]".red(), format!("Error: {}", e).red());
            std::process::exit(1);
        }
    }
}

fn init_logger(level: LogLevel) {
    if level == LogLevel::Off {
        return;
    }

    let filter = match level {
        LogLevel::Off => log::LevelFilter::Off,
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Warn => log::LevelFilter::Warn,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Debug => log::LevelFilter::Debug,
        LogLevel::Trace => log::LevelFilter::Trace,
    };

    let app_name = clap::crate_name!();

    let log_file_path = match dirs::home_dir() {
        Some(home) => home
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::LOG_FILE_NAME),
        None => {
            eprintln!("Warning: no home directory, logging to the temp directory.");
            env::temp_dir().join(app_name).join(constants::LOG_FILE_NAME)
        }
    };

    if let Some(dir) = log_file_path.parent()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("Warning: could not create log directory {:?}: {}", dir, e);
    }

    let file_appender = match fern::log_file(&log_file_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: could not open log file {:?}: {}. Trying the fallback log file.",
                log_file_path, e
            );
            let fallback_path = env::temp_dir().join(format!(
                "{}-{}",
                app_name,
                constants::LOG_FALLBACK_FILE_NAME
            ));
            match fern::log_file(&fallback_path) {
                Ok(fb_file) => {
                    warn!("Logging to fallback file {:?}", fallback_path);
                    fb_file
                }
                Err(e_fb) => {
                    eprintln!(
                        "Error: could not open {:?} either: {}. Nothing will be logged.",
                        fallback_path, e_fb
                    );
                    return;
                }
            }
        }
    };

    let result = fern::Dispatch::new()
        .level(filter)
        .level_for("reqwest", filter.min(log::LevelFilter::Info))
        .level_for("hyper_util", filter.min(log::LevelFilter::Info))
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{:<5}] [{}:{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .chain(file_appender)
        .apply();

    if let Err(e) = result {
        eprintln!("Error: could not initialise logging: {}", e);
    }
}
