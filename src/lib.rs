// src/lib.rs

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod media_types;
pub mod models;
pub mod sanitizer;
pub mod session;
pub mod symbols;
pub mod ui;
pub mod utils;
pub mod workflows;

use crate::{
    cli::Cli,
    config::{
        AppConfig,
        credentials::{resolve_password, resolve_username},
    },
    downloader::DownloadManager,
    error::AppResult,
    session::LearnSession,
};
use log::{debug, info};
use std::sync::Arc;

/// Everything a course mirror needs, cheap to clone.
#[derive(Clone)]
pub struct MirrorContext {
    pub manager: DownloadManager,
    pub config: Arc<AppConfig>,
    pub session: Arc<LearnSession>,
}

impl MirrorContext {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let session = Arc::new(LearnSession::new(config.clone())?);
        Ok(Self {
            manager: DownloadManager::new(),
            config,
            session,
        })
    }
}

/// Entry point of the library, called by `main.rs`.
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("Loaded configuration: {:?}", config);

    let username = resolve_username(args.username.as_deref())?;
    let password = resolve_password()?;

    let context = MirrorContext::new(config)?;
    ui::info("Logging you into Learn...");
    context.session.login(&username, &password).await?;
    info!("Session established for '{}'", username);
    ui::ok("Login successful");

    workflows::run_mirror(&args, context).await
}
