// src/config/credentials.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
    ui,
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{fs, path::PathBuf};

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("Could not determine the home directory")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

pub(crate) fn load_or_create_external_config() -> AppResult<ExternalConfig> {
    let config_path = get_config_path()?;
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file '{}'", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("Config file {:?} does not exist, writing defaults.", config_path);
        let config = ExternalConfig::default_app_config();

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;

        Ok(config)
    }
}

/// Username from the command line, then `$LEARN_USERNAME`, then a prompt.
pub fn resolve_username(cli_username: Option<&str>) -> AppResult<String> {
    if let Some(username) = cli_username && !username.is_empty() {
        debug!("Using username from the command line");
        return Ok(username.to_string());
    }
    if let Ok(username) = std::env::var(constants::USERNAME_ENV) && !username.is_empty() {
        debug!("Using username from ${}", constants::USERNAME_ENV);
        return Ok(username);
    }
    let username = ui::prompt("Username", None).map_err(|_| AppError::UserInterrupt)?;
    if username.is_empty() {
        return Err(AppError::UserInputError("A username is required.".into()));
    }
    Ok(username)
}

/// Password from `$LEARN_PASSWORD`, otherwise read without echo.
pub fn resolve_password() -> AppResult<String> {
    if let Ok(password) = std::env::var(constants::PASSWORD_ENV) && !password.is_empty() {
        debug!("Using password from ${}", constants::PASSWORD_ENV);
        return Ok(password);
    }
    ui::prompt_hidden("Password").map_err(|_| AppError::UserInterrupt)
}
