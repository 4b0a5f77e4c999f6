// src/config.rs

pub mod credentials;

use self::credentials::load_or_create_external_config;
use crate::{
    cli::{Cli, PathProfile},
    constants,
    error::AppResult,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    #[serde(default = "default_resources_path_template")]
    pub resources_path_template: String,
}

fn default_login_path() -> String {
    constants::portal::LOGIN_PATH.to_string()
}

fn default_landing_path() -> String {
    constants::portal::LANDING_PATH.to_string()
}

fn default_resources_path_template() -> String {
    constants::portal::RESOURCES_PATH_TEMPLATE.to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: constants::portal::BASE_URL.into(),
            login_path: default_login_path(),
            landing_path: default_landing_path(),
            resources_path_template: default_resources_path_template(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Overrides the ceiling chosen by `--path-profile`
    pub max_path_len: Option<usize>,
    pub sidecar_file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub paths: PathConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        Self {
            portal: PortalConfig::default(),
            network: NetworkConfig {
                connect_timeout_secs: Some(constants::network::CONNECT_TIMEOUT_SECS),
                timeout_secs: Some(constants::network::TIMEOUT_SECS),
                user_agent: Some(constants::USER_AGENT.into()),
            },
            paths: PathConfig::default(),
        }
    }
}

/// Filesystem ceilings handed to the path sanitizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLimits {
    pub max_path_len: usize,
    pub sidecar_file_name: String,
}

impl PathLimits {
    pub fn for_profile(profile: PathProfile) -> Self {
        let max_path_len = match profile {
            PathProfile::Windows => constants::paths::WINDOWS_MAX_PATH_LEN,
            PathProfile::Posix => constants::paths::POSIX_MAX_PATH_LEN,
        };
        Self {
            max_path_len,
            sidecar_file_name: constants::paths::SIDECAR_FILE_NAME.into(),
        }
    }

    /// Longest folder path that still leaves room for `/<side-car file>`.
    pub fn max_folder_len(&self) -> usize {
        self.max_path_len
            .saturating_sub(self.sidecar_file_name.chars().count() + 1)
    }
}

impl Default for PathLimits {
    fn default() -> Self {
        Self::for_profile(PathProfile::Windows)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub login_path: String,
    pub landing_path: String,
    pub resources_path_template: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub path_limits: PathLimits,
    pub dry_run: bool,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        Self::from_external(external_config, args)
    }

    pub fn from_external(external_config: ExternalConfig, args: &Cli) -> AppResult<Self> {
        let base_url = args
            .base_url
            .as_deref()
            .unwrap_or(&external_config.portal.base_url);

        let mut path_limits = PathLimits::for_profile(args.path_profile);
        if let Some(max) = external_config.paths.max_path_len {
            path_limits.max_path_len = max;
        }
        if let Some(name) = external_config.paths.sidecar_file_name {
            path_limits.sidecar_file_name = name;
        }

        Ok(Self {
            base_url: Url::parse(base_url)?,
            login_path: external_config.portal.login_path,
            landing_path: external_config.portal.landing_path,
            resources_path_template: external_config.portal.resources_path_template,
            user_agent: external_config
                .network
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                external_config
                    .network
                    .connect_timeout_secs
                    .unwrap_or(constants::network::CONNECT_TIMEOUT_SECS),
            ),
            timeout: Duration::from_secs(args.timeout.unwrap_or(
                external_config
                    .network
                    .timeout_secs
                    .unwrap_or(constants::network::TIMEOUT_SECS),
            )),
            path_limits,
            dry_run: args.dry_run,
        })
    }

    pub fn resources_path(&self, course_id: &str) -> String {
        self.resources_path_template.replace("{course_id}", course_id)
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(constants::portal::BASE_URL).expect("valid default base url"),
            login_path: default_login_path(),
            landing_path: default_landing_path(),
            resources_path_template: default_resources_path_template(),
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            path_limits: PathLimits::default(),
            dry_run: false,
        }
    }
}
