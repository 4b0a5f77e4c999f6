// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const FRAGMENT_PREVIEW_LENGTH: usize = 400;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "app.log";
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const SINGLE_FILES_DIR: &str = "Single Files";
pub const FALLBACK_ENCODING: &str = "latin-1";
pub const USER_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.2; .NET CLR 1.1.4322)";
pub const USERNAME_ENV: &str = "LEARN_USERNAME";
pub const PASSWORD_ENV: &str = "LEARN_PASSWORD";

pub mod portal {
    pub const BASE_URL: &str = "https://learn.canterbury.ac.nz";
    pub const LOGIN_PATH: &str = "/login/index.php";
    pub const LANDING_PATH: &str = "/";
    pub const RESOURCES_PATH_TEMPLATE: &str = "/course/resources.php?id={course_id}";
}

pub mod paths {
    /// Legacy Windows `MAX_PATH` minus the terminating NUL.
    pub const WINDOWS_MAX_PATH_LEN: usize = 259;
    pub const POSIX_MAX_PATH_LEN: usize = 4095;
    pub const SIDECAR_FILE_NAME: &str = "OrigFNames.txt";
    pub const SYNTHETIC_NAME_PREFIX: &str = "rn";
    pub const FALLBACK_NAME: &str = "unnamed";
    pub const FORBIDDEN_CHARS: &str = r#"\ / : * ? " < > |"#;
}

pub mod network {
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const TIMEOUT_SECS: u64 = 600;
}
