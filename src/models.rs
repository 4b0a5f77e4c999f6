// src/models.rs

use crate::symbols;
use colored::{ColoredString, Colorize};
use regex::Regex;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap};
use std::{fmt, path::PathBuf, sync::LazyLock};

static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*"?([^";\s]+)"?"#).unwrap());
static DISPOSITION_EXT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)filename\*\s*=\s*[\w-]*'[\w-]*'([^;\s]+)"#).unwrap());
static DISPOSITION_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)filename\s*=\s*(?:"([^"]*)"|([^;\s]+))"#).unwrap());
static TRAILING_EXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\w*$").unwrap());

/// A course from the "My Courses" menu of the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    /// e.g. `COSC121` or the cross-listed `COSC121-COSC122`
    pub code: String,
    pub name: String,
}

/// Item kind as announced by the icon alt-text of a resource-table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    File,
    Folder,
    Url,
    Page,
    Material,
    Unknown(String),
}

impl ResourceKind {
    pub fn from_alt(alt: &str) -> Self {
        match alt.trim() {
            "File" => ResourceKind::File,
            "Folder" => ResourceKind::Folder,
            "URL" => ResourceKind::Url,
            "Page" => ResourceKind::Page,
            "Course Material" => ResourceKind::Material,
            other => ResourceKind::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::File => write!(f, "file"),
            ResourceKind::Folder => write!(f, "folder"),
            ResourceKind::Url => write!(f, "url"),
            ResourceKind::Page => write!(f, "page"),
            ResourceKind::Material => write!(f, "material"),
            ResourceKind::Unknown(alt) => write!(f, "unknown ({})", alt),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    /// href exactly as it appears in the page, possibly relative
    pub url: String,
    pub name: String,
    /// The `f/<token>` part of the icon path, absent for non-file icons
    pub icon: Option<String>,
}

/// What a response says about its body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMeta {
    pub media_type: Option<String>,
    pub charset: Option<String>,
    /// Server-suggested file name, without its extension
    pub suggested_name: Option<String>,
}

impl ContentMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        let disposition = headers.get(CONTENT_DISPOSITION).and_then(|v| v.to_str().ok());
        Self::parse(content_type, disposition)
    }

    pub fn parse(content_type: Option<&str>, disposition: Option<&str>) -> Self {
        let media_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|mt| mt.trim().to_ascii_lowercase())
            .filter(|mt| !mt.is_empty());
        let charset = content_type
            .and_then(|ct| CHARSET_RE.captures(ct))
            .map(|caps| caps[1].to_string());
        let suggested_name = disposition.and_then(Self::parse_disposition_name);
        Self {
            media_type,
            charset,
            suggested_name,
        }
    }

    fn parse_disposition_name(disposition: &str) -> Option<String> {
        let raw = if let Some(caps) = DISPOSITION_EXT_NAME_RE.captures(disposition) {
            caps[1].to_string()
        } else {
            let caps = DISPOSITION_NAME_RE.captures(disposition)?;
            caps.get(1).or_else(|| caps.get(2))?.as_str().to_string()
        };
        let stem = TRAILING_EXT_RE.replace(&raw, "").into_owned();
        if stem.trim().is_empty() { None } else { Some(stem) }
    }

    pub fn is_html(&self) -> bool {
        self.media_type.as_deref() == Some("text/html")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Saved(PathBuf),
    Shortcut(PathBuf),
    /// Dry run: the path that would have been written
    Planned(PathBuf),
    Skipped(String),
}

impl DownloadStatus {
    pub fn get_display_info(&self) -> (&'static ColoredString, fn(ColoredString) -> ColoredString, &'static str) {
        match self {
            DownloadStatus::Saved(_) => (&*symbols::OK, |s| s.green(), "saved"),
            DownloadStatus::Shortcut(_) => (&*symbols::OK, |s| s.green(), "shortcut written"),
            DownloadStatus::Planned(_) => (&*symbols::DRY_RUN, |s| s.magenta(), "would be written"),
            DownloadStatus::Skipped(_) => (&*symbols::SKIP, |s| s.dimmed(), "skipped"),
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            DownloadStatus::Saved(path) | DownloadStatus::Shortcut(path) | DownloadStatus::Planned(path) => Some(path),
            DownloadStatus::Skipped(_) => None,
        }
    }
}
