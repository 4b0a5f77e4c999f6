// src/extractor/schema.rs

use super::extract_between;
use crate::error::{AppError, AppResult};
use log::error;
use regex::{Captures, Regex};
use std::{fmt, sync::LazyLock};

static LOGIN_FORM_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<form class="m-t-1""#).unwrap());
static LOGIN_FORM_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</form>").unwrap());
static LOGIN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input type="hidden" name="logintoken" value="(\w*)"\s*/?>"#).unwrap()
});
static LOGIN_ERRORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="[^"]*\bloginerrors\b|id="loginerrormessage""#).unwrap()
});

static COURSE_NAV_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<li class="dropdown nav-item">\s*<a [^>]*>\s*My Courses\s*</a>"#).unwrap()
});
static COURSE_NAV_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</li>").unwrap());
static COURSE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<a class="dropdown-item" role="menuitem" href="[^"]*?id=(\d+)" title="((?:[A-Z]{4}\d{3})(?:-[A-Z]{4}\d{3})*)[^"]*"[^>]*>(.*?)</a>"#,
    )
    .unwrap()
});

static RESOURCE_TABLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div role="main">\s*<span id="maincontent"></span>\s*<table class="generaltable mod_index">"#)
        .unwrap()
});
static RESOURCE_TABLE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</table>\s*</div>").unwrap());
static RESOURCE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<td class="cell c1" style="text-align:left;">(.*?)</td>"#).unwrap()
});
static RESOURCE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)href="([^"]*)".*?src="[^"]*/(?:icon|f/(\w+))[^"]*".*?alt="([\w\s|]*)"\s*/?>\s*(.+?)\s*</a>"#,
    )
    .unwrap()
});

static FOLDER_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<form\b([^>]*)>(.*?)</form>"#).unwrap());

static URL_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div role="main">.*?<h2>(.*?)</h2>.*?href="([^"]*)""#).unwrap()
});

static FILE_REDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)Click\s+<a href="([^"]*)"[^>]*>.*?</a>\s+link to\s+(?:download|view) the file"#)
        .unwrap()
});

/// One named rule per page shape the portal serves.
///
/// A schema optionally isolates a region of the page between two anchors
/// and then applies its capture rule inside that region. Both steps fail
/// closed with [`AppError::ParseFailure`] carrying the text they looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSchema {
    /// `logintoken` hidden input inside the `m-t-1` login form
    LoginForm,
    /// Error block shown after a rejected login
    LoginErrors,
    /// `My Courses` dropdown, one capture per course link
    CourseNav,
    /// Resource index table, one capture per first-column cell
    ResourceTable,
    /// Anchor, icon, alt-text and label inside one resource cell
    ResourceEntry,
    /// Any `<form>`; the folder download form is picked among them
    FolderForm,
    /// Heading and first link of a URL resource page
    UrlPage,
    /// "Click <link> to download the file" indirection page
    FileRedirect,
}

impl PageSchema {
    pub fn name(&self) -> &'static str {
        match self {
            PageSchema::LoginForm => "login form",
            PageSchema::LoginErrors => "login errors",
            PageSchema::CourseNav => "course navigation",
            PageSchema::ResourceTable => "resource table",
            PageSchema::ResourceEntry => "resource entry",
            PageSchema::FolderForm => "folder download form",
            PageSchema::UrlPage => "url page",
            PageSchema::FileRedirect => "file redirect",
        }
    }

    fn anchors(&self) -> Option<(&'static Regex, &'static Regex)> {
        match self {
            PageSchema::LoginForm => Some((&*LOGIN_FORM_START, &*LOGIN_FORM_END)),
            PageSchema::CourseNav => Some((&*COURSE_NAV_START, &*COURSE_NAV_END)),
            PageSchema::ResourceTable => Some((&*RESOURCE_TABLE_START, &*RESOURCE_TABLE_END)),
            PageSchema::LoginErrors
            | PageSchema::ResourceEntry
            | PageSchema::FolderForm
            | PageSchema::UrlPage
            | PageSchema::FileRedirect => None,
        }
    }

    fn rule(&self) -> &'static Regex {
        match self {
            PageSchema::LoginForm => &*LOGIN_TOKEN,
            PageSchema::LoginErrors => &*LOGIN_ERRORS,
            PageSchema::CourseNav => &*COURSE_LINK,
            PageSchema::ResourceTable => &*RESOURCE_CELL,
            PageSchema::ResourceEntry => &*RESOURCE_ENTRY,
            PageSchema::FolderForm => &*FOLDER_FORM,
            PageSchema::UrlPage => &*URL_PAGE,
            PageSchema::FileRedirect => &*FILE_REDIRECT,
        }
    }

    fn fail(&self, fragment: &str) -> AppError {
        error!("Rule '{}' did not match. Offending text:\n{}", self, fragment);
        AppError::parse_failure(*self, fragment)
    }

    /// The region between this schema's anchors, or the whole text if it has none.
    pub fn region<'t>(&self, text: &'t str) -> AppResult<&'t str> {
        match self.anchors() {
            Some((start, end)) => extract_between(text, start, end).ok_or_else(|| self.fail(text)),
            None => Ok(text),
        }
    }

    /// Whether the rule matches anywhere in the region. Never fails.
    pub fn is_present(&self, text: &str) -> bool {
        self.region(text).map(|region| self.rule().is_match(region)).unwrap_or(false)
    }

    /// First match of the rule inside the region.
    pub fn capture<'t>(&self, text: &'t str) -> AppResult<Captures<'t>> {
        let region = self.region(text)?;
        self.rule().captures(region).ok_or_else(|| self.fail(region))
    }

    /// Every match of the rule inside the region, in document order.
    /// An existing region without matches yields an empty list.
    pub fn capture_all<'t>(&self, text: &'t str) -> AppResult<Vec<Captures<'t>>> {
        let region = self.region(text)?;
        Ok(self.rule().captures_iter(region).collect())
    }
}

impl fmt::Display for PageSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
