// src/media_types.rs

use std::{collections::HashMap, sync::LazyLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeEntry {
    Extension(&'static str),
    /// Known type that deliberately gets no extension
    NoExtension,
    /// Not in the table at all
    Unmapped,
}

impl MediaTypeEntry {
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            MediaTypeEntry::Extension(ext) => Some(ext),
            MediaTypeEntry::NoExtension | MediaTypeEntry::Unmapped => None,
        }
    }
}

const FILE_EXT_MAP: &[(&str, Option<&str>)] = &[
    // documents
    ("application/pdf", Some("pdf")),
    ("application/msword", Some("doc")),
    ("application/vnd.openxmlformats-officedocument.wordprocessingml.document", Some("docx")),
    ("application/vnd.ms-excel", Some("xls")),
    ("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", Some("xlsx")),
    ("application/vnd.ms-powerpoint", Some("ppt")),
    ("application/vnd.openxmlformats-officedocument.presentationml.presentation", Some("pptx")),
    ("application/vnd.openxmlformats-officedocument.presentationml.slideshow", Some("ppsx")),
    ("application/vnd.oasis.opendocument.text", Some("odt")),
    ("application/vnd.oasis.opendocument.spreadsheet", Some("ods")),
    ("application/vnd.oasis.opendocument.presentation", Some("odp")),
    ("application/rtf", Some("rtf")),
    ("application/postscript", Some("ps")),
    ("application/epub+zip", Some("epub")),
    ("text/plain", Some("txt")),
    ("text/csv", Some("csv")),
    ("text/html", Some("html")),
    ("text/css", Some("css")),
    ("text/xml", Some("xml")),
    ("application/xml", Some("xml")),
    ("application/json", Some("json")),
    ("text/markdown", Some("md")),
    ("text/x-python", Some("py")),
    ("text/x-c", Some("c")),
    ("text/x-java", Some("java")),
    ("application/x-tex", Some("tex")),
    ("application/x-ipynb+json", Some("ipynb")),
    ("application/javascript", Some("js")),
    ("application/x-matlab-data", Some("mat")),
    // archives
    ("application/zip", Some("zip")),
    ("application/x-zip-compressed", Some("zip")),
    ("application/x-7z-compressed", Some("7z")),
    ("application/x-rar-compressed", Some("rar")),
    ("application/vnd.rar", Some("rar")),
    ("application/x-tar", Some("tar")),
    ("application/gzip", Some("gz")),
    ("application/x-gzip", Some("gz")),
    // images
    ("image/png", Some("png")),
    ("image/jpeg", Some("jpg")),
    ("image/gif", Some("gif")),
    ("image/bmp", Some("bmp")),
    ("image/svg+xml", Some("svg")),
    ("image/tiff", Some("tif")),
    ("image/webp", Some("webp")),
    // audio & video
    ("audio/mpeg", Some("mp3")),
    ("audio/wav", Some("wav")),
    ("audio/x-wav", Some("wav")),
    ("audio/mp4", Some("m4a")),
    ("video/mp4", Some("mp4")),
    ("video/quicktime", Some("mov")),
    ("video/x-msvideo", Some("avi")),
    ("video/webm", Some("webm")),
    ("video/x-ms-wmv", Some("wmv")),
    // no sensible extension
    ("application/octet-stream", None),
    ("application/x-unknown-content-type", None),
];

static TABLE: LazyLock<HashMap<&'static str, Option<&'static str>>> =
    LazyLock::new(|| FILE_EXT_MAP.iter().copied().collect());

/// Read-only media type -> file extension lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaTypeTable;

impl MediaTypeTable {
    pub fn lookup(&self, media_type: &str) -> MediaTypeEntry {
        match TABLE.get(media_type.trim().to_ascii_lowercase().as_str()) {
            Some(Some(ext)) => MediaTypeEntry::Extension(ext),
            Some(None) => MediaTypeEntry::NoExtension,
            None => MediaTypeEntry::Unmapped,
        }
    }
}
