// src/sanitizer.rs

//! Maps portal display names onto filesystem paths.
//!
//! Every write goes through [`PathSanitizer::resolve`], which decodes the
//! name, removes characters the target filesystem rejects and enforces the
//! folder and full-path length ceilings from [`PathLimits`]. Whenever the
//! final path is not the intended one, [`DownloadTarget::record_mapping`]
//! appends `'<final>' ==> '<original>'` to the folder's side-car file.

use crate::{config::PathLimits, constants, error::AppResult, ui};
use log::{debug, warn};
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::{
    collections::HashSet,
    fs::{self, OpenOptions},
    io::Write,
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};

static AMP_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&amp;?").unwrap());
static FORBIDDEN_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]"#).unwrap());

/// Resolved destination of one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub folder: PathBuf,
    pub file_name: String,
    /// The intended path, set only when it differs from [`DownloadTarget::path`]
    pub original: Option<PathBuf>,
    sidecar_file_name: String,
}

impl DownloadTarget {
    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }

    pub fn is_renamed(&self) -> bool {
        self.original.is_some()
    }

    pub fn sidecar_path(&self) -> PathBuf {
        self.folder.join(&self.sidecar_file_name)
    }

    /// Appends the rename to the side-car file. No-op when nothing was renamed.
    /// The folder must already exist.
    pub fn record_mapping(&self) -> AppResult<()> {
        let Some(original) = &self.original else {
            return Ok(());
        };
        let mut sidecar = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.sidecar_path())?;
        writeln!(sidecar, "'{}' ==> '{}'", self.path().display(), original.display())?;
        debug!("Recorded rename in {:?}", self.sidecar_path());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathSanitizer {
    limits: PathLimits,
}

impl PathSanitizer {
    pub fn new(limits: PathLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PathLimits {
        &self.limits
    }

    /// Computes a safe destination for `<folder>/<stem>[.<extension>]`.
    ///
    /// Deterministic for a given folder content: the only filesystem access is
    /// reading `folder` to find the lowest free `rn<i>` name.
    pub fn resolve(&self, folder: &Path, stem: &str, extension: Option<&str>) -> AppResult<DownloadTarget> {
        let absolute = std::path::absolute(folder)?;

        let mut intended_folder = PathBuf::new();
        let mut clean_folder = PathBuf::new();
        for component in absolute.components() {
            match component {
                Component::Normal(part) => {
                    let decoded = decode_name(&part.to_string_lossy());
                    clean_folder.push(non_empty(strip_forbidden(&decoded), "_"));
                    intended_folder.push(decoded);
                }
                other => {
                    intended_folder.push(other.as_os_str());
                    clean_folder.push(other.as_os_str());
                }
            }
        }

        let decoded_stem = decode_name(stem);
        let extension = extension
            .map(strip_forbidden)
            .filter(|ext| !ext.is_empty());
        let intended_name = join_extension(&decoded_stem, extension.as_deref());
        let clean_name = join_extension(
            &non_empty(strip_forbidden(&decoded_stem), constants::paths::FALLBACK_NAME),
            extension.as_deref(),
        );

        let intended_path = intended_folder.join(&intended_name);
        if clean_folder != intended_folder || clean_name != intended_name {
            let renamed = clean_folder.join(&clean_name);
            warn!("Forbidden characters removed: {:?} -> {:?}", intended_path, renamed);
            ui::warn(&format!(
                "The characters {} cannot be used in file and folder names.\n    '{}' has been renamed to '{}'.",
                constants::paths::FORBIDDEN_CHARS,
                intended_path.display(),
                renamed.display()
            ));
        }

        let max_folder_len = self.limits.max_folder_len();
        let mut folder = clean_folder;
        if char_len(&folder) > max_folder_len {
            let truncated = truncate_chars(&folder.to_string_lossy(), max_folder_len);
            folder = PathBuf::from(truncated.trim_end_matches([' ', '.']));
            debug!("Folder truncated to {} characters: {:?}", max_folder_len, folder);
        }

        let mut file_name = clean_name;
        if char_len(&folder.join(&file_name)) > self.limits.max_path_len {
            let index = next_synthetic_index(&folder)?;
            let synthetic = format!("{}{}", constants::paths::SYNTHETIC_NAME_PREFIX, index);
            file_name = join_extension(&synthetic, extension.as_deref());
            if char_len(&folder.join(&file_name)) > self.limits.max_path_len {
                file_name = synthetic;
            }
        }

        let final_path = folder.join(&file_name);
        let original = if final_path != intended_path {
            if char_len(&intended_path) > self.limits.max_path_len
                || char_len(&intended_folder) > max_folder_len
            {
                warn!("Path too long: {:?} shortened to {:?}", intended_path, final_path);
                ui::warn(&format!(
                    "File name too long:\n    '{}' shortened to '{}'",
                    intended_path.display(),
                    final_path.display()
                ));
            }
            Some(intended_path)
        } else {
            None
        };

        Ok(DownloadTarget {
            folder,
            file_name,
            original,
            sidecar_file_name: self.limits.sidecar_file_name.clone(),
        })
    }
}

/// Undoes percent-escapes and the `&amp;` left over from scraped HTML.
pub fn decode_name(name: &str) -> String {
    let unescaped = AMP_ENTITY_RE.replace_all(name, "&");
    percent_decode_str(&unescaped).decode_utf8_lossy().into_owned()
}

pub fn strip_forbidden(name: &str) -> String {
    FORBIDDEN_CHARS_RE.replace_all(name, "").into_owned()
}

/// A portal display name as exactly one path component.
///
/// Separators inside the name are stripped like any other forbidden
/// character, so the result can never nest folders or climb out of its parent.
pub fn name_component(name: &str) -> String {
    non_empty(strip_forbidden(&decode_name(name)).trim().to_string(), constants::paths::FALLBACK_NAME)
}

/// Blank and dot-only names (`.`, `..`) are replaced by `fallback`.
fn non_empty(name: String, fallback: &str) -> String {
    if name.trim().is_empty() || name.trim().chars().all(|c| c == '.') {
        fallback.to_string()
    } else {
        name
    }
}

fn join_extension(stem: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem.to_string(),
    }
}

fn char_len(path: &Path) -> usize {
    path.to_string_lossy().chars().count()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Smallest `i >= 1` such that no entry of `folder` has the stem `rn<i>`.
fn next_synthetic_index(folder: &Path) -> AppResult<usize> {
    let used: HashSet<String> = match fs::read_dir(folder) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                Path::new(&entry.file_name())
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .collect(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
        Err(e) => return Err(e.into()),
    };
    let mut index = 1;
    while used.contains(&format!("{}{}", constants::paths::SYNTHETIC_NAME_PREFIX, index)) {
        index += 1;
    }
    Ok(index)
}
