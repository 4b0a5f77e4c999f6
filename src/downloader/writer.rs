// src/downloader/writer.rs

use super::job::ResourceDownloader;
use crate::{
    error::*,
    media_types::MediaTypeEntry,
    models::{ContentMeta, DownloadStatus},
    ui,
};
use futures::StreamExt;
use log::{info, warn};
use reqwest::Response;
use std::{
    fs::{self, File},
    io::Write as IoWrite,
    path::Path,
};

impl ResourceDownloader {
    /// Streams the body of `url` to `<folder>/<name>.<ext>`.
    ///
    /// The name comes from Content-Disposition when the server sends one,
    /// otherwise from `display_name`; the extension from the media type.
    /// In a dry run nothing is created and the body is never read.
    pub(super) async fn save_response(
        &self,
        url: &str,
        folder: &Path,
        display_name: &str,
    ) -> AppResult<DownloadStatus> {
        let response = self.context.session.fetch_response(url).await?;
        let meta = ContentMeta::from_headers(response.headers());

        let extension = self.extension_for(&meta, display_name);
        let stem = meta.suggested_name.as_deref().unwrap_or(display_name);
        let target = self.sanitizer.resolve(folder, stem, extension)?;
        let path = target.path();

        if self.dry_run() {
            info!("Dry run, would write {:?}", path);
            return Ok(DownloadStatus::Planned(path));
        }

        fs::create_dir_all(&target.folder)?;
        let written = match write_body(response, &path).await {
            Ok(written) => written,
            Err(e) => {
                warn!("Writing {:?} failed, removing the partial file: {}", path, e);
                if let Err(rm_err) = fs::remove_file(&path) {
                    warn!("Could not remove partial file {:?}: {}", path, rm_err);
                }
                return Err(e);
            }
        };
        target.record_mapping()?;
        info!("Saved {} bytes to {:?}", written, path);
        Ok(DownloadStatus::Saved(path))
    }

    fn extension_for(&self, meta: &ContentMeta, display_name: &str) -> Option<&'static str> {
        let Some(media_type) = meta.media_type.as_deref() else {
            warn!("'{}' has no Content-Type, saving without an extension", display_name);
            ui::warn(&format!(
                "No content type was sent for '{}', it will be saved without an extension.",
                display_name
            ));
            return None;
        };
        match self.media_types.lookup(media_type) {
            MediaTypeEntry::Extension(ext) => Some(ext),
            MediaTypeEntry::NoExtension => {
                warn!("Media type '{}' has no extension, saving '{}' without one", media_type, display_name);
                None
            }
            MediaTypeEntry::Unmapped => {
                warn!("Unknown media type '{}' for '{}'", media_type, display_name);
                ui::warn(&format!(
                    "A file of the unknown type '{}' was found. It will be saved as '{}' without an extension; \
                     please add the right extension for this type to the media type table.",
                    media_type, display_name
                ));
                None
            }
        }
    }
}

async fn write_body(response: Response, path: &Path) -> AppResult<u64> {
    let mut file = File::create(path)?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    file.flush()?;
    Ok(written)
}
