// src/downloader/handlers.rs

use super::job::ResourceDownloader;
use crate::{
    constants,
    error::*,
    extractor::resources::{parse_file_redirect, parse_folder_download, parse_url_page},
    models::{DownloadStatus, ResourceDescriptor},
    sanitizer::name_component,
};
use log::{debug, info};
use std::{fs, path::Path};

impl ResourceDownloader {
    /// A file resource lands in `Single Files/<name>/`. When the portal answers
    /// with an HTML page instead of the file, the real link is scraped from it.
    pub(super) async fn download_file(
        &self,
        descriptor: &ResourceDescriptor,
        course_dest: &Path,
    ) -> AppResult<DownloadStatus> {
        let session = &self.context.session;
        let url = session.resolve(&descriptor.url)?;
        let meta = session.fetch_headers(url.as_str()).await?;

        let download_url = if meta.is_html() && session.is_portal_url(&url) {
            debug!("'{}' is served as HTML, looking for the download link", descriptor.name);
            let page = session.fetch_text(url.as_str()).await?;
            session.resolve(&parse_file_redirect(&page)?)?
        } else {
            url
        };

        let folder = course_dest
            .join(constants::SINGLE_FILES_DIR)
            .join(name_component(&descriptor.name));
        self.save_response(download_url.as_str(), &folder, &descriptor.name)
            .await
    }

    /// A folder is fetched as one archive into `<name>/`.
    pub(super) async fn download_folder(
        &self,
        descriptor: &ResourceDescriptor,
        course_dest: &Path,
    ) -> AppResult<DownloadStatus> {
        info!("Extracting the archive link of folder '{}'", descriptor.name);
        let session = &self.context.session;
        let page = session.fetch_text(&descriptor.url).await?;
        let archive_url = session.resolve(&parse_folder_download(&page)?)?;
        debug!("Archive of '{}' at {}", descriptor.name, archive_url);

        let folder = course_dest.join(name_component(&descriptor.name));
        self.save_response(archive_url.as_str(), &folder, &descriptor.name)
            .await
    }

    /// A URL resource becomes an `[InternetShortcut]` file in `Single Files/`.
    pub(super) async fn download_url_shortcut(
        &self,
        descriptor: &ResourceDescriptor,
        course_dest: &Path,
    ) -> AppResult<DownloadStatus> {
        let page = self.context.session.fetch_text(&descriptor.url).await?;
        let (title, target) = parse_url_page(&page)?;
        let target = target.replace("&amp;", "&");

        let folder = course_dest.join(constants::SINGLE_FILES_DIR);
        let dest = self.sanitizer.resolve(&folder, &title, Some("url"))?;
        if self.dry_run() {
            info!("Dry run, would write shortcut {:?} -> {}", dest.path(), target);
            return Ok(DownloadStatus::Planned(dest.path()));
        }

        fs::create_dir_all(&dest.folder)?;
        fs::write(dest.path(), format!("[InternetShortcut]\nURL={}\n", target))?;
        dest.record_mapping()?;
        info!("Shortcut written to {:?}", dest.path());
        Ok(DownloadStatus::Shortcut(dest.path()))
    }

    /// A page is saved like a file but straight into `Single Files/`.
    pub(super) async fn download_page(
        &self,
        descriptor: &ResourceDescriptor,
        course_dest: &Path,
    ) -> AppResult<DownloadStatus> {
        let folder = course_dest.join(constants::SINGLE_FILES_DIR);
        self.save_response(&descriptor.url, &folder, &descriptor.name)
            .await
    }
}
