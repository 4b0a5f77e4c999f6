// src/downloader/job.rs

use crate::{
    MirrorContext,
    error::*,
    media_types::MediaTypeTable,
    models::{DownloadStatus, ResourceDescriptor, ResourceKind},
    sanitizer::PathSanitizer,
};
use log::{debug, info};
use std::path::Path;

/// Turns one resource descriptor into files under a course folder.
pub struct ResourceDownloader {
    pub(super) context: MirrorContext,
    pub(super) sanitizer: PathSanitizer,
    pub(super) media_types: MediaTypeTable,
}

impl ResourceDownloader {
    pub fn new(context: MirrorContext) -> Self {
        let sanitizer = PathSanitizer::new(context.config.path_limits.clone());
        Self {
            context,
            sanitizer,
            media_types: MediaTypeTable,
        }
    }

    pub(super) fn dry_run(&self) -> bool {
        self.context.config.dry_run
    }

    /// Fetches `descriptor` into `course_dest` according to its kind.
    pub async fn download(
        &self,
        descriptor: &ResourceDescriptor,
        course_dest: &Path,
    ) -> AppResult<DownloadStatus> {
        info!("Processing {} '{}' ({})", descriptor.kind, descriptor.name, descriptor.url);
        let status = match &descriptor.kind {
            ResourceKind::File => self.download_file(descriptor, course_dest).await?,
            ResourceKind::Folder => self.download_folder(descriptor, course_dest).await?,
            ResourceKind::Url => self.download_url_shortcut(descriptor, course_dest).await?,
            ResourceKind::Page => self.download_page(descriptor, course_dest).await?,
            ResourceKind::Material => {
                DownloadStatus::Skipped("course material items are not downloadable".into())
            }
            ResourceKind::Unknown(alt) => {
                DownloadStatus::Skipped(format!("unknown item type '{}'", alt))
            }
        };
        debug!("'{}' -> {:?}", descriptor.name, status);
        Ok(status)
    }
}
