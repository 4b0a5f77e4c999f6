// src/extractor/resources.rs

use super::PageSchema;
use crate::{
    error::*,
    models::{ResourceDescriptor, ResourceKind},
    ui,
};
use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;

static NO_RESOURCES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)There are no resources").unwrap());
static FORM_ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\baction\s*=\s*"([^"]*)""#).unwrap());
static FORM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name\s*=\s*"id"\s+value\s*=\s*"(\d+)""#).unwrap());

/// Descriptors of the course resources page, in table order.
///
/// Every first-column cell must match the entry rule; one that does not
/// aborts the whole page with a [`AppError::ParseFailure`].
pub fn parse_resource_page(page: &str) -> AppResult<Vec<ResourceDescriptor>> {
    let cells = match PageSchema::ResourceTable.capture_all(page) {
        Ok(cells) => cells,
        Err(_) if NO_RESOURCES_RE.is_match(page) => {
            info!("Resources page lists no resources");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut descriptors = Vec::with_capacity(cells.len());
    for cell in cells {
        let cell_html = cell.get(1).map_or("", |m| m.as_str());
        let caps = PageSchema::ResourceEntry.capture(cell_html)?;

        let url = caps[1].to_string();
        let icon = caps.get(2).map(|m| m.as_str().to_string());
        let alt = &caps[3];
        let name = caps[4].to_string();

        if icon.is_none() {
            debug!("A non-file item of type '{}' was found", alt);
        }
        let kind = ResourceKind::from_alt(alt);
        if let ResourceKind::Unknown(other) = &kind {
            warn!("Item '{}' has unknown type '{}', it will be ignored", name, other);
            ui::warn(&format!(
                "An item of unknown type '{}' was found ('{}'), it will be ignored.",
                other, name
            ));
        }

        descriptors.push(ResourceDescriptor {
            kind,
            url,
            name,
            icon,
        });
    }
    info!("Parsed {} resource(s)", descriptors.len());
    Ok(descriptors)
}

/// `action?id=<id>` of the form that downloads a folder as an archive.
pub fn parse_folder_download(page: &str) -> AppResult<String> {
    let forms = PageSchema::FolderForm.capture_all(page)?;
    forms
        .iter()
        .find_map(|form| {
            let action = FORM_ACTION_RE.captures(&form[1])?;
            let id = FORM_ID_RE.captures(&form[2])?;
            Some(format!("{}?id={}", &action[1], &id[1]))
        })
        .ok_or_else(|| AppError::parse_failure(PageSchema::FolderForm, page))
}

/// `(title, target)` of a URL resource page.
pub fn parse_url_page(page: &str) -> AppResult<(String, String)> {
    let caps = PageSchema::UrlPage.capture(page)?;
    Ok((caps[1].trim().to_string(), caps[2].to_string()))
}

/// Real download link behind a "Click ... to download the file" page.
pub fn parse_file_redirect(page: &str) -> AppResult<String> {
    let caps = PageSchema::FileRedirect.capture(page)?;
    Ok(caps[1].to_string())
}
