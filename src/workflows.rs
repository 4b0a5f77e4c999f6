// src/workflows.rs

use crate::{
    MirrorContext,
    cli::Cli,
    constants,
    downloader::ResourceDownloader,
    error::{AppError, AppResult},
    extractor::{courses::parse_courses, resources::parse_resource_page},
    models::{Course, DownloadStatus},
    sanitizer::{decode_name, strip_forbidden},
    symbols, ui, utils,
};
use anyhow::anyhow;
use colored::*;
use log::{error, info};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Lists the courses, asks which to mirror and mirrors them one after another.
pub(crate) async fn run_mirror(args: &Cli, context: MirrorContext) -> AppResult<()> {
    ui::info("Extracting course names from Learn...");
    let courses = fetch_courses(&context).await?;
    if courses.is_empty() {
        ui::warn("No courses were found in the 'My Courses' menu.");
        return Ok(());
    }
    let codes: Vec<&String> = courses.keys().collect();

    if args.list {
        print_course_list(&courses);
        return Ok(());
    }

    let selection = match &args.courses {
        Some(selection) => selection.clone(),
        None => {
            let options: Vec<String> = courses
                .values()
                .map(|c| format!("{:<18} {}", c.code, c.name))
                .collect();
            ui::selection_menu(
                &options,
                "Courses found on Learn",
                "Enter the course numbers separated by commas (e.g. '1,4,5')",
                "all",
            )
            .map_err(|_| AppError::UserInterrupt)?
        }
    };
    let selected: Vec<&Course> = utils::parse_selection_indices(&selection, codes.len())
        .into_iter()
        .map(|i| &courses[codes[i]])
        .collect();
    if selected.is_empty() {
        return Err(AppError::UserInputError(format!(
            "'{}' does not select any of the {} courses.",
            selection,
            codes.len()
        )));
    }

    let dest_root = match &args.output {
        Some(dir) => dir.clone(),
        None => PathBuf::from(
            ui::prompt("Where do you want to save the files?", Some("."))
                .map_err(|_| AppError::UserInterrupt)?,
        ),
    };
    let dest_root = std::path::absolute(&dest_root)?;
    if context.config.dry_run {
        ui::info(&format!(
            "{} Nothing will be written to disk.",
            *symbols::DRY_RUN
        ));
    }

    let mut failed_courses = Vec::new();
    for course in &selected {
        let course_dest = dest_root.join(course_folder_name(course));
        ui::print_header(&format!("Finding files for {}", course.name));
        ui::info(&format!(
            "Downloading resources to '{}'",
            dunce::simplified(&course_dest).display()
        ));

        match mirror_course(&context, course, &course_dest).await {
            Ok(count) => {
                info!("Course {} done, {} resource(s)", course.code, count);
                ui::ok(&format!("Finished {} ({} resources)", course.name, count));
            }
            Err(e) => {
                error!("Course {} failed: {}", course.code, e);
                report_course_error(course, &e);
                failed_courses.push(course.code.clone());
            }
        }
    }

    ui::print_header("Mirror report");
    context.manager.print_report();
    if !failed_courses.is_empty() {
        ui::plain("");
        ui::error(&format!(
            "These courses could not be mirrored: {}",
            failed_courses.join(", ")
        ));
    }

    if failed_courses.is_empty() && context.manager.did_all_succeed() {
        Ok(())
    } else {
        Err(AppError::Other(anyhow!(
            "{} course(s) and {} resource(s) failed",
            failed_courses.len(),
            context.manager.get_stats().failed
        )))
    }
}

/// Course code -> course, from the landing page menu.
pub async fn fetch_courses(context: &MirrorContext) -> AppResult<BTreeMap<String, Course>> {
    let landing_page = context
        .session
        .fetch_text(&context.config.landing_path)
        .await?;
    parse_courses(&landing_page)
}

/// Mirrors every resource of `course` into `course_dest`, in page order.
///
/// A resource that fails is recorded and the course carries on; a resource
/// page that cannot be fetched or parsed fails the whole course.
pub async fn mirror_course(
    context: &MirrorContext,
    course: &Course,
    course_dest: &Path,
) -> AppResult<usize> {
    let resources_url = context.config.resources_path(&course.id);
    info!("Fetching resources of {} from {}", course.code, resources_url);
    let page = context.session.fetch_text(&resources_url).await?;
    let descriptors = parse_resource_page(&page)?;
    if descriptors.is_empty() {
        ui::info("This course lists no resources.");
        return Ok(0);
    }

    let downloader = ResourceDownloader::new(context.clone());
    let pbar = ui::new_tasks_progress_bar(descriptors.len() as u64, &course.code);
    for descriptor in &descriptors {
        pbar.set_message(utils::truncate_text(&descriptor.name, 40));
        match downloader.download(descriptor, course_dest).await {
            Ok(status) => {
                context.manager.record_status(&descriptor.name, &status);
                if !matches!(status, DownloadStatus::Skipped(_)) {
                    let (symbol, _, _) = status.get_display_info();
                    let shown = status
                        .path()
                        .and_then(|p| p.file_name())
                        .map(|f| f.to_string_lossy().into_owned())
                        .unwrap_or_else(|| descriptor.name.clone());
                    pbar.println(format!("{} {}", symbol, shown));
                }
            }
            Err(e) => {
                context.manager.record_failure(&descriptor.name, &e.to_string());
                pbar.println(format!(
                    "{} {} {}",
                    *symbols::ERROR,
                    descriptor.name,
                    e.to_string().red()
                ));
                if let AppError::ParseFailure { fragment, .. } = &e {
                    pbar.println(format!(
                        "    {}",
                        utils::truncate_text(fragment, constants::FRAGMENT_PREVIEW_LENGTH).dimmed()
                    ));
                }
            }
        }
        pbar.inc(1);
    }
    pbar.finish_and_clear();
    Ok(descriptors.len())
}

/// Course folders follow the same character rules as file names.
fn course_folder_name(course: &Course) -> String {
    let name = strip_forbidden(&decode_name(&course.name)).trim().to_string();
    if name.is_empty() || name.chars().all(|c| c == '.') {
        course.code.clone()
    } else {
        name
    }
}

fn print_course_list(courses: &BTreeMap<String, Course>) {
    ui::print_sub_header("Found the following courses");
    for (i, course) in courses.values().enumerate() {
        ui::plain(&format!(
            "{:>3}: {:<18} {} (id {})",
            i + 1,
            course.code,
            course.name,
            course.id
        ));
    }
}

fn report_course_error(course: &Course, e: &AppError) {
    match e {
        AppError::ParseFailure { schema, fragment } => {
            let preview = utils::truncate_text(fragment, constants::FRAGMENT_PREVIEW_LENGTH);
            let mut lines = vec![
                format!("Course: {} ({})", course.name, course.code),
                format!("Rule:   {}", schema),
                String::new(),
            ];
            lines.extend(preview.lines().map(str::to_string));
            let content: Vec<&str> = lines.iter().map(String::as_str).collect();
            ui::box_message(
                "The page structure has changed and could not be parsed",
                &content,
                |s| s.red(),
            );
        }
        AppError::Network(req_err) => {
            let reason = match req_err.status() {
                Some(status) => format!("the server answered {}", status),
                None => "the connection failed".to_string(),
            };
            ui::error(&format!("{}: {}", course.code, reason));
        }
        _ => ui::error(&format!("{}: {}", course.code, e)),
    }
}
