// src/downloader/mod.rs

mod handlers;
mod job;
mod writer;

pub use job::ResourceDownloader;

use crate::{models::DownloadStatus, symbols, ui};
use colored::*;
use log::{error, info};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Run-wide tally of resource outcomes, shared by every course of the run.
#[derive(Clone)]
pub struct DownloadManager {
    stats: Arc<Mutex<DownloadStats>>,
    failed_downloads: Arc<Mutex<Vec<(String, String)>>>,
    skipped_downloads: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(Mutex::new(DownloadStats::default())),
            failed_downloads: Arc::new(Mutex::new(Vec::new())),
            skipped_downloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record_status(&self, name: &str, status: &DownloadStatus) {
        match status {
            DownloadStatus::Skipped(reason) => self.record_skip(name, reason),
            _ => self.record_success(),
        }
    }

    pub fn record_success(&self) {
        let mut stats = self.stats.lock().unwrap();
        stats.total += 1;
        stats.success += 1;
    }

    pub fn record_skip(&self, name: &str, reason: &str) {
        info!("Skipped '{}': {}", name, reason);
        let mut stats = self.stats.lock().unwrap();
        stats.total += 1;
        stats.skipped += 1;
        self.skipped_downloads
            .lock()
            .unwrap()
            .push((name.to_string(), reason.to_string()));
    }

    pub fn record_failure(&self, name: &str, reason: &str) {
        error!("'{}' failed: {}", name, reason);
        let mut stats = self.stats.lock().unwrap();
        stats.total += 1;
        stats.failed += 1;
        self.failed_downloads
            .lock()
            .unwrap()
            .push((name.to_string(), reason.to_string()));
    }

    pub fn get_stats(&self) -> DownloadStats {
        self.stats.lock().unwrap().clone()
    }

    pub fn did_all_succeed(&self) -> bool {
        self.stats.lock().unwrap().failed == 0
    }

    pub fn print_report(&self) {
        let stats = self.get_stats();
        let skipped = self.skipped_downloads.lock().unwrap();
        let failed = self.failed_downloads.lock().unwrap();
        info!(
            "Resource report: Total={}, Success={}, Skipped={}, Failed={}",
            stats.total, stats.success, stats.skipped, stats.failed
        );

        if !skipped.is_empty() || !failed.is_empty() {
            ui::print_sub_header("Details");
            if !skipped.is_empty() {
                println!("\n{} Skipped ({}):", *symbols::INFO, stats.skipped);
                print_grouped_report(&skipped, |s| s.cyan());
            }
            if !failed.is_empty() {
                println!("\n{} Failed ({}):", *symbols::ERROR, stats.failed);
                print_grouped_report(&failed, |s| s.red());
            }
        }
        ui::print_sub_header("Summary");
        if stats.failed == 0 {
            println!(
                "{} All {} resources processed ({} skipped).",
                *symbols::OK,
                stats.total,
                stats.skipped
            );
        } else {
            println!(
                "{} | {} | {}",
                format!("Succeeded: {}", stats.success).green(),
                format!("Failed: {}", stats.failed).red(),
                format!("Skipped: {}", stats.skipped).yellow()
            );
        }
    }
}

fn print_grouped_report(items: &[(String, String)], color_fn: fn(ColoredString) -> ColoredString) {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, reason) in items {
        grouped.entry(reason.as_str()).or_default().push(name.as_str());
    }
    for (reason, mut names) in grouped {
        println!("  - {}", color_fn(format!("Reason: {}", reason).into()));
        names.sort();
        for name in names {
            println!("    - {}", name);
        }
    }
}
