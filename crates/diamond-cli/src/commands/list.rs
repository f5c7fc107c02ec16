//! The list command

use colored::Colorize;
use diamond_core::LockStore;
use diamond_source::{LockEntry, Source};

use super::ProjectContext;
use crate::error::Result;

/// Print the packages recorded in the lock document.
pub fn run_list(context: &ProjectContext, json: bool) -> Result<()> {
    let store = LockStore::new(&context.layout, context.config.lock_timeout());
    let lock = store.read();

    if json {
        println!("{}", lock.to_json().map_err(diamond_core::Error::from)?);
        return Ok(());
    }

    if lock.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    println!("{}", "Installed Packages".bold());
    println!();
    for entry in &lock {
        println!(
            "  {:<32} {} ({})",
            display_name(entry).green(),
            entry.path,
            source_label(entry).dimmed()
        );
    }
    println!();
    println!("{} {} packages", "Total:".dimmed(), lock.len());
    Ok(())
}

fn display_name(entry: &LockEntry) -> String {
    match &entry.version {
        Some(version) => format!("{}@{}", entry.name, version),
        None => entry.name.clone(),
    }
}

fn source_label(entry: &LockEntry) -> String {
    match entry.source() {
        Some(Source::Registry { registry: Some(url) }) => format!("registry {}", url),
        Some(Source::Registry { registry: None }) => "registry".to_string(),
        Some(Source::Scm { url, .. }) => format!("scm {}", url),
        None => "unknown".to_string(),
    }
}
