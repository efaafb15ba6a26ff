//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use pawsearch_core::{DogRecord, Notice};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a notice, routed by whether it reports a failure.
pub fn notice(notice: &Notice) {
    if notice.is_failure() {
        error(&notice.to_string());
    } else {
        success(&notice.to_string());
    }
}

/// Print one dog as a table row.
pub fn dog(dog: &DogRecord, favorite: bool) {
    let marker = if favorite { "★".yellow() } else { " ".normal() };
    println!(
        "{} {:<12} {:<16} {:<24} {:>3}y  {}",
        marker,
        dog.id.as_str().bold(),
        dog.name,
        dog.breed,
        dog.age,
        dog.zip_code.dimmed()
    );
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
