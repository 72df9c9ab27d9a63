use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Used when neither positional URLs nor an input file are given.
pub const DEFAULT_URLS: &[&str] = &["https://en.wiktionary.org/wiki/dinde#French"];

/// Build the ordered URL list: positional arguments first, then the input
/// file's lines. Falls back to [`DEFAULT_URLS`] when both are empty.
pub fn collect_urls(args: &[String], input: Option<&Path>) -> Result<Vec<String>> {
    let mut urls: Vec<String> = args.to_vec();

    if let Some(path) = input {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        urls.extend(parse_url_list(&contents));
    }

    if urls.is_empty() {
        tracing::info!("No URLs given, using built-in list");
        urls = DEFAULT_URLS.iter().map(|s| s.to_string()).collect();
    }
    Ok(urls)
}

/// One URL per line; blank lines and `#` comment lines are skipped.
fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
