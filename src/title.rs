//! Scene title resolution.
//!
//! The export tool writes an optional sidecar (`<base>.html` or `<base>.js`)
//! whose first-level heading carries the human-readable scene name. The
//! heading search is a plain pattern match, not markup parsing: the first
//! case-insensitive `<h1 ...>...</h1>` wins, even inside comments or
//! malformed nesting. When no sidecar yields a title, naming heuristics on
//! the base itself take over, so resolution never fails.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

/// Sidecar extensions searched for a heading, in priority order.
const SIDECAR_EXTS: [&str; 2] = [".html", ".js"];

/// Extract the inner text of the first `<h1>` heading in markup content.
///
/// HTML entities are decoded and whitespace runs collapsed to single spaces.
/// Returns `None` when no heading is found or its text is empty.
pub fn extract_heading(content: &str) -> Option<String> {
    let heading = Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").ok()?;
    let whitespace = Regex::new(r"\s+").ok()?;

    let captures = heading.captures(content)?;
    let decoded = html_escape::decode_html_entities(&captures[1]).into_owned();
    let title = whitespace.replace_all(&decoded, " ").trim().to_string();

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Resolve the display title for a set's base name.
///
/// Sidecar headings win; otherwise a base like `Scene4` becomes `Scene 4`,
/// an `Edit*` base becomes `Edit`, and anything else is used as-is. Sidecar
/// read errors fall through to the heuristics.
pub fn resolve_title(dir: &Path, base: &str) -> String {
    for ext in SIDECAR_EXTS {
        let path = dir.join(format!("{base}{ext}"));
        if !path.is_file() {
            continue;
        }
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %path.display(), %err, "sidecar unreadable, falling back");
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        if let Some(title) = extract_heading(&content) {
            return title;
        }
    }

    let lower = base.to_lowercase();
    if lower.starts_with("scene") {
        if let Some(last) = base.chars().last() {
            if last.is_ascii_digit() {
                return format!("Scene {last}");
            }
        }
    }
    if lower.starts_with("edit") {
        return "Edit".to_string();
    }

    base.to_string()
}
