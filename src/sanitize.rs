//! Filename sanitizing for resolved scene titles.

/// Characters rejected by restrictive filesystems (Windows reserved set).
const DISALLOWED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Substitute when sanitizing leaves nothing usable.
const FALLBACK_NAME: &str = "panorama";

/// Make a title safe to use as a filename component.
///
/// Disallowed characters become underscores, surrounding whitespace is
/// trimmed, and trailing periods/spaces are stripped (Windows rejects both at
/// the end of a name). Never returns an empty string.
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if DISALLOWED.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim().trim_end_matches(['.', ' ']);

    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
