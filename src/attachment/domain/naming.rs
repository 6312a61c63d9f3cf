//! Filename sanitization and collision-suffix generation.

use super::AttachmentDomainError;

/// Reduces a client-supplied name to its final path component.
///
/// Both `/` and `\` count as separators. Names that are empty after
/// trimming, `.`, `..`, or that contain NUL or other control characters
/// are rejected.
///
/// # Errors
///
/// Returns [`AttachmentDomainError::InvalidFilename`] when nothing usable
/// remains.
pub fn sanitize_filename(raw: &str) -> Result<String, AttachmentDomainError> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    let rejected = last.is_empty()
        || last == "."
        || last == ".."
        || last.chars().any(char::is_control);
    if rejected {
        return Err(AttachmentDomainError::InvalidFilename(raw.to_owned()));
    }
    Ok(last.to_owned())
}

/// Splits a name into stem and extension, keeping the dot on the extension.
///
/// A leading dot does not start an extension, so `.env` has none.
#[must_use]
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(idx) => name.split_at(idx),
    }
}

/// Returns the name to try on the given attempt.
///
/// Attempt `0` is the name itself; attempt `n` inserts `_n` before the
/// extension.
#[must_use]
pub fn candidate_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_owned();
    }
    let (stem, extension) = split_extension(name);
    format!("{stem}_{attempt}{extension}")
}
