//! URL slugs for posts.

use crate::error::DomainError;

/// Derive a slug from a title: lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// A valid slug is non-empty, uses `[a-z0-9-]`, and neither starts, ends, nor repeats dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

/// Use the requested slug if given, otherwise derive one from the title.
pub fn resolve_slug(requested: Option<&str>, title: &str) -> Result<String, DomainError> {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) if is_valid_slug(slug) => Ok(slug.to_string()),
        Some(slug) => Err(DomainError::Validation(format!(
            "slug '{slug}' may only contain lowercase letters, digits and single dashes"
        ))),
        None => {
            let slug = slugify(title);
            if slug.is_empty() {
                Err(DomainError::Validation(
                    "a slug cannot be derived from this title; provide one".to_string(),
                ))
            } else {
                Ok(slug)
            }
        }
    }
}
