//! Shared slug validation predicates for domain entities.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens.

/// Return `true` when `value` is a valid domain slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::is_valid_slug;

    #[test]
    fn accepts_lowercase_digits_and_hyphens() {
        assert!(is_valid_slug("rust-2024"));
        assert!(is_valid_slug("a"));
    }

    #[test]
    fn rejects_uppercase_whitespace_and_empty() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Rust"));
        assert!(!is_valid_slug(" rust"));
        assert!(!is_valid_slug("rust cafe"));
    }
}
