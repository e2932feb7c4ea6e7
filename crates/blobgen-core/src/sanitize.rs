//! Filename to identifier conversion.

/// Derives a C++-safe symbol name from a file name without its extension.
///
/// Spaces and dots become `_`, then every character outside
/// `[A-Za-z0-9_]` is dropped. The result is not checked for uniqueness,
/// emptiness, a leading digit, or collisions with language keywords.
pub fn sanitize_identifier(stem: &str) -> String {
    stem.chars()
        .map(|c| match c {
            ' ' | '.' => '_',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_and_dots() {
        assert_eq!(sanitize_identifier("My File.v2"), "My_File_v2");
        assert_eq!(sanitize_identifier("a b.c d"), "a_b_c_d");
    }

    #[test]
    fn test_drops_instead_of_replacing() {
        assert_eq!(sanitize_identifier("icon-large(2x)"), "iconlarge2x");
        assert_eq!(sanitize_identifier("café"), "caf");
        assert_eq!(sanitize_identifier("already_fine_123"), "already_fine_123");
    }

    #[test]
    fn test_no_guarantees() {
        assert_eq!(sanitize_identifier("!!!"), "");
        assert_eq!(sanitize_identifier("9lives"), "9lives");
        assert_eq!(sanitize_identifier("a b"), sanitize_identifier("a.b"));
    }
}
