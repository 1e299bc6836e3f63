//! Percent-encoding for values interpolated into resource paths.
//!
//! Resource paths are built from entity fields (domain class names, composite
//! key parts). Without encoding, a value such as `a/b` would add a path level
//! and `a?b` would start a query string.
//!
//! # Example
//!
//! ```
//! use cytomine_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("be.cytomine.project.Project"), "be.cytomine.project.Project");
//! assert_eq!(encode_path_segment("a/b"), "a%2Fb");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a path segment (RFC 3986 §3.3
/// plus separators that are reserved in resource paths).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a single path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names_pass_through() {
        assert_eq!(
            encode_path_segment("be.cytomine.ontology.UserAnnotation"),
            "be.cytomine.ontology.UserAnnotation"
        );
        assert_eq!(encode_path_segment("my-key_1"), "my-key_1");
    }

    #[test]
    fn test_encode_separators() {
        assert_eq!(encode_path_segment("a/b/c"), "a%2Fb%2Fc");
        assert_eq!(encode_path_segment("a?b"), "a%3Fb");
        assert_eq!(encode_path_segment("a#b"), "a%23b");
        assert_eq!(encode_path_segment("a b"), "a%20b");
    }

    #[test]
    fn test_encode_percent_prevents_double_decode() {
        assert_eq!(encode_path_segment("a%20b"), "a%2520b");
    }

    #[test]
    fn test_encode_unicode() {
        assert_eq!(encode_path_segment("caf\u{00e9}"), "caf%C3%A9");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_path_segment(""), "");
    }
}
