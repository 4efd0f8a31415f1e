//! Sanitization of user-entered build names.

/// Characters that would let a name escape its single path segment.
const SEPARATORS: [char; 2] = ['/', '\\'];

const SEPARATOR_SUBSTITUTE: &str = "_";

/// Replace path separators with `_` and trim surrounding whitespace.
pub fn sanitize_build_name(raw: &str) -> String {
    raw.replace(SEPARATORS, SEPARATOR_SUBSTITUTE)
        .trim()
        .to_string()
}

/// True if a sanitized name can be used as a directory under the root.
pub fn is_usable_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}
