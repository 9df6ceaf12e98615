// ABOUTME: Text normalization helpers for lenient specialty matching and file naming.
// ABOUTME: Provides accent/case folding (normalize) and hyphenated slugs (slugify).

use unicode_normalization::UnicodeNormalization;

/// Slug returned when the input has no usable tokens.
pub const UNKNOWN_SLUG: &str = "unknown";

/// Lowercases and strips accents for lenient comparisons.
///
/// The text is NFKD-decomposed and every non-ASCII character is dropped,
/// which removes combining marks ("é" -> "e") along with anything that has
/// no ASCII form. The result is then lowercased and trimmed.
pub fn normalize(text: &str) -> String {
    let ascii: String = text.nfkd().filter(char::is_ascii).collect();
    ascii.to_lowercase().trim().to_string()
}

/// Filesystem-friendly slug built from the normalized text.
pub fn slugify(text: &str) -> String {
    let normalized = normalize(text);
    let slug = normalized.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        UNKNOWN_SLUG.to_string()
    } else {
        slug
    }
}
