//! Affix (imbuhan) detection
//!
//! A detector only: it answers whether a token looks derived, without
//! deciding which affix to remove. The stemmer keeps its own, longer list.

/// Prefixes checked by [`is_affixed`]
pub const DETECTOR_PREFIXES: &[&str] = &["me", "mem", "men", "meng", "di", "ke", "ber", "ter", "pe", "se"];

/// Suffixes checked by [`is_affixed`]
pub const DETECTOR_SUFFIXES: &[&str] = &["kan", "an", "i", "lah", "kah", "nya"];

/// Shortest root, in characters, an affix may leave behind
///
/// Without it every word ending in `-an` or `-i` counts as affixed, `makan`
/// included.
pub const MIN_ROOT_CHARS: usize = 4;

/// Whether the token carries one of the fixed prefixes or suffixes
///
/// The prefix set is checked first, then the suffix set.
///
/// ```
/// use tembung::is_affixed;
///
/// assert!(!is_affixed("makan"));
/// assert!(is_affixed("memakan"));
/// assert!(is_affixed("makanan"));
/// ```
pub fn is_affixed(token: &str) -> bool {
    DETECTOR_PREFIXES
        .iter()
        .any(|prefix| strip_prefix_with_root(token, prefix).is_some())
        || DETECTOR_SUFFIXES
            .iter()
            .any(|suffix| strip_suffix_with_root(token, suffix).is_some())
}

/// Remove `prefix` if what remains is still a plausible root
pub(crate) fn strip_prefix_with_root<'a>(word: &'a str, prefix: &str) -> Option<&'a str> {
    word.strip_prefix(prefix)
        .filter(|rest| rest.chars().count() >= MIN_ROOT_CHARS)
}

/// Remove `suffix` if what remains is still a plausible root
pub(crate) fn strip_suffix_with_root<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    word.strip_suffix(suffix)
        .filter(|rest| rest.chars().count() >= MIN_ROOT_CHARS)
}
