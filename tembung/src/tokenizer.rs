//! Whitespace tokenizer

/// A normalized word unit. Position is implied by its index in the sequence.
pub type Token = String;

/// Sentence punctuation removed before dictionary lookup and stemming
pub const SENTENCE_PUNCTUATION: &[char] = &[',', ';', '.', '!', '?'];

/// Trim, lowercase and split on runs of whitespace
///
/// Blank input yields an empty sequence; callers reject it before this point.
///
/// ```
/// use tembung::tokenize;
///
/// assert_eq!(tokenize("  Aku   Mangan  "), vec!["aku", "mangan"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Remove sentence punctuation (`, ; . ! ?`) anywhere in the token
pub fn strip_punctuation(token: &str) -> String {
    token
        .chars()
        .filter(|c| !SENTENCE_PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
