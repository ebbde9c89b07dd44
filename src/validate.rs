use crate::error::ApiError;

pub const MAX_WORDS: usize = 1000;

// Text that passed validation along with its word count
#[derive(Debug, PartialEq)]
pub struct ValidText<'a> {
    pub text: &'a str,
    pub word_count: usize,
}

/// Whitespace-delimited token count of the trimmed text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reject absent or blank text and anything over [`MAX_WORDS`].
///
/// The returned `text` is the caller's input untouched; trimming is only
/// used to decide emptiness.
pub fn validate(raw: Option<&str>) -> Result<ValidText<'_>, ApiError> {
    let text = match raw {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ApiError::MissingText),
    };

    let words = word_count(text);
    if words > MAX_WORDS {
        return Err(ApiError::TooManyWords);
    }

    Ok(ValidText {
        text,
        word_count: words,
    })
}
