//! Shared helpers for error text and warnings.
//!
//! Errors carry an excerpt of the offending expression so a rejected job
//! definition can be traced back to its source without dumping huge inputs.

use std::borrow::Cow;

const EXCERPT_CHARS: usize = 96;

/// Shorten `text` for inclusion in an error message.
pub fn excerpt(text: &str) -> Cow<'_, str> {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Build an error message of the form `what: "excerpt"`.
pub fn error_message(what: impl AsRef<str>, text: &str) -> String {
    format!("{}: {:?}", what.as_ref(), excerpt(text))
}

/// Report a non-fatal oddity in the input.
pub fn warn(msg: impl AsRef<str>) {
    tracing::warn!("{}", msg.as_ref());
}
