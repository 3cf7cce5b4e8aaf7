//! Tokenizer and normalizer for the plain expression form.
//!
//! `complete_parenthesis` rewrites one topology so that every atom is
//! enclosed in its own `(...)`:
//!
//! ```text
//! A,B->(C->D),E->F   =>   (A),(B)->((C)->(D)),(E)->(F)
//! ```

pub const STAGE: &str = "->";
pub const UNION: &str = ",";
pub const OPEN: &str = "(";
pub const CLOSE: &str = ")";
pub const TOPOLOGY: char = ';';

/// Tokens that separate terms inside a term list.
pub fn is_separator(token: &str) -> bool {
    token == STAGE || token == UNION
}

pub fn is_symbol(token: &str) -> bool {
    matches!(token, STAGE | UNION | OPEN | CLOSE)
}

/// True when `text` holds none of `-> , ( )`, i.e. it is a bare name.
pub fn is_atomic(text: &str) -> bool {
    !(text.contains(STAGE) || text.contains(UNION) || text.contains(OPEN) || text.contains(CLOSE))
}

/// The running `(`/`)` balance never drops below zero and ends at zero.
pub fn check_parenthesis(text: &str) -> bool {
    let mut open = 0i64;
    for b in text.bytes() {
        match b {
            b'(' => open += 1,
            b')' => open -= 1,
            _ => {}
        }
        if open < 0 {
            // e.g. "())("
            return false;
        }
    }
    open == 0
}

/// Split into trimmed atoms and structural tokens. A `-` is only a token
/// when directly followed by `>`; otherwise it belongs to the atom.
fn tokenize(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let (mut mark, mut pos) = (0, 0);
    while pos < bytes.len() {
        match bytes[pos] {
            b'(' | b')' | b',' => {
                tokens.push(text[mark..pos].trim());
                tokens.push(&text[pos..pos + 1]);
                pos += 1;
                mark = pos;
            }
            b'-' if bytes.get(pos + 1) == Some(&b'>') => {
                tokens.push(text[mark..pos].trim());
                tokens.push(STAGE);
                pos += 2;
                mark = pos;
            }
            _ => pos += 1,
        }
    }
    if mark < bytes.len() {
        tokens.push(text[mark..].trim());
    }
    tokens
}

pub fn complete_parenthesis(text: &str) -> String {
    let tokens = tokenize(text);
    let at = |i: Option<usize>| i.and_then(|i| tokens.get(i)).copied();

    let mut out = String::with_capacity(text.len() * 2);
    for (i, &token) in tokens.iter().enumerate() {
        if token.is_empty() {
            continue;
        }
        if is_symbol(token) {
            out.push_str(token);
        } else if at(i.checked_sub(1)) == Some(OPEN) && at(Some(i + 1)) == Some(CLOSE) {
            out.push_str(token);
        } else {
            out.push_str(OPEN);
            out.push_str(token);
            out.push_str(CLOSE);
        }
    }
    out
}
