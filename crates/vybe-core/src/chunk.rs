//! Output Chunking
//!
//! Splits formatted text that exceeds the transport's message limit into
//! ordered fragments. Lengths are counted in `char`s.
//!
//! Each fragment keeps the newline it was split after, so plain
//! concatenation of the fragments reproduces the input exactly. A line
//! longer than the limit is hard-cut at the limit.

/// Default transport-safe message size
pub const DEFAULT_LIMIT: usize = 4000;

/// Result of chunking: one message, or several in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chunked {
    Single(String),
    Many(Vec<String>),
}

impl Chunked {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Chunked::Single(text) => vec![text],
            Chunked::Many(parts) => parts,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Chunked::Single(_) => 1,
            Chunked::Many(parts) => parts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Split `text` into fragments of at most `limit` chars
pub fn chunk(text: &str, limit: usize) -> Chunked {
    let mut parts = split(text, limit);
    if parts.len() == 1 {
        Chunked::Single(parts.remove(0))
    } else {
        Chunked::Many(parts)
    }
}

/// Like [`chunk`] but always returns a list
pub fn split(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut parts = Vec::new();
    let mut rest = text;

    while rest.chars().count() > limit {
        let hard_cut = rest
            .char_indices()
            .nth(limit)
            .map_or(rest.len(), |(idx, _)| idx);
        let cut = rest[..hard_cut]
            .rfind('\n')
            .map_or(hard_cut, |newline| newline + 1);
        parts.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}
