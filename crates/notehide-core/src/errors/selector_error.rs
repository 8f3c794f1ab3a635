/// Malformed or unsupported selector queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {found:?} at offset {offset} in selector {selector:?}")]
    UnexpectedChar {
        selector: String,
        offset: usize,
        found: char,
    },

    #[error("unterminated {what} in selector {selector:?}")]
    Unterminated { selector: String, what: &'static str },

    #[error("unsupported selector feature {feature:?} in {selector:?}")]
    Unsupported { selector: String, feature: String },
}
