use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `{` whose matching `}` never appears before end of input.
    #[error("unterminated block '{key}' opened near line {line}")]
    Unterminated { key: String, line: usize },
}

/// An entry that `serialize` cannot write so that it reads back unchanged,
/// because it would start a comment, end the line early, or vanish.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("value {value:?} of '{path}' would not read back as written")]
    Value { path: String, value: String },

    #[error("key '{path}' would not read back as written")]
    Key { path: String },
}
