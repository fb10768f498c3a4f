use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelfileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unterminated quote: expecting {close}")]
    UnterminatedQuote { close: &'static str },

    #[error("token too long: a single line exceeds {limit} bytes")]
    TokenTooLong { limit: usize },

    #[error("missing value for parameter `{fragment}` on line {line}")]
    MissingParameterValue { line: usize, fragment: String },

    #[error(
        "deprecated command on line {line}: EMBED is no longer supported, use the /embed API endpoint instead"
    )]
    DeprecatedCommand { line: usize },

    #[error("no FROM line for the model was specified")]
    MissingFrom,
}

pub type Result<T> = std::result::Result<T, ModelfileError>;
