//! Error type for the command-line driver.

use thiserror::Error;

use tael::{LexError, ParseError};

/// Everything that can go wrong while driving the front-end from the
/// command line.
#[derive(Error, Debug)]
pub enum CliError {
    /// The source file could not be read.
    #[error("cannot open '{path}': {source}")]
    Open {
        /// The path that was tried.
        path: String,
        /// The underlying IO failure.
        source: std::io::Error,
    },

    /// Tokenization failed.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_names_the_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Open {
            path: "missing.tl".to_string(),
            source: io_err,
        };
        assert_eq!(err.to_string(), "cannot open 'missing.tl': file not found");
    }

    #[test]
    fn lex_error_conversion() {
        let err: CliError = LexError::UnterminatedString.into();
        assert!(matches!(err, CliError::Lex(_)));
        assert_eq!(err.to_string(), "unterminated string literal");
    }

    #[test]
    fn parse_error_conversion() {
        let err: CliError = ParseError::InvalidIfCondition.into();
        assert!(matches!(err, CliError::Parse(_)));
    }
}
