use thiserror::Error;

/// An error produced during tokenization.
///
/// Lexing is fatal on the first error; no recovery is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A string literal was opened but never closed.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A string literal contains a raw line break.
    #[error("string literal contains a line break")]
    NewlineInString,

    /// A character with no meaning in the language.
    #[error("unrecognized character {0:?}")]
    UnrecognizedCharacter(char),
}
