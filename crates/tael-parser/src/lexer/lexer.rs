//! The Tael lexer.
//!
//! A single left-to-right pass over the source text. Multi-character
//! operators are resolved with one character of lookahead; numbers,
//! strings, and identifiers are scanned by dedicated methods.
//!
//! Two pieces of state persist across tokens:
//!
//! - the kind of the previously emitted token, which decides whether a `-`
//!   begins a sign-prefixed number (only after a binary operator, `=`, `(`,
//!   or `,` is a sign prefix syntactically possible);
//! - the set of class names introduced by `class` declarations, which
//!   promotes later occurrences of those identifiers to [`TokenKind::ClassType`].
//!
//! Both are instance fields, so every [`Lexer`] (and every [`tokenize`]
//! call) starts clean.

use rustc_hash::FxHashSet;

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::error::LexError;
use super::token::{Token, TokenKind, is_primitive_type, lookup_keyword};

/// Lexer for Tael source code.
pub struct Lexer<'src> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
    /// Kind of the previously emitted token.
    last_kind: Option<TokenKind>,
    /// Identifiers introduced by a `class` keyword so far.
    class_names: FxHashSet<String>,
}

impl<'src> Lexer<'src> {
    /// Create a lexer over `source` with no known class names.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            last_kind: None,
            class_names: FxHashSet::default(),
        }
    }

    /// Scan and return the next token.
    ///
    /// Returns [`TokenKind::Eof`] at the end of input, and keeps returning
    /// it on further calls.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan_token()?;
        self.last_kind = Some(token.kind);
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        if self.cursor.is_eof() {
            return Ok(Token::new(TokenKind::Eof, ""));
        }

        let start = self.cursor.offset();
        match self.cursor.peek().unwrap() {
            '/' => self.scan_slash(start),
            '"' => self.scan_string(),
            '\'' => Ok(self.scan_char()),
            c if c.is_ascii_digit() => Ok(self.scan_number(start, false)),
            '.' if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                Ok(self.scan_number(start, false))
            }
            c if is_ident_start(c) => Ok(self.scan_identifier(start)),
            _ => self.scan_operator(start),
        }
    }

    fn skip_whitespace(&mut self) {
        while self
            .cursor
            .check(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        {
            self.cursor.advance();
        }
    }

    /// `/` begins either a line comment or the division operator.
    fn scan_slash(&mut self, start: usize) -> Result<Token, LexError> {
        self.cursor.advance();
        if self.cursor.eat('/') {
            while let Some(c) = self.cursor.peek() {
                if c == '\n' {
                    break;
                }
                self.cursor.advance();
            }
            // Comment produces no token; scan whatever follows.
            return self.scan_token();
        }
        Ok(Token::new(TokenKind::Slash, self.cursor.slice_from(start)))
    }

    /// Scan a string literal. The token text is the content between the
    /// quotes, kept verbatim; escape sequences are not interpreted.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        let start = self.cursor.offset();
        loop {
            match self.cursor.peek() {
                None => return Err(LexError::UnterminatedString),
                Some('\n' | '\r') => return Err(LexError::NewlineInString),
                Some('"') => {
                    let text = self.cursor.slice_from(start);
                    let token = Token::new(TokenKind::StringLiteral, text);
                    self.cursor.advance();
                    return Ok(token);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Scan a character literal: one character, or two when the first is a
    /// backslash. The closing quote is assumed and consumed without being
    /// checked.
    fn scan_char(&mut self) -> Token {
        self.cursor.advance();
        let start = self.cursor.offset();
        if let Some(c) = self.cursor.advance() {
            if c == '\\' {
                self.cursor.advance();
            }
        }
        let text = self.cursor.slice_from(start);
        let token = Token::new(TokenKind::CharLiteral, text);
        self.cursor.advance();
        token
    }

    /// Scan a number: digits, optionally followed by `.` and more digits.
    /// `start` may point at a `-` or `.` already consumed into the lexeme.
    fn scan_number(&mut self, start: usize, negative: bool) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        let mut is_float = false;
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            is_float = true;
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else if negative {
            TokenKind::NegativeIntLiteral
        } else {
            TokenKind::IntLiteral
        };
        Token::new(kind, self.cursor.slice_from(start))
    }

    /// Scan an identifier and classify it.
    fn scan_identifier(&mut self, start: usize) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let lexeme = self.cursor.slice_from(start);

        let kind = if lexeme == "true" || lexeme == "false" {
            TokenKind::BoolLiteral
        } else if let Some(keyword) = lookup_keyword(lexeme) {
            keyword
        } else if lexeme == "String" {
            TokenKind::ClassType
        } else if is_primitive_type(lexeme) {
            TokenKind::PrimitiveType
        } else if self.last_kind == Some(TokenKind::Class) {
            // The word after `class` names a new type; remember it.
            self.class_names.insert(lexeme.to_string());
            TokenKind::ClassType
        } else if self.class_names.contains(lexeme) {
            TokenKind::ClassType
        } else {
            TokenKind::Identifier
        };

        Token::new(kind, lexeme)
    }

    /// Scan an operator or punctuation token.
    fn scan_operator(&mut self, start: usize) -> Result<Token, LexError> {
        use TokenKind::*;

        let c = self.cursor.advance().unwrap();
        let kind = match c {
            ';' => Semicolon,
            ',' => Comma,
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            '~' => Tilde,
            '.' => Dot,

            '<' => {
                if self.cursor.eat('<') {
                    LessLess
                } else {
                    Less
                }
            }
            '>' => {
                if self.cursor.eat('>') {
                    GreaterGreater
                } else {
                    Greater
                }
            }
            '+' => {
                if self.cursor.eat('+') {
                    PlusPlus
                } else {
                    Plus
                }
            }
            '-' => {
                if self.cursor.eat('>') {
                    Arrow
                } else if self.sign_prefix_possible()
                    && self.cursor.check(|c| c.is_ascii_digit())
                {
                    return Ok(self.scan_number(start, true));
                } else if self.cursor.eat('-') {
                    MinusMinus
                } else {
                    Minus
                }
            }
            '*' => {
                if self.cursor.eat('*') {
                    StarStar
                } else {
                    Star
                }
            }
            '%' => Percent,
            ':' => {
                if self.cursor.eat(':') {
                    ColonColon
                } else {
                    Colon
                }
            }
            '&' => {
                if self.cursor.eat('&') {
                    AmpAmp
                } else {
                    Amp
                }
            }
            '|' => {
                if self.cursor.eat('|') {
                    PipePipe
                } else {
                    Pipe
                }
            }
            '=' => {
                if self.cursor.eat('=') {
                    EqualEqual
                } else {
                    Equal
                }
            }
            '!' => {
                if self.cursor.eat('=') {
                    BangEqual
                } else {
                    Bang
                }
            }

            _ => return Err(LexError::UnrecognizedCharacter(c)),
        };

        Ok(Token::new(kind, self.cursor.slice_from(start)))
    }

    /// A sign prefix is only possible where a value is expected: after a
    /// binary operator, `=`, `(`, or `,`.
    fn sign_prefix_possible(&self) -> bool {
        self.last_kind
            .is_some_and(TokenKind::allows_sign_prefix)
    }
}

/// Tokenize `source` into a list terminated by an [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let at_end = token.kind == TokenKind::Eof;
        tokens.push(token);
        if at_end {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \t\r\n  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn stream_ends_with_single_eof() {
        let tokens = tokenize("int32 x = 1;").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        let eofs = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Eof)
            .count();
        assert_eq!(eofs, 1);
    }

    #[test]
    fn identifiers_and_keywords() {
        assert_eq!(
            kinds("foo _bar baz123 return if namespace"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Return,
                TokenKind::If,
                TokenKind::Namespace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_still_identifier() {
        assert_eq!(
            texts("iffy classy"),
            vec![
                (TokenKind::Identifier, "iffy".to_string()),
                (TokenKind::Identifier, "classy".to_string()),
            ]
        );
    }

    #[test]
    fn primitive_types_and_string_class() {
        assert_eq!(
            kinds("int32 uint8 double void auto char String"),
            vec![
                TokenKind::PrimitiveType,
                TokenKind::PrimitiveType,
                TokenKind::PrimitiveType,
                TokenKind::PrimitiveType,
                TokenKind::PrimitiveType,
                TokenKind::PrimitiveType,
                TokenKind::ClassType,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn bool_literals() {
        assert_eq!(
            texts("true false"),
            vec![
                (TokenKind::BoolLiteral, "true".to_string()),
                (TokenKind::BoolLiteral, "false".to_string()),
            ]
        );
    }

    #[test]
    fn class_names_are_remembered() {
        let tokens = tokenize("class Foo { } Foo f = Foo;").unwrap();
        let foo_kinds: Vec<TokenKind> = tokens
            .iter()
            .filter(|t| t.text == "Foo")
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            foo_kinds,
            vec![TokenKind::ClassType, TokenKind::ClassType, TokenKind::ClassType]
        );
    }

    #[test]
    fn class_names_do_not_leak_between_lexers() {
        let _ = tokenize("class Foo { }").unwrap();
        let tokens = tokenize("Foo f;").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn unknown_word_before_class_declaration_is_identifier() {
        let tokens = tokenize("Foo x; class Foo { }").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn integer_and_float_literals() {
        assert_eq!(
            texts("42 0 3.14 .5"),
            vec![
                (TokenKind::IntLiteral, "42".to_string()),
                (TokenKind::IntLiteral, "0".to_string()),
                (TokenKind::FloatLiteral, "3.14".to_string()),
                (TokenKind::FloatLiteral, ".5".to_string()),
            ]
        );
    }

    #[test]
    fn integer_dot_without_digits_is_member_access() {
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn negative_literal_after_equals() {
        assert_eq!(
            texts("x = -3;"),
            vec![
                (TokenKind::Identifier, "x".to_string()),
                (TokenKind::Equal, "=".to_string()),
                (TokenKind::NegativeIntLiteral, "-3".to_string()),
                (TokenKind::Semicolon, ";".to_string()),
            ]
        );
    }

    #[test]
    fn negative_literal_after_paren_comma_and_operator() {
        assert_eq!(
            kinds("f(-1, -2)"),
            vec![
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::NegativeIntLiteral,
                TokenKind::Comma,
                TokenKind::NegativeIntLiteral,
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("1 + -2"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Plus,
                TokenKind::NegativeIntLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn minus_binds_as_operator_elsewhere() {
        assert_eq!(
            kinds("a - 3"),
            vec![
                TokenKind::Identifier,
                TokenKind::Minus,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
        // At the start of input there is no previous token.
        assert_eq!(
            kinds("-3"),
            vec![TokenKind::Minus, TokenKind::IntLiteral, TokenKind::Eof]
        );
    }

    #[test]
    fn negative_float_literal() {
        assert_eq!(
            texts("x = -1.5;")[2],
            (TokenKind::FloatLiteral, "-1.5".to_string())
        );
    }

    #[test]
    fn minus_before_identifier_stays_minus() {
        assert_eq!(
            kinds("(-x)"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Minus,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn arrow_and_decrement() {
        assert_eq!(
            kinds("-> -- -"),
            vec![
                TokenKind::Arrow,
                TokenKind::MinusMinus,
                TokenKind::Minus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("= == != < > << >> + * / ** % & && | || . :: ++ ! ~ : ; ,"),
            vec![
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::LessLess,
                TokenKind::GreaterGreater,
                TokenKind::Plus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::StarStar,
                TokenKind::Percent,
                TokenKind::Amp,
                TokenKind::AmpAmp,
                TokenKind::Pipe,
                TokenKind::PipePipe,
                TokenKind::Dot,
                TokenKind::ColonColon,
                TokenKind::PlusPlus,
                TokenKind::Bang,
                TokenKind::Tilde,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn line_comments_produce_no_tokens() {
        assert_eq!(
            kinds("a // comment with = and ;\nb"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(kinds("// only a comment"), vec![TokenKind::Eof]);
    }

    #[test]
    fn slash_alone_is_division() {
        assert_eq!(
            kinds("a / b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Slash,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_keeps_inner_text() {
        assert_eq!(
            texts(r#""hi" """#),
            vec![
                (TokenKind::StringLiteral, "hi".to_string()),
                (TokenKind::StringLiteral, "".to_string()),
            ]
        );
    }

    #[test]
    fn string_escapes_are_verbatim() {
        // No escape processing: the backslash does not shield the quote.
        assert_eq!(
            texts(r#""a\n""#),
            vec![(TokenKind::StringLiteral, "a\\n".to_string())]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert_eq!(tokenize(r#""oops"#), Err(LexError::UnterminatedString));
    }

    #[test]
    fn string_with_line_break_is_an_error() {
        assert_eq!(tokenize("\"a\nb\""), Err(LexError::NewlineInString));
    }

    #[test]
    fn char_literal() {
        assert_eq!(
            texts("'a'"),
            vec![(TokenKind::CharLiteral, "a".to_string())]
        );
    }

    #[test]
    fn char_literal_with_escape_keeps_both_characters() {
        assert_eq!(
            texts(r"'\n'"),
            vec![(TokenKind::CharLiteral, "\\n".to_string())]
        );
    }

    #[test]
    fn char_literal_closing_quote_is_not_verified() {
        // The scanner advances past where the quote should be.
        assert_eq!(
            kinds("'ab"),
            vec![TokenKind::CharLiteral, TokenKind::Eof]
        );
    }

    #[test]
    fn unrecognized_character_is_an_error() {
        assert_eq!(tokenize("a $ b"), Err(LexError::UnrecognizedCharacter('$')));
    }

    #[test]
    fn declaration_statement() {
        assert_eq!(
            kinds("mutable int32~ x = 1;"),
            vec![
                TokenKind::Mutable,
                TokenKind::PrimitiveType,
                TokenKind::Tilde,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn function_header() {
        assert_eq!(
            kinds("int32 add(int32 a, int32 b) { return a + b; }"),
            vec![
                TokenKind::PrimitiveType,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::PrimitiveType,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::PrimitiveType,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::Return,
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stream_always_terminates_in_one_eof(src in "[ -~\t\n]{0,64}") {
                if let Ok(tokens) = tokenize(&src) {
                    prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
                    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
                    prop_assert_eq!(eofs, 1);
                }
            }

            #[test]
            fn words_lex_as_a_single_token(word in "[a-z_][a-z0-9_]{0,12}") {
                let tokens = tokenize(&word).unwrap();
                prop_assert_eq!(tokens.len(), 2);
                prop_assert_eq!(tokens[1].kind, TokenKind::Eof);
            }
        }
    }
}
