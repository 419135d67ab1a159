//! Lossless SQL clause tokenizer.

use std::fmt;

use crate::cursor::ClauseCursor;
use crate::error::{ClauseError, Result};
use crate::token::{Token, TokenKind};

/// A tokenizer that splits SQL text into clause tokens.
///
/// Every byte of the input ends up in exactly one token, so concatenating
/// the raw text of the output reconstructs the input. Keywords inside
/// string literals or comments stay inside their literal/comment token and
/// are never split out.
pub struct ClauseTokenizer<'a> {
    /// The input SQL text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> ClauseTokenizer<'a> {
    /// Creates a new tokenizer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Creates a token holding the text scanned since `start`.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, &self.input[self.start..self.pos])
    }

    /// Scans a run of whitespace.
    fn scan_whitespace(&mut self) -> Token {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        self.make_token(TokenKind::Whitespace)
    }

    /// Scans a `--` comment. The terminating newline is not part of the
    /// comment; it becomes the next whitespace token.
    fn scan_line_comment(&mut self) -> Token {
        self.advance(); // -
        self.advance(); // -
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        self.make_token(TokenKind::LineComment)
    }

    /// Scans a `/* ... */` comment.
    fn scan_block_comment(&mut self) -> Result<Token> {
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(self.make_token(TokenKind::BlockComment));
                }
                Some(_) => {}
                None => {
                    return Err(ClauseError::UnterminatedBlockComment {
                        position: self.start,
                    })
                }
            }
        }
    }

    /// Scans a quoted string literal. A doubled quote inside the same quote
    /// style is an escape, not a terminator.
    fn scan_string(&mut self, quote: char) -> Result<Token> {
        self.advance(); // opening quote
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                    } else {
                        self.advance(); // closing quote
                        return Ok(self.make_token(TokenKind::StringLiteral));
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Err(ClauseError::UnterminatedString {
                        position: self.start,
                    })
                }
            }
        }
    }

    /// Scans a bare word. `.` is a continuation character, so a dotted
    /// object name like `link.sch.foo` forms a single token.
    fn scan_word(&mut self) -> Token {
        while self.peek().is_some_and(is_word_continue) {
            self.advance();
        }
        self.make_token(TokenKind::Word)
    }

    /// Tokenizes the entire input.
    ///
    /// # Errors
    ///
    /// Returns [`ClauseError`] when the input ends inside a string literal
    /// or block comment.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            self.start = self.pos;
            let token = match c {
                c if c.is_whitespace() => self.scan_whitespace(),
                '-' if self.peek_next() == Some('-') => self.scan_line_comment(),
                '/' if self.peek_next() == Some('*') => self.scan_block_comment()?,
                '\'' | '"' => self.scan_string(c)?,
                c if is_word_start(c) => self.scan_word(),
                _ => {
                    self.advance();
                    self.make_token(TokenKind::Punctuation)
                }
            };
            tokens.push(token);
        }
        Ok(tokens)
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '$' | '#')
}

/// An ordered token sequence that reconstructs its source text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseSequence {
    tokens: Vec<Token>,
}

impl ClauseSequence {
    /// Tokenizes `input` into a clause sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ClauseError`] when the input ends inside a string literal
    /// or block comment.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            tokens: ClauseTokenizer::new(input).tokenize()?,
        })
    }

    /// Returns the tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true when the sequence holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns a cursor positioned before the first token.
    pub fn cursor(&mut self) -> ClauseCursor<'_> {
        ClauseCursor::new(&mut self.tokens)
    }
}

impl fmt::Display for ClauseSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}
