use super::cursor::Cursor;
use super::errors::{LexError, LexErrorKind};
use super::numbers::normalize_number_literal;
use super::token::{Token, TokenKind};

use tracing::{debug, trace};

/// Kind and literal of a scanned token; the lexeme comes from the cursor.
type Scanned = (TokenKind, Option<String>);

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer from source.
    pub fn new(source: &'src [u8]) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            errors: vec![],
        }
    }

    /// Returns the next token. Keeps returning EOF once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        loop {
            // Get rid of whitespace.
            self.cursor.take_while(is_whitespace);

            let start_idx = self.cursor.byte_pos();
            let line = self.cursor.line_no();

            if let Some((kind, literal)) = self.lex_token(start_idx, line) {
                let lexeme = self.cursor.slice(start_idx, self.cursor.byte_pos());
                trace!(%kind, %lexeme, line, "scanned token");
                return Token::new(kind, lexeme, literal, line);
            }
        }
    }

    /// Lexical errors recorded so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Hands over the lexical errors recorded since the last call.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Scans the whole input. The returned tokens end with EOF.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = vec![];
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        debug!(
            tokens = tokens.len(),
            errors = self.errors.len(),
            "tokenized source"
        );
        (tokens, self.errors)
    }

    /// Returns `None` for input that does not produce a token (comments and
    /// lexical errors).
    fn lex_token(&mut self, start_idx: usize, line: usize) -> Option<Scanned> {
        let byte = match self.cursor.take() {
            Some(b) => b,
            None => return Some((TokenKind::EndOfFile, None)),
        };

        let kind = match byte {
            // Single-character tokens.
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,

            // Slash can either be comment or division.
            b'/' => {
                if self.cursor.take_if(b'/') {
                    self.cursor.take_until(|b| b == b'\n');
                    return None;
                }
                TokenKind::Slash
            }

            // Potentially two character tokens.
            b'=' => self.look_for_eq_sign(TokenKind::Equal, TokenKind::EqualEqual),
            b'<' => self.look_for_eq_sign(TokenKind::Less, TokenKind::LessEqual),
            b'>' => self.look_for_eq_sign(TokenKind::Greater, TokenKind::GreaterEqual),
            b'!' => self.look_for_eq_sign(TokenKind::Bang, TokenKind::BangEqual),

            b'"' => return self.lex_string(start_idx, line),
            _ if is_digit(byte) => return Some(self.lex_number(start_idx)),
            _ if is_identifier_start(byte) => return Some(self.lex_identifier_or_kw(start_idx)),

            _ => {
                self.errors.push(LexError::new(
                    line,
                    LexErrorKind::UnexpectedCharacter(char::from(byte)),
                ));
                return None;
            }
        };

        Some((kind, None))
    }

    /// Checks if next byte is '='. If so, consume it and return t2.
    /// Otherwise, return t1.
    fn look_for_eq_sign(&mut self, t1: TokenKind, t2: TokenKind) -> TokenKind {
        if self.cursor.take_if(b'=') {
            t2
        } else {
            t1
        }
    }

    /// Scans up to the closing '"'. start_idx is the opening quote.
    fn lex_string(&mut self, start_idx: usize, line: usize) -> Option<Scanned> {
        self.cursor.take_until(|b| b == b'"');

        if self.cursor.is_at_end() {
            self.errors
                .push(LexError::new(line, LexErrorKind::UnterminatedString));
            return None;
        }

        let body = self.cursor.slice(start_idx + 1, self.cursor.byte_pos());
        // Closing quote.
        self.cursor.take();
        Some((TokenKind::String, Some(body)))
    }

    fn lex_number(&mut self, start_idx: usize) -> Scanned {
        self.cursor.take_while(is_digit);

        // A '.' only belongs to the number when a digit follows it.
        if self.cursor.peek() == Some(b'.') && self.cursor.peek_next().map_or(false, is_digit) {
            self.cursor.take();
            self.cursor.take_while(is_digit);
        }

        let lexeme = self.cursor.slice(start_idx, self.cursor.byte_pos());
        (TokenKind::Number, Some(normalize_number_literal(&lexeme)))
    }

    fn lex_identifier_or_kw(&mut self, start_idx: usize) -> Scanned {
        self.cursor.take_while(is_identifier_char);

        let ident = self.cursor.slice(start_idx, self.cursor.byte_pos());
        let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Identifier);
        (kind, None)
    }

    /// Returns an iterator version of lexer.
    pub fn iter(self) -> LexerIterator<'src> {
        LexerIterator { lexer: self }
    }
}

pub struct LexerIterator<'src> {
    lexer: Lexer<'src>,
}

impl<'src> LexerIterator<'src> {
    pub fn errors(&self) -> &[LexError] {
        self.lexer.errors()
    }
}

impl<'src> Iterator for LexerIterator<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next_token();

        if token.is_eof() {
            return None;
        }

        Some(token)
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

fn is_identifier_start(byte: u8) -> bool {
    byte == b'_' || char::from(byte).is_alphabetic()
}

fn is_identifier_char(byte: u8) -> bool {
    is_identifier_start(byte) || is_digit(byte)
}
