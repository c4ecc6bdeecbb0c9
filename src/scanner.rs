use crate::driver::SyntaxError;
use crate::token::{Literal, Token};
use crate::token_type::TokenType;
use crate::token_type::TokenType::*;

use std::collections::HashMap;
use std::str;

trait Alpha {
    fn is_ascii_identifier(&self) -> bool;
}

impl Alpha for u8 {
    fn is_ascii_identifier(&self) -> bool {
        self.is_ascii_alphanumeric() || *self == b'_'
    }
}

pub struct Scanner {
    source: Vec<u8>,
    pub tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,

    keywords: HashMap<&'static str, TokenType>,
}

macro_rules! match_ {
    ($self:ident, $expected:literal) => {
        if $self.is_at_end() {
            false
        } else {
            if !matches!($self.source[$self.current], $expected) {
                false
            } else {
                $self.current += 1;
                true
            }
        }
    };
}

impl Scanner {
    pub fn new(source: Vec<u8>) -> Self {
        Scanner {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            keywords: HashMap::from([
                ("and", AND),
                ("class", CLASS),
                ("else", ELSE),
                ("false", FALSE),
                ("for", FOR),
                ("fun", FUN),
                ("if", IF),
                ("nil", NIL),
                ("or", OR),
                ("print", PRINT),
                ("return", RETURN),
                ("super", SUPER),
                ("this", THIS),
                ("true", TRUE),
                ("var", VAR),
                ("while", WHILE),
            ]),
        }
    }

    pub fn scan_tokens(&mut self) -> Result<(), SyntaxError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.tokens
            .push(Token::new(EOF, Vec::new(), Literal::NIL, self.line));
        Ok(())
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), SyntaxError> {
        let c = self.advance();
        match c {
            b'(' => self.add_token(LEFT_PAREN),
            b')' => self.add_token(RIGHT_PAREN),
            b'{' => self.add_token(LEFT_BRACE),
            b'}' => self.add_token(RIGHT_BRACE),
            b',' => self.add_token(COMMA),
            b'.' => self.add_token(DOT),
            b'-' => self.add_token(MINUS),
            b'+' => self.add_token(PLUS),
            b';' => self.add_token(SEMICOLON),
            b'*' => self.add_token(STAR),
            b'!' => {
                let matches = match_!(self, b'=');
                self.add_token(if matches { BANG_EQUAL } else { BANG })
            }
            b'=' => {
                let matches = match_!(self, b'=');
                self.add_token(if matches { EQUAL_EQUAL } else { EQUAL })
            }
            b'<' => {
                let matches = match_!(self, b'=');
                self.add_token(if matches { LESS_EQUAL } else { LESS })
            }
            b'>' => {
                let matches = match_!(self, b'=');
                self.add_token(if matches { GREATER_EQUAL } else { GREATER })
            }
            b'/' => {
                let matches = match_!(self, b'/');
                // a comment -- //
                if matches {
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(SLASH);
                }
            }
            // ignore whitespace
            b' ' | b'\r' | b'\t' => {}
            b'\n' => self.line += 1,
            b'"' => return self.string(),
            // numbers
            b'0'..=b'9' => self.number(),
            // identifiers (alpha)
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.identifier(),
            _ => {
                return Err(SyntaxError::Scan {
                    line: self.line,
                    message: String::from("Unexpected character."),
                });
            }
        }
        Ok(())
    }

    fn advance(&mut self) -> u8 {
        let res = self.source[self.current];
        self.current += 1;
        res
    }

    fn add_token_literal(&mut self, type_: TokenType, literal: Literal) {
        let text = &self.source[self.start..self.current];
        self.tokens
            .push(Token::new(type_, text.to_vec(), literal, self.line));
    }

    fn add_token(&mut self, type_: TokenType) {
        self.add_token_literal(type_, Literal::NIL);
    }

    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            return b'\0';
        }
        self.source[self.current]
    }

    fn string(&mut self) -> Result<(), SyntaxError> {
        // read till closing quote
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(SyntaxError::Scan {
                line: self.line,
                message: String::from("Unterminated string"),
            });
        }
        // the closing "
        self.advance();
        // Trim the surrounding quotes.
        let value = str::from_utf8(&self.source[self.start + 1..self.current - 1])
            .expect("Invalid UTF8")
            .to_string();
        self.add_token_literal(STRING, Literal::STRING(value));
        Ok(())
    }

    #[inline(always)]
    fn is_digit(c: u8) -> bool {
        matches!(c, b'0'..=b'9')
    }

    fn number(&mut self) {
        while Scanner::is_digit(self.peek()) {
            self.advance();
        }
        // look for fractional part .
        if self.peek() == b'.' && Scanner::is_digit(self.peek_next()) {
            self.advance();
            while Scanner::is_digit(self.peek()) {
                self.advance();
            }
        }
        self.add_token_literal(
            NUMBER,
            Literal::NUMBER(
                str::from_utf8(&self.source[self.start..self.current])
                    .expect("Invalid UTF8")
                    .parse()
                    .expect("Invalid float"),
            ),
        );
    }

    fn peek_next(&mut self) -> u8 {
        if self.current + 1 >= self.source.len() {
            return b'\0';
        }
        self.source[self.current + 1]
    }

    fn identifier(&mut self) {
        while self.peek().is_ascii_identifier() {
            self.advance();
        }
        let text = &self.source[self.start..self.current];
        let token_type = self
            .keywords
            .get(&str::from_utf8(text).expect("invalid unicode"))
            .cloned()
            .unwrap_or(IDENTIFIER);
        self.add_token(token_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source.as_bytes().to_vec());
        scanner.scan_tokens().expect("scan failed");
        scanner.tokens
    }

    #[test]
    fn punctuation_and_operators() {
        let tokens = scan("(){},.-+;*/! != = == < <= > >=");
        let types: Vec<TokenType> = tokens.iter().map(|t| t.type_).collect();
        assert_eq!(
            types,
            vec![
                LEFT_PAREN,
                RIGHT_PAREN,
                LEFT_BRACE,
                RIGHT_BRACE,
                COMMA,
                DOT,
                MINUS,
                PLUS,
                SEMICOLON,
                STAR,
                SLASH,
                BANG,
                BANG_EQUAL,
                EQUAL,
                EQUAL_EQUAL,
                LESS,
                LESS_EQUAL,
                GREATER,
                GREATER_EQUAL,
                EOF,
            ]
        );
    }

    #[test]
    fn literals() {
        let tokens = scan("12.5 \"hello\" ident");
        assert_eq!(tokens[0].literal, Literal::NUMBER(12.5));
        assert_eq!(tokens[1].literal, Literal::STRING(String::from("hello")));
        assert_eq!(tokens[1].lexeme, "\"hello\"");
        assert_eq!(tokens[2].type_, IDENTIFIER);
        assert_eq!(tokens[2].lexeme, "ident");
    }

    #[test]
    fn keywords_are_not_identifiers() {
        let tokens = scan("and or nil this super class andx");
        let types: Vec<TokenType> = tokens.iter().map(|t| t.type_).collect();
        assert_eq!(
            types,
            vec![AND, OR, NIL, THIS, SUPER, CLASS, IDENTIFIER, EOF]
        );
    }

    #[test]
    fn comments_and_line_counting() {
        let tokens = scan("1 // ignored to end of line\n2");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string() {
        let mut scanner = Scanner::new(b"\"abc".to_vec());
        assert!(scanner.scan_tokens().is_err());
    }

    #[test]
    fn unexpected_character() {
        let mut scanner = Scanner::new(b"@".to_vec());
        let err = scanner.scan_tokens().unwrap_err();
        assert_eq!(err.to_string(), "[line 1] Error: Unexpected character.");
    }
}
