use super::token_type::TokenType;
use std::str;

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    STRING(String),
    NUMBER(f64),
    BOOL(bool),
    NIL,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub type_: TokenType,
    pub lexeme: String,
    pub literal: Literal,
    pub line: usize,
}

impl Token {
    pub fn new(type_: TokenType, lexeme: Vec<u8>, literal: Literal, line: usize) -> Token {
        let s = str::from_utf8(&lexeme).expect("Invalid UTF8").to_string();
        Token {
            type_,
            lexeme: s,
            literal,
            line,
        }
    }

    /// Location description used in error reports.
    pub fn location(&self) -> String {
        if matches!(self.type_, TokenType::EOF) {
            String::from("at end")
        } else {
            format!("at '{}'", self.lexeme)
        }
    }
}

impl Literal {
    /// Canonical textual form of a constant.
    pub fn to_string(&self) -> String {
        match self {
            Literal::STRING(st) => st.to_owned(),
            Literal::NUMBER(num) => {
                let mut text = format!("{}", num);
                if text.ends_with(".0") {
                    text = String::from(text.strip_suffix(".0").unwrap())
                }
                text
            }
            Literal::BOOL(bl) => format!("{}", bl),
            Literal::NIL => String::from("nil"),
        }
    }
}
