use crate::driver::{Driver, SyntaxError};
use crate::expr::*;
use crate::token::*;
use crate::token_type::TokenType::*;

/// Recursive-descent parser over the scanned tokens. Produces exactly one
/// expression tree; statements are not part of this grammar.
pub struct Parser<'a> {
    driver: &'a mut Driver,
    tokens: Vec<Token>,
    current: usize,
}

type ExprResult = Result<Expr, SyntaxError>;

macro_rules! check {
    ($self:ident, $types:pat) => {
        if $self.is_at_end() {
            false
        } else {
            matches!(&$self.peek().type_, $types)
        }
    };
}

macro_rules! match_ {
    ($self:ident, $types:pat) => {
        if check!($self, $types) {
            $self.advance();
            true
        } else {
            false
        }
    };
}

macro_rules! consume {
    ($self:ident, $type_:pat, $message:expr) => {
        if check!($self, $type_) {
            Ok($self.advance())
        } else {
            Err(Parser::error($self.peek(), String::from($message)))
        }
    };
}

impl Parser<'_> {
    pub fn new(driver: &mut Driver, tokens: Vec<Token>) -> Parser {
        Parser {
            driver,
            tokens,
            current: 0,
        }
    }

    pub fn parse(&mut self) -> ExprResult {
        let expr = self.expression()?;
        if !self.is_at_end() {
            return Err(Parser::error(
                self.peek(),
                String::from("Expect end of expression."),
            ));
        }
        Ok(expr)
    }

    fn expression(&mut self) -> ExprResult {
        self.assignment()
    }

    fn assignment(&mut self) -> ExprResult {
        let expr = self.or()?;
        if match_!(self, EQUAL) {
            let equals = self.previous();
            let value = self.assignment()?;
            match expr {
                Expr::Variable { name } => {
                    return Ok(Expr::Assign {
                        name,
                        value: Box::new(value),
                    });
                }
                Expr::Get { object, name } => {
                    return Ok(Expr::Set {
                        object,
                        name,
                        value: Box::new(value),
                    });
                }
                _ => self.driver.error(Parser::error(
                    &equals,
                    String::from("Invalid assignment target."),
                )),
            }
        }
        Ok(expr)
    }

    fn or(&mut self) -> ExprResult {
        let mut expr = self.and()?;
        while match_!(self, OR) {
            let operator = self.previous();
            let right = self.and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn and(&mut self) -> ExprResult {
        let mut expr = self.equality()?;
        while match_!(self, AND) {
            let operator = self.previous();
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ExprResult {
        let mut expr = self.comparison()?;
        while match_!(self, BANG_EQUAL | EQUAL_EQUAL) {
            let operator = self.previous();
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ExprResult {
        let mut expr: Expr = self.term()?;
        while match_!(self, GREATER | GREATER_EQUAL | LESS | LESS_EQUAL) {
            let operator = self.previous();
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn term(&mut self) -> ExprResult {
        let mut expr: Expr = self.factor()?;
        while match_!(self, MINUS | PLUS) {
            let operator = self.previous();
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ExprResult {
        let mut expr: Expr = self.unary()?;
        while match_!(self, SLASH | STAR) {
            let operator = self.previous();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ExprResult {
        if match_!(self, BANG | MINUS) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }
        self.call()
    }

    fn finish_call(&mut self, callee: Expr) -> ExprResult {
        let mut arguments = Vec::<Expr>::new();
        if !check!(self, RIGHT_PAREN) {
            loop {
                if arguments.len() >= 255 {
                    self.driver.error(Parser::error(
                        self.peek(),
                        String::from("Can't have more than 255 arguments."),
                    ));
                }
                arguments.push(self.expression()?);
                if !match_!(self, COMMA) {
                    break;
                }
            }
        }
        let paren = consume!(self, RIGHT_PAREN, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn call(&mut self) -> ExprResult {
        let mut expr = self.primary()?;

        loop {
            if match_!(self, LEFT_PAREN) {
                expr = self.finish_call(expr)?;
            } else if match_!(self, DOT) {
                let name = consume!(self, IDENTIFIER, "Expect property name after '.'.")?;
                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> ExprResult {
        if match_!(self, FALSE) {
            return Ok(Expr::Literal(Literal::BOOL(false)));
        }
        if match_!(self, TRUE) {
            return Ok(Expr::Literal(Literal::BOOL(true)));
        }
        if match_!(self, NIL) {
            return Ok(Expr::Literal(Literal::NIL));
        }
        if match_!(self, NUMBER | STRING) {
            return Ok(Expr::Literal(self.previous().literal));
        }
        if match_!(self, SUPER) {
            let keyword = self.previous();
            consume!(self, DOT, "Expect '.' after 'super'.")?;
            let method = consume!(self, IDENTIFIER, "Expect superclass method name.")?;
            return Ok(Expr::Super { keyword, method });
        }
        if match_!(self, THIS) {
            return Ok(Expr::This {
                keyword: self.previous(),
            });
        }
        if match_!(self, IDENTIFIER) {
            return Ok(Expr::Variable {
                name: self.previous(),
            });
        }
        if match_!(self, LEFT_PAREN) {
            let expr = self.expression()?;
            consume!(self, RIGHT_PAREN, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }
        Err(Parser::error(
            self.peek(),
            String::from("Expect expression."),
        ))
    }

    /* Non-production rule functions */
    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || matches!(self.peek().type_, EOF)
    }
    #[inline(always)]
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }
    #[inline(always)]
    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }
    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }
    fn error(token: &Token, message: String) -> SyntaxError {
        SyntaxError::Parse {
            token: token.clone(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast_printer;
    use crate::scanner::Scanner;

    fn parse_source(source: &str) -> (ExprResult, bool) {
        let mut scanner = Scanner::new(source.as_bytes().to_vec());
        scanner.scan_tokens().expect("scan failed");
        let mut driver = Driver::new();
        let mut parser = Parser::new(&mut driver, scanner.tokens);
        let res = parser.parse();
        (res, driver.had_error)
    }

    fn printed(source: &str) -> String {
        let (res, _) = parse_source(source);
        ast_printer::print(&res.expect("parse failed"))
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(printed("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(printed("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(printed("1 < 2 == true"), "(== (< 1 2) true)");
        assert_eq!(printed("!!false"), "(! (! false))");
    }

    #[test]
    fn grouping() {
        assert_eq!(printed("-123 * (45.67)"), "(* (- 123) (group 45.67))");
        assert_eq!(printed("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
    }

    #[test]
    fn logical_operators() {
        assert_eq!(printed("a and b or c"), "(or (and a b) c)");
        assert_eq!(printed("a or b and c"), "(or a (and b c))");
    }

    #[test]
    fn assignment() {
        assert_eq!(printed("x = 1"), "(= x 1)");
        // right-associative
        assert_eq!(printed("x = y = 2"), "(= x (= y 2))");
        // property targets become Set; the value is parsed but not rendered
        assert_eq!(printed("a.b = 2"), "(set a b)");
        assert_eq!(printed("a.b.c = 3"), "(set (get a b) c)");
    }

    #[test]
    fn invalid_assignment_target_is_reported_without_aborting() {
        let (res, had_error) = parse_source("1 = 2");
        assert!(had_error);
        assert_eq!(ast_printer::print(&res.unwrap()), "1");
    }

    #[test]
    fn calls() {
        assert_eq!(printed("f(1, 2)"), "(call f 1 2)");
        assert_eq!(printed("f()"), "(call f)");
        assert_eq!(printed("f(1)(2)"), "(call (call f 1) 2)");
        assert_eq!(printed("a.b(c).d"), "(get (call (get a b) c) d)");
    }

    #[test]
    fn call_keeps_the_closing_paren_token() {
        let (res, _) = parse_source("f(\n)");
        match res.unwrap() {
            Expr::Call {
                paren, arguments, ..
            } => {
                assert!(arguments.is_empty());
                assert_eq!(paren.line, 2);
            }
            other => panic!("expected a call, got {:?}", other),
        }
    }

    #[test]
    fn this_and_properties() {
        assert_eq!(printed("this.x"), "(get this x)");
        let (res, _) = parse_source("this");
        match res.unwrap() {
            Expr::This { keyword } => assert_eq!(keyword.lexeme, "this"),
            other => panic!("expected this, got {:?}", other),
        }
    }

    #[test]
    fn super_keeps_its_method_name() {
        let (res, _) = parse_source("super.cook");
        match res.unwrap() {
            Expr::Super { keyword, method } => {
                assert_eq!(keyword.lexeme, "super");
                assert_eq!(method.lexeme, "cook");
            }
            other => panic!("expected super, got {:?}", other),
        }
        // the rendering is the bare keyword either way
        assert_eq!(printed("super.cook"), "super");
        assert_eq!(printed("super.cook()"), "(call super)");
    }

    #[test]
    fn string_and_nil_literals() {
        assert_eq!(printed("\"hi\" + \"there\""), "(+ hi there)");
        assert_eq!(printed("nil"), "nil");
    }

    #[test]
    fn errors() {
        let (res, _) = parse_source("");
        assert!(res.is_err());
        let (res, _) = parse_source("+");
        assert!(res.is_err());
        let (res, _) = parse_source("1 2");
        assert_eq!(
            res.unwrap_err().to_string(),
            "[line 1] Error at '2': Expect end of expression."
        );
        let (res, _) = parse_source("(1");
        assert_eq!(
            res.unwrap_err().to_string(),
            "[line 1] Error at end: Expect ')' after expression."
        );
        let (res, _) = parse_source("super cook");
        assert_eq!(
            res.unwrap_err().to_string(),
            "[line 1] Error at 'cook': Expect '.' after 'super'."
        );
    }
}
