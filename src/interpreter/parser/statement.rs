use crate::{
    ast::{Block, Expr, Statement},
    error::ParseError,
    interpreter::{lexer::TokenKind, parser::core::{Parser, Precedence}},
};

impl Parser {
    /// Parses one statement at the current token.
    ///
    /// Dispatches on the current token: `return`, `break`, `next`, or an
    /// expression statement. Every statement must be terminated by `;`; a
    /// statement without one is discarded after recording the error. A bare
    /// `;` produces no statement and no error.
    pub(in crate::interpreter::parser) fn parse_statement(&mut self) -> Option<Statement> {
        let statement = match self.cur_kind() {
            TokenKind::Semi => return None,
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::Break => Statement::Break { line: self.cur_line() },
            TokenKind::Next => Statement::Next { line: self.cur_line() },
            _ => {
                let line = self.cur_line();
                let expr = self.parse_expression(Precedence::Lowest)?;
                Statement::Expression { expr, line }
            },
        };

        if !self.expect_peek(TokenKind::Semi) {
            return None;
        }

        Some(statement)
    }

    /// Parses `return;` or `return <expr>;`. A missing value is the `null`
    /// literal.
    fn parse_return_statement(&mut self) -> Option<Statement> {
        let line = self.cur_line();

        if self.peek_is(TokenKind::Semi) {
            return Some(Statement::Return { value: Expr::Null { line },
                                            line });
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        Some(Statement::Return { value, line })
    }

    /// Parses a brace-delimited block. The current token must be `{`; the
    /// block runs until `}` or end of input.
    pub(in crate::interpreter::parser) fn parse_block(&mut self) -> Block {
        let line = self.cur_line();
        let mut statements = Vec::new();

        self.next_token();

        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        Block { statements, line }
    }

    /// Parses a parenthesized parameter list; the current token must be the
    /// opening `(`. Parameter names must be pairwise unique.
    pub(in crate::interpreter::parser) fn parse_parameters(&mut self) -> Option<Vec<String>> {
        let line = self.cur_line();
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        parameters.push(self.cur_identifier()?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();

            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            parameters.push(self.cur_identifier()?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        for (i, first) in parameters.iter().enumerate() {
            for second in parameters.iter().skip(i + 1) {
                if first == second {
                    self.errors.push(ParseError::DuplicateParameters { line });
                    return None;
                }
            }
        }

        Some(parameters)
    }
}
