use crate::{
    ast::{Expr, InfixOperator, ParentSpec, PrefixOperator, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{Parser, Precedence},
    },
};

/// Maps an infix token to its operator, if it has one.
const fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    let operator = match kind {
        TokenKind::Plus => InfixOperator::Add,
        TokenKind::Minus => InfixOperator::Sub,
        TokenKind::Star => InfixOperator::Mul,
        TokenKind::Slash => InfixOperator::Div,
        TokenKind::Percent => InfixOperator::Mod,
        TokenKind::Exp => InfixOperator::Exp,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::LtEq => InfixOperator::LtEq,
        TokenKind::GtEq => InfixOperator::GtEq,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        TokenKind::And => InfixOperator::And,
        TokenKind::Or => InfixOperator::Or,
        TokenKind::BitAnd => InfixOperator::BitAnd,
        TokenKind::VLine => InfixOperator::BitOr,
        TokenKind::Caret => InfixOperator::BitXor,
        TokenKind::ShiftLeft => InfixOperator::ShiftLeft,
        TokenKind::ShiftRight => InfixOperator::ShiftRight,
        TokenKind::Range => InfixOperator::Range,
        TokenKind::RangeExclusive => InfixOperator::RangeExclusive,
        TokenKind::In => InfixOperator::In,
        TokenKind::Dot => InfixOperator::Dot,
        _ => return None,
    };
    Some(operator)
}

/// True for token kinds that can continue an expression.
const fn has_infix(kind: TokenKind) -> bool {
    matches!(kind,
             TokenKind::LParen | TokenKind::LBracket | TokenKind::Declare | TokenKind::Assign)
    || infix_operator(kind).is_some()
}

impl Parser {
    /// Parses one expression at the given binding level.
    ///
    /// This is the Pratt loop: parse a prefix form, then keep folding infix
    /// continuations in while the next operator binds more tightly than
    /// `precedence`. A `;` always ends the expression.
    ///
    /// Returns `None` after recording an error.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self,
                                                           precedence: Precedence)
                                                           -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semi) && precedence < self.peek_precedence() {
            if !has_infix(self.peek_kind()) {
                return Some(left);
            }

            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    /// Parses the expression form starting at the current token.
    fn parse_prefix(&mut self) -> Option<Expr> {
        let line = self.cur_line();

        match self.cur_kind() {
            TokenKind::Ident => {
                let name = self.cur_identifier()?;
                Some(Expr::Identifier { name, line })
            },
            TokenKind::Num => match self.cur_token() {
                Some(Token::Number(value)) => Some(Expr::Number { value: *value, line }),
                _ => None,
            },
            TokenKind::Str => match self.cur_token() {
                Some(Token::Str(value)) => Some(Expr::Str { value: value.clone(),
                                                            line }),
                _ => None,
            },
            TokenKind::True => Some(Expr::Boolean { value: true, line }),
            TokenKind::False => Some(Expr::Boolean { value: false, line }),
            TokenKind::Null => Some(Expr::Null { line }),
            TokenKind::Bang => self.parse_prefix_operator(PrefixOperator::Not),
            TokenKind::Minus => self.parse_prefix_operator(PrefixOperator::Negate),
            TokenKind::Plus => self.parse_prefix_operator(PrefixOperator::Identity),
            TokenKind::Tilde => self.parse_prefix_operator(PrefixOperator::BitNot),
            TokenKind::LParen => self.parse_grouped(),
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::Model => self.parse_model_literal(),
            TokenKind::Backslash => self.parse_lambda(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            found => {
                self.errors.push(ParseError::NoPrefixParse { found, line });
                None
            },
        }
    }

    /// Parses the infix continuation for the current token, with `left`
    /// already parsed.
    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.cur_kind() {
            TokenKind::LParen => self.parse_call(left),
            TokenKind::LBracket => self.parse_index(left),
            TokenKind::Declare => self.parse_binding(left, true),
            TokenKind::Assign => self.parse_binding(left, false),
            _ => self.parse_infix_operator(left),
        }
    }

    /// Gets the name out of the current token, which must be an identifier.
    pub(in crate::interpreter::parser) fn cur_identifier(&mut self) -> Option<String> {
        match self.cur_token() {
            Some(Token::Identifier(name)) => Some(name.clone()),
            _ => {
                self.errors.push(ParseError::Expected { expected: TokenKind::Ident,
                                                        found:    self.cur_kind(),
                                                        line:     self.cur_line(), });
                None
            },
        }
    }

    fn parse_prefix_operator(&mut self, operator: PrefixOperator) -> Option<Expr> {
        let line = self.cur_line();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expr::Prefix { operator,
                            right: Box::new(right),
                            line })
    }

    fn parse_infix_operator(&mut self, left: Expr) -> Option<Expr> {
        let line = self.cur_line();
        let operator = infix_operator(self.cur_kind())?;
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expr::Infix { left: Box::new(left),
                           operator,
                           right: Box::new(right),
                           line })
    }

    fn parse_grouped(&mut self) -> Option<Expr> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(expr)
    }

    /// Parses `if <expr> <block>` with an optional `else <block>` or a
    /// chained `elif`, which desugars into a nested `if` wrapped in a
    /// single-statement alternative block.
    fn parse_if(&mut self) -> Option<Expr> {
        let line = self.cur_line();
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let consequence = self.parse_block();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();

            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }

            Some(self.parse_block())
        } else if self.peek_is(TokenKind::Elif) {
            self.next_token();
            let elif_line = self.cur_line();
            let nested = self.parse_if()?;

            Some(crate::ast::Block { statements: vec![Statement::Expression { expr: nested,
                                                                              line: elif_line }],
                                     line:       elif_line, })
        } else {
            None
        };

        Some(Expr::If { condition: Box::new(condition),
                        consequence,
                        alternative,
                        line })
    }

    fn parse_while(&mut self) -> Option<Expr> {
        let line = self.cur_line();
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let body = self.parse_block();

        Some(Expr::While { condition: Box::new(condition),
                           body,
                           line })
    }

    /// Parses `for (id | set) <block>`; the parentheses are optional, the
    /// `|` separator is not.
    fn parse_for(&mut self) -> Option<Expr> {
        let line = self.cur_line();

        let parenthesized = self.peek_is(TokenKind::LParen);
        if parenthesized {
            self.next_token();
        }

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let variable = self.cur_identifier()?;

        if !self.expect_peek(TokenKind::VLine) {
            return None;
        }

        self.next_token();
        let set = self.parse_expression(Precedence::Lowest)?;

        if parenthesized && !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let body = self.parse_block();

        Some(Expr::For { variable,
                         set: Box::new(set),
                         body,
                         line })
    }

    fn parse_function_literal(&mut self) -> Option<Expr> {
        let line = self.cur_line();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let parameters = self.parse_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let body = self.parse_block();

        Some(Expr::Function { parameters, body, line })
    }

    /// Parses `\(params) = <expr>`: a lambda with a single-expression body.
    fn parse_lambda(&mut self) -> Option<Expr> {
        let line = self.cur_line();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let parameters = self.parse_parameters()?;

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }

        self.next_token();
        let body = self.parse_expression(Precedence::Lowest)?;

        Some(Expr::Lambda { parameters,
                            body: Box::new(body),
                            line })
    }

    /// Parses `model (params)` with an optional `: Parent(args)` clause.
    /// The parent's argument expressions stay unevaluated in the AST.
    fn parse_model_literal(&mut self) -> Option<Expr> {
        let line = self.cur_line();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let parameters = self.parse_parameters()?;

        let parent = if self.peek_is(TokenKind::Colon) {
            self.next_token();

            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            let name = self.cur_identifier()?;
            let parent_line = self.cur_line();

            if !self.expect_peek(TokenKind::LParen) {
                return None;
            }

            let args = self.parse_expression_list(TokenKind::RParen)?;

            Some(ParentSpec { name,
                              args,
                              line: parent_line })
        } else {
            None
        };

        Some(Expr::Model { parameters, parent, line })
    }

    fn parse_call(&mut self, function: Expr) -> Option<Expr> {
        let line = self.cur_line();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Some(Expr::Call { function: Box::new(function),
                          arguments,
                          line })
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let line = self.cur_line();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;

        Some(Expr::Array { elements, line })
    }

    fn parse_index(&mut self, left: Expr) -> Option<Expr> {
        let line = self.cur_line();
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }

        Some(Expr::Index { left: Box::new(left),
                           index: Box::new(index),
                           line })
    }

    /// Parses `{ key : value , ... }`. Keys are full expressions; the
    /// evaluator turns bare identifier keys into string keys.
    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let line = self.cur_line();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }

            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expr::HashLiteral { pairs, line })
    }

    fn parse_binding(&mut self, target: Expr, declare: bool) -> Option<Expr> {
        let line = self.cur_line();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if declare {
            Some(Expr::Declare { target: Box::new(target),
                                 value: Box::new(value),
                                 line })
        } else {
            Some(Expr::Assign { target: Box::new(target),
                                value: Box::new(value),
                                line })
        }
    }

    /// Parses a comma-separated expression list up to `end`, consuming the
    /// closing token.
    pub(in crate::interpreter::parser) fn parse_expression_list(&mut self,
                                                                end: TokenKind)
                                                                -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }
}
