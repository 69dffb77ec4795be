use std::collections::HashSet;

use crate::{
    environment::prelude::{Binding, FunctionBody, Value},
    lexer::prelude::Token,
    utils::prelude::SrcSpan,
};

use super::{
    error::{EvalErrorType, RuntimeWarning},
    interpreter::{EvalResult, Interpreter},
};

type Operand<'a> = fn(&mut Interpreter<'a>) -> EvalResult<Option<Value>>;

impl<'a> Interpreter<'a> {
    // expr -> <term> {(+ | -) <term>}
    pub(super) fn expr(&mut self) -> EvalResult<Option<Value>> {
        self.binary(&[Token::Plus, Token::Minus], Self::term)
    }

    // term -> <factor> {(* | /) <factor>}
    fn term(&mut self) -> EvalResult<Option<Value>> {
        self.binary(&[Token::Mult, Token::Div], Self::factor)
    }

    /// An expression that has to produce a number.
    pub(super) fn value_expr(&mut self) -> EvalResult<Value> {
        let start = self.current_token.0;
        let value = self.expr()?;

        self.require(value, SrcSpan::from(start, self.previous_end))
    }

    fn start(&self) -> u32 {
        match &self.pending {
            Some((location, _)) => location.start,
            None => self.current_token.0,
        }
    }

    fn require(&self, value: Option<Value>, span: SrcSpan) -> EvalResult<Value> {
        match value {
            Some(value) => Ok(value),
            None if !self.executing => Ok(Value::default()),
            None => Err(self.error(EvalErrorType::NoValue, span)),
        }
    }

    fn binary(&mut self, operators: &[Token], operand: Operand<'a>) -> EvalResult<Option<Value>> {
        let start = self.start();
        let mut left = operand(self)?;

        while operators.contains(&self.current_token.1) {
            let lhs = self.require(left, SrcSpan::from(start, self.previous_end))?;
            let (_, operator, _) = self.step()?;

            let right_start = self.current_token.0;
            let right = operand(self)?;
            let rhs = self.require(right, SrcSpan::from(right_start, self.previous_end))?;

            left = Some(self.apply(&operator, lhs, rhs, SrcSpan::from(start, self.previous_end))?);
        }

        Ok(left)
    }

    fn apply(&self, operator: &Token, lhs: Value, rhs: Value, span: SrcSpan) -> EvalResult<Value> {
        if !self.executing {
            return Ok(Value::default());
        }

        let (Value(lhs), Value(rhs)) = (lhs, rhs);

        Ok(Value(match operator {
            Token::Plus => lhs + rhs,
            Token::Minus => lhs - rhs,
            Token::Mult => lhs * rhs,
            Token::Div if rhs == 0.0 => return Err(self.error(EvalErrorType::DivisionByZero, span)),
            Token::Div => lhs / rhs,
            token => unreachable!("`{}` is not a binary operator", token.as_literal()),
        }))
    }

    // factor -> <number> | <ident> | <call> | ( <expr> ) | <function> | <input>
    fn factor(&mut self) -> EvalResult<Option<Value>> {
        if let Some((location, name)) = self.pending.take() {
            return self.identifier(location, name);
        }

        match self.current_token.1 {
            Token::Number(number) => {
                let _ = self.step()?;

                Ok(Some(Value::from(number)))
            },
            Token::Ident(_) => {
                let (location, name) = self.expect_ident()?;

                self.identifier(location, name)
            },
            Token::LParen => {
                let _ = self.step()?;
                let value = self.expr()?;
                let _ = self.expect_one(Token::RParen)?;

                Ok(value)
            },
            Token::Function => self.function_declaration(),
            Token::Input => self.input(),
            _ => Err(self.unexpected(vec![
                "a number".into(),
                "an identifier".into(),
                "`(`".into(),
                "`function`".into(),
                "`input`".into(),
            ])),
        }
    }

    // <ident> | <call>, with the identifier already consumed
    fn identifier(&mut self, location: SrcSpan, name: String) -> EvalResult<Option<Value>> {
        if self.current_token.1 == Token::LParen {
            return self.function_call(location, name);
        }

        if !self.executing {
            return Ok(Some(Value::default()));
        }

        self.table.get_value(&name)
            .map(Some)
            .map_err(|error| self.error(error, location))
    }

    // call -> <ident> ( [<expr> {, <expr>}] )
    fn function_call(&mut self, location: SrcSpan, name: String) -> EvalResult<Option<Value>> {
        let args = self.arguments()?;

        if !self.executing {
            return Ok(None);
        }

        let span = location.to(SrcSpan::point(self.previous_end));

        self.call(&name, args, span)
    }

    fn arguments(&mut self) -> EvalResult<Vec<Value>> {
        let _ = self.expect_one(Token::LParen)?;
        let mut args = vec![];

        if self.current_token.1 != Token::RParen {
            args.push(self.value_expr()?);

            while self.current_token.1 == Token::Comma {
                let _ = self.step()?;
                args.push(self.value_expr()?);
            }
        }

        let _ = self.expect_one(Token::RParen)?;

        Ok(args)
    }

    // function -> function <ident> ( [<ident> {, <ident>}] ) ( <statement> )
    fn function_declaration(&mut self) -> EvalResult<Option<Value>> {
        let _ = self.expect_one(Token::Function)?;
        let (location, name) = self.expect_ident()?;
        let params = self.parameters()?;

        let _ = self.expect_one(Token::LParen)?;
        let body_start = self.current_token.0;
        let _ = self.with_execution(false, Self::statement)?;
        let body = SrcSpan::from(body_start, self.previous_end);
        let _ = self.expect_one(Token::RParen)?;

        if !self.executing {
            return Ok(None);
        }

        let body = FunctionBody::Source { source: self.source.clone(), span: body };
        let previous = self.table.set_function(name.clone(), params, body);

        if let Some(previous) = previous.as_ref().map(Binding::kind) {
            self.warn(RuntimeWarning::Redefinition { name, previous, location });
        }

        Ok(None)
    }

    fn parameters(&mut self) -> EvalResult<Vec<String>> {
        let _ = self.expect_one(Token::LParen)?;
        let mut params = vec![];
        let mut seen = HashSet::new();

        if self.current_token.1 != Token::RParen {
            loop {
                let (span, param) = self.expect_ident()?;

                if !seen.insert(param.clone()) {
                    return Err(self.error(EvalErrorType::DuplicateParameter { name: param }, span));
                }

                params.push(param);

                if self.current_token.1 != Token::Comma {
                    break;
                }

                let _ = self.step()?;
            }
        }

        let _ = self.expect_one(Token::RParen)?;

        Ok(params)
    }

    // input -> input [( )]
    fn input(&mut self) -> EvalResult<Option<Value>> {
        let keyword = self.expect_one(Token::Input)?;

        let args = match self.current_token.1 {
            Token::LParen => self.arguments()?,
            _ => vec![],
        };

        if !self.executing {
            return Ok(Some(Value::default()));
        }

        let span = keyword.to(SrcSpan::point(self.previous_end));

        self.call("input", args, span)
    }
}
