use crate::{
    environment::prelude::{Binding, Value},
    lexer::prelude::Token,
    utils::prelude::SrcSpan,
};

use super::{
    error::RuntimeWarning,
    interpreter::{EvalResult, Interpreter},
};

// statement -> assignment | if | while | print | return | expr
impl<'a> Interpreter<'a> {
    pub(super) fn statement(&mut self) -> EvalResult<Option<Value>> {
        match &self.current_token.1 {
            Token::Ident(_) => {
                let ident = self.expect_ident()?;

                if self.current_token.1 == Token::Assign {
                    return self.assignment(ident);
                }

                self.pending = Some(ident);
                self.expr()
            },
            Token::If => self.if_statement(),
            Token::While => self.while_loop(),
            Token::Print => self.print_statement(),
            Token::Return => self.return_statement(),
            _ => self.expr(),
        }
    }

    // assignment -> <ident> = <expr>
    fn assignment(&mut self, (location, name): (SrcSpan, String)) -> EvalResult<Option<Value>> {
        let _ = self.expect_one(Token::Assign)?;
        let value = self.value_expr()?;

        if self.executing {
            if let Some(Binding::Function(_)) = self.table.set_value(name.clone(), value) {
                self.warn(RuntimeWarning::FunctionShadowed { name, location });
            }
        }

        Ok(None)
    }

    // if -> if <expr> <statement> [else <statement>]
    fn if_statement(&mut self) -> EvalResult<Option<Value>> {
        let _ = self.expect_one(Token::If)?;
        let condition = self.value_expr()?.is_truthy();

        let resolution = self.with_execution(condition, Self::statement)?;

        if self.current_token.1 != Token::Else {
            return Ok(resolution);
        }

        let _ = self.step()?;
        let alternative = self.with_execution(!condition, Self::statement)?;

        Ok(if condition { resolution } else { alternative })
    }

    // while -> while <expr> <statement>
    //
    // Tokens are gone once consumed, so every iteration re-lexes the condition
    // from where it starts.
    fn while_loop(&mut self) -> EvalResult<Option<Value>> {
        let _ = self.expect_one(Token::While)?;

        if !self.executing {
            let _ = self.value_expr()?;
            let _ = self.statement()?;

            return Ok(None);
        }

        let condition_start = self.current_token.0;
        let mut result = None;

        loop {
            if !self.value_expr()?.is_truthy() {
                let _ = self.with_execution(false, Self::statement)?;

                return Ok(result);
            }

            result = self.statement()?;

            if self.returned {
                return Ok(result);
            }

            self.rewind(condition_start)?;
        }
    }

    // print -> print <expr> {, <expr>}
    fn print_statement(&mut self) -> EvalResult<Option<Value>> {
        let keyword = self.expect_one(Token::Print)?;
        let mut values = vec![self.value_expr()?];

        while self.current_token.1 == Token::Comma {
            let _ = self.step()?;
            values.push(self.value_expr()?);
        }

        if self.executing {
            let span = keyword.to(SrcSpan::point(self.previous_end));
            let _ = self.call("print", values, span)?;
        }

        Ok(None)
    }

    // return -> return <expr>
    fn return_statement(&mut self) -> EvalResult<Option<Value>> {
        let _ = self.expect_one(Token::Return)?;
        let value = self.value_expr()?;

        if !self.executing {
            return Ok(None);
        }

        self.returned = true;

        Ok(Some(value))
    }
}
