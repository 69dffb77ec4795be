use crate::{
    environment::prelude::{FunctionBody, SymbolTable, Value},
    lexer::prelude::{Lexer, Spanned, Token},
    utils::prelude::{Source, SourceChars, SrcSpan, Warning},
};

use super::{
    context::Context,
    error::{EvalError, EvalErrorType, RuntimeWarning},
};

pub type EvalResult<T> = Result<T, EvalError>;

/// Recursive-descent parser that evaluates while it recognizes.
///
/// There is no tree: each grammar routine consumes its tokens and returns the
/// runtime value right away. Code that must be stepped over (an untaken branch,
/// a function body at its declaration) goes through the very same routines with
/// `executing` switched off, which checks syntax but has no effects.
pub struct Interpreter<'a> {
    pub(super) current_token: Spanned,
    /// An identifier already consumed by `statement` that turned out to
    /// start an expression.
    pub(super) pending: Option<(SrcSpan, String)>,
    pub(super) previous_end: u32,
    pub(super) source: Source,
    pub(super) table: &'a mut SymbolTable,
    pub(super) context: &'a Context,
    pub(super) executing: bool,
    pub(super) returned: bool,

    lexer: Lexer<SourceChars>,
    span: SrcSpan,
    nested: bool,
}

impl<'a> Interpreter<'a> {
    /// Interprets the part of `source` covered by `span`.
    pub fn new(
        source: Source,
        span: SrcSpan,
        table: &'a mut SymbolTable,
        context: &'a Context,
    ) -> EvalResult<Self> {
        let lexer = Lexer::from_source(&source, span);

        let mut interpreter = Self {
            current_token: (span.start, Token::Eof, span.start),
            pending: None,
            previous_end: span.start,
            source,
            table,
            context,
            executing: true,
            returned: false,

            lexer,
            span,
            nested: false,
        };

        interpreter.step()?;

        Ok(interpreter)
    }

    pub fn for_source(
        source: Source,
        table: &'a mut SymbolTable,
        context: &'a Context,
    ) -> EvalResult<Self> {
        let span = source.span();

        Self::new(source, span, table, context)
    }

    /// Runs statements until the end of input or a `return`, yielding the
    /// result of the last one.
    pub fn interpret(&mut self) -> EvalResult<Option<Value>> {
        let mut result = None;

        while self.current_token.1 != Token::Eof {
            result = self.statement()?;

            if self.returned {
                if !self.nested && self.current_token.1 != Token::Eof {
                    let location = SrcSpan::from(self.current_token.0, self.span.end);
                    self.warn(RuntimeWarning::UnreachableCode { location });
                }

                break;
            }
        }

        Ok(result)
    }

    pub(super) fn step(&mut self) -> EvalResult<Spanned> {
        let next = match self.lexer.next_token() {
            Ok(token) => token,
            Err(error) => return Err(self.error(EvalErrorType::Lex { error }, error.location)),
        };

        let current = std::mem::replace(&mut self.current_token, next);
        self.previous_end = current.2;

        Ok(current)
    }

    /// Restarts lexing at `position`. The old lexer is dropped, never rewound.
    pub(super) fn rewind(&mut self, position: u32) -> EvalResult<()> {
        self.lexer = Lexer::from_source(&self.source, SrcSpan::from(position, self.span.end));
        self.current_token = (position, Token::Eof, position);
        self.pending = None;

        self.step()?;

        Ok(())
    }

    pub(super) fn expect_one(&mut self, token: Token) -> EvalResult<SrcSpan> {
        if self.current_token.1 == token {
            let (start, _, end) = self.step()?;

            return Ok(SrcSpan::from(start, end));
        }

        Err(self.unexpected(vec![format!("`{}`", token.as_literal())]))
    }

    pub(super) fn expect_ident(&mut self) -> EvalResult<(SrcSpan, String)> {
        if let Token::Ident(name) = &self.current_token.1 {
            let name = name.clone();
            let (start, _, end) = self.step()?;

            return Ok((SrcSpan::from(start, end), name));
        }

        Err(self.unexpected(vec!["an identifier".into()]))
    }

    pub(super) fn unexpected(&self, expected: Vec<String>) -> EvalError {
        let (start, token, end) = &self.current_token;
        let span = SrcSpan::from(*start, *end);

        match token {
            Token::Eof => self.error(EvalErrorType::UnexpectedEof { expected }, span),
            token => self.error(EvalErrorType::UnexpectedToken { token: token.clone(), expected }, span),
        }
    }

    pub(super) fn error(&self, error: EvalErrorType, span: SrcSpan) -> EvalError {
        EvalError { error, span, src: self.source.clone() }
    }

    pub(super) fn warn(&self, warning: RuntimeWarning) {
        if self.executing {
            self.context.warnings.emit(Warning::Runtime { source: self.source.clone(), warning });
        }
    }

    /// Runs `f` with effects switched off unless `enabled`; never switches
    /// them back on inside code that is already being skipped.
    pub(super) fn with_execution<T>(
        &mut self,
        enabled: bool,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        let executing = self.executing;
        self.executing = executing && enabled;

        let result = f(self);
        self.executing = executing;

        result
    }

    /// Calls `name` from the current table, falling back to the built-ins.
    pub(super) fn call(&mut self, name: &str, args: Vec<Value>, span: SrcSpan) -> EvalResult<Option<Value>> {
        let function = match self.table.get_function(name) {
            Ok(function) => function,
            Err(error) => self.context.builtins.get(name)
                .ok_or_else(|| self.error(error, span))?,
        };

        if !function.accepts(args.len()) {
            return Err(self.error(
                EvalErrorType::ArityMismatch {
                    name: name.to_string(),
                    expected: function.params.len(),
                    got: args.len(),
                },
                span,
            ));
        }

        match &function.body {
            FunctionBody::Native { callable, .. } => {
                callable(&args, self.context.io.as_ref()).map_err(|error| self.error(error, span))
            },
            FunctionBody::Source { source, span: body } => {
                let mut locals = SymbolTable::new();

                for (param, arg) in function.params.iter().zip(args) {
                    locals.set_value(param.clone(), arg);
                }

                let mut callee = Interpreter::new(source.clone(), *body, &mut locals, self.context)?;
                callee.nested = true;
                callee.interpret()
            },
        }
    }
}
