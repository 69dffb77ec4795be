use std::{cell::Cell, rc::Rc};

use crate::{
    environment::prelude::{BindingKind, BufferedIO, InterpreterIO, SymbolTable, Value},
    lexer::prelude::{LexicalError, LexicalErrorType, Token},
    utils::prelude::{Error, Source, SrcSpan, VectorWarningEmitterIO, Warning},
};

use super::prelude::{evaluate, run_source, Context, EvalError, EvalErrorType, RuntimeWarning};

fn run(src: &str) -> Result<Option<Value>, EvalError> {
    evaluate(src, &Context::with_io(Rc::new(BufferedIO::new())))
}

fn run_with_io(src: &str, io: &BufferedIO) -> Result<Option<Value>, EvalError> {
    evaluate(src, &Context::with_io(Rc::new(io.clone())))
}

fn run_with_warnings(src: &str) -> (Result<Option<Value>, EvalError>, Vec<RuntimeWarning>) {
    let warnings = VectorWarningEmitterIO::new();
    let context = Context::new(Rc::new(BufferedIO::new()), Rc::new(warnings.clone()));
    let result = evaluate(src, &context);

    let warnings = warnings.take()
        .into_iter()
        .map(|Warning::Runtime { warning, .. }| warning)
        .collect();

    (result, warnings)
}

fn error_of(src: &str) -> EvalErrorType {
    match run(src) {
        Ok(value) => panic!("`{src}` evaluated to {value:?}"),
        Err(err) => err.error,
    }
}

/// Prints fine `limit` times, then fails. Caps loops that never end on their own.
struct CappedIO {
    printed: Cell<usize>,
    limit: usize,
}

impl InterpreterIO for CappedIO {
    fn print(&self, _values: &[Value]) -> std::io::Result<()> {
        if self.printed.get() == self.limit {
            return Err(std::io::Error::other("print limit reached"));
        }

        self.printed.set(self.printed.get() + 1);
        Ok(())
    }

    fn read_line(&self) -> std::io::Result<String> {
        Err(std::io::ErrorKind::UnexpectedEof.into())
    }
}

#[test]
fn test_arithmetic() -> Result<(), EvalError> {
    assert_eq!(run("2 + 3 * 4")?, Some(Value(14.0)));
    assert_eq!(run("(2 + 3) * 4")?, Some(Value(20.0)));
    assert_eq!(run("10 - 4 - 3")?, Some(Value(3.0)));
    assert_eq!(run("100 / 10 / 5")?, Some(Value(2.0)));
    assert_eq!(run("7 / 2")?, Some(Value(3.5)));
    assert_eq!(run("((1))")?, Some(Value(1.0)));

    Ok(())
}

#[test]
fn test_assignment() -> Result<(), EvalError> {
    assert_eq!(run("x = 7\nx")?, Some(Value(7.0)));
    assert_eq!(run("x = 7")?, None);
    assert_eq!(run("x = 2\nx = x * x\nx")?, Some(Value(4.0)));
    assert_eq!(run("iffy = 2\nprinter = 3\niffy + printer")?, Some(Value(5.0)));
    assert_eq!(run("")?, None);

    Ok(())
}

#[test]
fn test_if() -> Result<(), EvalError> {
    assert_eq!(run("x = 1\nif 0 x = 2\nx")?, Some(Value(1.0)));
    assert_eq!(run("if 0 x = 2\nelse x = 3\nx")?, Some(Value(3.0)));
    assert_eq!(run("if 1 x = 2\nelse x = 3\nx")?, Some(Value(2.0)));
    assert_eq!(run("if 0 - 1 5 else 6")?, Some(Value(5.0)));

    Ok(())
}

#[test]
fn test_nested_if_is_skipped_whole() -> Result<(), EvalError> {
    assert_eq!(run("x = 0\nif 0 if 1 x = 1 else x = 2\nx")?, Some(Value(0.0)));
    assert_eq!(run("x = 0\nif 0 if 1 x = 1 else x = 2 else x = 3\nx")?, Some(Value(3.0)));
    assert_eq!(run("x = 0\nif 1 if 0 x = 1 else x = 2 else x = 3\nx")?, Some(Value(2.0)));

    Ok(())
}

#[test]
fn test_skipped_code_has_no_effects() -> Result<(), EvalError> {
    let io = BufferedIO::new();

    // no lookups, no arithmetic, no calls, no output
    assert_eq!(run_with_io("if 0 print undefined / 0, missing(1)", &io)?, None);
    assert!(io.take().is_empty());

    // syntax is still checked
    assert!(matches!(
        run_with_io("if 0 x = )", &io).map_err(|err| err.error),
        Err(EvalErrorType::UnexpectedToken { token: Token::RParen, .. })
    ));

    Ok(())
}

#[test]
fn test_while() -> Result<(), EvalError> {
    assert_eq!(run("n = 3\nwhile n n = n - 1\nn")?, Some(Value(0.0)));
    assert_eq!(run("n = 0\nwhile n n = n - 1\nn")?, Some(Value(0.0)));
    assert_eq!(run("n = 2\nwhile n n = n - 1")?, None);

    let io = BufferedIO::new();
    assert_eq!(run_with_io("while 0 print 1", &io)?, None);
    assert!(io.take().is_empty());

    Ok(())
}

#[test]
fn test_while_without_end() {
    let io = CappedIO { printed: Cell::new(0), limit: 5 };
    let context = Context::with_io(Rc::new(io));

    let err = evaluate("while 1 print 1", &context).unwrap_err();

    assert!(matches!(err.error, EvalErrorType::Io { .. }));
    assert_eq!(err.span, SrcSpan::from(8, 15));
}

#[test]
fn test_print() -> Result<(), EvalError> {
    let io = BufferedIO::new();

    assert_eq!(run_with_io("print 1, 2 + 3, 7 / 2\nprint 0 - 4", &io)?, None);
    assert_eq!(io.take(), vec!["1 5 3.5".to_string(), "-4".to_string()]);

    Ok(())
}

#[test]
fn test_input() -> Result<(), EvalError> {
    let io = BufferedIO::with_input(["4", " 2.5 "]);

    assert_eq!(run_with_io("x = input\nprint x * 2\ninput() + 1", &io)?, Some(Value(3.5)));
    assert_eq!(io.take(), vec!["8".to_string()]);

    io.push_input(["four"]);
    assert_eq!(
        run_with_io("input", &io).map_err(|err| err.error),
        Err(EvalErrorType::InvalidInput { line: "four".into() })
    );

    assert!(matches!(
        run_with_io("input", &io).map_err(|err| err.error),
        Err(EvalErrorType::Io { .. })
    ));

    Ok(())
}

#[test]
fn test_functions() -> Result<(), EvalError> {
    assert_eq!(run("function add(a, b)(a + b)\nadd(3, 4)")?, Some(Value(7.0)));
    assert_eq!(run("function seven()(7)\nseven() * 2")?, Some(Value(14.0)));
    assert_eq!(run("function twice(a)(a * 2)\ntwice(twice(1 + 1))")?, Some(Value(8.0)));
    assert_eq!(run("function f(a)(a)")?, None);

    assert_eq!(
        error_of("function add(a, b)(a + b)\nadd(3)"),
        EvalErrorType::ArityMismatch { name: "add".into(), expected: 2, got: 1 }
    );

    Ok(())
}

#[test]
fn test_declaration_does_not_run_body() -> Result<(), EvalError> {
    let io = BufferedIO::new();

    assert_eq!(run_with_io("function f()(print 1)\n0", &io)?, Some(Value(0.0)));
    assert!(io.take().is_empty());

    assert_eq!(run_with_io("function f()(print 1)\nf()\nf()", &io)?, None);
    assert_eq!(io.take(), vec!["1".to_string(), "1".to_string()]);

    // undefined names in a body only fail once it runs
    assert_eq!(run("function f()(nope)\n1")?, Some(Value(1.0)));

    Ok(())
}

#[test]
fn test_no_closures() {
    assert_eq!(
        error_of("x = 5\nfunction f()(x)\nf()"),
        EvalErrorType::UndefinedName { name: "x".into(), expected: BindingKind::Value }
    );

    // functions cannot see other functions either
    assert_eq!(
        error_of("function g()(1)\nfunction f()(g())\nf()"),
        EvalErrorType::UndefinedName { name: "g".into(), expected: BindingKind::Function }
    );
}

#[test]
fn test_locals_do_not_leak() -> Result<(), EvalError> {
    assert_eq!(run("a = 1\nfunction f(a)(a = 10)\nf(2)\na")?, Some(Value(1.0)));

    Ok(())
}

#[test]
fn test_builtins_inside_functions() -> Result<(), EvalError> {
    let io = BufferedIO::new();

    assert_eq!(run_with_io("function show(a)(print a, a)\nshow(3)", &io)?, None);
    assert_eq!(io.take(), vec!["3 3".to_string()]);

    Ok(())
}

#[test]
fn test_undefined() {
    assert_eq!(
        error_of("y"),
        EvalErrorType::UndefinedName { name: "y".into(), expected: BindingKind::Value }
    );
    assert_eq!(
        error_of("f()"),
        EvalErrorType::UndefinedName { name: "f".into(), expected: BindingKind::Function }
    );
    assert_eq!(
        error_of("x = 1\nx()"),
        EvalErrorType::UndefinedName { name: "x".into(), expected: BindingKind::Function }
    );
}

#[test]
fn test_invalid_character() {
    let err = run("x = 3 @ 2").unwrap_err();

    assert_eq!(err.span, SrcSpan::from(6, 7));
    assert_eq!(
        err.error,
        EvalErrorType::Lex {
            error: LexicalError {
                error: LexicalErrorType::InvalidCharacter { tok: '@' },
                location: SrcSpan::from(6, 7),
            }
        }
    );
}

#[test]
fn test_syntax_errors() {
    assert!(matches!(
        error_of("x = )"),
        EvalErrorType::UnexpectedToken { token: Token::RParen, .. }
    ));
    assert!(matches!(error_of("x ="), EvalErrorType::UnexpectedEof { .. }));
    assert!(matches!(error_of("(1 + 2"), EvalErrorType::UnexpectedEof { .. }));
    assert!(matches!(error_of("function (a)(a)"), EvalErrorType::UnexpectedToken { .. }));
    assert!(matches!(error_of("function f(a)a"), EvalErrorType::UnexpectedToken { .. }));
    assert!(matches!(
        error_of("function f(a)(a"),
        EvalErrorType::UnexpectedEof { .. }
    ));
}

#[test]
fn test_duplicate_parameter() {
    let err = run("function f(a, b, a)(a)").unwrap_err();

    assert_eq!(err.error, EvalErrorType::DuplicateParameter { name: "a".into() });
    assert_eq!(err.span, SrcSpan::from(17, 18));
}

#[test]
fn test_division_by_zero() -> Result<(), EvalError> {
    let err = run("x = 0\n1 / x").unwrap_err();

    assert_eq!(err.error, EvalErrorType::DivisionByZero);
    assert_eq!(err.span, SrcSpan::from(6, 11));

    assert_eq!(run("x = 0\nif x 1 / x")?, None);

    Ok(())
}

#[test]
fn test_no_value() {
    assert_eq!(error_of("function f()(print 1)\ny = f()"), EvalErrorType::NoValue);
    assert_eq!(error_of("1 + function f()(1)"), EvalErrorType::NoValue);
    assert_eq!(error_of("if function f()(1) 2"), EvalErrorType::NoValue);
}

#[test]
fn test_return() -> Result<(), EvalError> {
    assert_eq!(run("function f(a)(return a * 2)\nf(4)")?, Some(Value(8.0)));
    assert_eq!(run("n = 5\nwhile 1 if n - 3 n = n - 1 else return n")?, Some(Value(3.0)));

    let io = BufferedIO::new();
    assert_eq!(run_with_io("return 1\nprint 2", &io)?, Some(Value(1.0)));
    assert!(io.take().is_empty());

    // a skipped return does not stop anything
    assert_eq!(run("if 0 return 1\n2")?, Some(Value(2.0)));

    Ok(())
}

#[test]
fn test_warnings() {
    let (result, warnings) = run_with_warnings("x = 1\nreturn x + 1\nx = 5");
    assert_eq!(result.ok(), Some(Some(Value(2.0))));
    assert_eq!(warnings, vec![RuntimeWarning::UnreachableCode { location: SrcSpan::from(19, 24) }]);

    let (_, warnings) = run_with_warnings("function f()(1)\nf = 2");
    assert_eq!(
        warnings,
        vec![RuntimeWarning::FunctionShadowed { name: "f".into(), location: SrcSpan::from(16, 17) }]
    );

    let (_, warnings) = run_with_warnings("x = 1\nfunction x()(1)");
    assert_eq!(
        warnings,
        vec![RuntimeWarning::Redefinition {
            name: "x".into(),
            previous: BindingKind::Value,
            location: SrcSpan::from(15, 16),
        }]
    );

    let (_, warnings) = run_with_warnings("function g()(1)\nif 0 function g()(2)\nif 0 g = 1");
    assert!(warnings.is_empty());
}

#[test]
fn test_globals_persist_between_runs() -> Result<(), EvalError> {
    let context = Context::with_io(Rc::new(BufferedIO::new()));
    let mut table = SymbolTable::new();

    run_source(Source::anonymous("x = 20\nfunction half(a)(a / 2)"), &context, &mut table)?;
    let value = run_source(Source::anonymous("half(x) + 1"), &context, &mut table)?;

    assert_eq!(value, Some(Value(11.0)));
    assert_eq!(table.len(), 2);

    Ok(())
}

#[test]
fn test_errors_point_into_declaring_source() {
    let context = Context::with_io(Rc::new(BufferedIO::new()));
    let mut table = SymbolTable::new();
    let library = Source::new("lib.pg", "function f(a)(a / 0)");

    assert!(run_source(library.clone(), &context, &mut table).is_ok());

    let err = run_source(Source::anonymous("f(1)"), &context, &mut table).unwrap_err();

    assert_eq!(err.error, EvalErrorType::DivisionByZero);
    assert!(err.src.ptr_eq(&library));
    assert_eq!(library.slice(err.span), "a / 0");
}

#[test]
fn test_error_rendering() {
    let err = run("x = 5\nfunction f()(x)\nf()").unwrap_err();
    let rendered = Error::from(err).pretty_string();

    assert!(rendered.contains("Undefined name"));
    assert!(rendered.contains("<input>"));
    assert!(rendered.contains("Not defined here"));
}

#[test]
fn test_skipped_while_does_not_loop() -> Result<(), EvalError> {
    let io = BufferedIO::new();

    assert_eq!(run("x = 1\nif 0 while 1 x = 2\nx")?, Some(Value(1.0)));
    assert_eq!(run("x = 1\nif 1 0 else while 1 x = 2\nx")?, Some(Value(1.0)));
    assert_eq!(run_with_io("if 0 while 1 while 1 print 1", &io)?, None);
    assert!(io.take().is_empty());

    // the body is checked at declaration without running the loop
    assert_eq!(run("function f()(while 1 return 3)\n1")?, Some(Value(1.0)));
    assert_eq!(run("function f()(while 1 return 3)\nf()")?, Some(Value(3.0)));

    Ok(())
}

#[test]
fn test_effects_happen_before_later_lexical_errors() {
    let io = BufferedIO::new();

    let err = run_with_io("print 1\nx @", &io).unwrap_err();

    assert_eq!(io.take(), vec!["1".to_string()]);
    assert_eq!(
        err.error,
        EvalErrorType::Lex {
            error: LexicalError {
                error: LexicalErrorType::InvalidCharacter { tok: '@' },
                location: SrcSpan::from(10, 11),
            }
        }
    );
}

#[test]
fn test_function_return_is_not_unreachable_code() {
    let (result, warnings) = run_with_warnings("function f(a)(return a)\nx = f(2)\nx");

    assert_eq!(result.ok(), Some(Some(Value(2.0))));
    assert!(warnings.is_empty());
}
