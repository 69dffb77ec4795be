use crate::{
    interpreter::prelude::EvalErrorType,
    utils::prelude::{Source, SrcSpan},
};

use super::prelude::{
    Binding, BindingKind, Builtins, BufferedIO, FunctionBody, InterpreterIO, SymbolTable, Value,
};

fn body() -> FunctionBody {
    let source = Source::anonymous("a + b");
    let span = source.span();

    FunctionBody::Source { source, span }
}

#[test]
fn test_values() -> Result<(), EvalErrorType> {
    let mut table = SymbolTable::new();

    assert!(table.set_value("x", Value(1.0)).is_none());
    assert_eq!(table.get_value("x")?, Value(1.0));

    let replaced = table.set_value("x", Value(2.5));
    assert!(matches!(replaced, Some(Binding::Value(Value(v))) if v == 1.0));
    assert_eq!(table.get_value("x")?, Value(2.5));

    // names are case sensitive
    assert_eq!(
        table.get_value("X"),
        Err(EvalErrorType::UndefinedName { name: "X".into(), expected: BindingKind::Value })
    );

    Ok(())
}

#[test]
fn test_functions() -> Result<(), EvalErrorType> {
    let mut table = SymbolTable::new();

    table.set_function("add", vec!["a".into(), "b".into()], body());

    let function = table.get_function("add")?;
    assert_eq!(function.name, "add");
    assert_eq!(function.params, vec!["a".to_string(), "b".to_string()]);
    assert!(function.accepts(2));
    assert!(!function.accepts(1));
    assert!(!function.is_native());

    // a function is not a value
    assert_eq!(
        table.get_value("add"),
        Err(EvalErrorType::UndefinedName { name: "add".into(), expected: BindingKind::Value })
    );

    Ok(())
}

#[test]
fn test_shared_namespace() -> Result<(), EvalErrorType> {
    let mut table = SymbolTable::new();

    table.set_function("f", vec![], body());
    let replaced = table.set_value("f", Value(3.0));

    assert_eq!(replaced.map(|binding| binding.kind()), Some(BindingKind::Function));
    assert_eq!(table.get_value("f")?, Value(3.0));
    assert_eq!(
        table.get_function("f").unwrap_err(),
        EvalErrorType::UndefinedName { name: "f".into(), expected: BindingKind::Function }
    );

    let replaced = table.set_function("f", vec![], body());
    assert_eq!(replaced.map(|binding| binding.kind()), Some(BindingKind::Value));
    assert!(table.get_function("f").is_ok());
    assert_eq!(table.len(), 1);

    Ok(())
}

#[test]
fn test_missing_function() {
    let table = SymbolTable::new();

    assert_eq!(
        table.get_function("nope").unwrap_err(),
        EvalErrorType::UndefinedName { name: "nope".into(), expected: BindingKind::Function }
    );
}

#[test]
fn test_builtins() -> Result<(), EvalErrorType> {
    let builtins = Builtins::standard();
    let io = BufferedIO::with_input(["  42 ", "forty two"]);

    let print = builtins.get("print").expect("print is registered");
    let input = builtins.get("input").expect("input is registered");

    assert!(print.params.is_empty() && input.params.is_empty());
    assert!(print.accepts(3));
    assert!(input.accepts(0));
    assert!(!input.accepts(1));

    let call = |function: &super::prelude::FunctionDef, args: &[Value]| match function.body {
        FunctionBody::Native { callable, .. } => callable(args, &io),
        FunctionBody::Source { .. } => unreachable!("built-ins are native"),
    };

    assert_eq!(call(&*print, &[Value(1.0), Value(0.5)])?, None);
    assert_eq!(io.take(), vec!["1 0.5".to_string()]);

    assert_eq!(call(&*input, &[])?, Some(Value(42.0)));
    assert_eq!(
        call(&*input, &[]),
        Err(EvalErrorType::InvalidInput { line: "forty two".into() })
    );
    assert!(matches!(call(&*input, &[]), Err(EvalErrorType::Io { .. })));

    Ok(())
}

#[test]
fn test_buffered_io_shares_buffers() -> std::io::Result<()> {
    let io = BufferedIO::new();
    let handle = io.clone();

    io.print(&[Value(7.0)])?;
    handle.push_input(["line"]);

    assert_eq!(handle.take(), vec!["7".to_string()]);
    assert_eq!(io.read_line()?, "line");

    Ok(())
}

#[test]
fn test_truthiness() {
    assert!(!Value(0.0).is_truthy());
    assert!(!Value(-0.0).is_truthy());
    assert!(!Value(f64::NAN).is_truthy());
    assert!(Value(1.0).is_truthy());
    assert!(Value(-0.25).is_truthy());
    assert!(Value(f64::INFINITY).is_truthy());
}

#[test]
fn test_source_body_span() {
    match body() {
        FunctionBody::Source { source, span } => {
            assert_eq!(span, SrcSpan::from(0, 5));
            assert_eq!(source.slice(span), "a + b");
        },
        FunctionBody::Native { .. } => unreachable!(),
    }
}
