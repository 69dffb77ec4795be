pub mod lexer;
pub mod environment;
pub mod interpreter;
pub mod utils;
