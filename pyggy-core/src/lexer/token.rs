use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <word-char>{<word-char>}, not a keyword
    Ident(String),
    // <digit>{<digit>}
    Number(i64),

    // Arithmetic
    Plus, // +
    Minus, // -
    Mult, // *
    Div, // /

    Assign, // =

    // Keywords
    If, // if
    Else, // else
    While, // while
    Function, // function
    Return, // return
    Print, // print
    Input, // input

    // Delimiters
    Comma, // ,
    LParen, // (
    RParen, // )

    Eof,
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"if" => Token::If,
		"else" => Token::Else,
		"while" => Token::While,
		"function" => Token::Function,
		"return" => Token::Return,
		"print" => Token::Print,
		"input" => Token::Input,
		_ => return None
	})
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Token::If
            | Token::Else
            | Token::While
            | Token::Function
            | Token::Return
            | Token::Print
            | Token::Input
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Number(value) => value.to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Mult => "*".to_string(),
            Token::Div => "/".to_string(),
            Token::Assign => "=".to_string(),

            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::While => "while".to_string(),
            Token::Function => "function".to_string(),
            Token::Return => "return".to_string(),
            Token::Print => "print".to_string(),
            Token::Input => "input".to_string(),

            Token::Comma => ",".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }

    /// Human readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(_) => "a number".to_string(),
            Token::Ident(name) => format!("the identifier `{name}`"),
            Token::Eof => "the end of input".to_string(),
            _ if self.is_reserved_word() => format!("the keyword `{}`", self.as_literal()),
            _ => format!("`{}`", self.as_literal()),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Eof => write!(f, "EOF"),
            _ => write!(f, "{}", self.as_literal()),
        }
    }
}
