use std::fmt::Display;

use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Token};
use crate::utils::prelude::{Source, SourceChars, SrcSpan};

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

/// Pull-based tokenizer over `(offset, char)` pairs.
///
/// Once a lexical error is hit the lexer is poisoned and returns that error on
/// every following call.
#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	failure: Option<LexicalError>,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl Lexer<SourceChars> {
	/// Lexes only the text covered by `span`, reporting absolute offsets.
	pub fn from_source(source: &Source, span: SrcSpan) -> Self {
		Self::starting_at(source.chars(span), span.start)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		Self::starting_at(input, 0)
	}

	fn starting_at(input: T, start: u32) -> Self {
        let mut lexer = Self {
            position: start,
            next_position: start,
            ch: None,
			next_ch: None,
            input,

			failure: None,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		if let Some(failure) = self.failure {
			return Err(failure);
		}

		self.skip_whitespace();

		let spanned = match self.ch {
			Some(ch) => match ch {
				'0'..='9' => self.lex_number(),
				c if is_word_char(c) => Ok(self.lex_word()),
				'+' => Ok(self.eat_one_char(Token::Plus)),
				'-' => Ok(self.eat_one_char(Token::Minus)),
				'*' => Ok(self.eat_one_char(Token::Mult)),
				'/' => Ok(self.eat_one_char(Token::Div)),
				'(' => Ok(self.eat_one_char(Token::LParen)),
				')' => Ok(self.eat_one_char(Token::RParen)),
				'=' => Ok(self.eat_one_char(Token::Assign)),
				',' => Ok(self.eat_one_char(Token::Comma)),
				c => {
					let location = SrcSpan::from(self.position, self.position + c.len_utf8() as u32);

					Err(LexicalError {
						error: LexicalErrorType::InvalidCharacter { tok: c },
						location,
					})
				}
			},
			None => Ok((self.position, Token::Eof, self.position)),
		};

		if let Err(err) = &spanned {
			self.failure = Some(*err);
		}

		spanned
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let (next_position, next) = match self.input.next() {
			Some((pos, ch)) => (pos, Some(ch)),
			// the offset right after the last char doubles as the EOF position
			None => (self.next_position + self.next_ch.map_or(0, |c| c.len_utf8() as u32), None),
		};

		self.position = self.next_position;
		self.next_position = next_position;
		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.ch, Some(ch) if ch.is_whitespace()) {
			self.next_char();
		}
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
		let mut value = String::new();

		while let Some(ch) = self.ch {
			if !predicate(ch) {
				break;
			}

			value.push(ch);
			self.next_char();
		}

		value
	}

	// The whole word is consumed before keyword lookup, so `iffy` never
	// splits into `if` + `fy`.
	fn lex_word(&mut self) -> Spanned {
        let start_pos = self.position;
		let word = self.take_while(is_word_char);
        let end_pos = self.position;

		let token = str_to_keyword(&word).unwrap_or(Token::Ident(word));

		(start_pos, token, end_pos)
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let digits = self.take_while(|ch| ch.is_ascii_digit());
		let end_pos = self.position;

		match digits.parse::<i64>() {
			Ok(value) => Ok((start_pos, Token::Number(value), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::NumberTooLarge,
				location: SrcSpan::from(start_pos, end_pos)
			})
		}
	}
}

fn is_word_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_'
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.next_token())
	}
}

/// Lexes a whole string, stopping after the first `Eof` or error.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	let mut lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
	let mut tokens = vec![];

	loop {
		let spanned = lexer.next_token()?;
		let is_eof = spanned.1 == Token::Eof;

		tokens.push(spanned);

		if is_eof {
			return Ok(tokens);
		}
	}
}
