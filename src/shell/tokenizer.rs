//! Shell tokenizer for curl command lines
//!
//! Handles the subset of POSIX shell quoting that copied curl commands use:
//! single and double quotes, `$'...'` ANSI-C strings, backslash escapes, line
//! continuations, and `$NAME` / `${NAME}` variable references.

use std::ops::Range;

use super::word::{EnvRef, Word};
use crate::errors::{CurlgenError, Result};

/// A shell word with quoting removed and its byte span in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: Word,
    pub span: Range<usize>,
}

/// Lazy token stream over a command string.
///
/// Cloning a tokenizer restarts nothing and shares nothing: each clone
/// continues independently from the same position. After an error the stream
/// ends.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

/// Tokenize a command string
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer {
        input,
        pos: 0,
        failed: false,
    }
}

/// Tokenize a command string, stopping at the first error
pub fn tokenize_all(input: &str) -> Result<Vec<Token>> {
    tokenize(input).collect()
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl Tokenizer<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip a backslash-newline pair (or backslash-CRLF) at the cursor
    fn skip_continuation(&mut self) -> bool {
        let rest = &self.input[self.pos..];
        if rest.starts_with("\\\n") {
            self.pos += 2;
            true
        } else if rest.starts_with("\\\r\n") {
            self.pos += 3;
            true
        } else {
            false
        }
    }

    /// Skip whitespace, line continuations and comments between words
    fn skip_blank(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.bump();
                }
                Some('\\') if self.skip_continuation() => {}
                Some('#') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_blank();
        let start = self.pos;
        if self.peek().is_none() {
            return Ok(None);
        }

        let mut word = Word::new();
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\n' | '\r' => break,
                '\'' => {
                    self.bump();
                    self.single_quoted(&mut word)?;
                }
                '"' => {
                    self.bump();
                    self.double_quoted(&mut word)?;
                }
                '\\' => {
                    if self.skip_continuation() {
                        continue;
                    }
                    let at = self.pos;
                    self.bump();
                    match self.bump() {
                        Some(escaped) => word.push_char(escaped),
                        None => {
                            return Err(CurlgenError::syntax(
                                at,
                                "backslash at end of input escapes nothing",
                            ))
                        }
                    }
                }
                '$' => self.dollar(&mut word, false)?,
                _ => {
                    self.bump();
                    word.push_char(c);
                }
            }
        }

        Ok(Some(Token {
            word,
            span: start..self.pos,
        }))
    }

    /// Contents of '...' after the opening quote
    fn single_quoted(&mut self, word: &mut Word) -> Result<()> {
        let open = self.pos - 1;
        let rest = &self.input[self.pos..];
        match rest.find('\'') {
            Some(end) => {
                word.push_str(&rest[..end]);
                self.pos += end + 1;
                Ok(())
            }
            None => Err(CurlgenError::syntax(open, "unterminated single quote")),
        }
    }

    /// Contents of "..." after the opening quote
    fn double_quoted(&mut self, word: &mut Word) -> Result<()> {
        let open = self.pos - 1;
        loop {
            let Some(c) = self.peek() else {
                return Err(CurlgenError::syntax(open, "unterminated double quote"));
            };
            match c {
                '"' => {
                    self.bump();
                    return Ok(());
                }
                '\\' => {
                    if self.skip_continuation() {
                        continue;
                    }
                    self.bump();
                    match self.peek() {
                        Some(escaped @ ('"' | '\\' | '$' | '`')) => {
                            self.bump();
                            word.push_char(escaped);
                        }
                        Some(_) => word.push_char('\\'),
                        None => {
                            return Err(CurlgenError::syntax(open, "unterminated double quote"))
                        }
                    }
                }
                '$' => self.dollar(word, true)?,
                _ => {
                    self.bump();
                    word.push_char(c);
                }
            }
        }
    }

    /// A `$` at the cursor: variable reference, ANSI-C string, or a plain dollar
    fn dollar(&mut self, word: &mut Word, in_double_quotes: bool) -> Result<()> {
        let at = self.pos;
        self.bump();
        match self.peek() {
            Some('{') => {
                self.bump();
                let rest = &self.input[self.pos..];
                let Some(end) = rest.find('}') else {
                    return Err(CurlgenError::syntax(at, "unterminated ${...} expansion"));
                };
                let name = &rest[..end];
                if !is_name(name) {
                    return Err(CurlgenError::syntax(
                        at,
                        format!("unsupported parameter expansion ${{{}}}", name),
                    ));
                }
                word.push_env(EnvRef {
                    name: name.to_string(),
                    braced: true,
                });
                self.pos += end + 1;
            }
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                let rest = &self.input[self.pos..];
                let len = rest
                    .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
                    .unwrap_or(rest.len());
                word.push_env(EnvRef::new(&rest[..len]));
                self.pos += len;
            }
            Some('\'') if !in_double_quotes => {
                self.bump();
                self.ansi_c_quoted(word, at)?;
            }
            Some('"') if !in_double_quotes => {
                // $"..." is a locale-translated string; translation is a no-op here
                self.bump();
                self.double_quoted(word)?;
            }
            _ => word.push_char('$'),
        }
        Ok(())
    }

    /// Contents of $'...' after the opening quote
    fn ansi_c_quoted(&mut self, word: &mut Word, open: usize) -> Result<()> {
        loop {
            let Some(c) = self.bump() else {
                return Err(CurlgenError::syntax(open, "unterminated $'...' string"));
            };
            match c {
                '\'' => return Ok(()),
                '\\' => {
                    let Some(escaped) = self.bump() else {
                        return Err(CurlgenError::syntax(open, "unterminated $'...' string"));
                    };
                    match escaped {
                        'n' => word.push_char('\n'),
                        't' => word.push_char('\t'),
                        'r' => word.push_char('\r'),
                        'a' => word.push_char('\x07'),
                        'b' => word.push_char('\x08'),
                        'e' | 'E' => word.push_char('\x1b'),
                        'f' => word.push_char('\x0c'),
                        'v' => word.push_char('\x0b'),
                        '\\' | '\'' | '"' | '?' => word.push_char(escaped),
                        'x' => {
                            let code = self.radix_digits(16, 2);
                            word.push_char(self.code_point(code, open)?);
                        }
                        'u' => {
                            let code = self.radix_digits(16, 4);
                            word.push_char(self.code_point(code, open)?);
                        }
                        'U' => {
                            let code = self.radix_digits(16, 8);
                            word.push_char(self.code_point(code, open)?);
                        }
                        '0'..='7' => {
                            let mut code = escaped.to_digit(8).unwrap_or(0);
                            for _ in 0..2 {
                                match self.peek().and_then(|d| d.to_digit(8)) {
                                    Some(d) => {
                                        self.bump();
                                        code = code * 8 + d;
                                    }
                                    None => break,
                                }
                            }
                            word.push_char(self.code_point(Some(code), open)?);
                        }
                        other => {
                            word.push_char('\\');
                            word.push_char(other);
                        }
                    }
                }
                _ => word.push_char(c),
            }
        }
    }

    fn radix_digits(&mut self, radix: u32, max: usize) -> Option<u32> {
        let mut value = None;
        for _ in 0..max {
            match self.peek().and_then(|d| d.to_digit(radix)) {
                Some(d) => {
                    self.bump();
                    value = Some(value.unwrap_or(0) * radix + d);
                }
                None => break,
            }
        }
        value
    }

    fn code_point(&self, code: Option<u32>, open: usize) -> Result<char> {
        code.and_then(char::from_u32).ok_or_else(|| {
            CurlgenError::syntax(open, "invalid escape sequence in $'...' string")
        })
    }
}

fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
